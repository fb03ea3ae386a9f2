// ---------------------------------------------------------------------------
// file_header – Save file header with magic bytes, version, and checksum
// ---------------------------------------------------------------------------
//
// Header format (28 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "GBSF"
//   [4..8]   Header format version (u32)
//   [8..12]  Flags (u32: bit 0 = lz4 compressed, bit 1 = JSON payload,
//            bit 2 = AES-256-GCM encrypted)
//   [12..20] Timestamp (Unix epoch seconds, u64)
//   [20..24] Uncompressed payload size (u32)
//   [24..28] xxHash32 checksum of the stored payload (everything after the header)
//
// Files that do not start with the magic are plain JSON saves.

use xxhash_rust::xxh32::xxh32;

/// Magic bytes identifying a binary save file.
pub const MAGIC: [u8; 4] = *b"GBSF";

pub const HEADER_SIZE: usize = 28;

/// Layout version of the header itself, independent of the record schema.
pub const HEADER_FORMAT_VERSION: u32 = 1;

pub const FLAG_COMPRESSED: u32 = 1 << 0;
pub const FLAG_JSON: u32 = 1 << 1;
pub const FLAG_ENCRYPTED: u32 = 1 << 2;

const XXHASH_SEED: u32 = 0;

/// Parsed file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags: u32,
    pub timestamp: u64,
    pub uncompressed_size: u32,
    pub checksum: u32,
}

impl FileHeader {
    /// Header for a stored `payload` that decodes to `uncompressed_size` bytes.
    pub fn new(payload: &[u8], flags: u32, uncompressed_size: usize) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            format_version: HEADER_FORMAT_VERSION,
            flags,
            timestamp,
            uncompressed_size: uncompressed_size as u32,
            checksum: xxh32(payload, XXHASH_SEED),
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }

    pub fn is_json(&self) -> bool {
        self.flags & FLAG_JSON != 0
    }

    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }
}

/// Whether `bytes` start with the binary save magic.
pub fn has_magic(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4] == MAGIC
}

/// Prepend a header to an already encoded (and possibly compressed) payload.
pub fn wrap_with_header(payload: &[u8], flags: u32, uncompressed_size: usize) -> Vec<u8> {
    let header = FileHeader::new(payload, flags, uncompressed_size);
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());

    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&header.format_version.to_le_bytes());
    out.extend_from_slice(&header.flags.to_le_bytes());
    out.extend_from_slice(&header.timestamp.to_le_bytes());
    out.extend_from_slice(&header.uncompressed_size.to_le_bytes());
    out.extend_from_slice(&header.checksum.to_le_bytes());

    out.extend_from_slice(payload);
    out
}

/// Result of unwrapping a save file's bytes.
pub enum UnwrapResult<'a> {
    /// File has a valid header; the stored payload follows.
    WithHeader {
        header: FileHeader,
        payload: &'a [u8],
    },
    /// No magic: the whole buffer is a plain JSON document.
    PlainJson(&'a [u8]),
}

/// Parse and validate the file header from raw bytes.
///
/// # Errors
///
/// Returns an error if the magic is present but the file is too short, the
/// header format version is from a newer build, or the checksum does not
/// match.
pub fn unwrap_header(bytes: &[u8]) -> Result<UnwrapResult<'_>, String> {
    if !has_magic(bytes) {
        return Ok(UnwrapResult::PlainJson(bytes));
    }

    if bytes.len() < HEADER_SIZE {
        return Err(format!(
            "file has GBSF magic bytes but is too short ({} bytes, \
             need at least {} for header)",
            bytes.len(),
            HEADER_SIZE
        ));
    }

    let format_version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let flags = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    let timestamp = u64::from_le_bytes([
        bytes[12], bytes[13], bytes[14], bytes[15], bytes[16], bytes[17], bytes[18], bytes[19],
    ]);
    let uncompressed_size = u32::from_le_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    let checksum = u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);

    if format_version > HEADER_FORMAT_VERSION {
        return Err(format!(
            "file uses header format version {}, but this build only supports \
             up to version {}",
            format_version, HEADER_FORMAT_VERSION,
        ));
    }

    let payload = &bytes[HEADER_SIZE..];

    let computed = xxh32(payload, XXHASH_SEED);
    if computed != checksum {
        return Err(format!(
            "file is corrupted: checksum mismatch \
             (expected {:#010X}, got {:#010X})",
            checksum, computed,
        ));
    }

    Ok(UnwrapResult::WithHeader {
        header: FileHeader {
            format_version,
            flags,
            timestamp,
            uncompressed_size,
            checksum,
        },
        payload,
    })
}
