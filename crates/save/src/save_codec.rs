//! Encoding a `SaveRecord` into file bytes and back.
//!
//! Binary saves are bitcode behind a `GBSF` header. JSON saves are written as
//! plain pretty-printed documents unless compression is requested, in which
//! case the compressed JSON is also wrapped in a header. Decoding picks the
//! path from the header flags, or treats headerless bytes as plain JSON.
//! With a key, the stored payload is encrypted and always carries a header.

use crate::file_header::{self, UnwrapResult, FLAG_COMPRESSED, FLAG_ENCRYPTED, FLAG_JSON};
use crate::save_crypto::{decrypt_payload, encrypt_payload, SaveKey};
use crate::save_error::SaveError;
use crate::save_types::{SaveRecord, CURRENT_SAVE_VERSION};

/// On-disk payload encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveFormat {
    #[default]
    Binary,
    Json,
}

impl SaveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Binary => "bin",
            SaveFormat::Json => "json",
        }
    }

    /// Format written with the given file extension, if it is one of ours.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "bin" => Some(SaveFormat::Binary),
            "json" => Some(SaveFormat::Json),
            _ => None,
        }
    }
}

/// Encode a record into the bytes of a save file.
pub fn encode_record(
    record: &SaveRecord,
    format: SaveFormat,
    compress: bool,
) -> Result<Vec<u8>, SaveError> {
    encode_record_with_key(record, format, compress, None)
}

/// Like `encode_record`, encrypting the stored payload when `key` is set.
pub fn encode_record_with_key(
    record: &SaveRecord,
    format: SaveFormat,
    compress: bool,
    key: Option<&SaveKey>,
) -> Result<Vec<u8>, SaveError> {
    let (raw, mut flags) = match format {
        SaveFormat::Binary => (bitcode::encode(record), 0),
        SaveFormat::Json => {
            let json =
                serde_json::to_vec_pretty(record).map_err(|e| SaveError::Encode(e.to_string()))?;
            if !compress && key.is_none() {
                return Ok(json);
            }
            (json, FLAG_JSON)
        }
    };

    let raw_len = raw.len();
    if raw_len > u32::MAX as usize {
        return Err(SaveError::Encode(format!(
            "encoded record is {raw_len} bytes, larger than a save file can describe"
        )));
    }

    let payload = if compress {
        flags |= FLAG_COMPRESSED;
        lz4_flex::compress(&raw)
    } else {
        raw
    };
    let payload = match key {
        Some(key) => {
            flags |= FLAG_ENCRYPTED;
            encrypt_payload(key, &payload)?
        }
        None => payload,
    };
    Ok(file_header::wrap_with_header(&payload, flags, raw_len))
}

/// Decode the bytes of a save file, validating header, checksum and schema
/// version.
pub fn decode_record(bytes: &[u8]) -> Result<SaveRecord, SaveError> {
    decode_record_with_key(bytes, None)
}

/// Like `decode_record`. Encrypted files need `key`; unencrypted files
/// decode with or without one.
pub fn decode_record_with_key(
    bytes: &[u8],
    key: Option<&SaveKey>,
) -> Result<SaveRecord, SaveError> {
    let record = match file_header::unwrap_header(bytes).map_err(SaveError::Header)? {
        UnwrapResult::PlainJson(json) => serde_json::from_slice::<SaveRecord>(json)?,
        UnwrapResult::WithHeader { header, payload } => {
            let decrypted;
            let payload = if header.is_encrypted() {
                let key = key.ok_or_else(|| {
                    SaveError::Encryption("save is encrypted but no key is configured".into())
                })?;
                decrypted = decrypt_payload(key, payload)?;
                &decrypted[..]
            } else {
                payload
            };
            let decompressed;
            let raw = if header.is_compressed() {
                decompressed =
                    lz4_flex::decompress(payload, header.uncompressed_size as usize)?;
                &decompressed[..]
            } else {
                payload
            };
            if header.is_json() {
                serde_json::from_slice::<SaveRecord>(raw)?
            } else {
                bitcode::decode::<SaveRecord>(raw)?
            }
        }
    };
    check_version(record)
}

fn check_version(mut record: SaveRecord) -> Result<SaveRecord, SaveError> {
    if record.version > CURRENT_SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: CURRENT_SAVE_VERSION,
            found: record.version,
        });
    }
    // Hand-written JSON may omit the version.
    if record.version == 0 {
        record.version = CURRENT_SAVE_VERSION;
    }
    Ok(record)
}
