// ---------------------------------------------------------------------------
// SaveError: error types for save/load operations
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while writing or reading a save file.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// Encoding the record failed.
    Encode(String),
    /// Decoding the payload failed (corrupt or invalid save data).
    Decode(String),
    /// The file header is malformed, from a newer build, or fails its checksum.
    Header(String),
    /// Record schema version is newer than this build supports.
    VersionMismatch { expected_max: u32, found: u32 },
    /// The save directory holds no save files.
    NoSaveFiles,
    /// Bad key, missing key for an encrypted file, or a payload that fails
    /// authentication.
    Encryption(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::Header(msg) => write!(f, "Invalid save header: {msg}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: save is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::NoSaveFiles => write!(f, "No save files found"),
            SaveError::Encryption(msg) => write!(f, "Encryption error: {msg}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            SaveError::Encode(e.to_string())
        } else {
            SaveError::Decode(e.to_string())
        }
    }
}

impl From<lz4_flex::block::DecompressError> for SaveError {
    fn from(e: lz4_flex::block::DecompressError) -> Self {
        SaveError::Decode(format!("decompression failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_error_display_io() {
        let err = SaveError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let msg = format!("{err}");
        assert!(msg.contains("I/O error"), "got: {msg}");
        assert!(msg.contains("file not found"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_header() {
        let err = SaveError::Header("checksum mismatch".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("Invalid save header"), "got: {msg}");
        assert!(msg.contains("checksum mismatch"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_version_mismatch() {
        let err = SaveError::VersionMismatch {
            expected_max: 1,
            found: 7,
        };
        let msg = format!("{err}");
        assert!(msg.contains("v7"), "got: {msg}");
        assert!(msg.contains("v1"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_no_save_files() {
        assert_eq!(SaveError::NoSaveFiles.to_string(), "No save files found");
    }

    #[test]
    fn test_save_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let save_err: SaveError = io_err.into();
        assert!(matches!(save_err, SaveError::Io(_)));
        assert!(std::error::Error::source(&save_err).is_some());
    }

    #[test]
    fn test_save_error_from_json_syntax_is_decode() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let save_err: SaveError = json_err.into();
        assert!(matches!(save_err, SaveError::Decode(_)), "{save_err:?}");
    }
}
