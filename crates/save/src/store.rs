//! Save files on disk.
//!
//! Saves live in one directory as `savegame_<unix_millis>.<ext>`. The store
//! remembers the file last written or read so an overwriting save replaces it
//! instead of starting a new file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;

use crate::atomic_write::{atomic_write, TMP_SUFFIX};
use crate::save_codec::{decode_record_with_key, encode_record_with_key, SaveFormat};
use crate::save_crypto::SaveKey;
use crate::save_error::SaveError;
use crate::save_types::SaveRecord;

pub const DEFAULT_SAVE_DIR: &str = "saves";
pub const SAVE_FILE_PREFIX: &str = "savegame_";

/// A save file found in the store's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFileInfo {
    pub name: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

#[derive(Resource, Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
    pub format: SaveFormat,
    /// lz4-compress the payload.
    pub compress: bool,
    /// Encrypt written files and decrypt encrypted ones.
    encryption: Option<SaveKey>,
    current: Option<PathBuf>,
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DIR)
    }
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            format: SaveFormat::default(),
            compress: true,
            encryption: None,
            current: None,
        }
    }

    pub fn with_format(mut self, format: SaveFormat, compress: bool) -> Self {
        self.format = format;
        self.compress = compress;
        self
    }

    pub fn with_encryption(mut self, key: SaveKey) -> Self {
        self.encryption = Some(key);
        self
    }

    pub fn is_encrypted(&self) -> bool {
        self.encryption.is_some()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File the next overwriting save goes to.
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Encode `record` and write it atomically. With `overwrite` and a
    /// current file, that file is replaced; otherwise a new file is created.
    /// Nothing is written if encoding fails.
    pub fn write(&mut self, record: &SaveRecord, overwrite: bool) -> Result<PathBuf, SaveError> {
        let bytes = encode_record_with_key(record, self.format, self.compress, self.encryption.as_ref())?;
        let path = match (&self.current, overwrite) {
            (Some(current), true) => current.clone(),
            _ => self.fresh_path(),
        };
        atomic_write(&path, &bytes)?;
        info!(
            "Saved {} objects to {} ({} bytes)",
            record.object_count(),
            path.display(),
            bytes.len()
        );
        self.current = Some(path.clone());
        Ok(path)
    }

    /// Read the save file `name` from the store's directory and make it the
    /// current file.
    pub fn read(&mut self, name: &str) -> Result<SaveRecord, SaveError> {
        let path = self.dir.join(name);
        let bytes = fs::read(&path)?;
        let record = decode_record_with_key(&bytes, self.encryption.as_ref())?;
        info!(
            "Read {} objects from {}",
            record.object_count(),
            path.display()
        );
        self.current = Some(path);
        Ok(record)
    }

    /// Save files in the directory, newest first. A missing directory has no
    /// saves.
    pub fn list_saves(&self) -> Result<Vec<SaveFileInfo>, SaveError> {
        if !self.dir.is_dir() {
            debug!("Save directory {} does not exist", self.dir.display());
            return Ok(Vec::new());
        }

        let mut saves = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !is_save_file(&path) {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned)
            else {
                continue;
            };
            saves.push(SaveFileInfo {
                name,
                path,
                modified: metadata.modified().unwrap_or(UNIX_EPOCH),
            });
        }
        saves.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(saves)
    }

    pub fn read_most_recent(&mut self) -> Result<SaveRecord, SaveError> {
        let newest = self
            .list_saves()?
            .into_iter()
            .next()
            .ok_or(SaveError::NoSaveFiles)?;
        self.read(&newest.name)
    }

    /// Forget the current file so the next save starts a new one.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    fn fresh_path(&self) -> PathBuf {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let ext = self.format.extension();
        let mut path = self.dir.join(format!("{SAVE_FILE_PREFIX}{millis}.{ext}"));
        let mut suffix = 1;
        while path.exists() {
            path = self
                .dir
                .join(format!("{SAVE_FILE_PREFIX}{millis}_{suffix}.{ext}"));
            suffix += 1;
        }
        path
    }
}

fn is_save_file(path: &Path) -> bool {
    let named = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(SAVE_FILE_PREFIX));
    let ext = path.extension().and_then(|e| e.to_str());
    named && ext != Some(TMP_SUFFIX) && ext.and_then(SaveFormat::from_extension).is_some()
}
