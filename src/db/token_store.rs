// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential persistence.
//!
//! The credential is a single JSON document that is replaced wholesale on
//! every refresh. [`FileTokenStore`] writes it through a temporary file in the
//! same directory and renames it into place, so readers see either the old or
//! the new record and never a truncated one.

use crate::error::{AppError, Result};
use crate::models::Credential;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Load/save access to the persisted credential.
pub trait TokenStore {
    /// Load the stored credential. Fails with [`AppError::NotFound`] if none exists.
    fn load(&self) -> Result<Credential>;

    /// Replace the stored credential.
    fn save(&self, credential: &Credential) -> Result<()>;
}

/// Credential stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> AppError {
        AppError::Storage(format!(
            "Failed to {} {}: {}",
            action,
            self.path.display(),
            err
        ))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Credential> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::error!(path = %self.path.display(), "Token file does not exist");
                return Err(AppError::NotFound(format!(
                    "Token file {} does not exist",
                    self.path.display()
                )));
            }
            Err(e) => return Err(self.storage_error("read", e)),
        };

        let credential: Credential = serde_json::from_str(&json)
            .map_err(|e| AppError::Parse(format!("{}: {}", self.path.display(), e)))?;

        tracing::info!(
            expires_at = %credential.expires_at_utc(),
            "Stored token loaded"
        );
        Ok(credential)
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        let json = serde_json::to_string_pretty(credential)
            .map_err(|e| self.storage_error("serialize", e))?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| self.storage_error("stage", e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| self.storage_error("write", e))?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))
                .map_err(|e| self.storage_error("chmod", e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| self.storage_error("replace", e.error))?;

        tracing::debug!(path = %self.path.display(), "Token file written");
        Ok(())
    }
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    credential: Mutex<Option<Credential>>,
    saves: Mutex<u32>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
            saves: Mutex::new(0),
        }
    }

    /// Current stored credential, if any.
    pub fn get(&self) -> Option<Credential> {
        self.credential
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> u32 {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Credential> {
        self.get()
            .ok_or_else(|| AppError::NotFound("No credential in memory store".to_string()))
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        let mut slot = self
            .credential
            .lock()
            .map_err(|_| AppError::Storage("memory store poisoned".to_string()))?;
        *slot = Some(credential.clone());
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn credential() -> Credential {
        Credential::new("access123", "refresh123", 1_700_000_000)
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("strava_tokens.json"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("strava_tokens.json"));

        store.save(&credential()).unwrap();
        assert_eq!(store.load().unwrap(), credential());
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("strava_tokens.json"));

        store.save(&credential()).unwrap();
        let newer = Credential::new("access456", "refresh456", 1_700_021_600);
        store.save(&newer).unwrap();

        assert_eq!(store.load().unwrap(), newer);
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_save_preserves_extra_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("strava_tokens.json");
        fs::write(
            &path,
            r#"{"token_type":"Bearer","access_token":"a","refresh_token":"r","expires_at":5,"expires_in":21600}"#,
        )
        .unwrap();
        let store = FileTokenStore::new(&path);

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["token_type"], "Bearer");
        assert_eq!(raw["expires_in"], 21600);
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("strava_tokens.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileTokenStore::new(&path).load().unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
        assert_eq!(err.exit_code(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("strava_tokens.json");
        FileTokenStore::new(&path).save(&credential()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(matches!(store.load(), Err(AppError::NotFound(_))));

        store.save(&credential()).unwrap();
        assert_eq!(store.load().unwrap(), credential());
        assert_eq!(store.save_count(), 1);
    }
}
