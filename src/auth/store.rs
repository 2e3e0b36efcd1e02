//! Persistent token storage
//!
//! The session token lives in two files kept in sync: the primary location
//! and a mirror still read by older releases. Reads prefer the primary and
//! fall back to the mirror.

use crate::config::AuthConfig;
use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TokenStore {
    primary: PathBuf,
    legacy: PathBuf,
}

impl TokenStore {
    pub fn new(primary: impl Into<PathBuf>, legacy: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            legacy: legacy.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.token_path, &config.legacy_token_path)
    }

    /// Read the stored token, preferring the primary location
    pub fn load(&self) -> Option<String> {
        read_token(&self.primary).or_else(|| read_token(&self.legacy))
    }

    /// Write the token to both locations
    ///
    /// The primary write must succeed; the mirror is best effort.
    pub fn save(&self, token: &str) -> Result<()> {
        write_token(&self.primary, token)?;
        if let Err(e) = write_token(&self.legacy, token) {
            tracing::warn!(path = %self.legacy.display(), error = %e, "failed to update token mirror");
        }
        Ok(())
    }

    /// Remove the token from both locations
    ///
    /// Safe to call repeatedly and when no token is stored.
    pub fn clear(&self) {
        remove_token(&self.primary);
        remove_token(&self.legacy);
    }
}

fn read_token(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let token = content.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn write_token(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, token)?;
    Ok(())
}

fn remove_token(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove token file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> TokenStore {
        TokenStore::new(
            dir.path().join("state").join("token"),
            dir.path().join("token_mirror"),
        )
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc.def.ghi"));

        // Both locations hold the token
        assert_eq!(
            fs::read_to_string(dir.path().join("token_mirror")).unwrap(),
            "abc.def.ghi"
        );
    }

    #[test]
    fn test_load_falls_back_to_mirror() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        fs::write(dir.path().join("token_mirror"), "from-mirror\n").unwrap();
        assert_eq!(store.load().as_deref(), Some("from-mirror"));
    }

    #[test]
    fn test_primary_wins_over_mirror() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        store.save("current").unwrap();
        fs::write(dir.path().join("token_mirror"), "stale").unwrap();
        assert_eq!(store.load().as_deref(), Some("current"));
    }

    #[test]
    fn test_empty_file_is_no_token() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        fs::write(dir.path().join("token_mirror"), "  \n").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        store.save("abc.def.ghi").unwrap();
        store.clear();
        assert_eq!(store.load(), None);

        // Clearing again with nothing stored is fine
        store.clear();
        assert_eq!(store.load(), None);
    }
}
