//! pubdesk configuration.
//!
//! The home directory is resolved through a chain:
//!
//! 1. `PUBDESK_HOME` env var
//! 2. `~/.pubdesk`
//!
//! `<home>/config.toml` is optional. A missing file means defaults; an
//! unreadable or invalid one is an error.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::model::{MAX_COVER_BYTES, SortKey};
use crate::session::Account;

/// pubdesk configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Sort order used when `--sort` is not given.
    pub default_sort: SortKey,

    /// Characters of description shown before truncating.
    pub description_preview: usize,

    /// Largest cover image accepted, in bytes.
    pub max_cover_bytes: usize,

    /// Accounts allowed to sign in.
    pub accounts: Vec<Account>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_sort: SortKey::Newest,
            description_preview: 100,
            max_cover_bytes: MAX_COVER_BYTES,
            accounts: Vec::new(),
        }
    }
}

impl Config {
    /// Load `<home>/config.toml`, falling back to defaults when absent.
    pub fn load(home: &Path) -> Result<Self, String> {
        let path = home.join("config.toml");

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The pubdesk home directory.
    pub fn home() -> Option<PathBuf> {
        if let Ok(home) = env::var("PUBDESK_HOME")
            && !home.is_empty()
        {
            return Some(PathBuf::from(home));
        }
        dirs::home_dir().map(|h| h.join(".pubdesk"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.default_sort, SortKey::Newest);
        assert_eq!(config.description_preview, 100);
        assert_eq!(config.max_cover_bytes, 5 * 1024 * 1024);
        assert!(config.accounts.is_empty());
    }

    #[test]
    fn reads_kebab_case_keys_and_accounts() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            r#"
default-sort = "title"
description-preview = 40

[[accounts]]
email = "admin@example.com"
password-sha256 = "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3"
"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.default_sort, SortKey::Title);
        assert_eq!(config.description_preview, 40);
        assert_eq!(config.max_cover_bytes, MAX_COVER_BYTES);
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.accounts[0].email, "admin@example.com");
    }

    #[test]
    fn invalid_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "default-sort = \"sideways\"").unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.contains("config.toml"));
    }
}
