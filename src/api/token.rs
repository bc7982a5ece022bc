//! Durable storage for the bearer token.
//!
//! Exactly one token is persisted, in a fixed file under the configured
//! data directory, so a later invocation can restore the session without
//! re-prompting for credentials.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const TOKEN_FILE: &str = "auth_token";

pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(TOKEN_FILE),
        }
    }

    /// Read the persisted token, if any. An unreadable or empty file is
    /// treated the same as no token at all.
    pub fn load(&self) -> Option<String> {
        let token = std::fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Persist the token, returning whether a write happened. When the
    /// identical token is already on disk (a restored session re-activating
    /// the token it was just loaded from), the file is left untouched.
    pub fn save(&self, token: &str) -> io::Result<bool> {
        if self.load().as_deref() == Some(token) {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        debug!("Persisted auth token to {}", self.path.display());
        Ok(true)
    }

    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed persisted auth token");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
