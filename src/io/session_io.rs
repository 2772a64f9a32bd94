use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::SessionConfig;
use crate::model::session::Session;

/// Error type for session I/O operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("not a stride session: no stride/ directory found")]
    NotASession,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse session.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the stride session by walking up from the given directory,
/// looking for a `stride/` subdirectory.
pub fn discover_session(start: &Path) -> Result<PathBuf, SessionError> {
    let mut current = start.to_path_buf();
    loop {
        let stride_dir = current.join("stride");
        if stride_dir.is_dir() && stride_dir.join("session.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(SessionError::NotASession);
        }
    }
}

/// Load a session from the given root directory.
pub fn load_session(root: &Path) -> Result<Session, SessionError> {
    let stride_dir = root.join("stride");
    if !stride_dir.is_dir() {
        return Err(SessionError::NotASession);
    }

    let config_path = stride_dir.join("session.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| SessionError::ReadError {
        path: config_path,
        source: e,
    })?;
    let config: SessionConfig = toml::from_str(&config_text)?;

    Ok(Session {
        root: root.to_path_buf(),
        stride_dir,
        config,
    })
}
