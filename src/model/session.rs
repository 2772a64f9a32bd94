use std::path::PathBuf;

use super::config::SessionConfig;

/// A fully loaded stride session
#[derive(Debug)]
pub struct Session {
    /// Root directory of the session (parent of `stride/`)
    pub root: PathBuf,
    /// Path to the `stride/` directory
    pub stride_dir: PathBuf,
    /// Parsed session.toml
    pub config: SessionConfig,
}

impl Session {
    /// Path of the persisted key-value state file
    pub fn state_path(&self) -> PathBuf {
        self.stride_dir.join(".state.json")
    }
}
