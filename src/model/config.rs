use serde::{Deserialize, Serialize};

use crate::ops::nav::NavPolicy;

/// Configuration from session.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub session: SessionInfo,
    #[serde(default)]
    pub nav: NavConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Edge policy for next/prev. Bounded stops at the ends and reports it;
    /// wraparound cycles to the opposite end.
    #[serde(default = "default_policy")]
    pub policy: NavPolicy,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            policy: NavPolicy::Bounded,
        }
    }
}

/// Default: see the session.toml template in cli/handlers/init.rs
fn default_policy() -> NavPolicy {
    NavPolicy::Bounded
}
