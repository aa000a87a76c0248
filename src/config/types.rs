use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::loading::LoadingBehavior;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Period of the auto-update timer in seconds (default: 30).
    #[serde(default = "default_autoupdate_period_secs")]
    pub autoupdate_period_secs: u64,
    /// Which intents the list generates on its own.
    #[serde(default)]
    pub behavior: LoadingBehavior,
}

fn default_autoupdate_period_secs() -> u64 {
    30
}

impl EngineConfig {
    pub fn autoupdate_period(&self) -> Duration {
        Duration::from_secs(self.autoupdate_period_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            autoupdate_period_secs: default_autoupdate_period_secs(),
            behavior: LoadingBehavior::default(),
        }
    }
}
