use serde::{Deserialize, Serialize};

/// Search endpoint used to seed the presence set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL; `/search` is appended.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".into(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}
