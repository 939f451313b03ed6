use serde::{Deserialize, Serialize};

/// Per-lookup options supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusOptions {
    /// Augment Java results with GameSpy4 query data (plugins, world name).
    #[serde(default)]
    pub query: bool,
}

impl StatusOptions {
    pub fn with_query(query: bool) -> Self {
        Self { query }
    }
}
