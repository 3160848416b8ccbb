use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer from the authoritative citation database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupOutcome {
    /// `true` if at least one matching opinion exists.
    pub found: bool,
    /// Raw matching records, as returned by the service.
    #[serde(default)]
    pub matches: Vec<Value>,
    /// Served from the local cache without contacting the service.
    #[serde(skip)]
    pub cached: bool,
}

impl LookupOutcome {
    pub fn found(matches: Vec<Value>) -> Self {
        Self {
            found: true,
            matches,
            cached: false,
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            matches: Vec::new(),
            cached: false,
        }
    }

    /// Marks the outcome as a cache hit.
    pub fn from_cache(mut self) -> Self {
        self.cached = true;
        self
    }
}
