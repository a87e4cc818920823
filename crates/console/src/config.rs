//! Console configuration.

use hbnb_infra::StorageConfig;

/// Prompt shown by the interactive loop.
pub const PROMPT: &str = "(hbnb) ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub storage: StorageConfig,
    pub prompt: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            prompt: PROMPT.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            storage: StorageConfig::from_env(),
            ..Self::default()
        }
    }
}
