/// Configuration for the schedule import server
use crate::error::ScheduleImportError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Server settings, loaded from a JSON file.
///
/// Fields missing from the file keep their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub address: String,
    pub port: u16,
    /// Largest accepted schedule text, in bytes
    pub max_input_bytes: usize,
}

impl ServerConfig {
    /// Loads the configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(ServerConfig)` - Loaded configuration
    /// * `Err` - If the file can't be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self, ScheduleImportError> {
        let content = fs::read_to_string(path)?;
        let config: ServerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Returns the "address:port" string to bind.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// Checks that request text is non-empty and within `max_input_bytes`.
    pub fn check_input(&self, text: &str) -> Result<(), ScheduleImportError> {
        if text.trim().is_empty() {
            return Err(ScheduleImportError::EmptyInput);
        }

        if text.len() > self.max_input_bytes {
            return Err(ScheduleImportError::InputTooLarge {
                len: text.len(),
                max: self.max_input_bytes,
            });
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8088,
            max_input_bytes: 256 * 1024,
        }
    }
}
