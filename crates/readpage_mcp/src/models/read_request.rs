use derive_getters::Getters;
use rmcp::schemars;
use serde::Deserialize;

use crate::{errors::ReaderServerError, services::Validate};

fn default_max_length() -> usize {
    5000
}

/// Parameters for reading a webpage
#[derive(Debug, Deserialize, schemars::JsonSchema, Getters)]
pub struct ReadPageRequest {
    /// URL of the page to read
    url: String,
    /// Maximum number of characters to return
    #[serde(default = "default_max_length")]
    max_length: usize,
    /// Start returning output at this character offset, useful when a
    /// previous read was truncated and more of the page is required
    #[serde(default)]
    start_index: usize,
    /// Return the page exactly as served, without reducing it to text
    #[serde(default)]
    raw: bool,
}

impl ReadPageRequest {
    #[cfg(test)]
    pub const INVALID: Self = Self {
        url: String::new(),
        max_length: 0,
        start_index: 0,
        raw: false,
    };
}

impl Validate for ReadPageRequest {
    fn validate(&self) -> Result<(), ReaderServerError> {
        if self.url.is_empty() {
            return Err(ReaderServerError::InvalidParams {
                message: "url is required".to_string(),
            });
        }

        if self.max_length == 0 || self.max_length > 1_000_000 {
            return Err(ReaderServerError::InvalidParams {
                message: "max_length must be between 1 and 1,000,000".to_string(),
            });
        }

        Ok(())
    }
}
