use derive_getters::Getters;
use rmcp::schemars;
use serde::Deserialize;

use crate::{errors::ReaderServerError, services::Validate};

/// Arguments for the read_webpage prompt
#[derive(Debug, Deserialize, schemars::JsonSchema, Getters)]
pub struct ReadPagePromptArgs {
    /// URL of the page to read
    url: String,
}

impl Validate for ReadPagePromptArgs {
    fn validate(&self) -> Result<(), ReaderServerError> {
        if self.url.is_empty() {
            return Err(ReaderServerError::InvalidParams {
                message: "url is required".to_string(),
            });
        }

        Ok(())
    }
}
