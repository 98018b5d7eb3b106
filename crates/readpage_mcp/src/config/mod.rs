use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for the reader, derived from CLI arguments.
///
/// Everything the reader needs is passed in here explicitly; the service
/// itself never consults the process environment.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub custom_user_agent: Option<String>,
    pub ignore_robots_txt: bool,
    pub proxy_url: Option<String>,
    pub request_timeout: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            custom_user_agent: None,
            ignore_robots_txt: false,
            proxy_url: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
