use reqwest::{Client, Proxy};

use crate::config::ReaderConfig;
use crate::errors::ReaderServerError;

/// Build a reqwest client honoring the configured timeout and proxy
pub fn build_client(config: &ReaderConfig) -> Result<Client, ReaderServerError> {
    let mut builder = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(proxy_url) = config.proxy_url.as_ref()
        && let Ok(proxy) = Proxy::all(proxy_url.as_str())
    {
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(|e| ReaderServerError::ClientError {
        message: e.to_string(),
    })
}
