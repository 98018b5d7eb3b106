use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use url::Url;

use crate::config::ReaderConfig;
use crate::errors::{ReaderResult, ReaderServerError};
use crate::utils::{build_client, extract_text_from_html, robots_allows, robots_txt_url};

const USER_AGENT_AUTONOMOUS: &str = concat!(
    "mcp-server-readpage/",
    env!("CARGO_PKG_VERSION"),
    " (autonomous)"
);
const USER_AGENT_MANUAL: &str = concat!(
    "mcp-server-readpage/",
    env!("CARGO_PKG_VERSION"),
    " (manual; user-requested)"
);

/// Core webpage reader: fetches a URL and reduces it to readable text.
///
/// Holds no mutable state; each call owns its whole
/// request/response/extraction lifecycle, so concurrent invocations are
/// safe.
#[derive(Clone)]
pub struct ReaderService {
    config: ReaderConfig,
}

impl ReaderService {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn get_user_agent_autonomous(&self) -> &str {
        self.config
            .custom_user_agent
            .as_deref()
            .unwrap_or(USER_AGENT_AUTONOMOUS)
    }

    pub fn get_user_agent_manual(&self) -> &str {
        self.config
            .custom_user_agent
            .as_deref()
            .unwrap_or(USER_AGENT_MANUAL)
    }

    fn parse_http_url(url: &str) -> ReaderResult<Url> {
        let parsed = Url::parse(url).map_err(|_| ReaderServerError::InvalidUrl {
            url: url.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ReaderServerError::InvalidUrl {
                url: url.to_string(),
            });
        }
        Ok(parsed)
    }

    /// Check robots.txt before an autonomous (tool-initiated) fetch.
    ///
    /// A missing robots.txt permits the fetch; 401/403 on robots.txt itself
    /// is taken as the site forbidding autonomous access entirely.
    pub async fn check_may_autonomously_fetch_url(&self, url: &str) -> ReaderResult<()> {
        if self.config.ignore_robots_txt {
            return Ok(());
        }

        let parsed = Self::parse_http_url(url)?;
        let robots_url = robots_txt_url(&parsed);
        let client = build_client(&self.config)?;

        let response = client
            .get(&robots_url)
            .header(USER_AGENT, self.get_user_agent_autonomous())
            .send()
            .await
            .map_err(|e| ReaderServerError::RobotsFetchError {
                url: robots_url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ReaderServerError::RobotsForbidden {
                url: url.to_string(),
                message: format!("robots.txt at {robots_url} returned {status}"),
            });
        }
        if status.is_client_error() {
            // No robots.txt; nothing restricts the fetch.
            return Ok(());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(_) => return Ok(()),
        };

        if !robots_allows(&body, self.get_user_agent_autonomous(), parsed.path()) {
            return Err(ReaderServerError::RobotsDisallowed {
                url: url.to_string(),
                message: format!(
                    "robots.txt at {robots_url} disallows autonomous fetching of this page; \
                     the user can still request it through the read_webpage prompt"
                ),
            });
        }

        Ok(())
    }

    /// Fetch `url` and return `(content, prefix)`, where `prefix` annotates
    /// payloads that were returned raw instead of simplified.
    pub async fn fetch_url(
        &self,
        url: &str,
        user_agent: &str,
        raw: bool,
    ) -> ReaderResult<(String, String)> {
        let parsed = Self::parse_http_url(url)?;
        let client = build_client(&self.config)?;

        tracing::debug!(%url, raw, "fetching page");

        let response = client
            .get(parsed)
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| ReaderServerError::FetchError {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(ReaderServerError::HttpError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|e| ReaderServerError::FetchError {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if raw {
            return Ok((body, String::new()));
        }

        if is_html_payload(&content_type, &body) {
            return Ok((extract_text_from_html(&body), String::new()));
        }

        if is_binary_media(&content_type) {
            return Err(ReaderServerError::ContentError {
                url: url.to_string(),
                message: format!("content type {content_type} carries no extractable text"),
            });
        }

        let label = if content_type.is_empty() {
            "unknown"
        } else {
            content_type.as_str()
        };
        Ok((
            body,
            format!(
                "Content type {label} cannot be simplified to plain text, but here is the raw content:\n"
            ),
        ))
    }
}

impl Default for ReaderService {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}

/// A payload counts as HTML when the server says so or when the body itself
/// leads with an HTML document.
fn is_html_payload(content_type: &str, body: &str) -> bool {
    if let Ok(mime) = content_type.parse::<mime::Mime>() {
        if mime.type_() == mime::TEXT && mime.subtype() == mime::HTML {
            return true;
        }
        if mime.subtype() == "xhtml" && mime.suffix() == Some(mime::XML) {
            return true;
        }
    }

    let head: String = body.chars().take(256).collect::<String>().to_ascii_lowercase();
    head.contains("<html") || head.contains("<!doctype html")
}

fn is_binary_media(content_type: &str) -> bool {
    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return false;
    };
    let top = mime.type_();
    top == mime::IMAGE
        || top == mime::AUDIO
        || top == mime::VIDEO
        || top == mime::FONT
        || (top == mime::APPLICATION && mime.subtype() == mime::OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agents_differ_by_mode() {
        let service = ReaderService::default();
        assert!(service.get_user_agent_autonomous().contains("autonomous"));
        assert!(service.get_user_agent_manual().contains("manual"));
    }

    #[test]
    fn test_custom_user_agent_overrides_both_modes() {
        let config = ReaderConfig {
            custom_user_agent: Some("research-pipeline/2.0".to_string()),
            ..ReaderConfig::default()
        };
        let service = ReaderService::new(config);

        assert_eq!(service.get_user_agent_autonomous(), "research-pipeline/2.0");
        assert_eq!(service.get_user_agent_manual(), "research-pipeline/2.0");
    }

    #[tokio::test]
    async fn test_fetch_url_rejects_malformed_url() {
        let service = ReaderService::default();
        let result = service
            .fetch_url("not a url", USER_AGENT_MANUAL, false)
            .await;

        assert!(matches!(result, Err(ReaderServerError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_fetch_url_rejects_non_http_scheme() {
        let service = ReaderService::default();
        let result = service
            .fetch_url("ftp://example.com/file.txt", USER_AGENT_MANUAL, false)
            .await;

        assert!(matches!(result, Err(ReaderServerError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_robots_check_rejects_malformed_url() {
        let service = ReaderService::default();
        let result = service.check_may_autonomously_fetch_url("nonsense").await;

        assert!(matches!(result, Err(ReaderServerError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_robots_check_skipped_when_disabled() {
        let config = ReaderConfig {
            ignore_robots_txt: true,
            ..ReaderConfig::default()
        };
        let service = ReaderService::new(config);

        // No network traffic happens when the check is disabled.
        let result = service
            .check_may_autonomously_fetch_url("https://example.invalid/page")
            .await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_html_payload_detection() {
        assert!(is_html_payload("text/html; charset=utf-8", ""));
        assert!(is_html_payload("application/xhtml+xml", ""));
        assert!(is_html_payload("", "  <!DOCTYPE html><html><body>hi</body></html>"));
        assert!(is_html_payload("text/plain", "<html><body>mislabeled</body></html>"));
        assert!(!is_html_payload("text/plain", "just words"));
    }

    #[test]
    fn test_binary_media_detection() {
        assert!(is_binary_media("image/png"));
        assert!(is_binary_media("audio/mpeg"));
        assert!(is_binary_media("application/octet-stream"));
        assert!(!is_binary_media("text/plain"));
        assert!(!is_binary_media("application/json"));
        assert!(!is_binary_media(""));
    }
}
