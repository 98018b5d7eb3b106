use url::Url;

/// Location of robots.txt for the origin that serves `url`.
pub fn robots_txt_url(url: &Url) -> String {
    let mut robots = url.clone();
    robots.set_path("/robots.txt");
    robots.set_query(None);
    robots.set_fragment(None);
    robots.to_string()
}

/// Whether `robots` permits `user_agent` to fetch `path`.
///
/// Implements grouped `User-agent` / `Allow` / `Disallow` matching: rules
/// from groups naming our agent take precedence over `*` groups, the
/// longest matching prefix wins, and `Allow` wins ties. Directive values
/// are matched as literal path prefixes; `*` and `$` pattern wildcards are
/// not interpreted.
pub fn robots_allows(robots: &str, user_agent: &str, path: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    let mut specific: Vec<(bool, String)> = Vec::new();
    let mut wildcard: Vec<(bool, String)> = Vec::new();

    let mut current_agents: Vec<String> = Vec::new();
    let mut last_was_agent = false;

    for raw_line in robots.lines() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let field = field.trim().to_ascii_lowercase();
        let value = value.trim();

        match field.as_str() {
            "user-agent" => {
                // Consecutive user-agent lines introduce one shared group.
                if !last_was_agent {
                    current_agents.clear();
                }
                current_agents.push(value.to_ascii_lowercase());
                last_was_agent = true;
            }
            "allow" | "disallow" => {
                last_was_agent = false;
                if value.is_empty() {
                    continue;
                }
                let rule = (field == "allow", value.to_string());
                for agent in &current_agents {
                    if agent == "*" {
                        wildcard.push(rule.clone());
                    } else if ua.contains(agent.as_str()) {
                        specific.push(rule.clone());
                    }
                }
            }
            _ => {
                last_was_agent = false;
            }
        }
    }

    let rules = if specific.is_empty() {
        &wildcard
    } else {
        &specific
    };

    let mut verdict = true;
    let mut best_len = 0;
    for (allow, prefix) in rules {
        if path.starts_with(prefix.as_str()) {
            let len = prefix.len();
            if len > best_len || (len == best_len && *allow) {
                best_len = len;
                verdict = *allow;
            }
        }
    }
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    const UA: &str = "mcp-server-readpage/0.1.0 (autonomous)";

    #[test]
    fn test_robots_url_from_page_url() {
        let url = Url::parse("https://example.com/blog/post?utm=1#top").unwrap();
        assert_eq!(robots_txt_url(&url), "https://example.com/robots.txt");
    }

    #[test]
    fn test_robots_url_keeps_the_port() {
        let url = Url::parse("http://example.com:8080/page").unwrap();
        assert_eq!(robots_txt_url(&url), "http://example.com:8080/robots.txt");
    }

    #[test]
    fn test_empty_robots_allows_everything() {
        assert!(robots_allows("", UA, "/anything"));
    }

    #[test]
    fn test_disallow_all() {
        let robots = "User-agent: *\nDisallow: /";
        assert!(!robots_allows(robots, UA, "/"));
        assert!(!robots_allows(robots, UA, "/news/today"));
    }

    #[test]
    fn test_disallow_is_a_path_prefix() {
        let robots = "User-agent: *\nDisallow: /private";
        assert!(!robots_allows(robots, UA, "/private/report"));
        assert!(robots_allows(robots, UA, "/public/report"));
    }

    #[test]
    fn test_longest_match_wins() {
        let robots = "User-agent: *\nDisallow: /docs\nAllow: /docs/public";
        assert!(!robots_allows(robots, UA, "/docs/internal"));
        assert!(robots_allows(robots, UA, "/docs/public/intro"));
    }

    #[test]
    fn test_allow_wins_ties() {
        let robots = "User-agent: *\nDisallow: /a\nAllow: /a";
        assert!(robots_allows(robots, UA, "/a/page"));
    }

    #[test]
    fn test_specific_agent_group_overrides_wildcard() {
        let robots = "User-agent: *\nDisallow: /\n\nUser-agent: readpage\nAllow: /";
        assert!(robots_allows(robots, UA, "/news"));
    }

    #[test]
    fn test_group_for_other_agent_is_ignored() {
        let robots = "User-agent: googlebot\nDisallow: /";
        assert!(robots_allows(robots, UA, "/news"));
        assert!(!robots_allows(robots, "Googlebot/2.1", "/news"));
    }

    #[test]
    fn test_consecutive_agent_lines_share_rules() {
        let robots = "User-agent: googlebot\nUser-agent: readpage\nDisallow: /drafts";
        assert!(!robots_allows(robots, UA, "/drafts/wip"));
        assert!(robots_allows(robots, UA, "/published"));
    }

    #[test]
    fn test_comments_and_unknown_directives_ignored() {
        let robots = "# site policy\nUser-agent: *\nCrawl-delay: 10\nDisallow: /tmp # scratch\nSitemap: https://example.com/sitemap.xml";
        assert!(!robots_allows(robots, UA, "/tmp/file"));
        assert!(robots_allows(robots, UA, "/home"));
    }

    #[test]
    fn test_empty_disallow_is_ignored() {
        let robots = "User-agent: *\nDisallow:";
        assert!(robots_allows(robots, UA, "/anything"));
    }
}
