//! Site names, URLs and the "go to" fallback chain

use crate::command::normalizer::normalize;
use std::collections::BTreeMap;

pub const YOUTUBE_HOME: &str = "https://www.youtube.com";

/// Suffixes that make a bare name look like a domain
const KNOWN_TLDS: &[&str] = &["com", "org", "net", "io", "co", "ai"];

const SITES: &[(&str, &str)] = &[
    ("youtube", "https://youtube.com"),
    ("google", "https://google.com"),
    ("facebook", "https://facebook.com"),
    ("twitter", "https://twitter.com"),
    ("x", "https://x.com"),
    ("instagram", "https://instagram.com"),
    ("github", "https://github.com"),
    ("netflix", "https://netflix.com"),
    ("amazon", "https://amazon.com"),
    ("reddit", "https://reddit.com"),
    ("linkedin", "https://linkedin.com"),
    ("gmail", "https://gmail.com"),
    ("outlook", "https://outlook.com"),
    ("hotmail", "https://outlook.com"),
    ("maps", "https://maps.google.com"),
    ("google maps", "https://maps.google.com"),
    ("translate", "https://translate.google.com"),
    ("drive", "https://drive.google.com"),
    ("docs", "https://docs.google.com"),
    ("spotify", "https://open.spotify.com"),
    ("twitch", "https://twitch.tv"),
    ("tiktok", "https://tiktok.com"),
    ("whatsapp", "https://web.whatsapp.com"),
    ("telegram", "https://web.telegram.org"),
    ("discord", "https://discord.com/app"),
    ("chatgpt", "https://chat.openai.com"),
    ("claude", "https://claude.ai"),
    ("weather", "https://www.google.com/search?q=weather"),
    ("news", "https://news.google.com"),
    ("calendar", "https://calendar.google.com"),
];

pub fn youtube_search_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(query)
    )
}

pub fn google_search_url(query: &str) -> String {
    format!("https://www.google.com/search?q={}", urlencoding::encode(query))
}

/// Where a "go to" command ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebTarget {
    Url { site: String, url: String },
    /// Not recognizable as a site; hand the text to web search
    Search(String),
}

#[derive(Debug, Clone)]
pub struct WebsiteResolver {
    sites: BTreeMap<String, String>,
}

impl WebsiteResolver {
    /// Built-in sites plus `extra`, which wins on name clashes
    pub fn new(extra: &BTreeMap<String, String>) -> Self {
        let mut sites: BTreeMap<String, String> = SITES
            .iter()
            .map(|(name, url)| (name.to_string(), url.to_string()))
            .collect();
        for (name, url) in extra {
            sites.insert(normalize(name), url.clone());
        }
        Self { sites }
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.sites.get(name).map(String::as_str)
    }

    /// Known name, then literal URL, then domain-looking name, then search
    pub fn resolve(&self, site: &str) -> WebTarget {
        let url = if let Some(url) = self.lookup(site) {
            url.to_string()
        } else if site.starts_with("http://") || site.starts_with("https://") {
            site.to_string()
        } else if looks_like_domain(site) {
            format!("https://{}", site)
        } else {
            return WebTarget::Search(site.to_string());
        };

        WebTarget::Url {
            site: site.to_string(),
            url,
        }
    }
}

impl WebsiteResolver {
    /// `resolve` over the normalized `site`; a literal URL or bare domain is
    /// rebuilt from `original` so paths and queries keep their casing
    pub fn resolve_cased(&self, site: &str, original: &str) -> WebTarget {
        let target = self.resolve(site);
        if self.lookup(site).is_some() || original.to_lowercase() != site {
            return target;
        }
        match target {
            WebTarget::Url { .. } if site.starts_with("http://") || site.starts_with("https://") => {
                WebTarget::Url {
                    site: original.to_string(),
                    url: original.to_string(),
                }
            }
            WebTarget::Url { .. } => WebTarget::Url {
                site: original.to_string(),
                url: format!("https://{}", original),
            },
            search => search,
        }
    }
}

impl Default for WebsiteResolver {
    fn default() -> Self {
        Self::new(&BTreeMap::new())
    }
}

fn looks_like_domain(site: &str) -> bool {
    if site.is_empty() || site.contains(char::is_whitespace) {
        return false;
    }
    site.split('/')
        .next()
        .unwrap_or_default()
        .split('.')
        .skip(1)
        .any(|label| KNOWN_TLDS.contains(&label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_site() {
        let resolver = WebsiteResolver::default();
        assert_eq!(
            resolver.resolve("github"),
            WebTarget::Url {
                site: "github".into(),
                url: "https://github.com".into()
            }
        );
        assert_eq!(resolver.lookup("google maps"), Some("https://maps.google.com"));
    }

    #[test]
    fn test_literal_url_passes_through() {
        let resolver = WebsiteResolver::default();
        match resolver.resolve("https://docs.rs/regex") {
            WebTarget::Url { url, .. } => assert_eq!(url, "https://docs.rs/regex"),
            other => panic!("unexpected target: {:?}", other),
        }
    }

    #[test]
    fn test_cased_resolution_keeps_path_case() {
        let resolver = WebsiteResolver::default();
        assert_eq!(
            resolver.resolve_cased(
                "https://example.com/casesensitive/path",
                "https://Example.com/CaseSensitive/Path"
            ),
            WebTarget::Url {
                site: "https://Example.com/CaseSensitive/Path".into(),
                url: "https://Example.com/CaseSensitive/Path".into(),
            }
        );
        match resolver.resolve_cased("example.org/wiki/rust", "example.org/Wiki/Rust") {
            WebTarget::Url { url, .. } => assert_eq!(url, "https://example.org/Wiki/Rust"),
            other => panic!("unexpected target: {:?}", other),
        }
        // Known names and searches are unaffected by casing
        match resolver.resolve_cased("github", "GitHub") {
            WebTarget::Url { url, .. } => assert_eq!(url, "https://github.com"),
            other => panic!("unexpected target: {:?}", other),
        }
        assert_eq!(
            resolver.resolve_cased("foounknownsite123", "FooUnknownSite123"),
            WebTarget::Search("foounknownsite123".into())
        );
    }

    #[test]
    fn test_domain_heuristic() {
        let resolver = WebsiteResolver::default();
        match resolver.resolve("example.org") {
            WebTarget::Url { url, .. } => assert_eq!(url, "https://example.org"),
            other => panic!("unexpected target: {:?}", other),
        }
        match resolver.resolve("www.rust-lang.org/learn") {
            WebTarget::Url { url, .. } => assert_eq!(url, "https://www.rust-lang.org/learn"),
            other => panic!("unexpected target: {:?}", other),
        }
        assert!(!looks_like_domain("com"));
        assert!(!looks_like_domain("foo.company"));
        assert!(!looks_like_domain("my site.com"));
    }

    #[test]
    fn test_unrecognized_falls_back_to_search() {
        let resolver = WebsiteResolver::default();
        assert_eq!(
            resolver.resolve("foounknownsite123"),
            WebTarget::Search("foounknownsite123".into())
        );
    }

    #[test]
    fn test_configured_sites_override_builtins() {
        let mut extra = BTreeMap::new();
        extra.insert("GitHub".to_string(), "https://github.example.com".to_string());
        extra.insert("wiki".to_string(), "https://wiki.example.com".to_string());
        let resolver = WebsiteResolver::new(&extra);
        assert_eq!(resolver.lookup("github"), Some("https://github.example.com"));
        assert_eq!(resolver.lookup("wiki"), Some("https://wiki.example.com"));
    }

    #[test]
    fn test_search_urls_are_encoded() {
        assert_eq!(
            google_search_url("rust & c++"),
            "https://www.google.com/search?q=rust%20%26%20c%2B%2B"
        );
        assert_eq!(
            youtube_search_url("lofi beats"),
            "https://www.youtube.com/results?search_query=lofi%20beats"
        );
    }
}
