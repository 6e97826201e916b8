/// Body selectors to try first when the page host contains `host_fragment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRule {
    pub host_fragment: String,
    pub selectors: Vec<String>,
}

impl SiteRule {
    pub fn new(host_fragment: impl Into<String>, selectors: &[&str]) -> Self {
        Self {
            host_fragment: host_fragment.into(),
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn matches(&self, host: &str) -> bool {
        host.to_ascii_lowercase().contains(&self.host_fragment)
    }
}

pub fn default_site_rules() -> Vec<SiteRule> {
    vec![
        SiteRule::new("indianexpress.com", &[".full-details", ".story-body"]),
        SiteRule::new(
            "bbc.com",
            &["[data-component=\"text-block\"]", ".ssrcss-180b0v9-Stack"],
        ),
        SiteRule::new("timesofindia.indiatimes.com", &[".main-article-content"]),
    ]
}

/// Generic containers, most specific first.
pub const GENERIC_SELECTORS: &[&str] = &[
    "article",
    ".entry-content",
    ".post-content",
    ".article-body",
    "main",
    "[role=\"main\"]",
    "#content",
];
