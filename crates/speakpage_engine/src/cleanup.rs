use regex::Regex;

/// One pattern -> replacement step of the cleanup pass.
#[derive(Debug, Clone)]
pub struct CleanupRule {
    pattern: Regex,
    replacement: String,
}

impl CleanupRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Case-insensitive removal of every occurrence of the tokens, including
    /// inside longer words ("SubscribeNow" loses "Subscribe").
    pub fn strip_tokens(tokens: &[&str]) -> Result<Self, regex::Error> {
        Self::new(&format!("(?i)(?:{})", alternation(tokens)), "")
    }

    /// Like [`CleanupRule::strip_tokens`], but only whole words are removed.
    pub fn strip_words(tokens: &[&str]) -> Result<Self, regex::Error> {
        Self::new(&format!(r"(?i)\b(?:{})\b", alternation(tokens)), "")
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

fn alternation(tokens: &[&str]) -> String {
    tokens
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|")
}

const CHROME_TOKENS: &[&str] = &[
    "ADVERTISEMENT",
    "Advertisement",
    "Share",
    "Subscribe",
    "Sign In",
];

const NAVIGATION_TOKENS: &[&str] = &[
    "Home",
    "ePaper",
    "Menu",
    "Next",
    "Previous",
    "Topics",
    "All Rights Reserved",
    "Copyright",
];

// German, Spanish and French page chrome.
const LOCALIZED_TOKENS: &[&str] = &[
    "Anzeige",
    "Werbung",
    "Abonnieren",
    "Publicidad",
    "Suscríbete",
    "Compartir",
    "Publicité",
    "S'abonner",
    "Partager",
];

/// Ordered rule list applied to extracted text before whitespace is collapsed.
#[derive(Debug, Clone, Default)]
pub struct CleanupRules {
    rules: Vec<CleanupRule>,
}

impl CleanupRules {
    pub fn new(rules: Vec<CleanupRule>) -> Self {
        Self { rules }
    }

    /// The stock denylist for ads, navigation labels and share/subscribe prompts.
    pub fn default_denylist() -> Self {
        let rules = [CHROME_TOKENS, NAVIGATION_TOKENS, LOCALIZED_TOKENS]
            .iter()
            .filter_map(|tokens| match CleanupRule::strip_tokens(tokens) {
                Ok(rule) => Some(rule),
                Err(err) => {
                    engine_logging::engine_error!("Invalid built-in cleanup rule: {}", err);
                    None
                }
            })
            .collect();
        Self { rules }
    }

    pub fn push(&mut self, rule: CleanupRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order, then collapse whitespace.
    pub fn apply(&self, text: &str) -> String {
        let stripped = self
            .rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc));
        collapse_whitespace(&stripped)
    }
}

/// Replace every run of whitespace (newlines included) with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
