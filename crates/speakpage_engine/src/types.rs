/// The page a tab currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub url: String,
    pub html: String,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// Where the article body came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// First candidate selector whose text passed the significance threshold.
    Selector(String),
    /// No candidate qualified; the whole page text was used.
    WholePage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Bounded plain text, headline line first when one was found. May be empty.
    pub text: String,
    /// Characters of `text` after the headline line.
    pub body_chars: usize,
    pub headline: Option<String>,
    pub source: ContentSource,
}

impl ExtractionResult {
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
