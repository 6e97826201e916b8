use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use speakpage_core::TabId;

use crate::decode::{decode_page, DecodeError};
use crate::PageSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("no page is open in tab {0}")]
    UnknownTab(TabId),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timed out loading the page")]
    Timeout,
    #[error("page too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },
    #[error("unsupported content type {0}")]
    UnsupportedContentType(String),
    #[error("network error: {0}")]
    Network(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Gives the dispatcher the document loaded in a tab.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn page(&self, tab_id: TabId) -> Result<PageSnapshot, PageError>;
}

/// Pages held in memory, keyed by tab.
#[derive(Debug, Default)]
pub struct StaticPageSource {
    pages: RwLock<HashMap<TabId, PageSnapshot>>,
}

impl StaticPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, tab_id: TabId, page: PageSnapshot) -> Self {
        self.insert(tab_id, page);
        self
    }

    pub fn insert(&self, tab_id: TabId, page: PageSnapshot) {
        if let Ok(mut pages) = self.pages.write() {
            pages.insert(tab_id, page);
        }
    }
}

#[async_trait::async_trait]
impl PageSource for StaticPageSource {
    async fn page(&self, tab_id: TabId) -> Result<PageSnapshot, PageError> {
        self.pages
            .read()
            .ok()
            .and_then(|pages| pages.get(&tab_id).cloned())
            .ok_or(PageError::UnknownTab(tab_id))
    }
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
        }
    }
}

/// Loads each tab's URL over HTTP whenever the tab is asked for, so the
/// text always reflects the page as it is now.
#[derive(Debug)]
pub struct HttpPageSource {
    client: reqwest::Client,
    settings: FetchSettings,
    tabs: RwLock<HashMap<TabId, String>>,
}

impl HttpPageSource {
    pub fn new(settings: FetchSettings) -> Result<Self, PageError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| PageError::Network(err.to_string()))?;
        Ok(Self {
            client,
            settings,
            tabs: RwLock::new(HashMap::new()),
        })
    }

    /// Point a tab at a URL, replacing whatever it showed before.
    pub fn open(&self, tab_id: TabId, url: impl Into<String>) -> Result<(), PageError> {
        let url = url.into();
        reqwest::Url::parse(&url).map_err(|err| PageError::InvalidUrl(err.to_string()))?;
        if let Ok(mut tabs) = self.tabs.write() {
            tabs.insert(tab_id, url);
        }
        Ok(())
    }

    fn url_for(&self, tab_id: TabId) -> Result<String, PageError> {
        self.tabs
            .read()
            .ok()
            .and_then(|tabs| tabs.get(&tab_id).cloned())
            .ok_or(PageError::UnknownTab(tab_id))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }
}

#[async_trait::async_trait]
impl PageSource for HttpPageSource {
    async fn page(&self, tab_id: TabId) -> Result<PageSnapshot, PageError> {
        let url = self.url_for(tab_id)?;
        let response = self.client.get(&url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::HttpStatus(status.as_u16()));
        }

        let max_bytes = self.settings.max_bytes;
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(PageError::TooLarge { max_bytes });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(PageError::UnsupportedContentType(ct.to_string()));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(PageError::TooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }

        let html = decode_page(&bytes, content_type.as_deref())?;
        Ok(PageSnapshot::new(final_url, html))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> PageError {
    if err.is_timeout() {
        PageError::Timeout
    } else {
        PageError::Network(err.to_string())
    }
}
