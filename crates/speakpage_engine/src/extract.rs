use ego_tree::{NodeId, NodeRef};
use engine_logging::{engine_debug, engine_warn};
use scraper::node::{Element, Node};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::cleanup::{collapse_whitespace, CleanupRules};
use crate::sites::{default_site_rules, SiteRule, GENERIC_SELECTORS};
use crate::{ContentSource, ExtractionResult, PageSnapshot};

/// Upper bound on extracted text, in characters.
pub const MAX_SAFE_LENGTH: usize = 4_000;
/// A candidate must carry more visible characters than this to be chosen.
pub const MIN_SIGNIFICANT_LENGTH: usize = 500;

/// Shared threshold test for candidate bodies and dispatched article bodies.
pub fn is_significant(chars: usize, min_len: usize) -> bool {
    chars > min_len
}

const HEADLINE_LABEL: &str = "HEADLINE: ";

const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "canvas", "iframe", "object", "head",
];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

pub trait Extractor: Send + Sync {
    fn extract(&self, page: &PageSnapshot) -> ExtractionResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSettings {
    pub max_len: usize,
    pub min_significant_len: usize,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            max_len: MAX_SAFE_LENGTH,
            min_significant_len: MIN_SIGNIFICANT_LENGTH,
        }
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    css: String,
    selector: Selector,
}

#[derive(Debug, Clone)]
struct CompiledSiteRule {
    rule: SiteRule,
    candidates: Vec<Candidate>,
}

/// Article text extractor:
/// - headline from the first `h1`, else `h2`
/// - body from the first candidate (site rules, then generic containers)
///   whose visible text passes the significance threshold
/// - whole-page text when no candidate qualifies
/// - cleanup rules, whitespace collapse, truncation.
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    settings: ExtractSettings,
    site_rules: Vec<CompiledSiteRule>,
    generic: Vec<Candidate>,
    cleanup: CleanupRules,
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new(ExtractSettings::default())
    }
}

impl ArticleExtractor {
    pub fn new(settings: ExtractSettings) -> Self {
        let mut extractor = Self {
            settings,
            site_rules: Vec::new(),
            generic: GENERIC_SELECTORS.iter().filter_map(|css| compile(css)).collect(),
            cleanup: CleanupRules::default_denylist(),
        };
        for rule in default_site_rules() {
            extractor.add_site_rule(rule);
        }
        extractor
    }

    pub fn with_cleanup(mut self, cleanup: CleanupRules) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Site rules added later are tried after earlier ones for the same host.
    pub fn add_site_rule(&mut self, rule: SiteRule) {
        let candidates = rule.selectors.iter().filter_map(|css| compile(css)).collect();
        self.site_rules.push(CompiledSiteRule { rule, candidates });
    }

    pub fn settings(&self) -> ExtractSettings {
        self.settings
    }

    fn candidates_for<'a>(
        &'a self,
        host: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Candidate> {
        let site = self
            .site_rules
            .iter()
            .filter(move |compiled| host.is_some_and(|h| compiled.rule.matches(h)))
            .flat_map(|compiled| compiled.candidates.iter());
        site.chain(self.generic.iter())
    }
}

impl Extractor for ArticleExtractor {
    fn extract(&self, page: &PageSnapshot) -> ExtractionResult {
        let doc = Html::parse_document(&page.html);
        let host = Url::parse(&page.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string));

        let headline = find_headline(&doc);
        let headline_node = headline.as_ref().map(|(id, _)| *id);
        let headline = headline.map(|(_, text)| text);

        let chosen = self.candidates_for(host.as_deref()).find_map(|candidate| {
            let element = doc.select(&candidate.selector).next()?;
            let raw = visible_text(element);
            let significant = collapse_whitespace(&raw).chars().count();
            is_significant(significant, self.settings.min_significant_len)
                .then(|| (candidate.css.clone(), raw))
        });

        let (source, raw_body) = match chosen {
            Some((css, raw)) => (ContentSource::Selector(css), raw),
            None => (ContentSource::WholePage, whole_page_text(&doc, headline_node)),
        };
        engine_debug!("Extracting {} from {:?}", page.url, source);

        let body = self.cleanup.apply(&raw_body);
        let labelled = !body.is_empty() && headline.is_some();
        let combined = match headline.as_deref() {
            Some(headline) if labelled => format!("{}\n{body}", headline_line(headline)),
            _ => body,
        };

        let text = truncate_chars(&combined, self.settings.max_len).trim().to_string();
        let body_chars = if labelled {
            text.split_once('\n').map_or(0, |(_, body)| body.chars().count())
        } else {
            text.chars().count()
        };
        ExtractionResult {
            text,
            body_chars,
            headline,
            source,
        }
    }
}

fn compile(css: &str) -> Option<Candidate> {
    match Selector::parse(css) {
        Ok(selector) => Some(Candidate {
            css: css.to_string(),
            selector,
        }),
        Err(err) => {
            engine_warn!("Skipping invalid selector {:?}: {:?}", css, err);
            None
        }
    }
}

fn find_headline(doc: &Html) -> Option<(NodeId, String)> {
    ["h1", "h2"].iter().find_map(|tag| {
        let selector = Selector::parse(tag).ok()?;
        let element = doc.select(&selector).next()?;
        let text = collapse_whitespace(&visible_text(element));
        (!text.is_empty()).then(|| (element.id(), text))
    })
}

fn headline_line(headline: &str) -> String {
    if headline.ends_with(['.', '!', '?']) {
        format!("{HEADLINE_LABEL}{headline}")
    } else {
        format!("{HEADLINE_LABEL}{headline}.")
    }
}

/// The headline element is left out; it is already on the label line.
fn whole_page_text(doc: &Html, headline: Option<NodeId>) -> String {
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| doc.select(&selector).next());
    let mut out = String::new();
    collect_text(*body.unwrap_or_else(|| doc.root_element()), headline, &mut out);
    out
}

/// Rendered-ish text of an element: hidden subtrees skipped, block
/// boundaries turned into newlines.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(*element, None, &mut out);
    out
}

fn collect_text(node: NodeRef<'_, Node>, skip: Option<NodeId>, out: &mut String) {
    if Some(node.id()) == skip {
        return;
    }
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            if is_hidden(element) {
                return;
            }
            let block = BLOCK_TAGS.contains(&element.name());
            if block {
                out.push('\n');
            }
            for child in node.children() {
                collect_text(child, skip, out);
            }
            if block {
                out.push('\n');
            }
        }
        _ => {
            for child in node.children() {
                collect_text(child, skip, out);
            }
        }
    }
}

fn is_hidden(element: &Element) -> bool {
    if SKIPPED_TAGS.contains(&element.name()) || element.attr("hidden").is_some() {
        return true;
    }
    if element.attr("aria-hidden") == Some("true") {
        return true;
    }
    element.attr("style").is_some_and(|style| {
        let compact: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        compact.contains("display:none") || compact.contains("visibility:hidden")
    })
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
