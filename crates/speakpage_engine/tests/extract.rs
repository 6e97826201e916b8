use pretty_assertions::assert_eq;
use speakpage_engine::{
    ArticleExtractor, CleanupRule, CleanupRules, ContentSource, ExtractSettings, Extractor,
    PageSnapshot, MAX_SAFE_LENGTH,
};

const SENTENCE: &str = "The city council approved the new transit plan after a long debate. ";

fn paragraph(repeats: usize) -> String {
    SENTENCE.repeat(repeats)
}

fn page(url: &str, html: &str) -> PageSnapshot {
    PageSnapshot::new(url, html)
}

fn assert_clean(text: &str) {
    assert!(!text.contains("  "), "double space in {text:?}");
    assert!(!text.contains("\n\n"), "blank line in {text:?}");
    assert!(text.chars().count() <= MAX_SAFE_LENGTH);
}

#[test]
fn article_is_chosen_and_headline_prepended() {
    let para = paragraph(10);
    let html = format!(
        r#"<html><body>
        <nav>Home Menu Subscribe</nav>
        <h1>Transit plan approved</h1>
        <article><p>{para}</p><p>ADVERTISEMENT</p><p>{para}</p></article>
        <footer>Copyright 2024</footer>
        </body></html>"#
    );
    let result = ArticleExtractor::default().extract(&page("https://news.example.com/a", &html));

    assert_eq!(result.source, ContentSource::Selector("article".into()));
    assert_eq!(result.headline.as_deref(), Some("Transit plan approved"));
    assert!(result
        .text
        .starts_with("HEADLINE: Transit plan approved.\nThe city council approved"));
    assert!(!result.text.contains("ADVERTISEMENT"));
    assert!(!result.text.contains("Copyright"));
    assert_clean(&result.text);
}

#[test]
fn site_rule_wins_over_generic_containers() {
    let para_a = paragraph(9);
    let para_b = "Unrelated sidebar story about the weather in the hills. ".repeat(12);
    let html = format!(
        r#"<html><body><main>
        <div class="ssrcss-180b0v9-Stack">{para_a}</div>
        <aside>{para_b}</aside>
        </main></body></html>"#
    );
    let result = ArticleExtractor::default().extract(&page("https://www.bbc.com/news/x", &html));

    assert_eq!(
        result.source,
        ContentSource::Selector(".ssrcss-180b0v9-Stack".into())
    );
    assert!(!result.text.contains("sidebar"));
    assert!(result.headline.is_none());
    assert!(result.text.starts_with("The city council"));
}

#[test]
fn site_rule_ignored_on_other_hosts() {
    let para = paragraph(9);
    let html = format!(
        r#"<html><body><main><div class="ssrcss-180b0v9-Stack">{para}</div></main></body></html>"#
    );
    let result = ArticleExtractor::default().extract(&page("https://example.org/x", &html));
    assert_eq!(result.source, ContentSource::Selector("main".into()));
}

#[test]
fn short_candidates_fall_back_to_whole_page() {
    let para = paragraph(9);
    let html = format!(
        r#"<html><body>
        <h1>Notes</h1>
        <article>Too short to count.</article>
        <div>{para}</div>
        <script>var tracking = 1;</script>
        </body></html>"#
    );
    let result = ArticleExtractor::default().extract(&page("https://example.org/notes", &html));

    assert_eq!(result.source, ContentSource::WholePage);
    assert!(result
        .text
        .starts_with("HEADLINE: Notes.\nToo short to count. The city council"));
    assert_eq!(result.text.matches("Notes").count(), 1);
    assert!(!result.text.contains("tracking"));
    assert_clean(&result.text);
}

#[test]
fn body_length_leaves_out_headline_line() {
    let para = paragraph(10);
    let html = format!("<html><body><h1>Transit</h1><article>{para}</article></body></html>");
    let result = ArticleExtractor::default().extract(&page("https://example.org/b", &html));

    let body = para.trim();
    assert_eq!(result.body_chars, body.chars().count());
    assert_eq!(
        result.char_len(),
        "HEADLINE: Transit.\n".chars().count() + result.body_chars
    );
}

#[test]
fn tiny_page_without_heading_has_no_headline_line() {
    let result = ArticleExtractor::default()
        .extract(&page("https://example.org/", "<html><body><p>Too short.</p></body></html>"));
    assert_eq!(result.text, "Too short.");
    assert_eq!(result.body_chars, result.char_len());
    assert_eq!(result.source, ContentSource::WholePage);
}

#[test]
fn empty_page_yields_empty_text() {
    let empty = page("https://example.org/", "<html><body></body></html>");
    let result = ArticleExtractor::default().extract(&empty);
    assert!(result.is_empty());
    assert_eq!(result.char_len(), 0);
}

#[test]
fn long_article_is_truncated() {
    let para = paragraph(200);
    let html = format!("<html><body><h1>Long</h1><article>{para}</article></body></html>");
    let result = ArticleExtractor::default().extract(&page("https://example.org/long", &html));

    let len = result.char_len();
    assert!(len <= MAX_SAFE_LENGTH);
    assert!(len >= MAX_SAFE_LENGTH - 1, "unexpected length {len}");
    assert_clean(&result.text);
}

#[test]
fn extraction_is_idempotent() {
    let para = paragraph(10);
    let html = format!("<html><body><h2>Sub</h2><article>{para}</article></body></html>");
    let snapshot = page("https://example.org/same", &html);
    let extractor = ArticleExtractor::default();
    assert_eq!(extractor.extract(&snapshot), extractor.extract(&snapshot));
}

#[test]
fn hidden_subtrees_are_skipped() {
    let para = paragraph(10);
    let html = format!(
        r#"<html><body><article>
        <div hidden>SECRET</div>
        <span aria-hidden="true">ICON</span>
        <p style="display: none">GHOST</p>
        <style>.x {{ color: red }}</style>
        <p>{para}</p>
        </article></body></html>"#
    );
    let result = ArticleExtractor::default().extract(&page("https://example.org/h", &html));
    for hidden in ["SECRET", "ICON", "GHOST", "color"] {
        assert!(!result.text.contains(hidden), "{hidden} leaked");
    }
}

#[test]
fn custom_cleanup_rules_replace_denylist() {
    let para = paragraph(10);
    let html = format!("<html><body><article>Sponsored {para} Share</article></body></html>");
    let rules = CleanupRules::new(vec![CleanupRule::new("(?i)sponsored", "").unwrap()]);
    let extractor = ArticleExtractor::default().with_cleanup(rules);
    let result = extractor.extract(&page("https://example.org/c", &html));

    assert!(result.text.starts_with("The city council"));
    assert!(result.text.ends_with("debate. Share"));
}

#[test]
fn threshold_is_configurable() {
    let settings = ExtractSettings {
        max_len: 50,
        min_significant_len: 10,
    };
    let html = "<html><body><main>Short but enough text here.</main><p>other</p></body></html>";
    let result = ArticleExtractor::new(settings).extract(&page("https://example.org/t", html));
    assert_eq!(result.source, ContentSource::Selector("main".into()));
    assert_eq!(result.text, "Short but enough text here.");
}
