use speakpage_engine::{
    FetchSettings, HttpPageSource, PageError, PageSnapshot, PageSource, StaticPageSource,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn http_source_loads_and_decodes_tab_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"<html>caf\xe9</html>".to_vec(), "text/html; charset=ISO-8859-1"),
        )
        .mount(&server)
        .await;

    let source = HttpPageSource::new(FetchSettings::default()).unwrap();
    let url = format!("{}/story", server.uri());
    source.open(1, url.clone()).unwrap();

    let page = source.page(1).await.expect("page");
    assert_eq!(page.url, url);
    assert_eq!(page.html, "<html>café</html>");
}

#[tokio::test]
async fn http_source_maps_status_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpPageSource::new(FetchSettings::default()).unwrap();
    source.open(2, format!("{}/gone", server.uri())).unwrap();
    assert_eq!(source.page(2).await, Err(PageError::HttpStatus(404)));
}

#[tokio::test]
async fn http_source_rejects_non_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let source = HttpPageSource::new(FetchSettings::default()).unwrap();
    source.open(3, format!("{}/doc.pdf", server.uri())).unwrap();
    assert_eq!(
        source.page(3).await,
        Err(PageError::UnsupportedContentType("application/pdf".into()))
    );
}

#[tokio::test]
async fn http_source_enforces_size_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![b'a'; 64], "text/html"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let source = HttpPageSource::new(settings).unwrap();
    source.open(4, format!("{}/big", server.uri())).unwrap();
    assert_eq!(
        source.page(4).await,
        Err(PageError::TooLarge { max_bytes: 10 })
    );
}

#[tokio::test]
async fn unknown_tabs_and_bad_urls_are_errors() {
    let source = HttpPageSource::new(FetchSettings::default()).unwrap();
    assert_eq!(source.page(9).await, Err(PageError::UnknownTab(9)));
    assert!(matches!(
        source.open(9, "not a url"),
        Err(PageError::InvalidUrl(_))
    ));

    let statics = StaticPageSource::new();
    assert_eq!(statics.page(1).await, Err(PageError::UnknownTab(1)));
}

#[tokio::test]
async fn static_source_returns_latest_page() {
    let statics = StaticPageSource::new().with_page(1, PageSnapshot::new("https://a/", "<p>a</p>"));
    statics.insert(1, PageSnapshot::new("https://b/", "<p>b</p>"));
    assert_eq!(
        statics.page(1).await,
        Ok(PageSnapshot::new("https://b/", "<p>b</p>"))
    );
}
