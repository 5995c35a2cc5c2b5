/// Fetch behaviour against a local HTTP server.
use axum::{http::StatusCode, response::Html, routing::get, Router};
use seo_quality::config::AnalyzerConfig;
use seo_quality::scraping::{HttpFetcher, PageFetcher};
use seo_quality::tools::analyze_url;
use seo_quality::{AnalysisError, AppState, QualityLabel, SimilarityOutcome};
use std::sync::Arc;

const ARTICLE: &str = "<html><head><title> Local   Article </title></head><body>\
    <nav><p>Menu</p></nav>\
    <article><p>Ownership keeps memory safe.</p><p>Borrowing is checked at compile time.</p></article>\
    </body></html>";

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/article", get(|| async { Html(ARTICLE) }))
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "gone") }))
        .route("/broken", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                Html(ARTICLE)
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(5, "fetch-test/1.0").unwrap()
}

#[tokio::test]
async fn fetch_returns_body_on_success() {
    let base = spawn_server().await;
    let html = fetcher().fetch(&format!("{}/article", base)).await.unwrap();
    assert!(html.contains("<article>"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let base = spawn_server().await;
    let err = fetcher().fetch(&format!("{}/missing", base)).await.unwrap_err();
    assert!(matches!(err, AnalysisError::HttpStatus { status: 404, .. }));

    let err = fetcher().fetch(&format!("{}/broken", base)).await.unwrap_err();
    assert!(matches!(err, AnalysisError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn slow_response_times_out_with_configured_limit() {
    let base = spawn_server().await;
    let fetcher = HttpFetcher::new(1, "fetch-test/1.0").unwrap();
    let err = fetcher.fetch(&format!("{}/slow", base)).await.unwrap_err();
    assert!(
        matches!(err, AnalysisError::Timeout { secs: 1, .. }),
        "unexpected error: {:?}",
        err
    );
}

#[tokio::test]
async fn analyze_url_extracts_and_scores_fetched_page() {
    let base = spawn_server().await;
    let state = AppState::new(Arc::new(fetcher()), &AnalyzerConfig::default())
        .with_dataset(Some(std::env::temp_dir().join("seo-quality-no-dataset.csv")));

    let report = analyze_url(&state, &format!("  {}/article  ", base)).await.unwrap();
    let doc = &report.document;
    assert_eq!(doc.url(), Some(format!("{}/article", base).as_str()));
    assert_eq!(doc.title(), "Local Article");
    assert_eq!(
        doc.body_text(),
        "Ownership keeps memory safe. Borrowing is checked at compile time."
    );
    assert_eq!(doc.features.word_count, 10);
    assert_eq!(doc.features.sentence_count, 2);
    assert_eq!(doc.quality_label, QualityLabel::Low);
    assert_eq!(report.similar, SimilarityOutcome::DatasetUnavailable);
}

#[tokio::test]
async fn invalid_urls_are_rejected_before_fetching() {
    let state = AppState::new(Arc::new(fetcher()), &AnalyzerConfig::default());
    assert!(matches!(analyze_url(&state, "").await, Err(AnalysisError::EmptyUrl)));
    assert!(matches!(
        analyze_url(&state, "ftp://example.com/file").await,
        Err(AnalysisError::InvalidUrl { .. })
    ));
    assert!(matches!(
        analyze_url(&state, "not a url").await,
        Err(AnalysisError::InvalidUrl { .. })
    ));
}

#[tokio::test]
async fn http_error_fails_the_whole_analysis() {
    let base = spawn_server().await;
    let state = AppState::new(Arc::new(fetcher()), &AnalyzerConfig::default());
    let err = analyze_url(&state, &format!("{}/missing", base)).await.unwrap_err();
    assert!(err.to_string().contains("404"));
}
