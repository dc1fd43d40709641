use anyhow::Result;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use heritage_sites::config::SiteConfig;
use heritage_sites::error::Result as SiteResult;
use heritage_sites::pdf::PdfConverter;
use heritage_sites::storage::{Dataset, InMemoryRepository};
use heritage_sites::web::{app_router, AppState};
use std::sync::Arc;
use tempfile::tempdir;
use tower::ServiceExt;

const DATASET: &str = r#"{
  "terms": [
    { "id": 1, "category": "type", "name": "Council housing" },
    { "id": 2, "category": "type", "name": "Theatre" },
    { "id": 3, "category": "type", "status": -1, "name": "Retired" },
    { "id": 20, "category": "roleActor", "name": "Architect" }
  ],
  "places": [
    { "id": 100, "name": "Vienna", "tgn": "7000466", "geo": "48.2082,16.3738" },
    { "id": 101, "name": "Graz", "geo": "47.0707,15.4395" }
  ],
  "sites": [
    {
      "id": 1,
      "status": 1,
      "name": "Karl-Marx-Hof",
      "types": ["1", "3", "20"],
      "location_id": 100,
      "start_date": "1927-00-00",
      "end_date": "1930-10-12",
      "description": { "de": "Wohnanlage des Roten Wien" },
      "translations": { "en": { "name": "Karl Marx Court" } }
    },
    {
      "id": 2,
      "status": 0,
      "name": "Draft Theatre",
      "types": ["2"],
      "location_id": 101
    },
    {
      "id": 3,
      "status": -1,
      "name": "Removed Hall",
      "location_id": 100
    },
    {
      "id": 4,
      "status": 1,
      "name": "Travelling Stage",
      "types": ["20"],
      "location_label": "Various towns in Styria"
    }
  ]
}"#;

fn state() -> Result<AppState> {
    let repository = InMemoryRepository::from_dataset(Dataset::from_json(DATASET)?)?;
    Ok(AppState::new(Arc::new(repository), SiteConfig::default()))
}

fn paged_state(page_size: usize) -> Result<AppState> {
    let repository = InMemoryRepository::from_dataset(Dataset::from_json(DATASET)?)?;
    let site = SiteConfig {
        page_size,
        ..SiteConfig::default()
    };
    Ok(AppState::new(Arc::new(repository), site))
}

fn app(state: AppState) -> Router {
    app_router(state, "static")
}

async fn get(app: Router, uri: &str) -> Result<Response> {
    let request = Request::builder().uri(uri).body(Body::empty())?;
    Ok(app.oneshot(request).await?)
}

async fn body_text(response: Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Echoes the print view back with a PDF-ish prefix.
struct EchoConverter;

#[async_trait]
impl PdfConverter for EchoConverter {
    async fn convert(&self, html: &str) -> SiteResult<Vec<u8>> {
        let mut bytes = b"%PDF-".to_vec();
        bytes.extend_from_slice(html.as_bytes());
        Ok(bytes)
    }
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let response = get(app(state()?), "/health").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await?)?;
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn test_listing_shows_only_published_sites() -> Result<()> {
    let response = get(app(state()?), "/site").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await?;
    assert!(body.contains("Karl-Marx-Hof"));
    assert!(body.contains("Travelling Stage"));
    assert!(!body.contains("Draft Theatre"));
    assert!(!body.contains("Removed Hall"));

    // Type dropdown leaves out removed terms
    assert!(body.contains("Council housing"));
    assert!(!body.contains("Retired"));
    Ok(())
}

#[tokio::test]
async fn test_listing_search_and_type_filter() -> Result<()> {
    let body = body_text(get(app(state()?), "/site?search=stage").await?).await?;
    assert!(body.contains("Travelling Stage"));
    assert!(!body.contains("Karl-Marx-Hof"));

    let body = body_text(get(app(state()?), "/site?type=1&search=").await?).await?;
    assert!(body.contains("Karl-Marx-Hof"));
    assert!(!body.contains("Travelling Stage"));
    Ok(())
}

#[tokio::test]
async fn test_listing_in_english_uses_translated_names() -> Result<()> {
    let body = body_text(get(app(state()?), "/site?lang=en").await?).await?;
    assert!(body.contains("Karl Marx Court"));
    assert!(body.contains("/site/1?lang=en"));
    Ok(())
}

#[tokio::test]
async fn test_pager_keeps_filter_outside_type_vocabulary() -> Result<()> {
    let body = body_text(get(app(paged_state(1)?), "/site?type=20").await?).await?;

    assert!(body.contains("Karl-Marx-Hof"));
    assert!(!body.contains("Travelling Stage"));
    assert!(body.contains(r#"<input type="hidden" name="type" value="20">"#));
    assert!(body.contains(r#"name="page" value="2""#));

    let body = body_text(get(app(paged_state(1)?), "/site?type=20&page=2").await?).await?;
    assert!(body.contains("Travelling Stage"));
    assert!(!body.contains("Karl-Marx-Hof"));
    Ok(())
}

#[tokio::test]
async fn test_language_switch_keeps_listing_filter() -> Result<()> {
    let body = body_text(get(app(state()?), "/site?search=hof&type=1").await?).await?;
    assert!(body.contains("/site?search=hof&amp;type=1&amp;lang=en"));

    let body = body_text(get(app(state()?), "/site/map?search=hof&lang=en").await?).await?;
    assert!(body.contains(r#"href="/site/map?search=hof""#));
    Ok(())
}

#[tokio::test]
async fn test_map_feed_includes_unpublished_but_not_removed() -> Result<()> {
    let response = get(app(state()?), "/site/map").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await?;
    assert!(body.contains("Karl-Marx-Hof"));
    assert!(body.contains("Draft Theatre"));
    assert!(!body.contains("Removed Hall"));
    // Only published sites are linked from the map
    assert!(body.contains("/site/1"));
    assert!(!body.contains("/site/2"));
    Ok(())
}

#[tokio::test]
async fn test_detail_page_embeds_json_ld() -> Result<()> {
    let response = get(app(state()?), "/site/1").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await?;
    assert!(body.contains(r#"<script type="application/ld+json">"#));
    assert!(body.contains(r#""@type":"CreateAction""#));
    assert!(body.contains("Council housing"));
    assert!(body.contains("/place/tgn/7000466"));
    assert!(body.contains("data-markers"));
    Ok(())
}

#[tokio::test]
async fn test_unpublished_detail_is_still_reachable() -> Result<()> {
    let response = get(app(state()?), "/site/2").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await?.contains("Draft Theatre"));
    Ok(())
}

#[tokio::test]
async fn test_removed_or_unknown_site_redirects_to_listing() -> Result<()> {
    let response = get(app(state()?), "/site/3").await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/site");

    let response = get(app(state()?), "/site/999.jsonld?lang=en").await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/site?lang=en");
    Ok(())
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() -> Result<()> {
    for uri in ["/site/abc", "/site/1.xml", "/site/-1"] {
        let response = get(app(state()?), uri).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
    Ok(())
}

#[tokio::test]
async fn test_json_ld_export() -> Result<()> {
    let response = get(app(state()?), "/site/1.jsonld?lang=en").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/ld+json; charset=utf-8"
    );

    let document: serde_json::Value = serde_json::from_str(&body_text(response).await?)?;
    assert_eq!(document["@context"], "http://schema.org");
    assert_eq!(document["@type"], "CreateAction");
    assert_eq!(document["name"], "Karl-Marx-Hof");
    assert_eq!(document["startdateTime"], "1927");
    assert_eq!(document["enddateTime"], "1930-10-12");
    assert_eq!(document["location"]["name"], "Vienna");
    // No English description, so the German one is used
    assert_eq!(document["description"], "Wohnanlage des Roten Wien");
    Ok(())
}

#[tokio::test]
async fn test_json_ld_omits_missing_properties() -> Result<()> {
    let response = get(app(state()?), "/site/4.jsonld").await?;
    let document: serde_json::Value = serde_json::from_str(&body_text(response).await?)?;

    let object = document.as_object().expect("object");
    assert!(!object.contains_key("location"));
    assert!(!object.contains_key("description"));
    assert!(!object.contains_key("startdateTime"));
    Ok(())
}

#[tokio::test]
async fn test_pdf_without_converter_is_not_implemented() -> Result<()> {
    let response = get(app(state()?), "/site/1.pdf").await?;
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    Ok(())
}

#[tokio::test]
async fn test_pdf_renders_print_view() -> Result<()> {
    let state = state()?.with_pdf_converter(Arc::new(EchoConverter));
    let response = get(app(state), "/site/1.pdf").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");

    let body = body_text(response).await?;
    assert!(body.starts_with("%PDF-"));
    assert!(body.contains("Karl-Marx-Hof"));
    // Print view has no navigation and no interactive map
    assert!(!body.contains("site-header"));
    assert!(!body.contains("data-markers"));
    Ok(())
}

#[tokio::test]
async fn test_accept_language_selects_locale() -> Result<()> {
    let request = Request::builder()
        .uri("/")
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9,de;q=0.5")
        .body(Body::empty())?;
    let response = app(state()?).oneshot(request).await?;

    let body = body_text(response).await?;
    assert!(body.contains(r#"<html lang="en">"#));
    assert!(body.contains("/site/map?lang=en"));
    Ok(())
}

#[tokio::test]
async fn test_serves_static_files() -> Result<()> {
    let dir = tempdir()?;
    std::fs::create_dir_all(dir.path().join("css"))?;
    std::fs::write(dir.path().join("css/site.css"), "body { margin: 0; }")?;

    let response = get(app_router(state()?, dir.path()), "/static/css/site.css").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "body { margin: 0; }");
    Ok(())
}
