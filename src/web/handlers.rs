use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::detail::SiteDetail;
use crate::domain::TermCategory;
use crate::error::SiteError;
use crate::jsonld;
use crate::listing::{build_query, RouteVariant, SiteFilter, StatusFilter};
use crate::map_feed::build_map_feed;
use crate::pagination::Page;
use crate::terms::TermCache;
use crate::urls::Urls;

use super::locale::negotiate;
use super::state::AppState;
use super::templates::{
    AboutTemplate, FilterForm, HomeTemplate, Nav, Pager, SiteDetailTemplate, SiteIndexTemplate,
    SiteListItem, SiteMapTemplate, TypeOption,
};

/// Handler error, logged and answered with a bare 500. Missing sites never
/// get here; `site_detail` redirects them itself so the locale is kept.
pub struct AppError(SiteError);

impl<E> From<E> for AppError
where
    E: Into<SiteError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

type HandlerResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

/// Query string of the listing routes.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub lang: Option<String>,
    pub page: Option<usize>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub type_id: Option<String>,
}

impl ListParams {
    pub fn filter(&self) -> SiteFilter {
        SiteFilter {
            search: self.search.clone(),
            type_id: self.type_id.clone(),
        }
    }

    /// Parameters a language switch should keep.
    pub fn carried_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(type_id) = &self.type_id {
            query.push(("type", type_id.clone()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query
    }
}

/// Output format selected by the extension of the last path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFormat {
    Html,
    JsonLd,
    Pdf,
}

impl DetailFormat {
    /// Splits `12`, `12.jsonld` or `12.pdf`. Ids must be all digits.
    pub fn parse_segment(segment: &str) -> Option<(i64, DetailFormat)> {
        let (id, format) = match segment.split_once('.') {
            None => (segment, DetailFormat::Html),
            Some((id, "jsonld")) => (id, DetailFormat::JsonLd),
            Some((id, "pdf")) => (id, DetailFormat::Pdf),
            Some(_) => return None,
        };

        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        id.parse().ok().map(|id| (id, format))
    }
}

fn page_title(locale: &str, de: &str, en: &str) -> String {
    let title = if locale == "en" { en } else { de };
    title.to_string()
}

fn request_urls(state: &AppState, lang: Option<&str>, headers: &HeaderMap) -> Urls {
    let locale = negotiate(lang, headers, state.default_locale());
    state.urls(&locale)
}

/// Filter form state plus the type dropdown, labelled from a fresh term cache.
async fn filter_form(
    state: &AppState,
    urls: &Urls,
    filter: &SiteFilter,
) -> HandlerResult<FilterForm> {
    let terms = TermCache::new();
    terms.initialize(state.repository.as_ref()).await?;

    let selected = filter.type_id().and_then(|id| id.parse::<i64>().ok());
    let types = terms
        .in_category(TermCategory::Type)
        .into_iter()
        .map(|term| TypeOption {
            id: term.id,
            name: term.name.clone(),
            selected: Some(term.id) == selected,
        })
        .collect();

    Ok(FilterForm {
        search: filter.search().unwrap_or_default().to_string(),
        type_id: filter.type_id().map(str::to_string),
        types,
        lang: (urls.locale() != state.default_locale()).then(|| urls.locale().to_string()),
    })
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
    headers: HeaderMap,
    uri: Uri,
) -> HomeTemplate {
    let urls = request_urls(&state, params.lang.as_deref(), &headers);
    HomeTemplate {
        page_title: page_title(urls.locale(), "Kulturelle Orte", "Cultural Sites"),
        locale: urls.locale().to_string(),
        nav: Nav::new(&urls, uri.path(), &[]),
    }
}

pub async fn about(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
    headers: HeaderMap,
    uri: Uri,
) -> AboutTemplate {
    let urls = request_urls(&state, params.lang.as_deref(), &headers);
    AboutTemplate {
        page_title: page_title(urls.locale(), "Über das Projekt", "About"),
        locale: urls.locale().to_string(),
        nav: Nav::new(&urls, uri.path(), &[]),
    }
}

pub async fn site_index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
    uri: Uri,
) -> HandlerResult<SiteIndexTemplate> {
    let urls = request_urls(&state, params.lang.as_deref(), &headers);
    let locale = urls.locale().to_string();
    let filter = params.filter();
    let query = build_query(&locale, state.default_locale(), RouteVariant::List, filter.clone());

    let sites = state.repository.find_sites(&query).await?;
    let page = Page::slice(sites, params.page.unwrap_or(1), state.site.page_size);
    debug!(
        "Listing page {} of {} ({} sites)",
        page.number,
        page.page_count(),
        page.total
    );

    let items = page
        .items
        .iter()
        .map(|site| SiteListItem {
            name: site.localized_name(&locale).to_string(),
            url: urls.site(site.id),
            location: site.location_info().map(|info| info.name().to_string()),
            start_year: site.start_year(),
        })
        .collect();
    let pager = Pager {
        number: page.number,
        page_count: page.page_count(),
        total: page.total,
        previous: page.previous(),
        next: page.next(),
    };

    Ok(SiteIndexTemplate {
        page_title: page_title(&locale, "Orte", "Sites"),
        nav: Nav::new(&urls, uri.path(), &params.carried_query()),
        form: filter_form(&state, &urls, &filter).await?,
        sites: items,
        pager,
        locale,
    })
}

pub async fn site_map(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
    uri: Uri,
) -> HandlerResult<SiteMapTemplate> {
    let urls = request_urls(&state, params.lang.as_deref(), &headers);
    let locale = urls.locale().to_string();
    let filter = params.filter();
    let query = build_query(&locale, state.default_locale(), RouteVariant::Map, filter.clone());

    let sites = state.repository.find_sites(&query).await?;
    let feed = build_map_feed(&sites, &locale, &urls);
    debug!("Map feed has {} of {} sites", feed.len(), sites.len());

    Ok(SiteMapTemplate {
        page_title: page_title(&locale, "Karte", "Map"),
        nav: Nav::new(&urls, uri.path(), &params.carried_query()),
        form: filter_form(&state, &urls, &filter).await?,
        data_json: serde_json::to_string(&feed)?,
        point_count: feed.len(),
        locale,
    })
}

pub async fn site_detail(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(params): Query<LangParams>,
    headers: HeaderMap,
) -> HandlerResult<Response> {
    let Some((id, format)) = DetailFormat::parse_segment(&segment) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let urls = request_urls(&state, params.lang.as_deref(), &headers);
    let Some(site) = state
        .repository
        .find_site(id, StatusFilter::NotRemoved)
        .await?
    else {
        debug!("Site {} not found, redirecting to listing", id);
        return Ok(Redirect::to(&urls.site_index()).into_response());
    };

    if format == DetailFormat::JsonLd {
        let body = serde_json::to_string_pretty(&jsonld::serialize(&site, urls.locale(), false))?;
        return Ok((
            [(header::CONTENT_TYPE, "application/ld+json; charset=utf-8")],
            body,
        )
            .into_response());
    }

    let terms = TermCache::new();
    terms.initialize(state.repository.as_ref()).await?;
    let detail = SiteDetail::assemble(&site, &terms, urls.locale(), &urls);
    let current_path = format!("/site/{}", id);

    match format {
        DetailFormat::Pdf => {
            let Some(converter) = state.pdf.as_ref() else {
                info!("PDF requested for site {} but no converter is configured", id);
                return Ok((StatusCode::NOT_IMPLEMENTED, "PDF export is not configured")
                    .into_response());
            };

            let html = SiteDetailTemplate::new(detail, &urls, &current_path, true)?.render()?;
            let pdf = converter.convert(&html).await?;
            Ok((
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("inline; filename=\"site-{}.pdf\"", id),
                    ),
                ],
                pdf,
            )
                .into_response())
        }
        _ => {
            let html = SiteDetailTemplate::new(detail, &urls, &current_path, false)?.render()?;
            Ok(Html(html).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segment() {
        assert_eq!(DetailFormat::parse_segment("12"), Some((12, DetailFormat::Html)));
        assert_eq!(
            DetailFormat::parse_segment("12.jsonld"),
            Some((12, DetailFormat::JsonLd))
        );
        assert_eq!(DetailFormat::parse_segment("7.pdf"), Some((7, DetailFormat::Pdf)));
    }

    #[test]
    fn test_parse_segment_rejects_non_numeric_ids() {
        assert_eq!(DetailFormat::parse_segment("abc"), None);
        assert_eq!(DetailFormat::parse_segment("-3"), None);
        assert_eq!(DetailFormat::parse_segment("12.xml"), None);
        assert_eq!(DetailFormat::parse_segment(".pdf"), None);
        assert_eq!(DetailFormat::parse_segment(""), None);
    }

    #[test]
    fn test_carried_query_skips_unset_params() {
        let params = ListParams {
            lang: Some("en".to_string()),
            page: Some(3),
            type_id: Some("20".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.carried_query(),
            vec![("type", "20".to_string()), ("page", "3".to_string())]
        );
    }

    #[test]
    fn test_list_params_build_filter() {
        let params = ListParams {
            search: Some(" hof ".to_string()),
            type_id: Some(String::new()),
            ..Default::default()
        };
        let filter = params.filter();
        assert_eq!(filter.search(), Some("hof"));
        assert_eq!(filter.type_id(), None);
    }
}
