use askama::Template;
use serde::Serialize;

use crate::constants::SUPPORTED_LOCALES;
use crate::detail::SiteDetail;
use crate::error::Result;
use crate::urls::Urls;

/// JSON for embedding in HTML; `</` is escaped so it cannot close a script element.
pub fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub struct LanguageLink {
    pub code: &'static str,
    pub url: String,
    pub active: bool,
}

/// Header navigation, resolved for the request locale.
pub struct Nav {
    pub home: String,
    pub sites: String,
    pub map: String,
    pub about: String,
    pub languages: Vec<LanguageLink>,
}

impl Nav {
    /// `query` holds the request parameters the language links should keep.
    pub fn new(urls: &Urls, current_path: &str, query: &[(&str, String)]) -> Self {
        Self {
            home: urls.home(),
            sites: urls.site_index(),
            map: urls.site_map(),
            about: urls.about(),
            languages: SUPPORTED_LOCALES
                .iter()
                .map(|&code| LanguageLink {
                    code,
                    url: urls.switch_locale(current_path, query, code),
                    active: code == urls.locale(),
                })
                .collect(),
        }
    }
}

/// Current filter form values, echoed back into the form and pager.
pub struct FilterForm {
    pub search: String,
    /// Submitted term id, which may lie outside the dropdown's vocabulary
    pub type_id: Option<String>,
    pub types: Vec<TypeOption>,
    /// Set when the page is not in the default locale
    pub lang: Option<String>,
}

pub struct TypeOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

pub struct SiteListItem {
    pub name: String,
    pub url: String,
    pub location: Option<String>,
    pub start_year: Option<i32>,
}

pub struct Pager {
    pub number: usize,
    pub page_count: usize,
    pub total: usize,
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page_title: String,
    pub locale: String,
    pub nav: Nav,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page_title: String,
    pub locale: String,
    pub nav: Nav,
}

#[derive(Template)]
#[template(path = "site/index.html")]
pub struct SiteIndexTemplate {
    pub page_title: String,
    pub locale: String,
    pub nav: Nav,
    pub form: FilterForm,
    pub sites: Vec<SiteListItem>,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "site/map.html")]
pub struct SiteMapTemplate {
    pub page_title: String,
    pub locale: String,
    pub nav: Nav,
    pub form: FilterForm,
    /// `[[lat, lon, labelHtml, linked], ...]`
    pub data_json: String,
    pub point_count: usize,
}

#[derive(Template)]
#[template(path = "site/detail.html")]
pub struct SiteDetailTemplate {
    pub page_title: String,
    pub locale: String,
    pub nav: Nav,
    pub site: SiteDetail,
    pub jsonld_url: String,
    pub pdf_url: String,
    pub json_ld: String,
    pub markers_json: String,
    /// Print layout for PDF export: no navigation chrome, no interactive map
    pub printview: bool,
}

impl SiteDetailTemplate {
    pub fn new(site: SiteDetail, urls: &Urls, current_path: &str, printview: bool) -> Result<Self> {
        Ok(Self {
            page_title: site.name.clone(),
            locale: urls.locale().to_string(),
            nav: Nav::new(urls, current_path, &[]),
            jsonld_url: urls.site_jsonld(site.id),
            pdf_url: urls.site_pdf(site.id),
            json_ld: script_json(&site.json_ld)?,
            markers_json: serde_json::to_string(&site.markers)?,
            site,
            printview,
        })
    }
}
