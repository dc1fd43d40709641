//! schema.org JSON-LD for sites.
//!
//! A site is described as a `CreateAction`. Optional properties are skipped
//! entirely when their source is empty, never written as `null`.

use crate::constants::SCHEMA_ORG_CONTEXT;
use crate::domain::Site;
use crate::error::Result;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static ISO_DATE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{4})(?:-(\d{1,2})(?:-(\d{1,2}))?)?(?:$|[T\s])").expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAction {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<&'static str>,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(rename = "startdateTime", skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<String>,
    #[serde(rename = "enddateTime", skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<JsonLdPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// TODO: add `address` and `containedInPlace` once places carry addresses and parents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonLdPlace {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

impl CreateAction {
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Describes `site` for `locale`. With `omit_context` the document is meant to
/// be nested inside another one and carries no `@context`.
pub fn serialize(site: &Site, locale: &str, omit_context: bool) -> CreateAction {
    CreateAction {
        context: (!omit_context).then_some(SCHEMA_ORG_CONTEXT),
        kind: "CreateAction",
        name: site.name.clone(),
        start_date_time: site.start_date.as_deref().and_then(format_date_8601),
        end_date_time: site.end_date.as_deref().and_then(format_date_8601),
        location: site.location.as_ref().map(|place| JsonLdPlace {
            kind: "Place",
            name: place.name.clone(),
        }),
        description: site.description_localized(locale).map(str::to_string),
        url: site
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(str::to_string),
    }
}

/// ISO-8601 rendering of a loosely-typed date.
///
/// Unknown components are stored as zero ("1927-00-00") and reduce the
/// precision to `YYYY-MM` or `YYYY`. A time suffix after `T` or whitespace is
/// dropped. Anything else after the date, or a year that is not exactly four
/// digits, gives `None`.
pub fn format_date_8601(raw: &str) -> Option<String> {
    let caps = ISO_DATE_PREFIX.captures(raw)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let day: u32 = caps
        .get(3)
        .and_then(|d| d.as_str().parse().ok())
        .unwrap_or(0);

    if !(1..=12).contains(&month) {
        return Some(format!("{:04}", year));
    }

    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) if day > 0 => Some(date.format("%Y-%m-%d").to_string()),
        _ => Some(format!("{:04}-{:02}", year, month)),
    }
}
