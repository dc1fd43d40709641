pub mod localized;
pub mod term;

pub use localized::LocalizedText;
pub use term::{Term, TermCategory};

use crate::constants::{STATUS_PUBLISHED, STATUS_REMOVED};
use crate::geo::{GeoPoint, Locatable};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static LEADING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)").expect("valid regex"));

/// Year from the leading digit run of a loosely-typed date string ("1923-00-00", "1923").
pub fn extract_year(date: &str) -> Option<i32> {
    LEADING_DIGITS
        .captures(date)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// A geographic place a site can be located at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: i64,
    pub name: String,
    /// Getty Thesaurus of Geographic Names identifier
    #[serde(default)]
    pub tgn: Option<String>,
    /// `"lat,lon"`
    #[serde(default)]
    pub geo: Option<String>,
}

impl Locatable for Place {
    fn coordinates(&self) -> Option<GeoPoint> {
        self.geo.as_deref().and_then(GeoPoint::parse)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteTranslation {
    #[serde(default)]
    pub name: Option<String>,
}

/// Where a site is, as shown on the detail page.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInfo<'a> {
    Place(&'a Place),
    Label(&'a str),
}

impl LocationInfo<'_> {
    pub fn name(&self) -> &str {
        match self {
            LocationInfo::Place(place) => &place.name,
            LocationInfo::Label(label) => label,
        }
    }
}

/// The primary record: a place/event entry of the research database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub id: i64,
    pub status: i32,
    /// Term ids as stored; entries may carry stray whitespace.
    pub types: Vec<String>,
    /// Resolved from `location_id` when the dataset is loaded.
    #[serde(skip)]
    pub location: Option<Place>,
    pub location_label: Option<String>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_date: Option<String>,
    pub realized_date: Option<String>,
    pub end_date: Option<String>,
    pub destruction_date: Option<String>,
    pub name: String,
    pub alternate_name: Option<String>,
    pub description: Option<LocalizedText>,
    pub operating_area: Option<f64>,
    pub operating_area_description: Option<LocalizedText>,
    pub url: Option<String>,
    /// Free-text notes keyed by topic ("address", "general", ...)
    pub notes: BTreeMap<String, String>,
    /// Per-locale overrides, e.g. `{"en": {"name": "..."}}`
    pub translations: BTreeMap<String, SiteTranslation>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<i64>,
    pub changed_at: Option<DateTime<Utc>>,
    pub changed_by: Option<i64>,
}

impl Site {
    pub fn is_removed(&self) -> bool {
        self.status == STATUS_REMOVED
    }

    pub fn is_published(&self) -> bool {
        self.status == STATUS_PUBLISHED
    }

    /// Type references with surrounding whitespace removed.
    pub fn type_ids(&self) -> Vec<&str> {
        self.types.iter().map(|id| id.trim()).collect()
    }

    /// Translated name for `locale`, if the record has a non-empty one.
    pub fn translated_name(&self, locale: &str) -> Option<&str> {
        self.translations
            .get(locale)
            .and_then(|t| t.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Name for display in `locale`, falling back to the base name.
    pub fn localized_name(&self, locale: &str) -> &str {
        self.translated_name(locale).unwrap_or(&self.name)
    }

    pub fn description_localized(&self, locale: &str) -> Option<&str> {
        localized::resolve(self.description.as_ref(), locale)
    }

    pub fn operating_area_description_localized(&self, locale: &str) -> Option<&str> {
        localized::resolve(self.operating_area_description.as_ref(), locale)
    }

    /// The linked place if any, otherwise the free-text label if non-empty.
    pub fn location_info(&self) -> Option<LocationInfo<'_>> {
        if let Some(place) = &self.location {
            return Some(LocationInfo::Place(place));
        }

        self.location_label
            .as_deref()
            .filter(|label| !label.is_empty())
            .map(LocationInfo::Label)
    }

    pub fn start_year(&self) -> Option<i32> {
        self.start_date.as_deref().and_then(extract_year)
    }

    pub fn end_year(&self) -> Option<i32> {
        self.end_date.as_deref().and_then(extract_year)
    }

    /// Notes shown on the detail page, in display order.
    pub fn displayed_notes(&self) -> Vec<(&str, &str)> {
        ["address", "general"]
            .into_iter()
            .filter_map(|key| {
                self.notes
                    .get(key)
                    .filter(|text| !text.trim().is_empty())
                    .map(|text| (key, text.as_str()))
            })
            .collect()
    }
}
