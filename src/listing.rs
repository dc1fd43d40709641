//! Query specifications for the site listing and the map feed.
//!
//! A [`SiteQuery`] is a plain description of filter and sort; the repository
//! executes it. Both route variants drop removed records unconditionally.

use crate::constants::{STATUS_PUBLISHED, STATUS_REMOVED};
use crate::domain::Site;
use serde::Deserialize;

/// Which listing route is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteVariant {
    /// `/site/map`: every record that is not removed
    Map,
    /// `/site`: published records only
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    NotRemoved,
    PublishedOnly,
}

impl StatusFilter {
    pub fn admits(&self, status: i32) -> bool {
        if status == STATUS_REMOVED {
            return false;
        }

        match self {
            StatusFilter::NotRemoved => true,
            StatusFilter::PublishedOnly => status == STATUS_PUBLISHED,
        }
    }
}

impl From<RouteVariant> for StatusFilter {
    fn from(variant: RouteVariant) -> Self {
        match variant {
            RouteVariant::Map => StatusFilter::NotRemoved,
            RouteVariant::List => StatusFilter::PublishedOnly,
        }
    }
}

/// Computed sort column. Never part of the returned data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Name,
    /// Translated name followed by the base name; rows without a translation
    /// sort by their base name alone.
    LocalizedName { locale: String },
}

impl SortKey {
    pub fn key_for(&self, site: &Site) -> String {
        let key = match self {
            SortKey::Name => site.name.clone(),
            SortKey::LocalizedName { locale } => {
                let mut key = site.translated_name(locale).unwrap_or_default().to_string();
                key.push_str(&site.name);
                key
            }
        };
        key.to_lowercase()
    }
}

/// Filter form values bound from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteFilter {
    #[serde(default)]
    pub search: Option<String>,
    /// Term id; kept as text since an empty form field submits `type=`.
    #[serde(default, rename = "type")]
    pub type_id: Option<String>,
}

impl SiteFilter {
    pub fn is_empty(&self) -> bool {
        self.search().is_none() && self.type_id().is_none()
    }

    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn type_id(&self) -> Option<&str> {
        self.type_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn matches(&self, site: &Site, locale: &str) -> bool {
        if let Some(search) = self.search() {
            let needle = search.to_lowercase();
            let haystacks = [
                Some(site.name.as_str()),
                site.alternate_name.as_deref(),
                site.translated_name(locale),
            ];
            if !haystacks
                .iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        if let Some(type_id) = self.type_id() {
            if !site.type_ids().contains(&type_id) {
                return false;
            }
        }

        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteQuery {
    pub locale: String,
    pub status: StatusFilter,
    pub sort: SortKey,
    pub filter: SiteFilter,
}

impl SiteQuery {
    pub fn matches(&self, site: &Site) -> bool {
        self.status.admits(site.status) && self.filter.matches(site, &self.locale)
    }

    pub fn sort_key(&self, site: &Site) -> String {
        self.sort.key_for(site)
    }
}

/// Assembles the listing query for `variant` in `locale`.
pub fn build_query(
    locale: &str,
    default_locale: &str,
    variant: RouteVariant,
    filter: SiteFilter,
) -> SiteQuery {
    let sort = if locale == default_locale {
        SortKey::Name
    } else {
        SortKey::LocalizedName {
            locale: locale.to_string(),
        }
    };

    SiteQuery {
        locale: locale.to_string(),
        status: variant.into(),
        sort,
        filter,
    }
}
