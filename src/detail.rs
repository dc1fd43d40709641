//! Detail view of a single site, shared by the HTML, PDF and JSON-LD routes.

use crate::domain::{LocationInfo, Site};
use crate::geo::Locatable;
use crate::jsonld::{self, CreateAction};
use crate::markers::{build_map_markers, MapMarkers};
use crate::terms::TermCache;
use crate::urls::Urls;

#[derive(Debug, Clone, PartialEq)]
pub struct LocationView {
    pub name: String,
    /// Link to the place page; free-text locations have none.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateView {
    pub label: &'static str,
    pub value: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteView {
    pub topic: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteDetail {
    pub id: i64,
    pub name: String,
    pub alternate_name: Option<String>,
    pub published: bool,
    pub types: Vec<String>,
    pub location: Option<LocationView>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub geo: Option<String>,
    pub dates: Vec<DateView>,
    pub description: Option<String>,
    pub operating_area: Option<f64>,
    pub operating_area_description: Option<String>,
    pub url: Option<String>,
    pub notes: Vec<NoteView>,
    pub markers: MapMarkers,
    pub json_ld: CreateAction,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl SiteDetail {
    /// Assembles the view. `terms` should already be initialized; unresolved
    /// type ids are left out.
    pub fn assemble(site: &Site, terms: &TermCache, locale: &str, urls: &Urls) -> Self {
        let types = terms
            .resolve(&site.type_ids())
            .into_iter()
            .map(|term| term.name.clone())
            .collect();

        let location = site.location_info().map(|info| match info {
            LocationInfo::Place(place) => LocationView {
                name: place.name.clone(),
                url: Some(urls.place(place)),
            },
            LocationInfo::Label(label) => LocationView {
                name: label.to_string(),
                url: None,
            },
        });

        let dates = [
            ("Start", &site.start_date),
            ("Realized", &site.realized_date),
            ("End", &site.end_date),
            ("Destruction", &site.destruction_date),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            let value = non_empty(value.as_deref())?;
            Some(DateView {
                label,
                year: crate::domain::extract_year(&value),
                value,
            })
        })
        .collect();

        let notes = site
            .displayed_notes()
            .into_iter()
            .map(|(topic, text)| NoteView {
                topic: topic.to_string(),
                text: text.to_string(),
            })
            .collect();

        Self {
            id: site.id,
            name: site.localized_name(locale).to_string(),
            alternate_name: non_empty(site.alternate_name.as_deref()),
            published: site.is_published(),
            types,
            location,
            street_address: non_empty(site.street_address.as_deref()),
            postal_code: non_empty(site.postal_code.as_deref()),
            geo: site.coordinates().map(|point| point.to_string()),
            dates,
            description: site.description_localized(locale).map(str::to_string),
            operating_area: site.operating_area,
            operating_area_description: site
                .operating_area_description_localized(locale)
                .map(str::to_string),
            url: non_empty(site.url.as_deref()),
            notes,
            markers: build_map_markers(site, urls),
            json_ld: jsonld::serialize(site, locale, false),
        }
    }

    pub fn has_markers(&self) -> bool {
        !self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocalizedText, Place, Term, TermCategory};
    use crate::storage::InMemoryRepository;

    async fn terms() -> TermCache {
        let repo = InMemoryRepository::new(
            vec![
                Term {
                    id: 7,
                    category: TermCategory::Type,
                    status: 0,
                    name: "Council housing".to_string(),
                },
                Term {
                    id: 8,
                    category: TermCategory::Type,
                    status: -1,
                    name: "Retired".to_string(),
                },
            ],
            Vec::new(),
        );
        let cache = TermCache::new();
        cache.initialize(&repo).await.unwrap();
        cache
    }

    fn karl_marx_hof() -> Site {
        let mut site = Site {
            id: 10,
            status: 1,
            name: "Karl-Marx-Hof".to_string(),
            types: vec!["8".to_string(), " 7 ".to_string()],
            location: Some(Place {
                id: 1,
                name: "Vienna".to_string(),
                tgn: Some("7000466".to_string()),
                geo: Some("48.2,16.3".to_string()),
            }),
            start_date: Some("1927-00-00".to_string()),
            end_date: Some("1930-10-12".to_string()),
            realized_date: Some("  ".to_string()),
            description: Some(LocalizedText::from([("en", ""), ("de", "Gemeindebau")])),
            operating_area_description: Some(LocalizedText::from([("en", "1 km long")])),
            ..Default::default()
        };
        site.notes.insert("general".to_string(), "Guided tours on Sundays".to_string());
        site
    }

    #[tokio::test]
    async fn test_assembles_detail_view() {
        let terms = terms().await;
        let detail = SiteDetail::assemble(&karl_marx_hof(), &terms, "en", &Urls::new("en", "de"));

        assert_eq!(detail.types, vec!["Council housing"]);
        assert_eq!(
            detail.location,
            Some(LocationView {
                name: "Vienna".to_string(),
                url: Some("/place/tgn/7000466?lang=en".to_string()),
            })
        );
        assert_eq!(detail.geo.as_deref(), Some("48.2,16.3"));
        assert_eq!(detail.description.as_deref(), Some("Gemeindebau"));
        assert_eq!(detail.operating_area_description.as_deref(), Some("1 km long"));

        let labels: Vec<&str> = detail.dates.iter().map(|d| d.label).collect();
        assert_eq!(labels, vec!["Start", "End"]);
        assert_eq!(detail.dates[0].year, Some(1927));

        assert_eq!(detail.notes.len(), 1);
        assert!(detail.has_markers());
        assert_eq!(detail.json_ld.description.as_deref(), Some("Gemeindebau"));
    }

    #[tokio::test]
    async fn test_free_text_location_is_unlinked() {
        let terms = terms().await;
        let site = Site {
            id: 11,
            status: 0,
            name: "Provisional".to_string(),
            location_label: Some("Somewhere in Styria".to_string()),
            ..Default::default()
        };

        let detail = SiteDetail::assemble(&site, &terms, "de", &Urls::new("de", "de"));
        assert_eq!(detail.location.as_ref().and_then(|l| l.url.as_deref()), None);
        assert!(!detail.has_markers());
        assert!(detail.json_ld.location.is_none());
        assert!(!detail.published);
    }
}
