use crate::domain::{Place, Site, Term};
use crate::error::{Result, SiteError};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

/// On-disk export of the database: `{ "terms": [...], "places": [...], "sites": [...] }`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub terms: Vec<Term>,
    pub places: Vec<Place>,
    pub sites: Vec<SiteRow>,
}

/// A site as exported, pointing at its place by id.
#[derive(Debug, Deserialize)]
pub struct SiteRow {
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(flatten)]
    pub site: Site,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| SiteError::Dataset {
            message: format!("Failed to read dataset '{}': {}", path.display(), e),
        })?;
        let dataset = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            terms = dataset.terms.len(),
            places = dataset.places.len(),
            sites = dataset.sites.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Joins each site to its place. A dangling `location_id` leaves the site
    /// without a place; duplicate site ids are rejected.
    pub fn into_parts(self) -> Result<(Vec<Term>, Vec<Site>)> {
        let places: HashMap<i64, Place> =
            self.places.into_iter().map(|place| (place.id, place)).collect();

        let mut seen = HashSet::new();
        let mut sites = Vec::with_capacity(self.sites.len());
        for SiteRow { location_id, mut site } in self.sites {
            if !seen.insert(site.id) {
                return Err(SiteError::Dataset {
                    message: format!("Duplicate site id {}", site.id),
                });
            }

            if let Some(place_id) = location_id {
                site.location = places.get(&place_id).cloned();
                if site.location.is_none() {
                    warn!(site_id = site.id, place_id, "Site references unknown place");
                }
            }
            sites.push(site);
        }

        Ok((self.terms, sites))
    }
}
