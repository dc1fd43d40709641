use super::dataset::Dataset;
use super::traits::SiteRepository;
use crate::domain::{Site, Term, TermCategory};
use crate::error::Result;
use crate::listing::{SiteQuery, StatusFilter};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// In-memory repository over a loaded dataset. Read-only once built.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    terms: Vec<Term>,
    sites: BTreeMap<i64, Site>,
}

impl InMemoryRepository {
    pub fn new(terms: Vec<Term>, sites: Vec<Site>) -> Self {
        Self {
            terms,
            sites: sites.into_iter().map(|site| (site.id, site)).collect(),
        }
    }

    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let (terms, sites) = dataset.into_parts()?;
        Ok(Self::new(terms, sites))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_dataset(Dataset::load(path).await?)
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }
}

#[async_trait]
impl SiteRepository for InMemoryRepository {
    async fn find_terms(&self, categories: &[TermCategory]) -> Result<Vec<Term>> {
        let terms: Vec<Term> = self
            .terms
            .iter()
            .filter(|term| categories.contains(&term.category))
            .cloned()
            .collect();

        debug!("Found {} terms in {} categories", terms.len(), categories.len());
        Ok(terms)
    }

    async fn find_sites(&self, query: &SiteQuery) -> Result<Vec<Site>> {
        let mut keyed: Vec<(String, &Site)> = self
            .sites
            .values()
            .filter(|site| query.matches(site))
            .map(|site| (query.sort_key(site), site))
            .collect();

        // Id breaks ties so equal names keep a stable order
        keyed.sort_by(|(a_key, a), (b_key, b)| a_key.cmp(b_key).then(a.id.cmp(&b.id)));

        debug!(
            locale = %query.locale,
            status = ?query.status,
            "Query matched {} of {} sites",
            keyed.len(),
            self.sites.len()
        );
        Ok(keyed.into_iter().map(|(_, site)| site.clone()).collect())
    }

    async fn find_site(&self, id: i64, status: StatusFilter) -> Result<Option<Site>> {
        let site = self
            .sites
            .get(&id)
            .filter(|site| status.admits(site.status))
            .cloned();
        Ok(site)
    }
}
