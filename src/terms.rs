//! Request-scoped lookup of controlled-vocabulary terms.

use crate::domain::{Term, TermCategory};
use crate::error::Result;
use crate::storage::SiteRepository;
use std::collections::HashMap;
use tokio::sync::OnceCell;
use tracing::debug;

/// Terms keyed by id, loaded at most once per instance.
///
/// Build one per request and pass it to whatever needs term labels; dropping
/// it is the only invalidation. Data changed in the repository after loading
/// is not seen by this instance.
#[derive(Debug, Default)]
pub struct TermCache {
    terms: OnceCell<HashMap<i64, Term>>,
}

impl TermCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the non-removed terms of the site vocabularies. No-op once populated;
    /// concurrent first callers share a single load.
    pub async fn initialize(&self, repository: &dyn SiteRepository) -> Result<()> {
        self.terms
            .get_or_try_init(|| async {
                let terms: HashMap<i64, Term> = repository
                    .find_terms(&TermCategory::SITE_VOCABULARIES)
                    .await?
                    .into_iter()
                    .filter(|term| !term.is_removed())
                    .map(|term| (term.id, term))
                    .collect();
                debug!("Term cache populated with {} terms", terms.len());
                Ok::<_, crate::error::SiteError>(terms)
            })
            .await?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.terms.initialized()
    }

    pub fn get(&self, id: i64) -> Option<&Term> {
        self.terms.get().and_then(|terms| terms.get(&id))
    }

    /// Looks up each id (trimmed) in input order, dropping ids that are not
    /// cached or not integers. Empty before initialization.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Term> {
        ids.iter()
            .filter_map(|id| id.as_ref().trim().parse::<i64>().ok())
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Cached terms of one category, ordered by name.
    pub fn in_category(&self, category: TermCategory) -> Vec<&Term> {
        let mut terms: Vec<&Term> = self
            .terms
            .get()
            .map(|terms| terms.values().filter(|t| t.category == category).collect())
            .unwrap_or_default();
        terms.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        terms
    }
}
