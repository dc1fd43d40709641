use crate::domain::{Site, Term, TermCategory};
use crate::error::Result;
use crate::listing::{SiteQuery, StatusFilter};
use async_trait::async_trait;

/// Read access to the research database
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Terms in any of `categories`, removed terms included.
    async fn find_terms(&self, categories: &[TermCategory]) -> Result<Vec<Term>>;

    /// Sites matching `query`, ordered by its sort key (ascending).
    async fn find_sites(&self, query: &SiteQuery) -> Result<Vec<Site>>;

    /// A single site by id, if its status passes `status`.
    async fn find_site(&self, id: i64, status: StatusFilter) -> Result<Option<Site>>;
}
