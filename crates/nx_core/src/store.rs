use async_trait::async_trait;

use crate::types::{Article, ArticleIndexEntry};
use crate::Result;

/// Read-only access to the article collection written by the ingestion
/// pipeline. Implementations back onto the producer's file channel or its
/// database channel; callers never get a mutation handle.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All published index entries, in the order stored by the producer
    /// (newest first by convention, not enforced here).
    async fn list_index(&self) -> Result<Vec<ArticleIndexEntry>>;

    /// One full record by slug. `Ok(None)` is the not-found signal; a
    /// malformed record also surfaces as `Ok(None)`.
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Article>>;

    /// Every published full record. Individual records that fail to load
    /// are skipped, not fatal.
    async fn list_all(&self) -> Result<Vec<Article>>;
}
