use nx_core::{Article, ArticleIndexEntry, ArticleStore};
use std::sync::Arc;
use tracing::error;

/// Boundary wrapper that converts store failures into data-level signals:
/// an unreachable store degrades to an empty listing, a failed lookup to
/// not-found. Nothing above this wrapper ever sees an `Err`, so a broken
/// backend can never abort page rendering.
#[derive(Clone)]
pub struct StoreAccessor {
    store: Arc<dyn ArticleStore>,
}

impl StoreAccessor {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    pub async fn index(&self) -> Vec<ArticleIndexEntry> {
        match self.store.list_index().await {
            Ok(entries) => entries,
            Err(e) => {
                error!("article index unavailable: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn article(&self, slug: &str) -> Option<Article> {
        match self.store.get_by_slug(slug).await {
            Ok(article) => article,
            Err(e) => {
                error!("article lookup failed for {}: {}", slug, e);
                None
            }
        }
    }

    pub async fn all(&self) -> Vec<Article> {
        match self.store.list_all().await {
            Ok(articles) => articles,
            Err(e) => {
                error!("article listing unavailable: {}", e);
                Vec::new()
            }
        }
    }
}
