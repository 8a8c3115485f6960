use async_trait::async_trait;
use nx_core::{Article, ArticleIndexEntry, ArticleStore, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store, used by tests and local runs without article data on
/// disk. The write side exists for seeding only; readers go through
/// [`ArticleStore`] like every other backend.
#[derive(Clone, Default)]
pub struct MemoryStore {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an article, replacing any existing record with the same slug.
    pub async fn insert(&self, article: Article) {
        let mut articles = self.articles.write().await;
        if let Some(existing) = articles.iter_mut().find(|a| a.slug == article.slug) {
            *existing = article;
        } else {
            articles.push(article);
        }
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn list_index(&self) -> Result<Vec<ArticleIndexEntry>> {
        let articles = self.articles.read().await;
        let mut entries: Vec<ArticleIndexEntry> = articles
            .iter()
            .filter(|a| a.published)
            .map(Article::index_entry)
            .collect();
        // Newest first, matching the producer's index convention.
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles
            .iter()
            .find(|a| a.slug == slug && a.published)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        let mut published: Vec<Article> =
            articles.iter().filter(|a| a.published).cloned().collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(published)
    }
}
