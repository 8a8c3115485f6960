use async_trait::async_trait;
use futures::future::join_all;
use nx_core::{Article, ArticleIndexEntry, ArticleStore, Error, Result};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

/// File-channel store: the ingestion pipeline writes `index.json` (an array
/// of index entries, newest first) plus one `{slug}.json` document per
/// article into a single directory.
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn article_path(&self, slug: &str) -> Option<PathBuf> {
        // Slugs are URL-safe by contract; anything that could escape the
        // articles directory is treated as not-found.
        if slug.is_empty() || slug.contains('/') || slug.contains('\\') || slug.contains("..") {
            return None;
        }
        Some(self.dir.join(format!("{}.json", slug)))
    }
}

#[async_trait]
impl ArticleStore for FsStore {
    async fn list_index(&self) -> Result<Vec<ArticleIndexEntry>> {
        let index_path = self.dir.join("index.json");
        let raw = tokio::fs::read(&index_path).await.map_err(|e| {
            Error::StoreUnavailable(format!("cannot read {}: {}", index_path.display(), e))
        })?;

        let values: Vec<serde_json::Value> = serde_json::from_slice(&raw).map_err(|e| {
            Error::StoreUnavailable(format!("cannot parse {}: {}", index_path.display(), e))
        })?;

        // Malformed entries are skipped individually rather than poisoning
        // the whole index.
        let entries = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("skipping malformed index entry: {}", e);
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let Some(path) = self.article_path(slug) else {
            return Ok(None);
        };

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::StoreUnavailable(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        match serde_json::from_slice::<Article>(&raw) {
            Ok(article) if article.published => Ok(Some(article)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("malformed article record {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<Article>> {
        let index = self.list_index().await?;

        let fetches = index.iter().map(|entry| self.get_by_slug(&entry.slug));
        let articles = join_all(fetches)
            .await
            .into_iter()
            .zip(index.iter())
            .filter_map(|(result, entry)| match result {
                Ok(Some(article)) => Some(article),
                Ok(None) => None,
                Err(e) => {
                    warn!("skipping article {}: {}", entry.slug, e);
                    None
                }
            })
            .collect();

        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nx_core::{Author, Category};
    use tempfile::tempdir;

    fn write_article(dir: &std::path::Path, slug: &str, topic: &str, published: bool) {
        let article = serde_json::json!({
            "slug": slug,
            "title": format!("Title for {}", slug),
            "meta_description": "desc",
            "content": "<p>body</p>",
            "keywords": ["one", "two"],
            "reading_time": 3,
            "word_count": 600,
            "topic": topic,
            "created_at": "2024-06-01T08:00:00Z",
            "published": published,
            "author": Author::default(),
        });
        std::fs::write(
            dir.join(format!("{}.json", slug)),
            serde_json::to_vec(&article).unwrap(),
        )
        .unwrap();
    }

    fn write_index(dir: &std::path::Path, entries: serde_json::Value) {
        std::fs::write(dir.join("index.json"), serde_json::to_vec(&entries).unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_list_index_skips_malformed_entries() {
        let dir = tempdir().unwrap();
        write_index(
            dir.path(),
            serde_json::json!([
                {
                    "slug": "good-entry",
                    "title": "Good entry",
                    "created_at": "2024-06-01T08:00:00Z",
                    "topic": "AI"
                },
                {
                    "slug": "bad-entry",
                    "title": "Bad entry",
                    "created_at": "2024-06-01T08:00:00Z",
                    "topic": "NOT_A_CATEGORY"
                },
                { "title": "missing slug" }
            ]),
        );

        let store = FsStore::new(dir.path());
        let index = store.list_index().await.unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].slug, "good-entry");
        assert_eq!(index[0].topic, Some(Category::Ai));
    }

    #[tokio::test]
    async fn test_missing_index_is_store_unavailable() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let err = store.list_index().await.unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let dir = tempdir().unwrap();
        write_article(dir.path(), "ai-breakthrough", "AI", true);

        let store = FsStore::new(dir.path());
        let article = store.get_by_slug("ai-breakthrough").await.unwrap().unwrap();
        assert_eq!(article.title, "Title for ai-breakthrough");
        assert_eq!(article.topic, Some(Category::Ai));

        assert!(store.get_by_slug("nonexistent-slug").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_slug_rejects_path_traversal() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        assert!(store.get_by_slug("../../etc/passwd").await.unwrap().is_none());
        assert!(store.get_by_slug("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unpublished_surfaces_as_not_found() {
        let dir = tempdir().unwrap();
        write_article(dir.path(), "draft-post", "TECH", false);

        let store = FsStore::new(dir.path());
        assert!(store.get_by_slug("draft-post").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_record_surfaces_as_not_found() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), b"{ not json").unwrap();

        let store = FsStore::new(dir.path());
        assert!(store.get_by_slug("broken").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_skips_failed_records() {
        let dir = tempdir().unwrap();
        write_index(
            dir.path(),
            serde_json::json!([
                { "slug": "first", "title": "First", "created_at": "2024-06-02T08:00:00Z" },
                { "slug": "missing-file", "title": "Missing", "created_at": "2024-06-01T09:00:00Z" },
                { "slug": "second", "title": "Second", "created_at": "2024-06-01T08:00:00Z" }
            ]),
        );
        write_article(dir.path(), "first", "AI", true);
        write_article(dir.path(), "second", "SPACE", true);

        let store = FsStore::new(dir.path());
        let articles = store.list_all().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].slug, "first");
        assert_eq!(articles[1].slug, "second");
    }
}
