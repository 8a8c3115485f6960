use async_trait::async_trait;
use nx_core::{
    Article, ArticleIndexEntry, ArticleStore, Author, Category, Error, Result, SourceData,
};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        slug TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        meta_description TEXT,
        content TEXT NOT NULL,
        keywords TEXT,
        reading_time INTEGER NOT NULL DEFAULT 5,
        word_count INTEGER NOT NULL DEFAULT 0,
        topic TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT,
        published INTEGER NOT NULL DEFAULT 1,
        featured_image TEXT,
        author TEXT,
        image_attribution TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS trending_sources (
        article_slug TEXT NOT NULL REFERENCES articles(slug),
        keyword TEXT NOT NULL,
        source TEXT NOT NULL,
        score REAL NOT NULL DEFAULT 0,
        region TEXT NOT NULL DEFAULT 'US',
        url TEXT,
        timestamp TEXT
    )
    "#,
    // Add future migrations here
];

/// Database-channel store: the `articles` table plus the joined
/// `trending_sources` provenance table, shaped into the same records the
/// file channel produces.
pub struct SqliteStore {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl SqliteStore {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path.display()))
            .await
            .map_err(|e| Error::StoreUnavailable(format!("failed to connect: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("migration {} failed: {}", i, e)))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Ingestion-side write path. The read-only [`ArticleStore`] surface
    /// never exposes this; it exists for the producer and for tests.
    pub async fn store_article(&self, article: &Article) -> Result<()> {
        let keywords = serde_json::to_string(&article.keywords)?;
        let author = serde_json::to_string(&article.author)?;
        let image_attribution = article
            .image_attribution
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO articles
            (slug, title, meta_description, content, keywords, reading_time,
             word_count, topic, created_at, updated_at, published,
             featured_image, author, image_attribution)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.slug)
        .bind(&article.title)
        .bind(&article.meta_description)
        .bind(&article.content)
        .bind(keywords)
        .bind(article.reading_time as i64)
        .bind(article.word_count as i64)
        .bind(article.topic.map(|t| t.label()))
        .bind(article.created_at.to_rfc3339())
        .bind(article.updated_at.map(|t| t.to_rfc3339()))
        .bind(article.published as i64)
        .bind(article.featured_image.as_deref())
        .bind(author)
        .bind(image_attribution)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to store article: {}", e)))?;

        if let Some(source) = &article.source_data {
            sqlx::query("DELETE FROM trending_sources WHERE article_slug = ?")
                .bind(&article.slug)
                .execute(&*self.pool)
                .await
                .map_err(|e| Error::Database(format!("failed to clear provenance: {}", e)))?;

            sqlx::query(
                r#"
                INSERT INTO trending_sources
                (article_slug, keyword, source, score, region, url, timestamp)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&article.slug)
            .bind(&source.keyword)
            .bind(&source.source)
            .bind(source.score)
            .bind(&source.region)
            .bind(source.url.as_deref())
            .bind(source.timestamp.map(|t| t.to_rfc3339()))
            .execute(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("failed to store provenance: {}", e)))?;
        }

        Ok(())
    }

    fn row_to_article(row: &SqliteRow) -> Result<Article> {
        let slug: String = row.get("slug");

        let topic = match row.get::<Option<String>, _>("topic") {
            None => None,
            Some(label) if label.trim().is_empty() => None,
            Some(label) => Some(Category::from_label(&label).ok_or_else(|| {
                Error::MalformedRecord(format!("article {}: unknown topic {}", slug, label))
            })?),
        };

        let keywords = match row.get::<Option<String>, _>("keywords") {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| Error::MalformedRecord(format!("article {}: keywords: {}", slug, e)))?,
            None => Vec::new(),
        };

        let author = match row.get::<Option<String>, _>("author") {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| Error::MalformedRecord(format!("article {}: author: {}", slug, e)))?,
            None => Author::default(),
        };

        let image_attribution = match row.get::<Option<String>, _>("image_attribution") {
            Some(raw) => Some(serde_json::from_str(&raw).map_err(|e| {
                Error::MalformedRecord(format!("article {}: image_attribution: {}", slug, e))
            })?),
            None => None,
        };

        let created_at = parse_timestamp(&slug, &row.get::<String, _>("created_at"))?;
        let updated_at = row
            .get::<Option<String>, _>("updated_at")
            .map(|raw| parse_timestamp(&slug, &raw))
            .transpose()?;

        Ok(Article {
            slug,
            title: row.get("title"),
            meta_description: row
                .get::<Option<String>, _>("meta_description")
                .unwrap_or_default(),
            content: row.get("content"),
            keywords,
            reading_time: row.get::<i64, _>("reading_time") as u32,
            word_count: row.get::<i64, _>("word_count") as u32,
            topic,
            created_at,
            updated_at,
            published: row.get::<i64, _>("published") != 0,
            featured_image: row.get::<Option<String>, _>("featured_image"),
            author,
            source_data: None,
            image_attribution,
        })
    }

    async fn fetch_source_data(&self, slug: &str) -> Result<Option<SourceData>> {
        let row = sqlx::query(
            "SELECT keyword, source, score, region, url, timestamp
             FROM trending_sources WHERE article_slug = ?",
        )
        .bind(slug)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to fetch provenance: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let timestamp = row
            .get::<Option<String>, _>("timestamp")
            .map(|raw| parse_timestamp(slug, &raw))
            .transpose()?;

        Ok(Some(SourceData {
            keyword: row.get("keyword"),
            source: row.get("source"),
            score: row.get("score"),
            region: row.get("region"),
            url: row.get::<Option<String>, _>("url"),
            timestamp,
        }))
    }
}

fn parse_timestamp(slug: &str, raw: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&chrono::Utc))
        .map_err(|e| Error::MalformedRecord(format!("article {}: timestamp {}: {}", slug, raw, e)))
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn list_index(&self) -> Result<Vec<ArticleIndexEntry>> {
        let rows = sqlx::query(
            "SELECT * FROM articles WHERE published = 1 ORDER BY created_at DESC",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::StoreUnavailable(format!("failed to list index: {}", e)))?;

        let entries = rows
            .iter()
            .filter_map(|row| match Self::row_to_article(row) {
                Ok(article) => Some(article.index_entry()),
                Err(e) => {
                    warn!("skipping malformed index row: {}", e);
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE slug = ? AND published = 1")
            .bind(slug)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::StoreUnavailable(format!("failed to fetch article: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut article = match Self::row_to_article(&row) {
            Ok(article) => article,
            Err(e) => {
                warn!("malformed article record: {}", e);
                return Ok(None);
            }
        };

        // Provenance is display-only; a failed join never hides the article.
        match self.fetch_source_data(slug).await {
            Ok(source_data) => article.source_data = source_data,
            Err(e) => warn!("failed to fetch provenance for {}: {}", slug, e),
        }

        Ok(Some(article))
    }

    async fn list_all(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            "SELECT * FROM articles WHERE published = 1 ORDER BY created_at DESC",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::StoreUnavailable(format!("failed to list articles: {}", e)))?;

        let articles = rows
            .iter()
            .filter_map(|row| match Self::row_to_article(row) {
                Ok(article) => Some(article),
                Err(e) => {
                    warn!("skipping malformed article row: {}", e);
                    None
                }
            })
            .collect();

        Ok(articles)
    }
}
