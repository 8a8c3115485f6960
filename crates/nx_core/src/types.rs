use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::{self, Category};

/// Lightweight article projection used for listing, search and pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleIndexEntry {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default = "default_reading_time")]
    pub reading_time: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "category::option")]
    pub topic: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

/// Full article record, superset of [`ArticleIndexEntry`].
///
/// `content` is trusted, pre-sanitized HTML: the ingestion pipeline is
/// responsible for safety, nothing downstream escapes or sanitizes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub meta_description: String,
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_reading_time")]
    pub reading_time: u32,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default, with = "category::option")]
    pub topic: Option<Category>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub author: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_data: Option<SourceData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_attribution: Option<ImageAttribution>,
}

impl Article {
    /// Derives the index projection from the full record, so the two can
    /// never drift apart.
    pub fn index_entry(&self) -> ArticleIndexEntry {
        ArticleIndexEntry {
            slug: self.slug.clone(),
            title: self.title.clone(),
            meta_description: self.meta_description.clone(),
            reading_time: self.reading_time,
            keywords: self.keywords.clone(),
            created_at: self.created_at,
            topic: self.topic,
            source: self.source_data.as_ref().map(|s| s.source.clone()),
            featured_image: self.featured_image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: "NexusTopic Editorial Team".to_string(),
            bio: Some("Delivering the latest trending topics and insights".to_string()),
        }
    }
}

/// Trending-source provenance attached to an article at ingestion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceData {
    #[serde(default)]
    pub keyword: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttribution {
    #[serde(default)]
    pub photographer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photographer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

fn default_reading_time() -> u32 {
    5
}

fn default_published() -> bool {
    true
}

fn default_source() -> String {
    "google_trends".to_string()
}

fn default_region() -> String {
    "US".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_article() -> Article {
        Article {
            slug: "ai-breakthrough".to_string(),
            title: "AI breakthrough".to_string(),
            meta_description: "A major step forward".to_string(),
            content: "<p>Body</p>".to_string(),
            keywords: vec!["ai".to_string(), "research".to_string()],
            reading_time: 4,
            word_count: 800,
            topic: Some(Category::Ai),
            created_at: Utc::now(),
            updated_at: None,
            published: true,
            featured_image: Some("https://img.example/ai.jpg".to_string()),
            author: Author::default(),
            source_data: Some(SourceData {
                keyword: "ai breakthrough".to_string(),
                source: "hackernews".to_string(),
                score: 92.0,
                region: "US".to_string(),
                url: None,
                timestamp: None,
            }),
            image_attribution: None,
        }
    }

    #[test]
    fn test_index_entry_projection() {
        let article = sample_article();
        let entry = article.index_entry();
        assert_eq!(entry.slug, article.slug);
        assert_eq!(entry.title, article.title);
        assert_eq!(entry.topic, Some(Category::Ai));
        assert_eq!(entry.source.as_deref(), Some("hackernews"));
        assert_eq!(entry.keywords, article.keywords);
    }

    #[test]
    fn test_empty_topic_deserializes_as_none() {
        let json = r#"{
            "slug": "no-topic",
            "title": "No topic",
            "created_at": "2024-05-01T10:00:00Z",
            "topic": ""
        }"#;
        let entry: ArticleIndexEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.topic, None);
        assert_eq!(entry.reading_time, 5);
    }

    #[test]
    fn test_unknown_topic_is_malformed() {
        let json = r#"{
            "slug": "bad-topic",
            "title": "Bad topic",
            "created_at": "2024-05-01T10:00:00Z",
            "topic": "SPORTS"
        }"#;
        assert!(serde_json::from_str::<ArticleIndexEntry>(json).is_err());
    }

    #[test]
    fn test_article_round_trip() {
        let article = sample_article();
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back.slug, article.slug);
        assert_eq!(back.topic, article.topic);
        assert_eq!(back.author, article.author);
    }
}
