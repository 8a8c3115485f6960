use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nx_core::{Article, ArticleIndexEntry, Category};
use nx_search::BrowseState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

pub const DEFAULT_PAGE_SIZE: usize = 8;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleIndexEntry>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ArticleListResponse>, ApiError> {
    let category = match params.category.as_deref() {
        None | Some("") => None,
        Some(label) => Some(
            Category::from_label(label)
                .ok_or_else(|| ApiError::bad_request(format!("unknown category: {}", label)))?,
        ),
    };

    let page_size = params
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    // Reducer order matters: filters reset the page, so the page lands last.
    let browse_state = BrowseState::default()
        .with_category(category)
        .with_query(params.q.unwrap_or_default())
        .with_page(params.page.unwrap_or(1));

    // A broken store already degraded to an empty index in the accessor.
    let entries = state.store.index().await;
    let page = nx_search::browse(entries, &browse_state, page_size);

    Ok(Json(ArticleListResponse {
        articles: page.items,
        page: page.page,
        total_pages: page.total_pages,
        total: page.total,
    }))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Article>, ApiError> {
    state
        .store
        .article(&slug)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("article not found"))
}

pub async fn list_categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(|c| c.label()).collect())
}

#[derive(Debug, Serialize)]
pub struct SiteInfo {
    pub site_name: String,
    pub site_url: String,
    pub site_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adsense_client: Option<String>,
}

pub async fn site_info(State(state): State<Arc<AppState>>) -> Json<SiteInfo> {
    Json(SiteInfo {
        site_name: state.config.site_name.clone(),
        site_url: state.config.site_url.clone(),
        site_description: state.config.site_description.clone(),
        adsense_client: state.config.adsense_client.clone(),
    })
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use nx_core::{Author, SiteConfig};
    use nx_storage::{MemoryStore, StoreAccessor};

    fn article(slug: &str, title: &str, topic: Option<Category>, day: u32) -> Article {
        Article {
            slug: slug.to_string(),
            title: title.to_string(),
            meta_description: String::new(),
            content: "<p>body</p>".to_string(),
            keywords: vec![],
            reading_time: 5,
            word_count: 500,
            topic,
            created_at: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
            updated_at: None,
            published: true,
            featured_image: None,
            author: Author::default(),
            source_data: None,
            image_attribution: None,
        }
    }

    async fn seeded_state() -> Arc<AppState> {
        let store = MemoryStore::new();
        store
            .insert(article("ai-breakthrough", "AI breakthrough", Some(Category::Ai), 2))
            .await;
        store
            .insert(article("space-launch", "Space launch", Some(Category::Space), 1))
            .await;
        Arc::new(AppState::new(
            StoreAccessor::new(std::sync::Arc::new(store)),
            SiteConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_list_articles_with_category() {
        let state = seeded_state().await;
        let params = ListParams {
            category: Some("ai".to_string()),
            ..Default::default()
        };
        let Json(resp) = list_articles(State(state), Query(params)).await.unwrap();
        assert_eq!(resp.total, 1);
        assert_eq!(resp.articles[0].slug, "ai-breakthrough");
    }

    #[tokio::test]
    async fn test_list_articles_unknown_category_is_bad_request() {
        let state = seeded_state().await;
        let params = ListParams {
            category: Some("SPORTS".to_string()),
            ..Default::default()
        };
        let err = list_articles(State(state), Query(params)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_articles_search_query() {
        let state = seeded_state().await;
        let params = ListParams {
            q: Some("space".to_string()),
            ..Default::default()
        };
        let Json(resp) = list_articles(State(state), Query(params)).await.unwrap();
        assert_eq!(resp.total, 1);
        assert_eq!(resp.articles[0].slug, "space-launch");
    }

    #[tokio::test]
    async fn test_get_article_not_found() {
        let state = seeded_state().await;
        let err = get_article(State(state), Path("nonexistent-slug".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_article_found() {
        let state = seeded_state().await;
        let Json(article) = get_article(State(state), Path("ai-breakthrough".to_string()))
            .await
            .unwrap();
        assert_eq!(article.title, "AI breakthrough");
    }

    #[tokio::test]
    async fn test_categories_endpoint_lists_all_labels() {
        let Json(labels) = list_categories().await;
        assert_eq!(labels.len(), 11);
        assert!(labels.contains(&"BIZ & IT"));
    }
}
