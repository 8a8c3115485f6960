use nx_core::Category;

/// Immutable browse state: active category, free-text query and current
/// page. UI code binds to this and steps it through the reducers instead of
/// embedding filter logic in view code.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
    pub category: Option<Category>,
    pub query: String,
    pub page: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            category: None,
            query: String::new(),
            page: 1,
        }
    }
}

impl BrowseState {
    /// Changing the category always returns to the first page of the new
    /// result set.
    pub fn with_category(self, category: Option<Category>) -> Self {
        Self {
            category,
            page: 1,
            ..self
        }
    }

    /// Changing the query always returns to the first page of the new
    /// result set.
    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            ..self
        }
    }

    pub fn with_page(self, page: usize) -> Self {
        Self { page, ..self }
    }
}
