use nx_core::{ArticleIndexEntry, Category};

use crate::state::BrowseState;

/// `None` means no category filter and is the identity. With a category
/// active, entries without a topic are excluded. Input order is preserved.
pub fn filter_by_category(
    entries: Vec<ArticleIndexEntry>,
    category: Option<Category>,
) -> Vec<ArticleIndexEntry> {
    match category {
        None => entries,
        Some(category) => entries
            .into_iter()
            .filter(|entry| entry.topic == Some(category))
            .collect(),
    }
}

/// Case-insensitive substring match across title, description, keywords and
/// topic label; a hit in any one field keeps the entry. An empty or
/// whitespace-only query is the identity. No ranking, input order is
/// preserved.
pub fn filter_by_search(entries: Vec<ArticleIndexEntry>, query: &str) -> Vec<ArticleIndexEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries;
    }

    entries
        .into_iter()
        .filter(|entry| matches_query(entry, &query))
        .collect()
}

fn matches_query(entry: &ArticleIndexEntry, query: &str) -> bool {
    entry.title.to_lowercase().contains(query)
        || entry.meta_description.to_lowercase().contains(query)
        || entry
            .keywords
            .iter()
            .any(|keyword| keyword.to_lowercase().contains(query))
        || entry
            .topic
            .is_some_and(|topic| topic.label().to_lowercase().contains(query))
}

/// Category filter first, then search. Both are pure subset predicates, so
/// the order is behaviorally irrelevant today; it will start to matter if a
/// ranking filter is ever added here.
pub fn apply_filters(entries: Vec<ArticleIndexEntry>, state: &BrowseState) -> Vec<ArticleIndexEntry> {
    let entries = filter_by_category(entries, state.category);
    filter_by_search(entries, &state.query)
}
