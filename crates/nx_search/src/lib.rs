pub mod filter;
pub mod page;
pub mod state;

pub use filter::{apply_filters, filter_by_category, filter_by_search};
pub use page::{paginate, Page};
pub use state::BrowseState;

use nx_core::ArticleIndexEntry;

/// Full browse pipeline: filters applied per the state, then the state's
/// page sliced out.
pub fn browse(
    entries: Vec<ArticleIndexEntry>,
    state: &BrowseState,
    page_size: usize,
) -> Page<ArticleIndexEntry> {
    let filtered = apply_filters(entries, state);
    paginate(&filtered, state.page, page_size)
}

pub mod prelude {
    pub use crate::filter::{apply_filters, filter_by_category, filter_by_search};
    pub use crate::page::{paginate, Page};
    pub use crate::state::BrowseState;
}
