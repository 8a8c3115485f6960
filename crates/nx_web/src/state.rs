use nx_core::SiteConfig;
use nx_storage::StoreAccessor;

#[derive(Clone)]
pub struct AppState {
    pub store: StoreAccessor,
    pub config: SiteConfig,
}

impl AppState {
    pub fn new(store: StoreAccessor, config: SiteConfig) -> Self {
        Self { store, config }
    }
}
