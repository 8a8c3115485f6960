use nx_core::{ArticleStore, Error, Result};
use std::path::Path;
use std::sync::Arc;

pub mod accessor;
pub mod backends;

pub use accessor::StoreAccessor;
pub use backends::*;

/// Builds a store by backend name. `path` is the articles directory for
/// `fs` and the database file for `sqlite`; `memory` ignores it.
pub async fn create_store(kind: &str, path: &Path) -> Result<Arc<dyn ArticleStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "fs" => Ok(Arc::new(FsStore::new(path))),
        #[cfg(feature = "sqlite")]
        "sqlite" => Ok(Arc::new(SqliteStore::new_with_path(path).await?)),
        other => Err(Error::Config(format!("unknown storage backend: {}", other))),
    }
}

pub mod prelude {
    pub use crate::accessor::StoreAccessor;
    pub use crate::backends::*;
    pub use nx_core::{Article, ArticleIndexEntry, ArticleStore, Error, Result};
}
