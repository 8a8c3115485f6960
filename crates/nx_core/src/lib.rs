pub mod category;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use category::Category;
pub use config::SiteConfig;
pub use error::Error;
pub use store::ArticleStore;
pub use types::{Article, ArticleIndexEntry, Author, ImageAttribution, SourceData};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::category::Category;
    pub use crate::store::ArticleStore;
    pub use crate::types::{Article, ArticleIndexEntry};
    pub use crate::{Error, Result};
}
