pub mod manager;
pub mod providers;

pub use manager::SourceManager;
pub use providers::{categorize, NewsProvider};

pub mod prelude {
    pub use super::manager::SourceManager;
    pub use super::providers::NewsProvider;
    pub use ng_core::{NewsArticle, Result, Error};
}
