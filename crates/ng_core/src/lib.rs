pub mod error;
pub mod models;
pub mod settings;
pub mod traits;

pub use error::Error;
pub use models::{GeneratedImage, GeneratedItem, NewsArticle, NewsCategory, NewsCollection, Post};
pub use settings::{ColorTheme, Settings};
pub use traits::{ArticleCollector, ArticleSource, ArtifactSink, ChatModel, ContentWriter, Illustrator, ImageModel};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::models::{GeneratedImage, GeneratedItem, NewsArticle, NewsCategory, NewsCollection, Post};
    pub use crate::settings::Settings;
    pub use crate::{Error, Result};
}
