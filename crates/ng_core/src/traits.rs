use async_trait::async_trait;

use crate::models::{GeneratedImage, GeneratedItem, NewsArticle, NewsCollection, Post};
use crate::Result;

/// Raw news retrieval. Provider failures are swallowed: a fetch that finds
/// nothing returns an empty list, it never errors.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_news(&self, max_results: usize, days: Option<u32>) -> Vec<NewsArticle>;

    /// Best-effort single-article fetch; unresolvable URLs yield `None`.
    async fn article_from_url(&self, url: &str) -> Option<NewsArticle>;
}

/// Article selection for generation: fetch-and-filter with provenance
/// counts, plus URL dereferencing for explicit selections.
#[async_trait]
pub trait ArticleCollector: Send + Sync {
    async fn fetch_and_filter(&self, target_count: usize, days: Option<u32>) -> Result<NewsCollection>;

    async fn article_from_url(&self, url: &str) -> Option<NewsArticle>;
}

#[async_trait]
pub trait ContentWriter: Send + Sync {
    async fn write_post(&self, article: &NewsArticle) -> Result<Post>;
}

#[async_trait]
pub trait Illustrator: Send + Sync {
    async fn illustrate(&self, post: &Post, save_to_disk: bool) -> Result<GeneratedImage>;
}

/// Bulk persistence of finished items. Best-effort: callers log failures
/// and never surface them to the request that triggered generation.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn persist_batch(&self, items: &[GeneratedItem]) -> Result<()>;
}

/// Chat completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn name(&self) -> &str;

    /// Run one completion and return the raw assistant reply.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// Image generation backend; returns the remote URL of the rendered image.
#[async_trait]
pub trait ImageModel: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str, size: &str, quality: &str) -> Result<String>;
}
