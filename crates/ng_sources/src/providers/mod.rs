use async_trait::async_trait;
use ng_core::{NewsArticle, NewsCategory};

pub mod duckduckgo;
pub mod newsapi;
pub mod serpapi;

pub use duckduckgo::DuckDuckGoProvider;
pub use newsapi::NewsApiProvider;
pub use serpapi::SerpApiProvider;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// One upstream news search backend. A provider that fails or is not
/// configured returns an empty list; errors never reach the caller.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the provider has the credentials it needs.
    fn available(&self) -> bool;

    async fn fetch(&self, query: &str, max_results: usize, days: Option<u32>) -> Vec<NewsArticle>;
}

/// Keyword heuristic matching the categories the filter agent ranks on.
pub fn categorize(title: &str, summary: &str) -> NewsCategory {
    let text = format!("{} {}", title, summary).to_lowercase();
    let hr_terms = ["hr", "human resources", "recruitment", "hiring", "talent acquisition"];
    if hr_terms.iter().any(|t| text.contains(t)) {
        if text.contains("talent") {
            return NewsCategory::AiInTalent;
        }
        return NewsCategory::AiInHr;
    }
    NewsCategory::AiAdvancement
}

/// Drop duplicate URLs, keeping the first occurrence in order.
pub fn dedupe_by_url(articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
    let mut seen = std::collections::HashSet::new();
    articles
        .into_iter()
        .filter(|a| seen.insert(a.url.clone()))
        .collect()
}
