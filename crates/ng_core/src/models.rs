use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    AiAdvancement,
    AiInHr,
    AiInTalent,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::AiAdvancement => "ai_advancement",
            NewsCategory::AiInHr => "ai_in_hr",
            NewsCategory::AiInTalent => "ai_in_talent",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    /// Canonical URL, used as the dedup key across providers.
    pub url: String,
    pub summary: String,
    /// Relevance in [0, 1]. Rewritten by the filter agent to reflect rank order.
    pub relevance_score: f32,
    pub category: NewsCategory,
    pub source: Option<String>,
    pub published_date: Option<String>,
}

/// Selection result for one request: the filtered articles plus provenance
/// counts and the raw candidate list they were chosen from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCollection {
    pub articles: Vec<NewsArticle>,
    pub total_count: usize,
    pub filtered_count: usize,
    #[serde(default)]
    pub all_articles: Vec<NewsArticle>,
    #[serde(default)]
    pub filtered_articles: Vec<NewsArticle>,
}

impl NewsCollection {
    pub fn empty() -> Self {
        Self {
            articles: Vec::new(),
            total_count: 0,
            filtered_count: 0,
            all_articles: Vec::new(),
            filtered_articles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub content: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub image_prompt: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub news_article_title: Option<String>,
    pub news_article_url: Option<String>,
}

/// On success at least one of `image_url` / `image_path` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub prompt_used: String,
    #[serde(default)]
    pub generation_metadata: HashMap<String, String>,
}

/// One post paired with its image. `post_index` is the 1-based submission
/// position within the batch, not the completion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub post: Post,
    pub image: GeneratedImage,
    pub post_index: usize,
}
