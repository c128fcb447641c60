use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use ng_core::{ArticleCollector, ArticleSource, ChatModel, Error, NewsArticle, NewsCollection, Result};

/// Raw candidates fetched per request before filtering.
const RAW_FETCH_COUNT: usize = 10;

const FILTER_SYSTEM_PROMPT: &str = "\
You are an expert analyst filtering news for AI, HR, and talent audiences.
Select the most relevant articles with these priorities:
1) Recency and substance (clear, credible reporting)
2) Relevance to AI advancements, AI in HR, or AI in talent/hiring
3) Practical implications for HR leaders and talent teams
4) Credible sources; avoid low-signal or duplicate content
Return a JSON object: {\"urls\": [\"...\"], \"reasoning\": \"...\"} where \
\"urls\" lists the URLs of the selected articles ranked by relevance, \
containing exactly the requested number.";

#[derive(Serialize)]
struct CandidateSummary<'a> {
    title: &'a str,
    summary: &'a str,
    category: &'a str,
    url: &'a str,
}

#[derive(Deserialize)]
struct FilterReply {
    #[serde(default)]
    urls: Vec<String>,
    #[serde(default)]
    reasoning: String,
}

/// Fetches raw candidates from the sources and narrows them down with the
/// chat model. When the candidate count already meets the target the LLM
/// call is skipped entirely.
pub struct NewsScoutAgent {
    sources: Arc<dyn ArticleSource>,
    chat: Arc<dyn ChatModel>,
}

impl NewsScoutAgent {
    pub fn new(sources: Arc<dyn ArticleSource>, chat: Arc<dyn ChatModel>) -> Self {
        Self { sources, chat }
    }

    async fn filter_articles(
        &self,
        all: &[NewsArticle],
        target_count: usize,
    ) -> Result<Vec<NewsArticle>> {
        let candidates: Vec<CandidateSummary<'_>> = all
            .iter()
            .map(|a| CandidateSummary {
                title: &a.title,
                summary: &a.summary,
                category: a.category.as_str(),
                url: &a.url,
            })
            .collect();
        let user_prompt = format!(
            "Filter these {} articles to the top {} most relevant ones. \
             Focus on AI advancements, AI in HR, and AI in talent/hiring. \
             Return the articles in order of relevance. Articles: {}",
            all.len(),
            target_count,
            serde_json::to_string(&candidates)?,
        );

        let reply = self.chat.complete(FILTER_SYSTEM_PROMPT, &user_prompt).await?;
        let parsed: FilterReply = serde_json::from_str(&reply)
            .map_err(|e| Error::Inference(format!("filter reply was not valid JSON: {}", e)))?;
        debug!("filter reasoning: {}", parsed.reasoning);

        // Match the ranked URLs back to the original articles; unknown URLs
        // are dropped.
        let by_url: HashMap<&str, &NewsArticle> =
            all.iter().map(|a| (a.url.as_str(), a)).collect();
        let mut seen = std::collections::HashSet::new();
        Ok(parsed
            .urls
            .iter()
            .filter(|url| seen.insert(url.as_str()))
            .filter_map(|url| by_url.get(url.as_str()).map(|a| (*a).clone()))
            .take(target_count)
            .collect())
    }
}

#[async_trait]
impl ArticleCollector for NewsScoutAgent {
    async fn fetch_and_filter(&self, target_count: usize, days: Option<u32>) -> Result<NewsCollection> {
        let all = self.sources.fetch_news(RAW_FETCH_COUNT, days).await;
        if all.is_empty() {
            return Ok(NewsCollection::empty());
        }

        let mut filtered = if all.len() <= target_count {
            // Nothing to narrow down, every candidate passes through.
            all.clone()
        } else {
            self.filter_articles(&all, target_count).await?
        };

        // Relevance now reflects rank order: 1.0, 0.9, 0.8, ...
        for (i, article) in filtered.iter_mut().enumerate() {
            article.relevance_score = (1.0 - i as f32 * 0.1).max(0.0);
        }
        filtered.truncate(target_count);

        Ok(NewsCollection {
            articles: filtered.clone(),
            total_count: all.len(),
            filtered_count: filtered.len(),
            all_articles: all,
            filtered_articles: filtered,
        })
    }

    async fn article_from_url(&self, url: &str) -> Option<NewsArticle> {
        self.sources.article_from_url(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ng_core::NewsCategory;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSource {
        articles: Vec<NewsArticle>,
    }

    #[async_trait]
    impl ArticleSource for MockSource {
        async fn fetch_news(&self, max_results: usize, _days: Option<u32>) -> Vec<NewsArticle> {
            self.articles.iter().take(max_results).cloned().collect()
        }

        async fn article_from_url(&self, url: &str) -> Option<NewsArticle> {
            self.articles.iter().find(|a| a.url == url).cloned()
        }
    }

    struct MockChat {
        reply: String,
        calls: AtomicUsize,
    }

    impl MockChat {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ChatModel for MockChat {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    fn article(url: &str) -> NewsArticle {
        NewsArticle {
            title: format!("title {}", url),
            url: url.to_string(),
            summary: "summary".to_string(),
            relevance_score: 0.5,
            category: NewsCategory::AiAdvancement,
            source: None,
            published_date: None,
        }
    }

    fn scout(articles: Vec<NewsArticle>, chat: Arc<MockChat>) -> NewsScoutAgent {
        NewsScoutAgent::new(Arc::new(MockSource { articles }), chat)
    }

    #[tokio::test]
    async fn skips_filter_when_candidates_fit_target() {
        let chat = Arc::new(MockChat::new("unused"));
        let agent = scout(vec![article("a"), article("b"), article("c")], chat.clone());

        let collection = agent.fetch_and_filter(5, Some(7)).await.unwrap();
        assert_eq!(collection.filtered_count, 3);
        assert_eq!(collection.total_count, 3);
        assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rescoring_follows_rank_order() {
        let chat = Arc::new(MockChat::new("unused"));
        let agent = scout(vec![article("a"), article("b"), article("c")], chat);

        let collection = agent.fetch_and_filter(3, None).await.unwrap();
        let scores: Vec<f32> = collection.articles.iter().map(|a| a.relevance_score).collect();
        assert_eq!(scores, vec![1.0, 0.9, 0.8]);
    }

    #[tokio::test]
    async fn filter_matches_ranked_urls_back_to_articles() {
        let reply = r#"{"urls": ["d", "b", "unknown"], "reasoning": "d first"}"#;
        let chat = Arc::new(MockChat::new(reply));
        let articles = vec![article("a"), article("b"), article("c"), article("d")];
        let agent = scout(articles, chat.clone());

        let collection = agent.fetch_and_filter(2, Some(7)).await.unwrap();
        assert_eq!(chat.calls.load(Ordering::SeqCst), 1);
        assert_eq!(collection.total_count, 4);
        assert_eq!(collection.filtered_count, 2);
        let urls: Vec<_> = collection.articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["d", "b"]);
        assert_eq!(collection.articles[0].relevance_score, 1.0);
        assert_eq!(collection.articles[1].relevance_score, 0.9);
    }

    #[tokio::test]
    async fn empty_sources_yield_empty_collection() {
        let chat = Arc::new(MockChat::new("unused"));
        let agent = scout(vec![], chat);
        let collection = agent.fetch_and_filter(5, None).await.unwrap();
        assert!(collection.articles.is_empty());
        assert_eq!(collection.total_count, 0);
    }

    #[tokio::test]
    async fn invalid_filter_reply_is_an_inference_error() {
        let chat = Arc::new(MockChat::new("not json"));
        let articles = (0..6).map(|i| article(&format!("u{}", i))).collect();
        let agent = scout(articles, chat);
        let err = agent.fetch_and_filter(2, None).await.unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }
}
