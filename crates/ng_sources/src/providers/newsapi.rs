use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use ng_core::{NewsArticle, Result};

use super::{categorize, NewsProvider};

const ENDPOINT: &str = "https://newsapi.org/v2/everything";

#[derive(Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    content: Option<String>,
    source: Option<NewsApiSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

pub struct NewsApiProvider {
    client: Client,
    api_key: Option<String>,
}

impl NewsApiProvider {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    async fn fetch_inner(
        &self,
        query: &str,
        max_results: usize,
        days: Option<u32>,
    ) -> Result<Vec<NewsArticle>> {
        let api_key = self.api_key.as_deref().unwrap_or_default();
        let mut params = vec![
            ("q", query.to_string()),
            ("apiKey", api_key.to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("language", "en".to_string()),
            ("pageSize", max_results.to_string()),
        ];
        if let Some(days) = days.filter(|d| *d > 0) {
            let from = Utc::now() - Duration::days(days as i64);
            params.push(("from", from.format("%Y-%m-%dT%H:%M:%SZ").to_string()));
        }

        let response = self
            .client
            .get(ENDPOINT)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<NewsApiResponse>()
            .await?;

        let articles = response
            .articles
            .into_iter()
            .take(max_results)
            .filter_map(|item| {
                let title = item.title?;
                let url = item.url?;
                let summary = item
                    .description
                    .filter(|d| !d.is_empty())
                    .or_else(|| item.content.map(|c| c.chars().take(200).collect()))
                    .unwrap_or_default();
                let category = categorize(&title, &summary);
                Some(NewsArticle {
                    title,
                    url,
                    summary,
                    relevance_score: 0.5,
                    category,
                    source: item.source.and_then(|s| s.name),
                    published_date: item.published_at,
                })
            })
            .collect();

        Ok(articles)
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    fn name(&self) -> &str {
        "newsapi"
    }

    fn available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, query: &str, max_results: usize, days: Option<u32>) -> Vec<NewsArticle> {
        match self.fetch_inner(query, max_results, days).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("NewsAPI failed for query '{}': {}", query, e);
                Vec::new()
            }
        }
    }
}
