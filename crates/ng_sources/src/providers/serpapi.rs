use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use ng_core::{NewsArticle, Result};

use super::{categorize, NewsProvider};

const ENDPOINT: &str = "https://serpapi.com/search";

#[derive(Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    news_results: Vec<SerpApiNewsResult>,
}

#[derive(Deserialize)]
struct SerpApiNewsResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
    source: Option<String>,
    date: Option<String>,
}

pub struct SerpApiProvider {
    client: Client,
    api_key: Option<String>,
}

impl SerpApiProvider {
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
            ("q", format!("{} news", query)),
            ("api_key", api_key.to_string()),
            ("engine", "google".to_string()),
            ("tbm", "nws".to_string()),
            ("num", max_results.to_string()),
            ("hl", "en".to_string()),
            ("gl", "us".to_string()),
        ];
        // Google recency buckets: day, week, month.
        if let Some(days) = days.filter(|d| *d > 0) {
            let tbs = if days <= 1 {
                "qdr:d"
            } else if days <= 7 {
                "qdr:w"
            } else {
                "qdr:m"
            };
            params.push(("tbs", tbs.to_string()));
        }

        let response = self
            .client
            .get(ENDPOINT)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<SerpApiResponse>()
            .await?;

        let articles = response
            .news_results
            .into_iter()
            .take(max_results)
            .filter_map(|item| {
                let title = item.title?;
                let url = item.link?;
                let summary = item.snippet.unwrap_or_default();
                let category = categorize(&title, &summary);
                Some(NewsArticle {
                    title,
                    url,
                    summary,
                    relevance_score: 0.5,
                    category,
                    source: item.source,
                    published_date: item.date,
                })
            })
            .collect();

        Ok(articles)
    }
}

#[async_trait]
impl NewsProvider for SerpApiProvider {
    fn name(&self) -> &str {
        "serpapi"
    }

    fn available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, query: &str, max_results: usize, days: Option<u32>) -> Vec<NewsArticle> {
        match self.fetch_inner(query, max_results, days).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("SerpAPI failed for query '{}': {}", query, e);
                Vec::new()
            }
        }
    }
}
