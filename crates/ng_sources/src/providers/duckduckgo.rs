use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::warn;

use ng_core::{NewsArticle, Result};

use super::{categorize, NewsProvider, USER_AGENT};

const ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Free fallback when neither news API is configured: scrape the
/// DuckDuckGo HTML results page.
pub struct DuckDuckGoProvider {
    client: Client,
}

impl DuckDuckGoProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_inner(&self, query: &str, max_results: usize) -> Result<Vec<NewsArticle>> {
        let html = self
            .client
            .get(ENDPOINT)
            .query(&[("q", format!("{} news", query))])
            .header("User-Agent", USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_results(&html, max_results))
    }
}

fn parse_results(html: &str, max_results: usize) -> Vec<NewsArticle> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a.result__a").unwrap();

    let mut articles = Vec::new();
    for element in document.select(&selector).take(max_results) {
        let title = element.text().collect::<String>().trim().to_string();
        let mut url = element.value().attr("href").unwrap_or_default().to_string();
        if title.is_empty() || url.is_empty() {
            continue;
        }
        if url.starts_with("//") {
            url = format!("https:{}", url);
        } else if url.starts_with('/') {
            // Relative redirect link, nothing usable to fetch.
            continue;
        }
        let category = categorize(&title, "");
        articles.push(NewsArticle {
            title,
            url,
            summary: String::new(),
            relevance_score: 0.5,
            category,
            source: None,
            published_date: None,
        });
    }
    articles
}

#[async_trait]
impl NewsProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    fn available(&self) -> bool {
        true
    }

    async fn fetch(&self, query: &str, max_results: usize, _days: Option<u32>) -> Vec<NewsArticle> {
        match self.fetch_inner(query, max_results).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("Web search failed for query '{}': {}", query, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_result_links() {
        let html = r#"
            <html><body>
              <a class="result__a" href="https://example.com/one">AI hiring story</a>
              <a class="result__a" href="//example.com/two">Protocol-relative link</a>
              <a class="result__a" href="/l/?kh=1">Relative redirect</a>
            </body></html>
        "#;
        let articles = parse_results(html, 10);
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].url, "https://example.com/one");
        assert_eq!(articles[1].url, "https://example.com/two");
    }

    #[test]
    fn respects_max_results() {
        let html = r#"
            <a class="result__a" href="https://example.com/1">one</a>
            <a class="result__a" href="https://example.com/2">two</a>
        "#;
        assert_eq!(parse_results(html, 1).len(), 1);
    }
}
