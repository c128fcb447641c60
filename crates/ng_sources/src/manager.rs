use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{info, warn};

use ng_core::{ArticleSource, NewsArticle, NewsCategory, Settings};

use crate::providers::{
    categorize, dedupe_by_url, DuckDuckGoProvider, NewsApiProvider, NewsProvider, SerpApiProvider,
    USER_AGENT,
};

const QUERIES: [&str; 3] = [
    "(AI OR \"artificial intelligence\") (hiring OR recruitment OR \"talent acquisition\")",
    "(AI OR \"artificial intelligence\") (HR OR \"human resources\")",
    "\"AI advancement\" OR \"AI breakthrough\" OR \"generative AI\"",
];

const PER_QUERY_RESULTS: usize = 5;

/// Fans one request out across the configured providers, in order of
/// preference, stopping at the first one that yields anything.
pub struct SourceManager {
    client: Client,
    providers: Vec<Box<dyn NewsProvider>>,
}

impl SourceManager {
    pub fn new(settings: &Settings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        let providers: Vec<Box<dyn NewsProvider>> = vec![
            Box::new(NewsApiProvider::new(client.clone(), settings.newsapi_key.clone())),
            Box::new(SerpApiProvider::new(client.clone(), settings.serpapi_key.clone())),
            Box::new(DuckDuckGoProvider::new(client.clone())),
        ];
        Self { client, providers }
    }

    /// Placeholder batch used when every provider comes up empty, so the
    /// downstream pipeline stays exercisable without API keys.
    pub fn mock_articles() -> Vec<NewsArticle> {
        let entries = [
            (
                "AI Revolutionizes Talent Acquisition: New Tools Transform Hiring",
                "https://example.com/ai-talent-acquisition",
                "Artificial intelligence is transforming how companies find and hire talent, with new AI-powered tools making recruitment more efficient and effective.",
                0.9,
                NewsCategory::AiInTalent,
                "Tech News",
            ),
            (
                "HR Departments Embrace AI for Employee Management",
                "https://example.com/ai-hr-management",
                "Human resources departments are increasingly adopting AI technologies to streamline employee management, improve engagement, and optimize workforce planning.",
                0.85,
                NewsCategory::AiInHr,
                "HR Today",
            ),
            (
                "Latest AI Breakthroughs in Machine Learning and Automation",
                "https://example.com/ai-breakthroughs",
                "Recent advances in artificial intelligence and machine learning are opening new possibilities for automation and intelligent systems across industries.",
                0.8,
                NewsCategory::AiAdvancement,
                "AI Weekly",
            ),
            (
                "AI-Powered Recruitment Platforms Gain Traction",
                "https://example.com/ai-recruitment-platforms",
                "Companies are turning to AI-powered recruitment platforms that use machine learning to match candidates with job opportunities more accurately.",
                0.75,
                NewsCategory::AiInTalent,
                "Recruitment Tech",
            ),
            (
                "How AI is Reshaping the Future of Work and Hiring",
                "https://example.com/ai-future-work",
                "Artificial intelligence is fundamentally changing the landscape of work, from how jobs are posted to how candidates are evaluated and selected.",
                0.7,
                NewsCategory::AiInHr,
                "Future of Work",
            ),
        ];
        entries
            .into_iter()
            .map(|(title, url, summary, score, category, source)| NewsArticle {
                title: title.to_string(),
                url: url.to_string(),
                summary: summary.to_string(),
                relevance_score: score,
                category,
                source: Some(source.to_string()),
                published_date: None,
            })
            .collect()
    }
}

#[async_trait]
impl ArticleSource for SourceManager {
    async fn fetch_news(&self, max_results: usize, days: Option<u32>) -> Vec<NewsArticle> {
        let mut all_articles = Vec::new();

        for provider in &self.providers {
            if !provider.available() {
                continue;
            }
            info!("Fetching news via {}...", provider.name());
            for query in QUERIES {
                let articles = provider.fetch(query, PER_QUERY_RESULTS, days).await;
                if !articles.is_empty() {
                    info!("Found {} articles for: {}", articles.len(), query);
                }
                all_articles.extend(articles);
            }
            if !all_articles.is_empty() {
                break;
            }
            info!("{} returned no results, trying next provider", provider.name());
        }

        if all_articles.is_empty() {
            warn!("No articles found from any source, using mock data");
            all_articles = Self::mock_articles();
        }

        dedupe_by_url(all_articles).into_iter().take(max_results).collect()
    }

    async fn article_from_url(&self, url: &str) -> Option<NewsArticle> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?;
        let html = response.text().await.ok()?;

        let (title, summary) = extract_metadata(&html)?;
        let category = categorize(&title, &summary);
        Some(NewsArticle {
            title,
            url: url.to_string(),
            summary,
            relevance_score: 0.6,
            category,
            source: None,
            published_date: None,
        })
    }
}

/// Pull a page title and description out of the document head.
/// Prefers OpenGraph tags, falls back to `<title>` and `meta[name=description]`.
fn extract_metadata(html: &str) -> Option<(String, String)> {
    let document = Html::parse_document(html);

    let meta_content = |selector: &str| -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
    };

    let title = meta_content("meta[property='og:title']").or_else(|| {
        let selector = Selector::parse("title").ok()?;
        document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    })?;

    let summary = meta_content("meta[name='description']")
        .or_else(|| meta_content("meta[property='og:description']"))
        .unwrap_or_default();

    Some((title, summary))
}
