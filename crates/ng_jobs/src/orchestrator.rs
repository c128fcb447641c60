use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use ng_core::{ArticleCollector, ArtifactSink, Error, GeneratedItem, NewsArticle, Result};

use crate::pipeline::ItemPipeline;
use crate::store::{JobSnapshot, JobStore};

fn default_count() -> usize {
    1
}

fn default_days() -> u32 {
    7
}

fn default_save_to_disk() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_save_to_disk")]
    pub save_to_disk: bool,
    #[serde(default)]
    pub selected_urls: Vec<String>,
    #[serde(default)]
    pub extra_urls: Vec<String>,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            count: default_count(),
            days: default_days(),
            save_to_disk: default_save_to_disk(),
            selected_urls: Vec::new(),
            extra_urls: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobStarted {
    pub job_id: String,
    pub total_expected: usize,
}

/// Runs generation jobs: registers them in the store, fans one pipeline
/// task out per article, drains completions as they land, and bulk-persists
/// artifacts once every pipeline has settled.
#[derive(Clone)]
pub struct JobOrchestrator {
    store: JobStore,
    collector: Arc<dyn ArticleCollector>,
    pipeline: Arc<ItemPipeline>,
    artifacts: Arc<dyn ArtifactSink>,
}

impl JobOrchestrator {
    pub fn new(
        store: JobStore,
        collector: Arc<dyn ArticleCollector>,
        pipeline: Arc<ItemPipeline>,
        artifacts: Arc<dyn ArtifactSink>,
    ) -> Self {
        Self { store, collector, pipeline, artifacts }
    }

    /// Register a job and kick off its runner without waiting for it.
    /// The returned identifier can be polled immediately; the job stays at
    /// zero completed items until pipelines start finishing. If the whole
    /// batch fails to resolve, the job never advances past zero.
    pub async fn start(&self, request: GenerateRequest) -> JobStarted {
        let total_expected = request.count;
        let job_id = self.store.create(total_expected).await;
        info!("job {}: started, expecting {} item(s)", job_id, total_expected);

        let orchestrator = self.clone();
        let runner_job_id = job_id.clone();
        tokio::spawn(async move {
            orchestrator.run_job(runner_job_id, request).await;
        });

        JobStarted { job_id, total_expected }
    }

    pub async fn status(&self, job_id: &str) -> Option<JobSnapshot> {
        self.store.get(job_id).await
    }

    /// Synchronous batch path: same selection and fan-out, but all-or-nothing.
    /// The first item failure aborts the whole response; callers who want
    /// partial results use `start` + `status` instead.
    pub async fn generate_batch(&self, request: GenerateRequest) -> Result<Vec<GeneratedItem>> {
        let batch = self.resolve_batch(&request).await?;
        info!("Generating {} post(s) with images...", batch.len());

        let item_futures: Vec<_> = batch
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let pipeline = self.pipeline.clone();
                let save_to_disk = request.save_to_disk;
                async move { pipeline.process(article, i + 1, save_to_disk).await }
            })
            .collect();

        let items = join_all(item_futures)
            .await
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Generation(e.to_string()))?;

        if request.save_to_disk {
            if let Err(e) = self.artifacts.persist_batch(&items).await {
                warn!("failed to save outputs to disk: {}", e);
            }
        }

        info!("Successfully generated {} post(s) with images", items.len());
        Ok(items)
    }

    /// Resolve the batch of articles for one request. Explicit URLs win:
    /// they are deduplicated preserving first-seen order and dereferenced
    /// best-effort, with unresolvable ones silently dropped. When no URL
    /// resolves (or none were given), fall back to fetch-and-filter.
    async fn resolve_batch(&self, request: &GenerateRequest) -> Result<Vec<NewsArticle>> {
        if !request.selected_urls.is_empty() || !request.extra_urls.is_empty() {
            let mut seen = HashSet::new();
            let mut articles = Vec::new();
            for url in request.selected_urls.iter().chain(request.extra_urls.iter()) {
                if !seen.insert(url.clone()) {
                    continue;
                }
                if let Some(article) = self.collector.article_from_url(url).await {
                    articles.push(article);
                } else {
                    warn!("could not resolve article from {}", url);
                }
            }
            if !articles.is_empty() {
                return Ok(articles);
            }
        }

        // Fetch a few extra candidates so the filter has something to rank.
        let target = request.count.max(5);
        let collection = self.collector.fetch_and_filter(target, Some(request.days)).await?;
        if collection.articles.is_empty() {
            return Err(Error::NoContent);
        }
        Ok(collection.articles.into_iter().take(request.count).collect())
    }

    /// Background runner for one job. Item failures are logged and skipped;
    /// they never abort the batch and never increment the completed count,
    /// so a job with failed items plateaus below its expected total.
    async fn run_job(&self, job_id: String, request: GenerateRequest) {
        let batch = match self.resolve_batch(&request).await {
            Ok(batch) => batch,
            Err(e) => {
                error!("job {}: failed to resolve articles: {}", job_id, e);
                return;
            }
        };

        let mut pipelines = FuturesUnordered::new();
        for (i, article) in batch.into_iter().enumerate() {
            let pipeline = self.pipeline.clone();
            let save_to_disk = request.save_to_disk;
            pipelines.push(tokio::spawn(async move {
                pipeline.process(&article, i + 1, save_to_disk).await
            }));
        }

        while let Some(settled) = pipelines.next().await {
            match settled {
                Ok(Ok(item)) => match self.store.append(&job_id, item).await {
                    Ok(completed) => info!("job {}: {} item(s) completed", job_id, completed),
                    Err(e) => warn!("job {}: could not record item: {}", job_id, e),
                },
                Ok(Err(item_error)) => {
                    warn!("job {}: {}", job_id, item_error);
                }
                Err(join_error) => {
                    warn!("job {}: pipeline task aborted: {}", job_id, join_error);
                }
            }
        }

        if request.save_to_disk {
            if let Some(snapshot) = self.store.get(&job_id).await {
                if !snapshot.items.is_empty() {
                    if let Err(e) = self.artifacts.persist_batch(&snapshot.items).await {
                        warn!("job {}: failed to save outputs to disk: {}", job_id, e);
                    }
                }
            }
        }

        info!("job {}: all pipelines settled", job_id);
    }
}
