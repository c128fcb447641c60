use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use ng_core::{Error, GeneratedItem, Result};

/// Point-in-time view of one job. `completed` always equals `items.len()`.
#[derive(Debug, Clone, Serialize)]
pub struct JobSnapshot {
    pub job_id: String,
    pub total_expected: usize,
    pub completed: usize,
    pub items: Vec<GeneratedItem>,
}

#[derive(Debug)]
struct JobRecord {
    total_expected: usize,
    items: Vec<GeneratedItem>,
}

/// In-memory registry of job state. One lock guards the whole map, so an
/// append is atomic: no reader can see the item list and the derived count
/// disagree. Jobs vanish on restart.
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<String, JobRecord>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new job and return its identifier. Identifiers are
    /// random UUIDs, never reused within a process lifetime.
    pub async fn create(&self, total_expected: usize) -> String {
        let job_id = Uuid::new_v4().simple().to_string();
        let mut jobs = self.jobs.write().await;
        jobs.insert(job_id.clone(), JobRecord { total_expected, items: Vec::new() });
        job_id
    }

    /// Append a finished item, returning the new completed count.
    pub async fn append(&self, job_id: &str, item: GeneratedItem) -> Result<usize> {
        let mut jobs = self.jobs.write().await;
        let record = jobs
            .get_mut(job_id)
            .ok_or_else(|| Error::JobNotFound(job_id.to_string()))?;
        record.items.push(item);
        Ok(record.items.len())
    }

    pub async fn get(&self, job_id: &str) -> Option<JobSnapshot> {
        let jobs = self.jobs.read().await;
        jobs.get(job_id).map(|record| JobSnapshot {
            job_id: job_id.to_string(),
            total_expected: record.total_expected,
            completed: record.items.len(),
            items: record.items.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use ng_core::{GeneratedImage, Post};

    fn item(post_index: usize) -> GeneratedItem {
        GeneratedItem {
            post: Post {
                content: format!("post {}", post_index),
                hashtags: vec![],
                image_prompt: String::new(),
                metadata: Default::default(),
                news_article_title: None,
                news_article_url: None,
            },
            image: GeneratedImage {
                image_url: Some("https://example.com/image.png".to_string()),
                image_path: None,
                prompt_used: String::new(),
                generation_metadata: Default::default(),
            },
            post_index,
        }
    }

    #[tokio::test]
    async fn create_registers_an_empty_pending_job() {
        let store = JobStore::new();
        let job_id = store.create(3).await;

        let snapshot = store.get(&job_id).await.unwrap();
        assert_eq!(snapshot.total_expected, 3);
        assert_eq!(snapshot.completed, 0);
        assert!(snapshot.items.is_empty());
    }

    #[tokio::test]
    async fn job_ids_are_unique() {
        let store = JobStore::new();
        let a = store.create(1).await;
        let b = store.create(1).await;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn unknown_job_is_not_found() {
        let store = JobStore::new();
        assert!(store.get("missing").await.is_none());
        let err = store.append("missing", item(1)).await.unwrap_err();
        assert!(matches!(err, Error::JobNotFound(_)));
    }

    #[tokio::test]
    async fn append_returns_the_new_count() {
        let store = JobStore::new();
        let job_id = store.create(2).await;
        assert_eq!(store.append(&job_id, item(1)).await.unwrap(), 1);
        assert_eq!(store.append(&job_id, item(2)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn concurrent_appends_never_desync_count_and_items() {
        let store = JobStore::new();
        let job_id = store.create(50).await;

        let appends: Vec<_> = (1..=50)
            .map(|i| {
                let store = store.clone();
                let job_id = job_id.clone();
                tokio::spawn(async move { store.append(&job_id, item(i)).await })
            })
            .collect();

        // Interleave reads with the writes; every observation must agree.
        for _ in 0..10 {
            if let Some(snapshot) = store.get(&job_id).await {
                assert_eq!(snapshot.completed, snapshot.items.len());
            }
            tokio::task::yield_now().await;
        }

        for result in join_all(appends).await {
            result.unwrap().unwrap();
        }

        let snapshot = store.get(&job_id).await.unwrap();
        assert_eq!(snapshot.completed, 50);
        assert_eq!(snapshot.items.len(), 50);
        assert_eq!(snapshot.total_expected, 50);
    }

    #[tokio::test]
    async fn status_reads_are_idempotent() {
        let store = JobStore::new();
        let job_id = store.create(2).await;
        store.append(&job_id, item(1)).await.unwrap();

        let first = store.get(&job_id).await.unwrap();
        let second = store.get(&job_id).await.unwrap();
        assert_eq!(first.completed, second.completed);
        assert_eq!(first.items.len(), second.items.len());
        assert_eq!(first.total_expected, second.total_expected);
    }
}
