use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use ng_core::{ArtifactSink, GeneratedItem, Result};

/// Writes finished batches to disk: one aggregate JSON record per batch and
/// one text record per item, keyed by the item's submission position.
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    fn render_post(item: &GeneratedItem) -> String {
        let mut body = String::new();
        body.push_str(&format!("Post #{}\n", item.post_index));
        body.push_str(&"=".repeat(50));
        body.push_str("\n\n");
        body.push_str(&item.post.content);
        body.push_str("\n\n");
        body.push_str(&format!("Hashtags: {}\n\n", item.post.hashtags.join(", ")));
        if let Some(title) = &item.post.news_article_title {
            body.push_str(&format!("Source: {}\n", title));
        }
        if let Some(url) = &item.post.news_article_url {
            body.push_str(&format!("URL: {}\n", url));
        }
        if let Some(path) = &item.image.image_path {
            body.push_str(&format!("Image: {}\n", path));
        } else if let Some(url) = &item.image.image_url {
            body.push_str(&format!("Image URL: {}\n", url));
        }
        body
    }
}

#[async_trait]
impl ArtifactSink for ArtifactWriter {
    async fn persist_batch(&self, items: &[GeneratedItem]) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let aggregate_path = self.output_dir.join(format!("generated_content_{}.json", timestamp));
        let aggregate = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(&aggregate_path, aggregate).await?;

        let posts_dir = self.output_dir.join("posts");
        tokio::fs::create_dir_all(&posts_dir).await?;
        for item in items {
            let post_path = posts_dir.join(format!("post_{}.txt", item.post_index));
            tokio::fs::write(&post_path, Self::render_post(item)).await?;
        }

        info!("Saved {} item(s) to {}", items.len(), self.output_dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ng_core::{GeneratedImage, Post};

    fn item(post_index: usize, image_path: Option<&str>) -> GeneratedItem {
        GeneratedItem {
            post: Post {
                content: "The post body.".to_string(),
                hashtags: vec!["#AI".to_string(), "#Hiring".to_string()],
                image_prompt: "an office".to_string(),
                metadata: Default::default(),
                news_article_title: Some("Source Title".to_string()),
                news_article_url: Some("https://example.com/a".to_string()),
            },
            image: GeneratedImage {
                image_url: Some("https://example.com/i.png".to_string()),
                image_path: image_path.map(str::to_string),
                prompt_used: "an office, branded".to_string(),
                generation_metadata: Default::default(),
            },
            post_index,
        }
    }

    #[tokio::test]
    async fn persists_aggregate_json_and_per_item_records() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path());

        writer.persist_batch(&[item(1, None), item(3, Some("output/images/x.png"))])
            .await
            .unwrap();

        let mut aggregate = None;
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with("generated_content_") && name.ends_with(".json") {
                aggregate = Some(entry.path());
            }
        }
        let aggregate = aggregate.expect("aggregate JSON should exist");
        let parsed: Vec<GeneratedItem> =
            serde_json::from_slice(&tokio::fs::read(&aggregate).await.unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);

        // Per-item records are keyed by submission position.
        let post_1 = tokio::fs::read_to_string(dir.path().join("posts/post_1.txt"))
            .await
            .unwrap();
        assert!(post_1.starts_with("Post #1\n"));
        assert!(post_1.contains("Hashtags: #AI, #Hiring"));
        assert!(post_1.contains("Source: Source Title"));
        assert!(post_1.contains("Image URL: https://example.com/i.png"));

        let post_3 = tokio::fs::read_to_string(dir.path().join("posts/post_3.txt"))
            .await
            .unwrap();
        assert!(post_3.contains("Image: output/images/x.png"));
        assert!(!post_3.contains("Image URL:"));
    }
}
