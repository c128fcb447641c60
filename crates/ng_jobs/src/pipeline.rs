use std::sync::Arc;

use ng_core::{ContentWriter, Error, GeneratedItem, Illustrator, NewsArticle};

/// A failure contained to a single article's pipeline run. Carries enough
/// context to log which item was lost without touching its siblings.
#[derive(Debug, thiserror::Error)]
#[error("item {position} ({article_url}) failed: {source}")]
pub struct ItemError {
    pub position: usize,
    pub article_title: String,
    pub article_url: String,
    #[source]
    pub source: Error,
}

/// The per-article unit of work: write the post, then illustrate it.
/// Image generation depends on the post's generated prompt, so the two
/// steps are strictly sequential. No retries; one failed attempt is
/// terminal for the item.
pub struct ItemPipeline {
    writer: Arc<dyn ContentWriter>,
    illustrator: Arc<dyn Illustrator>,
}

impl ItemPipeline {
    pub fn new(writer: Arc<dyn ContentWriter>, illustrator: Arc<dyn Illustrator>) -> Self {
        Self { writer, illustrator }
    }

    pub async fn process(
        &self,
        article: &NewsArticle,
        position: usize,
        save_to_disk: bool,
    ) -> Result<GeneratedItem, ItemError> {
        let tag = |source: Error| ItemError {
            position,
            article_title: article.title.clone(),
            article_url: article.url.clone(),
            source,
        };

        let post = self.writer.write_post(article).await.map_err(tag)?;
        let image = self.illustrator.illustrate(&post, save_to_disk).await.map_err(tag)?;

        Ok(GeneratedItem {
            post,
            image,
            post_index: position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ng_core::{GeneratedImage, NewsCategory, Post};

    struct OkWriter;

    #[async_trait]
    impl ContentWriter for OkWriter {
        async fn write_post(&self, article: &NewsArticle) -> ng_core::Result<Post> {
            Ok(Post {
                content: format!("post for {}", article.title),
                hashtags: vec!["#AI".to_string()],
                image_prompt: "an office".to_string(),
                metadata: Default::default(),
                news_article_title: Some(article.title.clone()),
                news_article_url: Some(article.url.clone()),
            })
        }
    }

    struct FailingWriter;

    #[async_trait]
    impl ContentWriter for FailingWriter {
        async fn write_post(&self, _article: &NewsArticle) -> ng_core::Result<Post> {
            Err(Error::Inference("model unavailable".to_string()))
        }
    }

    struct OkIllustrator;

    #[async_trait]
    impl Illustrator for OkIllustrator {
        async fn illustrate(&self, post: &Post, _save_to_disk: bool) -> ng_core::Result<GeneratedImage> {
            Ok(GeneratedImage {
                image_url: Some("https://example.com/i.png".to_string()),
                image_path: None,
                prompt_used: post.image_prompt.clone(),
                generation_metadata: Default::default(),
            })
        }
    }

    struct FailingIllustrator;

    #[async_trait]
    impl Illustrator for FailingIllustrator {
        async fn illustrate(&self, _post: &Post, _save_to_disk: bool) -> ng_core::Result<GeneratedImage> {
            Err(Error::Generation("render failed".to_string()))
        }
    }

    fn article() -> NewsArticle {
        NewsArticle {
            title: "Title".to_string(),
            url: "https://example.com/a".to_string(),
            summary: "Summary".to_string(),
            relevance_score: 0.8,
            category: NewsCategory::AiAdvancement,
            source: None,
            published_date: None,
        }
    }

    #[tokio::test]
    async fn process_tags_the_item_with_its_position() {
        let pipeline = ItemPipeline::new(Arc::new(OkWriter), Arc::new(OkIllustrator));
        let item = pipeline.process(&article(), 3, false).await.unwrap();
        assert_eq!(item.post_index, 3);
        assert!(item.image.image_url.is_some());
    }

    #[tokio::test]
    async fn writer_failure_fails_the_whole_item() {
        let pipeline = ItemPipeline::new(Arc::new(FailingWriter), Arc::new(OkIllustrator));
        let err = pipeline.process(&article(), 1, false).await.unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.article_url, "https://example.com/a");
        assert!(matches!(err.source, Error::Inference(_)));
    }

    #[tokio::test]
    async fn item_error_reports_position_url_and_cause() {
        let pipeline = ItemPipeline::new(Arc::new(FailingWriter), Arc::new(OkIllustrator));
        let err = pipeline.process(&article(), 4, false).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "item 4 (https://example.com/a) failed: Inference error: model unavailable"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn illustrator_failure_fails_the_whole_item() {
        let pipeline = ItemPipeline::new(Arc::new(OkWriter), Arc::new(FailingIllustrator));
        let err = pipeline.process(&article(), 2, false).await.unwrap_err();
        assert_eq!(err.position, 2);
        assert!(matches!(err.source, Error::Generation(_)));
    }
}
