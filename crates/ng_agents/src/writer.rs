use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use ng_core::{ChatModel, ContentWriter, Error, NewsArticle, Post, Result};

const WRITER_SYSTEM_PROMPT: &str = "\
You are the Marketing Manager at intalent. Your mission is 'Powering Human \
Achievement' by providing AI-driven agentic solutions for Hiring Managers \
and Recruiters. Write LinkedIn posts that position intalent as a \
sophisticated, human-centric leader in AI-recruitment.

Voice & Tone:
- Sophisticated and professional, mirroring a clean, modern editorial aesthetic.
- Visionary yet practical; focus on how AI augments human potential rather than replacing it.
- Avoid 'AI-hype'; use clear, authoritative language.

Structure:
1) Hook: a 1-2 line perspective on why this news is a milestone for human achievement in hiring.
2) The 'intalent' Lens: 2-3 bullet points on impact to recruitment efficiency and talent experience.
3) The Strategic Edge: a specific takeaway for HR leaders and Hiring Managers.
4) CTA: a conversational question to spark engagement among the recruitment community.

Image Prompt Guidance (return in image_prompt):
- Base it strictly on the article's theme; minimal and clean; professional; square (1:1).
- 1-2 sentences only; include subject, setting, and style cues.
- No text, logos, or screenshots.

Return a JSON object: {\"content\": \"...\", \"hashtags\": [\"...\"], \"image_prompt\": \"...\"}.";

#[derive(Deserialize)]
struct PostDraft {
    content: String,
    #[serde(default)]
    hashtags: Vec<String>,
    image_prompt: String,
}

/// Turns one article into one branded LinkedIn post.
pub struct ContentWriterAgent {
    chat: Arc<dyn ChatModel>,
}

impl ContentWriterAgent {
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl ContentWriter for ContentWriterAgent {
    async fn write_post(&self, article: &NewsArticle) -> Result<Post> {
        let user_prompt = format!(
            "Create a professional LinkedIn post based on this news article:\n\n\
             Title: {}\n\
             Summary: {}\n\
             Category: {}\n\
             URL: {}\n\n\
             Write an engaging LinkedIn post that: \
             1. Highlights the key insights from this article \
             2. Provides context and value to the reader \
             3. Is professional and appropriate for LinkedIn \
             4. Includes relevant hashtags \
             5. Has an image prompt that would create a compelling visual \
             representation, descriptive and suitable for DALL-E generation.",
            article.title, article.summary, article.category.as_str(), article.url,
        );

        let reply = self.chat.complete(WRITER_SYSTEM_PROMPT, &user_prompt).await?;
        let draft: PostDraft = serde_json::from_str(&reply)
            .map_err(|e| Error::Inference(format!("post draft was not valid JSON: {}", e)))?;

        let mut metadata = std::collections::HashMap::new();
        metadata.insert("source_category".to_string(), article.category.as_str().to_string());
        metadata.insert("source_relevance".to_string(), article.relevance_score.to_string());

        Ok(Post {
            content: draft.content,
            hashtags: draft.hashtags,
            image_prompt: draft.image_prompt,
            metadata,
            news_article_title: Some(article.title.clone()),
            news_article_url: Some(article.url.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ng_core::NewsCategory;

    struct MockChat {
        reply: String,
    }

    #[async_trait]
    impl ChatModel for MockChat {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.reply.clone())
        }
    }

    fn article() -> NewsArticle {
        NewsArticle {
            title: "AI hiring tools take off".to_string(),
            url: "https://example.com/a".to_string(),
            summary: "Recruitment platforms adopt AI".to_string(),
            relevance_score: 0.9,
            category: NewsCategory::AiInTalent,
            source: Some("Tech News".to_string()),
            published_date: None,
        }
    }

    #[tokio::test]
    async fn attaches_source_attribution_and_metadata() {
        let reply = r##"{
            "content": "Great news for recruiters.",
            "hashtags": ["#AI", "#Hiring"],
            "image_prompt": "a modern office"
        }"##;
        let agent = ContentWriterAgent::new(Arc::new(MockChat { reply: reply.to_string() }));

        let post = agent.write_post(&article()).await.unwrap();
        assert_eq!(post.content, "Great news for recruiters.");
        assert_eq!(post.hashtags, vec!["#AI", "#Hiring"]);
        assert_eq!(post.news_article_title.as_deref(), Some("AI hiring tools take off"));
        assert_eq!(post.news_article_url.as_deref(), Some("https://example.com/a"));
        assert_eq!(post.metadata.get("source_category").map(String::as_str), Some("ai_in_talent"));
        assert_eq!(post.metadata.get("source_relevance").map(String::as_str), Some("0.9"));
    }

    #[tokio::test]
    async fn malformed_draft_is_an_inference_error() {
        let agent = ContentWriterAgent::new(Arc::new(MockChat { reply: "oops".to_string() }));
        let err = agent.write_post(&article()).await.unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }
}
