use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use ng_core::{ChatModel, GeneratedImage, Illustrator, ImageModel, Post, Result, Settings};

const ENHANCER_SYSTEM_PROMPT: &str = "\
You are a Senior Art Director for 'intalent', an AI-human collaboration \
firm. Your goal is to enhance image prompts for LinkedIn to look like \
high-end editorial photography, not generic AI art.

Style Guidelines:
- Aesthetic: sleek, minimal, and sophisticated; premium tech lifestyle or conceptual architecture.
- Composition: clean, modern, and open; ample negative space; 1:1 square framing.
- Lighting: soft, professional studio lighting with subtle gradients.

Avoid at all costs:
- Glowing brains, digital networks, floating matrices, or literal robots.
- Dark hacker rooms or matrix-style code backgrounds.

Preferred Visual Concepts:
- Human-centric: close-ups of professionals in thoughtful poses, minimalist glass offices, or abstract representations of growth and achievement.
- Abstract tech: frosted glass textures, clean lines, geometric shapes, high-quality material finishes (brushed metal, matte plastics, high-end fabrics).

Instructions:
- Output 1-2 sentences max. Focus on concrete subjects and specific material textures.
- Do not include text, logos, or labels.
- Return a JSON object: {\"enhanced_prompt\": \"...\", \"reasoning\": \"...\"}.";

#[derive(Deserialize)]
struct EnhancedPrompt {
    enhanced_prompt: String,
    #[serde(default)]
    reasoning: String,
}

/// Enhances a post's image prompt with the art-director model, brands it
/// with the color theme, and renders it through the image backend.
pub struct ImageAgent {
    chat: Arc<dyn ChatModel>,
    image: Arc<dyn ImageModel>,
    client: Client,
    settings: Settings,
}

impl ImageAgent {
    pub fn new(chat: Arc<dyn ChatModel>, image: Arc<dyn ImageModel>, settings: Settings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self { chat, image, client, settings }
    }

    async fn enhance_prompt(&self, base_prompt: &str) -> Result<String> {
        let user_prompt = format!(
            "Enhance this image prompt for a professional LinkedIn post: {}",
            base_prompt,
        );
        let reply = self.chat.complete(ENHANCER_SYSTEM_PROMPT, &user_prompt).await?;
        match serde_json::from_str::<EnhancedPrompt>(&reply) {
            Ok(parsed) => {
                debug!("prompt enhancement reasoning: {}", parsed.reasoning);
                Ok(parsed.enhanced_prompt)
            }
            // Some models reply with the bare prompt; take it as-is.
            Err(_) => Ok(reply.trim().to_string()),
        }
    }

    fn theme_description(&self) -> String {
        let theme = &self.settings.theme;
        format!(
            "Use a professional color palette with: \
             Primary color: {} (Lilac), \
             Secondary color: {} (White/Light Grey), \
             Accent color: {} (Orange/Amber), \
             Background color: {} (Charcoal), \
             Text color: {} (for dark backgrounds). \
             Professional, modern, clean design style with these specific brand colors.",
            theme.primary, theme.secondary, theme.accent, theme.background, theme.text,
        )
    }

    async fn download_image(&self, url: &str, prompt: &str) -> Result<PathBuf> {
        let images_dir = self.settings.images_dir();
        tokio::fs::create_dir_all(&images_dir).await?;

        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let digest = Sha256::digest(prompt.as_bytes());
        let short_hash: String = digest.iter().take(4).map(|b| format!("{:02x}", b)).collect();
        let path = images_dir.join(format!("post_image_{}.png", short_hash));
        tokio::fs::write(&path, &bytes).await?;
        Ok(path)
    }
}

#[async_trait]
impl Illustrator for ImageAgent {
    async fn illustrate(&self, post: &Post, save_to_disk: bool) -> Result<GeneratedImage> {
        let enhanced = self.enhance_prompt(&post.image_prompt).await?;
        let themed = format!("{}. {}", enhanced, self.theme_description());

        let image_url = self
            .image
            .generate(&themed, &self.settings.image_size, &self.settings.image_quality)
            .await?;

        let image_path = if save_to_disk {
            Some(self.download_image(&image_url, &enhanced).await?)
        } else {
            None
        };

        let mut generation_metadata = std::collections::HashMap::new();
        generation_metadata.insert("model".to_string(), self.image.name().to_string());
        generation_metadata.insert("size".to_string(), self.settings.image_size.clone());
        generation_metadata.insert("quality".to_string(), self.settings.image_quality.clone());

        Ok(GeneratedImage {
            image_url: Some(image_url),
            image_path: image_path.map(|p| p.display().to_string()),
            prompt_used: themed,
            generation_metadata,
        })
    }
}
