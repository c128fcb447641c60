use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use ng_core::{ChatModel, Error, ImageModel, Result};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

pub struct OpenAiChat {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiChat {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key: api_key.unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl fmt::Debug for OpenAiChat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiChat")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    fn name(&self) -> &str {
        "openai-chat"
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Inference("empty completion response".to_string()))?;
        Ok(choice.message.content)
    }
}

#[derive(Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    size: String,
    quality: String,
    n: u8,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}

pub struct OpenAiImage {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiImage {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key: api_key.unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

impl fmt::Debug for OpenAiImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiImage")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl ImageModel for OpenAiImage {
    fn name(&self) -> &str {
        "dall-e"
    }

    async fn generate(&self, prompt: &str, size: &str, quality: &str) -> Result<String> {
        let request = ImageRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            size: size.to_string(),
            quality: quality.to_string(),
            n: 1,
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ImageResponse>()
            .await?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or_else(|| Error::Generation("image response contained no URL".to_string()))
    }
}
