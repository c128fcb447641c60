use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Brand color palette injected into image prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorTheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: "#7367FF".to_string(),
            secondary: "#F3F3F3".to_string(),
            accent: "#FFA050".to_string(),
            background: "#0D0919".to_string(),
            text: "#F3F3F3".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: Option<String>,
    pub newsapi_key: Option<String>,
    pub serpapi_key: Option<String>,
    pub theme: ColorTheme,
    pub image_size: String,
    pub image_quality: String,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            newsapi_key: None,
            serpapi_key: None,
            theme: ColorTheme::default(),
            image_size: "1024x1024".to_string(),
            image_quality: "standard".to_string(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Settings {
    /// Load settings from the environment, reading a `.env` file if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Settings::default();
        let theme = ColorTheme {
            primary: env_or("COLOR_PRIMARY", &defaults.theme.primary),
            secondary: env_or("COLOR_SECONDARY", &defaults.theme.secondary),
            accent: env_or("COLOR_ACCENT", &defaults.theme.accent),
            background: env_or("COLOR_BACKGROUND", &defaults.theme.background),
            text: env_or("COLOR_TEXT", &defaults.theme.text),
        };
        Self {
            openai_api_key: env_opt("OPENAI_API_KEY"),
            newsapi_key: env_opt("NEWSAPI_KEY"),
            serpapi_key: env_opt("SERPAPI_KEY"),
            theme,
            image_size: env_or("IMAGE_SIZE", &defaults.image_size),
            image_quality: env_or("IMAGE_QUALITY", &defaults.image_quality),
            output_dir: PathBuf::from(env_or("OUTPUT_DIR", "output")),
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join("images")
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.output_dir.join("posts")
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}
