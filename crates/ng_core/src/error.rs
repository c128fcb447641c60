use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Image generation error: {0}")]
    Generation(String),

    #[error("no news articles found")]
    NoContent,

    #[error("job not found: {0}")]
    JobNotFound(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
