pub mod image;
pub mod openai;
pub mod scout;
pub mod writer;

pub use image::ImageAgent;
pub use openai::{OpenAiChat, OpenAiImage};
pub use scout::NewsScoutAgent;
pub use writer::ContentWriterAgent;

pub mod prelude {
    pub use super::{ContentWriterAgent, ImageAgent, NewsScoutAgent, OpenAiChat, OpenAiImage};
    pub use ng_core::{ChatModel, ImageModel, Result, Error};
}
