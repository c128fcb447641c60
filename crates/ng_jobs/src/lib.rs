pub mod artifacts;
pub mod orchestrator;
pub mod pipeline;
pub mod store;

pub use artifacts::ArtifactWriter;
pub use orchestrator::{GenerateRequest, JobOrchestrator, JobStarted};
pub use pipeline::{ItemError, ItemPipeline};
pub use store::{JobSnapshot, JobStore};

pub mod prelude {
    pub use super::{ArtifactWriter, GenerateRequest, ItemPipeline, JobOrchestrator, JobStore};
    pub use ng_core::{GeneratedItem, Result, Error};
}
