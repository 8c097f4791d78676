pub mod orchestrator;
pub mod templates;

pub use orchestrator::WorkflowOrchestrator;
pub use templates::{TemplateStore, BASIC_GENERATION, NSFW_FILTERED_GENERATION};
