use crate::{
    error::Result,
    models::{HistoryMap, QueueStatus, Workflow},
};
use async_trait::async_trait;

/// Capability surface of the execution engine, as the orchestrator sees it.
///
/// `queue_prompt` reports service-level rejection as `Ok(None)`; transport
/// failures surface as `Err` and are converted into structured failure
/// results by the caller. A history entry without outputs means the job has
/// not completed yet.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn queue_prompt(&self, workflow: &Workflow) -> Result<Option<String>>;
    async fn get_history(&self, prompt_id: &str) -> Result<HistoryMap>;
    async fn get_queue_status(&self) -> Result<QueueStatus>;
}
