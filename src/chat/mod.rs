use crate::{
    intent::IntentEngine,
    models::{ClassificationResult, GenerationResult, Intent},
    workflow::WorkflowOrchestrator,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Structured payload attached to a chat response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    Generation(GenerationResult),
    Classification(ClassificationResult),
}

/// What the transport layer hands back to the user: a natural-language
/// reply plus machine-readable detail. Errors are carried here, never
/// raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Thin coordinator between the intent engine and the orchestrator. Holds no
/// mutable session state; each message is handled independently.
pub struct ChatManager {
    intent_engine: IntentEngine,
    orchestrator: Arc<WorkflowOrchestrator>,
}

impl ChatManager {
    pub fn new(intent_engine: IntentEngine, orchestrator: Arc<WorkflowOrchestrator>) -> Self {
        ChatManager {
            intent_engine,
            orchestrator,
        }
    }

    pub async fn process_message(
        &self,
        user_id: &str,
        message: &str,
        platform: &str,
    ) -> ChatResponse {
        log::info!("Processing message from {} on {}: {}", user_id, platform, message);

        let classification = self.intent_engine.process(message);

        if classification.intent == Intent::ImageGeneration {
            if let Some(params) = classification.parameters.as_generation() {
                let result = self.orchestrator.execute_generation(params).await;

                let (response, error) = if result.success() {
                    ("Image generated successfully!".to_string(), None)
                } else {
                    (
                        "Sorry, I couldn't generate that image.".to_string(),
                        result.error.clone(),
                    )
                };

                return ChatResponse {
                    success: result.success(),
                    response,
                    data: Some(ResponseData::Generation(result)),
                    error,
                };
            }
        }

        ChatResponse {
            success: true,
            response: "I understand your request, but I'm still learning how to handle it."
                .to_string(),
            data: Some(ResponseData::Classification(classification)),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comfy::GenerationClient;
    use crate::config::OrchestratorConfig;
    use crate::error::Result;
    use crate::models::{HistoryMap, JobHistory, QueueStatus, Workflow};
    use crate::workflow::TemplateStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    struct ImmediateClient;

    #[async_trait]
    impl GenerationClient for ImmediateClient {
        async fn queue_prompt(&self, _workflow: &Workflow) -> Result<Option<String>> {
            Ok(Some("chat_test_id".to_string()))
        }

        async fn get_history(&self, prompt_id: &str) -> Result<HistoryMap> {
            let mut history = HashMap::new();
            history.insert(
                prompt_id.to_string(),
                JobHistory {
                    outputs: Some(json!({"images": ["out.png"]})),
                },
            );
            Ok(history)
        }

        async fn get_queue_status(&self) -> Result<QueueStatus> {
            Ok(QueueStatus::default())
        }
    }

    fn manager() -> ChatManager {
        let orchestrator = WorkflowOrchestrator::with_config(
            Arc::new(ImmediateClient),
            Arc::new(TemplateStore::new()),
            OrchestratorConfig::new()
                .with_poll_interval(Duration::from_millis(10))
                .with_timeout(Duration::from_millis(100)),
        );
        ChatManager::new(IntentEngine::new(), Arc::new(orchestrator))
    }

    #[tokio::test]
    async fn test_generation_message_runs_workflow() {
        let response = manager()
            .process_message("user-1", "Generate an image of a red sports car", "default")
            .await;

        assert!(response.success);
        assert_eq!(response.response, "Image generated successfully!");
        match response.data {
            Some(ResponseData::Generation(result)) => {
                assert_eq!(result.prompt_id.as_deref(), Some("chat_test_id"));
            }
            other => panic!("expected generation data, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_intents_pass_through() {
        let response = manager()
            .process_message("user-1", "hello there", "default")
            .await;

        assert!(response.success);
        assert!(response.response.contains("still learning"));
        match response.data {
            Some(ResponseData::Classification(classification)) => {
                assert_eq!(classification.intent, Intent::General);
            }
            other => panic!("expected classification data, got {:?}", other),
        }
    }
}
