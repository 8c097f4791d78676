use crate::{
    config::ComfyConfig,
    error::{ChatError, Result},
    models::{HistoryMap, QueueStatus, Workflow},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::traits::GenerationClient;

#[derive(Debug, Deserialize)]
struct QueuePromptResponse {
    #[serde(default)]
    prompt_id: Option<String>,
}

/// HTTP client for the ComfyUI API.
#[derive(Clone)]
pub struct ComfyClient {
    client: Client,
    base_url: String,
    client_id: String,
}

impl ComfyClient {
    pub fn new(config: ComfyConfig) -> Self {
        let client_id = config
            .client_id
            .clone()
            .unwrap_or_else(|| format!("comfychat-{}", Uuid::new_v4()));

        Self {
            client: Client::new(),
            base_url: config.base_url(),
            client_id,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the endpoint so a dead engine is reported at startup instead of
    /// on the first generation.
    pub async fn connect(&self) -> Result<()> {
        log::info!("Connecting to ComfyUI at {}", self.base_url);

        let response = self
            .client
            .get(format!("{}/system_stats", self.base_url))
            .send()
            .await
            .map_err(|e| ChatError::ClientError(format!("ComfyUI unreachable: {}", e)))?;

        if response.status().is_success() {
            log::info!("Successfully connected to ComfyUI");
            Ok(())
        } else {
            Err(ChatError::ClientError(format!(
                "Failed to connect to ComfyUI: HTTP {}",
                response.status()
            )))
        }
    }
}

#[async_trait]
impl GenerationClient for ComfyClient {
    async fn queue_prompt(&self, workflow: &Workflow) -> Result<Option<String>> {
        let payload = json!({
            "prompt": workflow,
            "client_id": self.client_id,
        });

        let response = self
            .client
            .post(format!("{}/prompt", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChatError::RequestError(format!("Error queuing prompt: {}", e)))?;

        if !response.status().is_success() {
            log::error!("Failed to queue prompt: HTTP {}", response.status());
            return Ok(None);
        }

        let result: QueuePromptResponse = response
            .json()
            .await
            .map_err(|e| ChatError::ResponseError(format!("Invalid queue response: {}", e)))?;

        if let Some(id) = &result.prompt_id {
            log::info!("Queued prompt with ID: {}", id);
        }

        Ok(result.prompt_id)
    }

    async fn get_history(&self, prompt_id: &str) -> Result<HistoryMap> {
        let response = self
            .client
            .get(format!("{}/history/{}", self.base_url, prompt_id))
            .send()
            .await
            .map_err(|e| ChatError::RequestError(format!("Error getting history: {}", e)))?;

        if !response.status().is_success() {
            // Treated as "no entry yet"; the poll loop keeps waiting.
            log::warn!("History query returned HTTP {}", response.status());
            return Ok(HistoryMap::new());
        }

        response
            .json()
            .await
            .map_err(|e| ChatError::ResponseError(format!("Invalid history response: {}", e)))
    }

    async fn get_queue_status(&self) -> Result<QueueStatus> {
        let response = self
            .client
            .get(format!("{}/queue", self.base_url))
            .send()
            .await
            .map_err(|e| ChatError::RequestError(format!("Error getting queue status: {}", e)))?;

        if !response.status().is_success() {
            return Err(ChatError::ResponseError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ChatError::ResponseError(format!("Invalid queue status: {}", e)))
    }
}
