use crate::{
    comfy::GenerationClient,
    config::OrchestratorConfig,
    models::{GenerationParameters, GenerationResult, NodeInput, Workflow},
};
use std::sync::Arc;
use std::time::Instant;

use super::templates::{
    TemplateStore, BASIC_GENERATION, NSFW_FILTERED_GENERATION, PROMPT_PLACEHOLDER,
};

/// Prompt used when extraction produced nothing usable.
const DEFAULT_PROMPT: &str = "a beautiful landscape";

/// Drives one generation from rendered template to terminal state.
///
/// Every run owns its rendered workflow and its own polling loop; the only
/// shared pieces are the read-only template store and the client handle, so
/// concurrent generations never contend on anything here.
pub struct WorkflowOrchestrator {
    client: Arc<dyn GenerationClient>,
    templates: Arc<TemplateStore>,
    config: OrchestratorConfig,
}

impl WorkflowOrchestrator {
    pub fn new(client: Arc<dyn GenerationClient>, templates: Arc<TemplateStore>) -> Self {
        Self::with_config(client, templates, OrchestratorConfig::default())
    }

    pub fn with_config(
        client: Arc<dyn GenerationClient>,
        templates: Arc<TemplateStore>,
        config: OrchestratorConfig,
    ) -> Self {
        WorkflowOrchestrator {
            client,
            templates,
            config,
        }
    }

    /// Render, submit, and poll to completion. Failures come back as data;
    /// this never raises toward the caller and never retries on its own.
    pub async fn execute_generation(
        &self,
        parameters: &GenerationParameters,
    ) -> GenerationResult {
        log::info!("Executing generation with parameters: {:?}", parameters);

        let template_name = if parameters.nsfw_filter {
            NSFW_FILTERED_GENERATION
        } else {
            BASIC_GENERATION
        };
        let workflow = self.render_template(template_name, parameters);

        let prompt_id = match self.client.queue_prompt(&workflow).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                log::error!("Submission rejected, no prompt ID returned");
                return GenerationResult::failed("Failed to queue prompt");
            }
            Err(e) => {
                log::error!("Error executing generation: {}", e);
                return GenerationResult::failed(e.to_string());
            }
        };

        self.wait_for_completion(&prompt_id).await
    }

    /// Clone the named template and substitute the `{prompt}` placeholder in
    /// every text-encode node. The store's original is never mutated.
    pub fn render_template(
        &self,
        template_name: &str,
        parameters: &GenerationParameters,
    ) -> Workflow {
        let mut workflow = self.templates.get(template_name).clone();

        let prompt = if parameters.prompt.is_empty() {
            DEFAULT_PROMPT
        } else {
            parameters.prompt.as_str()
        };

        for node in workflow.values_mut() {
            if node.class_type != "CLIPTextEncode" {
                continue;
            }
            if let Some(NodeInput::Text(text)) = node.inputs.get_mut("text") {
                if text.contains(PROMPT_PLACEHOLDER) {
                    *text = text.replace(PROMPT_PLACEHOLDER, prompt);
                }
            }
        }

        workflow
    }

    /// Fixed-interval polling bounded only by the configured timeout. Job
    /// durations are seconds to minutes against a local engine, so no
    /// backoff.
    async fn wait_for_completion(&self, prompt_id: &str) -> GenerationResult {
        let started = Instant::now();

        loop {
            if started.elapsed() > self.config.timeout {
                log::warn!("Timed out waiting for prompt {}", prompt_id);
                return GenerationResult::timed_out(
                    prompt_id.to_string(),
                    "Timeout waiting for completion",
                );
            }

            match self.client.get_history(prompt_id).await {
                Ok(history) => {
                    if let Some(entry) = history.get(prompt_id) {
                        if let Some(outputs) = &entry.outputs {
                            log::info!("Generation completed for prompt {}", prompt_id);
                            return GenerationResult::succeeded(
                                prompt_id.to_string(),
                                outputs.clone(),
                            );
                        }
                    }
                }
                Err(e) => {
                    log::error!("Error polling prompt {}: {}", prompt_id, e);
                    return GenerationResult::failed(e.to_string());
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
