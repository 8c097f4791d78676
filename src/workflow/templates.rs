use crate::models::{NodeRef, Workflow, WorkflowNode};
use std::collections::HashMap;

pub const BASIC_GENERATION: &str = "basic_generation";
pub const NSFW_FILTERED_GENERATION: &str = "nsfw_filtered_generation";

/// Placeholder substituted with the resolved prompt at render time. Must not
/// survive into a submitted workflow.
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";

/// Immutable set of parameterized job graphs, built once at startup and
/// shared by reference. Rendering always clones; originals are never touched.
pub struct TemplateStore {
    templates: HashMap<String, Workflow>,
}

impl TemplateStore {
    pub fn new() -> Self {
        let mut templates = HashMap::new();
        templates.insert(BASIC_GENERATION.to_string(), basic_generation());
        templates.insert(
            NSFW_FILTERED_GENERATION.to_string(),
            nsfw_filtered_generation(),
        );

        TemplateStore { templates }
    }

    /// Unknown names resolve to `basic_generation` so a naming mismatch can
    /// never block generation outright.
    pub fn get(&self, name: &str) -> &Workflow {
        match self.templates.get(name) {
            Some(template) => template,
            None => {
                log::warn!(
                    "Unknown template '{}', falling back to {}",
                    name,
                    BASIC_GENERATION
                );
                &self.templates[BASIC_GENERATION]
            }
        }
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Nodes "1".."6": checkpoint, prompt encodes, sampler, latent, decode.
/// Both templates share this stem and differ in what follows the decode.
fn generation_stem(negative_prompt: &str) -> Workflow {
    let mut workflow = Workflow::new();

    workflow.insert(
        "1".to_string(),
        WorkflowNode::new("CheckpointLoaderSimple")
            .with_input("ckpt_name", "sd3.5_medium.safetensors"),
    );
    workflow.insert(
        "2".to_string(),
        WorkflowNode::new("CLIPTextEncode")
            .with_input("text", PROMPT_PLACEHOLDER)
            .with_input("clip", NodeRef::new("1", 1)),
    );
    workflow.insert(
        "3".to_string(),
        WorkflowNode::new("CLIPTextEncode")
            .with_input("text", negative_prompt)
            .with_input("clip", NodeRef::new("1", 1)),
    );
    workflow.insert(
        "4".to_string(),
        WorkflowNode::new("KSampler")
            .with_input("seed", 42i64)
            .with_input("steps", 28i64)
            .with_input("cfg", 4.5)
            .with_input("sampler_name", "dpmpp_2m")
            .with_input("scheduler", "normal")
            .with_input("denoise", 1.0)
            .with_input("model", NodeRef::new("1", 0))
            .with_input("positive", NodeRef::new("2", 0))
            .with_input("negative", NodeRef::new("3", 0))
            .with_input("latent_image", NodeRef::new("5", 0)),
    );
    workflow.insert(
        "5".to_string(),
        WorkflowNode::new("EmptyLatentImage")
            .with_input("width", 1024i64)
            .with_input("height", 1024i64)
            .with_input("batch_size", 1i64),
    );
    workflow.insert(
        "6".to_string(),
        WorkflowNode::new("VAEDecode")
            .with_input("samples", NodeRef::new("4", 0))
            .with_input("vae", NodeRef::new("1", 2)),
    );

    workflow
}

fn basic_generation() -> Workflow {
    let mut workflow = generation_stem("blurry, low quality, distorted");

    workflow.insert(
        "7".to_string(),
        WorkflowNode::new("SaveImage")
            .with_input("filename_prefix", "chat_ai_generated")
            .with_input("images", NodeRef::new("6", 0)),
    );

    workflow
}

fn nsfw_filtered_generation() -> Workflow {
    let mut workflow = generation_stem("blurry, low quality, distorted, nsfw, explicit");

    workflow.insert("7".to_string(), WorkflowNode::new("NudenetModelLoader"));
    workflow.insert(
        "8".to_string(),
        WorkflowNode::new("ApplyNudenet")
            .with_input("image", NodeRef::new("6", 0))
            .with_input("model", NodeRef::new("7", 0))
            .with_input("confidence", 0.7)
            .with_input("censoring_method", "blur"),
    );
    workflow.insert(
        "9".to_string(),
        WorkflowNode::new("SaveImage")
            .with_input("filename_prefix", "chat_ai_filtered")
            .with_input("images", NodeRef::new("8", 0)),
    );

    workflow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeInput;

    #[test]
    fn test_basic_template_carries_placeholder() {
        let store = TemplateStore::new();
        let template = store.get(BASIC_GENERATION);

        assert_eq!(template.len(), 7);
        assert_eq!(
            template["2"].inputs["text"],
            NodeInput::Text(PROMPT_PLACEHOLDER.to_string())
        );
        assert_eq!(template["7"].class_type, "SaveImage");
    }

    #[test]
    fn test_filtered_template_adds_filter_nodes() {
        let store = TemplateStore::new();
        let template = store.get(NSFW_FILTERED_GENERATION);

        assert_eq!(template.len(), 9);
        assert_eq!(template["7"].class_type, "NudenetModelLoader");
        assert_eq!(template["8"].class_type, "ApplyNudenet");
        assert_eq!(template["8"].inputs["image"], NodeInput::Link(NodeRef::new("6", 0)));
        assert_eq!(template["9"].class_type, "SaveImage");
    }

    #[test]
    fn test_unknown_name_falls_back_to_basic() {
        let store = TemplateStore::new();
        let template = store.get("no_such_template");

        assert_eq!(template, store.get(BASIC_GENERATION));
    }

    #[test]
    fn test_wire_shape_of_reference_pairs() {
        let store = TemplateStore::new();
        let json = serde_json::to_value(store.get(BASIC_GENERATION)).unwrap();

        assert_eq!(json["4"]["inputs"]["model"], serde_json::json!(["1", 0]));
        assert_eq!(json["4"]["inputs"]["seed"], serde_json::json!(42));
        assert_eq!(json["4"]["inputs"]["cfg"], serde_json::json!(4.5));
    }
}
