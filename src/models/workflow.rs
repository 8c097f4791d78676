use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Reference to another node's output: `["6", 0]` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRef(pub String, pub u32);

impl NodeRef {
    pub fn new(node_id: &str, output_slot: u32) -> Self {
        NodeRef(node_id.to_string(), output_slot)
    }
}

/// A single node input: either a literal value or a reference pair.
///
/// Untagged so the serialized form matches the ComfyUI API exactly. `Int`
/// is listed before `Float` so whole numbers round-trip as integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeInput {
    Link(NodeRef),
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<NodeRef> for NodeInput {
    fn from(link: NodeRef) -> Self {
        NodeInput::Link(link)
    }
}

impl From<&str> for NodeInput {
    fn from(text: &str) -> Self {
        NodeInput::Text(text.to_string())
    }
}

impl From<String> for NodeInput {
    fn from(text: String) -> Self {
        NodeInput::Text(text)
    }
}

impl From<i64> for NodeInput {
    fn from(value: i64) -> Self {
        NodeInput::Int(value)
    }
}

impl From<f64> for NodeInput {
    fn from(value: f64) -> Self {
        NodeInput::Float(value)
    }
}

/// One operation node in a job graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub class_type: String,
    pub inputs: BTreeMap<String, NodeInput>,
}

impl WorkflowNode {
    pub fn new(class_type: &str) -> Self {
        WorkflowNode {
            class_type: class_type.to_string(),
            inputs: BTreeMap::new(),
        }
    }

    pub fn with_input(mut self, name: &str, value: impl Into<NodeInput>) -> Self {
        self.inputs.insert(name.to_string(), value.into());
        self
    }
}

/// A job graph keyed by string node id, as the ComfyUI API consumes it.
pub type Workflow = BTreeMap<String, WorkflowNode>;

/// One entry of the `/history/{id}` response. An absent `outputs` means the
/// job has not completed yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Value>,
}

pub type HistoryMap = HashMap<String, JobHistory>;

/// Advisory snapshot of the execution queue. Not consumed by the polling
/// state machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueStatus {
    #[serde(default)]
    pub queue_running: Vec<Value>,
    #[serde(default)]
    pub queue_pending: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Succeeded,
    Failed,
    TimedOut,
}

/// Terminal outcome of one generation run. Failures are carried here as
/// data, never raised to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub status: GenerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn succeeded(prompt_id: String, outputs: Value) -> Self {
        GenerationResult {
            status: GenerationStatus::Succeeded,
            prompt_id: Some(prompt_id),
            outputs: Some(outputs),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        GenerationResult {
            status: GenerationStatus::Failed,
            prompt_id: None,
            outputs: None,
            error: Some(message.into()),
        }
    }

    pub fn timed_out(prompt_id: String, message: impl Into<String>) -> Self {
        GenerationResult {
            status: GenerationStatus::TimedOut,
            prompt_id: Some(prompt_id),
            outputs: None,
            error: Some(message.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.status == GenerationStatus::Succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_ref_wire_shape() {
        let input = NodeInput::Link(NodeRef::new("6", 0));
        assert_eq!(serde_json::to_value(&input).unwrap(), json!(["6", 0]));
    }

    #[test]
    fn test_node_input_literals() {
        assert_eq!(
            serde_json::to_value(NodeInput::from(42i64)).unwrap(),
            json!(42)
        );
        assert_eq!(
            serde_json::to_value(NodeInput::from(4.5f64)).unwrap(),
            json!(4.5)
        );
        assert_eq!(
            serde_json::to_value(NodeInput::from("blurry")).unwrap(),
            json!("blurry")
        );
    }

    #[test]
    fn test_whole_numbers_stay_integers() {
        let input: NodeInput = serde_json::from_value(json!(1024)).unwrap();
        assert_eq!(input, NodeInput::Int(1024));
    }

    #[test]
    fn test_history_without_outputs_is_pending() {
        let history: JobHistory = serde_json::from_value(json!({})).unwrap();
        assert!(history.outputs.is_none());
    }
}
