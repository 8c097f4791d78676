pub mod chat;
pub mod comfy;
pub mod config;
pub mod error;
pub mod intent;
pub mod logger;
pub mod models;
pub mod workflow;

pub use chat::{ChatManager, ChatResponse, ResponseData};
pub use comfy::{ComfyClient, GenerationClient};
pub use config::{ComfyConfig, Config, OrchestratorConfig};
pub use error::{ChatError, Result};
pub use intent::IntentEngine;
pub use models::*;
pub use workflow::{TemplateStore, WorkflowOrchestrator};
