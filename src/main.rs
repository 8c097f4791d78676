use comfychat::logger::{self, LoggerConfig};
use comfychat::{
    ChatManager, ComfyClient, Config, IntentEngine, TemplateStore, WorkflowOrchestrator,
};
use std::env;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let level = logger::parse_level(&env::var("LOG_LEVEL").unwrap_or_default());
    logger::init_with_config(LoggerConfig::development().with_level(level))?;

    log::info!("🚀 Starting comfychat v{}", env!("CARGO_PKG_VERSION"));
    log::info!("🔍 Checking ComfyUI environment...");

    if let Ok(host) = env::var("COMFYUI_HOST") {
        log::info!("COMFYUI_HOST: {}", host);
    } else {
        log::warn!("No COMFYUI_HOST set, using localhost");
    }

    if let Ok(port) = env::var("COMFYUI_PORT") {
        log::info!("COMFYUI_PORT: {}", port);
    } else {
        log::warn!("No COMFYUI_PORT set, using 8188");
    }

    let config = Config::from_env();
    log::info!("⚙️  ComfyUI endpoint: {}", config.comfy.base_url());
    log::info!(
        "⚙️  Poll interval: {:?}, generation timeout: {:?}",
        config.orchestrator.poll_interval,
        config.orchestrator.timeout
    );

    let client = ComfyClient::new(config.comfy.clone());
    match client.connect().await {
        Ok(()) => log::info!("✅ ComfyUI connection established"),
        Err(e) => {
            log::warn!("⚠️  {}", e);
            log::warn!("💡 Continuing anyway; generations will fail until ComfyUI is reachable");
        }
    }

    let templates = Arc::new(TemplateStore::new());
    let orchestrator = Arc::new(WorkflowOrchestrator::with_config(
        Arc::new(client),
        templates,
        config.orchestrator.clone(),
    ));
    let chat = ChatManager::new(IntentEngine::new(), orchestrator);

    log::info!("💬 Chat service ready. Type a message, Ctrl-D to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        let response = chat.process_message("local", message, "cli").await;

        log::info!("🤖 {}", response.response);
        if let Some(data) = &response.data {
            log::debug!("📦 {}", serde_json::to_string_pretty(data)?);
        }
        if let Some(error) = &response.error {
            log::error!("❌ {}", error);
        }
    }

    log::info!("👋 Shutting down");
    Ok(())
}
