use std::env;
use std::time::Duration;

/// Connection settings for the ComfyUI endpoint.
#[derive(Debug, Clone)]
pub struct ComfyConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub client_id: Option<String>,
}

impl Default for ComfyConfig {
    fn default() -> Self {
        ComfyConfig {
            host: None,
            port: None,
            client_id: None,
        }
    }
}

impl ComfyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = env::var("COMFYUI_HOST").ok();
        let port = env::var("COMFYUI_PORT").ok().and_then(|s| s.parse().ok());
        let client_id = env::var("COMFYUI_CLIENT_ID").ok();

        ComfyConfig {
            host,
            port,
            client_id,
        }
    }

    pub fn with_endpoint(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = Some(host.into());
        self.port = Some(port);
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("localhost")
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(8188)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host(), self.port())
    }
}

/// Timing knobs for the generation polling loop.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        OrchestratorConfig {
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(300),
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let poll_interval = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);
        let timeout = env::var("GENERATION_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        let defaults = Self::default();
        OrchestratorConfig {
            poll_interval: poll_interval.unwrap_or(defaults.poll_interval),
            timeout: timeout.unwrap_or(defaults.timeout),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub comfy: ComfyConfig,
    pub orchestrator: OrchestratorConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            comfy: ComfyConfig::from_env(),
            orchestrator: OrchestratorConfig::from_env(),
        }
    }

    pub fn with_comfy(mut self, config: ComfyConfig) -> Self {
        self.comfy = config;
        self
    }

    pub fn with_orchestrator(mut self, config: OrchestratorConfig) -> Self {
        self.orchestrator = config;
        self
    }
}
