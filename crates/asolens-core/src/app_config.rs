use std::net::SocketAddr;

/// Runtime configuration shared by the CLI and server binaries.
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub openai_api_key: Option<String>,
    pub pexels_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub pexels_base_url: String,
    pub fetch_timeout_secs: u64,
    pub max_concurrent_extractions: usize,
    pub enrich_delay_ms: u64,
}

/// Defaults mirror the documented env-var defaults, with no API keys set.
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_level: "info".to_string(),
            openai_api_key: None,
            pexels_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o".to_string(),
            pexels_base_url: "https://api.pexels.com".to_string(),
            fetch_timeout_secs: 10,
            max_concurrent_extractions: 4,
            enrich_delay_ms: 2000,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "pexels_api_key",
                &self.pexels_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("pexels_base_url", &self.pexels_base_url)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field(
                "max_concurrent_extractions",
                &self.max_concurrent_extractions,
            )
            .field("enrich_delay_ms", &self.enrich_delay_ms)
            .finish()
    }
}
