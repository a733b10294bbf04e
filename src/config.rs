use anyhow::Context;

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2";
const DEFAULT_PORT: u16 = 3000;

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub ollama_base_url: String,
    pub model: String,
    pub port: u16,
    /// `None` means permissive CORS (development default).
    pub cors_allow_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            ollama_base_url: non_empty("OLLAMA_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            model: non_empty("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port,
            cors_allow_origin: non_empty("CORS_ALLOW_ORIGIN"),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
