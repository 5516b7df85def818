use anyhow::{Context, Result};

/// Service configuration, read from the environment at startup. The two
/// catalog keys and the cloud model key are required; everything else has a
/// working default.
#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb_api_key: String,
    pub omdb_api_key: String,
    pub cloud_api_key: String,
    pub cloud_model: String,
    pub ollama_host: String,
    pub ollama_port: u16,
    pub local_model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            tmdb_api_key: required("TMDB_API_KEY")?,
            omdb_api_key: required("OMDB_API_KEY")?,
            cloud_api_key: required("OPENAI_API_KEY")?,
            cloud_model: or_default("CLOUD_MODEL", "gpt-4"),
            ollama_host: or_default("OLLAMA_HOST", "http://localhost"),
            ollama_port: parsed_or("OLLAMA_PORT", 11434),
            local_model: or_default("LOCAL_MODEL", "llama2"),
            port: parsed_or("PORT", 3000),
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} environment variable is required"))
}

fn or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed_or(name: &str, default: u16) -> u16 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
