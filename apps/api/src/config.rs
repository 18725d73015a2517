use anyhow::{Context, Result};

use crate::llm_client::{LlmConfig, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub llm: LlmConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm: LlmConfig {
                api_key: require_env("ANTHROPIC_API_KEY")?,
                model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                max_tokens: parse_env("LLM_MAX_TOKENS", 1000)?,
                temperature: parse_env("LLM_TEMPERATURE", 0.7)?,
                timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, falling back to `default` when unset.
/// A value that is set but fails to parse is an error, not a silent default.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("JOBMATCH_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("JOBMATCH_TEST_BAD_TEMPERATURE", "warm");
        let result: Result<f32> = parse_env("JOBMATCH_TEST_BAD_TEMPERATURE", 0.7);
        assert!(result.is_err());
        std::env::remove_var("JOBMATCH_TEST_BAD_TEMPERATURE");
    }

    #[test]
    fn test_parse_env_reads_set_value() {
        std::env::set_var("JOBMATCH_TEST_MAX_TOKENS", " 512 ");
        let value: u32 = parse_env("JOBMATCH_TEST_MAX_TOKENS", 1000).unwrap();
        assert_eq!(value, 512);
        std::env::remove_var("JOBMATCH_TEST_MAX_TOKENS");
    }
}
