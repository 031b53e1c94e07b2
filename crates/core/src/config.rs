//! Configuration for fetching and text generation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the completion API credential.
pub const API_KEY_ENV: &str = "PITCHKIT_API_KEY";

/// Environment variable overriding the completion API base URL.
pub const API_BASE_ENV: &str = "PITCHKIT_API_BASE";

/// Environment variable overriding the completion model name.
pub const MODEL_ENV: &str = "PITCHKIT_MODEL";

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Settings for the page fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Bound on the whole request.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Sampling parameters for a single completion call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_new_tokens: u32,
    pub num_return_sequences: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl SamplingParams {
    /// Parameters used for competitor reports.
    pub const REPORT: SamplingParams = SamplingParams {
        max_new_tokens: 500,
        num_return_sequences: 1,
        temperature: 0.7,
        top_p: 0.9,
    };

    /// Parameters used for generated slide outlines.
    pub const OUTLINE: SamplingParams = SamplingParams {
        max_new_tokens: 900,
        num_return_sequences: 1,
        temperature: 0.7,
        top_p: 0.9,
    };
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::REPORT
    }
}

/// Settings for the remote completion backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL; `/completions` is appended.
    pub api_base: String,
    pub model: String,
    /// Bearer credential. Required before the context can be built.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl GeneratorConfig {
    /// Completion endpoint URL.
    pub fn completions_url(&self) -> String {
        format!("{}/completions", self.api_base.trim_end_matches('/'))
    }
}

/// Everything the process-wide context needs.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub generator: GeneratorConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "Mozilla/5.0");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_completions_url_trims_slash() {
        let config = GeneratorConfig {
            api_base: "http://localhost:8080/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/completions");
    }
}
