//! Text generation through an OpenAI-compatible completion API.

use pitchkit_core::config::API_KEY_ENV;
use pitchkit_core::{GenerationError, GeneratorConfig, SamplingParams};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Something that continues a prompt.
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`. The result may or may not echo the prompt.
    fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, GenerationError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, GenerationError> {
        (**self).complete(prompt, params)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    n: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

/// Blocking client for `POST {api_base}/completions`.
///
/// Generation has no request timeout; a slow model just takes longer.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    url: String,
    model: String,
    api_key: String,
}

impl CompletionClient {
    /// Build a client from configuration. The credential is required.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GenerationError::MissingCredential(API_KEY_ENV.to_string()))?
            .to_string();

        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: config.completions_url(),
            model: config.model.clone(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TextGenerator for CompletionClient {
    fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, GenerationError> {
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: params.max_new_tokens,
            n: params.num_return_sequences,
            temperature: params.temperature,
            top_p: params.top_p,
        };
        log::debug!(
            "Requesting completion from {} ({} prompt chars)",
            self.url,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| GenerationError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_completion(&text)
    }
}

/// Text of the first choice.
fn parse_completion(body: &str) -> Result<String, GenerationError> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text)
        .ok_or_else(|| GenerationError::MalformedResponse("response has no choices".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_fields() {
        let body = CompletionRequest {
            model: "m",
            prompt: "p",
            max_tokens: SamplingParams::REPORT.max_new_tokens,
            n: 1,
            temperature: 0.5,
            top_p: 0.25,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "m");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["n"], 1);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["top_p"], 0.25);
    }

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{"id":"x","choices":[{"text":" first","index":0},{"text":"second"}]}"#;
        assert_eq!(parse_completion(body).unwrap(), " first");
    }

    #[test]
    fn test_parse_without_choices() {
        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(GenerationError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_completion("not json"),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_missing_credential() {
        let config = GeneratorConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        let err = CompletionClient::new(&config).unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential(ref var) if var == API_KEY_ENV));
    }

    #[test]
    fn test_client_uses_config() {
        let config = GeneratorConfig {
            api_base: "http://localhost:9/v1/".to_string(),
            model: "tiny".to_string(),
            api_key: Some("secret".to_string()),
        };
        let client = CompletionClient::new(&config).unwrap();
        assert_eq!(client.model(), "tiny");
        assert_eq!(client.url, "http://localhost:9/v1/completions");
    }
}
