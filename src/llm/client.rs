//! Client for hosted, OpenAI-compatible LLM APIs (Groq by default)

use crate::config::Config;
use crate::error::{CareerForgeError, Result};
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Text-in, text-out access to a language model.
///
/// One call is one request: implementations do not retry.
pub trait ChatModel {
    fn complete(&self, system: &str, prompt: &str) -> impl Future<Output = Result<String>> + Send;

    /// Speech-to-text for recorded interview answers
    fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> impl Future<Output = Result<String>> + Send;

    fn model_name(&self) -> &str;
}

/// Connection and sampling settings for one session
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub transcription_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl LlmSettings {
    /// Settings from config, with per-run overrides for model and temperature
    pub fn from_config(config: &Config, api_key: String, model: Option<&str>, temperature: Option<f32>) -> Result<Self> {
        let temperature = temperature.unwrap_or(config.llm.temperature);
        if !(0.0..=1.0).contains(&temperature) {
            return Err(CareerForgeError::InvalidInput(format!(
                "temperature must be between 0.0 and 1.0, got {}",
                temperature
            )));
        }

        Ok(Self {
            api_base: config.llm.api_base.trim_end_matches('/').to_string(),
            api_key,
            model: model.unwrap_or(config.llm.default_model.as_str()).to_string(),
            transcription_model: config.llm.transcription_model.clone(),
            temperature,
            max_tokens: config.llm.max_tokens,
            timeout: Duration::from_secs(config.llm.timeout_secs),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    settings: LlmSettings,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| CareerForgeError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    async fn error_from(response: reqwest::Response) -> CareerForgeError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        CareerForgeError::Llm(format!("API error (status {}): {}", status.as_u16(), message))
    }
}

/// Decodes a successful response body; a body of the wrong shape is an `Llm` error
async fn decode_body<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.text().await?;
    parse_body(&body)
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| CareerForgeError::Llm(format!("unexpected response shape: {}", e)))
}

impl ChatModel for LlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: prompt },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        debug!("LLM request: model={}, prompt_chars={}", self.settings.model, prompt.len());

        let response = self
            .client
            .post(format!("{}/chat/completions", self.settings.api_base))
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let completion: ChatCompletionResponse = decode_body(response).await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| CareerForgeError::Llm("LLM returned empty content".to_string()))
    }

    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String> {
        debug!("Transcribing {} bytes of audio from {}", audio.len(), file_name);

        let form = Form::new()
            .text("model", self.settings.transcription_model.clone())
            .part("file", Part::bytes(audio).file_name(file_name.to_string()));

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.settings.api_base))
            .bearer_auth(&self.settings.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let transcription: TranscriptionResponse = decode_body(response).await?;
        Ok(transcription.text.trim().to_string())
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_overrides() {
        let config = Config::default();
        let settings = LlmSettings::from_config(&config, "key".into(), Some("llama-3.1-8b-instant"), Some(0.7)).unwrap();

        assert_eq!(settings.model, "llama-3.1-8b-instant");
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.api_base, "https://api.groq.com/openai/v1");
        assert_eq!(settings.timeout, Duration::from_secs(120));

        let defaults = LlmSettings::from_config(&config, "key".into(), None, None).unwrap();
        assert_eq!(defaults.model, config.llm.default_model);

        assert!(LlmSettings::from_config(&config, "key".into(), None, Some(1.2)).is_err());
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "m",
            messages: [
                ChatMessage { role: "system", content: "s" },
                ChatMessage { role: "user", content: "u" },
            ],
            temperature: 0.5,
            max_tokens: 10,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 10);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":" 82 "}}],"usage":{"prompt_tokens":5,"completion_tokens":1,"total_tokens":6}}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some(" 82 "));
        assert_eq!(parsed.usage.unwrap().completion_tokens, 1);

        let unexpected = parse_body::<ChatCompletionResponse>(r#"{"id":"x","object":"list"}"#).unwrap_err();
        assert!(matches!(unexpected, CareerForgeError::Llm(ref m) if m.starts_with("unexpected response shape")));
        assert!(matches!(parse_body::<TranscriptionResponse>("<html>"), Err(CareerForgeError::Llm(_))));

        let error = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
        let parsed: ApiError = serde_json::from_str(error).unwrap();
        assert_eq!(parsed.error.message, "Invalid API Key");
    }
}
