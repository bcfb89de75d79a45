// src/clients/openai.rs

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

const SERVICE: &str = "OpenAI";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".into(), content: content.into() }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatUsage {
    pub total_tokens: i32,
}

/// Resposta já "achatada" do Chat Completions.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    pub content: String,
    pub tokens_used: Option<i32>,
}

impl ChatResponse {
    pub fn into_completion(self) -> Result<ChatCompletion, AppError> {
        let content = self
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::ExternalService {
                service: SERVICE,
                message: "resposta sem conteúdo".into(),
            })?;

        Ok(ChatCompletion {
            content,
            tokens_used: self.usage.map(|u| u.total_tokens),
        })
    }
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(http: Client, api_key: Option<String>, base_url: String, model: String) -> Self {
        Self { http, api_key, base_url, model }
    }

    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::MissingConfiguration(SERVICE))?;

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/')))
            .bearer_auth(api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages,
                temperature: 0.4,
                max_tokens: 600,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService {
                service: SERVICE,
                message: format!("status {}: {}", status, body),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed.into_completion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_takes_first_choice_and_usage() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "  Temos pizza de calabresa!  " } }
            ],
            "usage": { "prompt_tokens": 100, "completion_tokens": 20, "total_tokens": 120 }
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let completion = parsed.into_completion().unwrap();

        assert_eq!(completion.content, "Temos pizza de calabresa!");
        assert_eq!(completion.tokens_used, Some(120));
    }

    #[test]
    fn empty_choices_is_an_external_error() {
        let parsed: ChatResponse = serde_json::from_str(r#"{ "choices": [] }"#).unwrap();
        assert!(matches!(
            parsed.into_completion(),
            Err(AppError::ExternalService { service: "OpenAI", .. })
        ));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = OpenAiClient::new(
            Client::new(),
            None,
            "http://127.0.0.1:9".into(),
            "gpt-4o-mini".into(),
        );
        let result = client.chat(&[ChatMessage::user("oi")]).await;
        assert!(matches!(result, Err(AppError::MissingConfiguration("OpenAI"))));
    }
}
