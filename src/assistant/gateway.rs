// Remote text-generation gateway (chat-completions over HTTP)

use crate::config::GatewayConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("API key not configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
    #[error("response contained no completion text")]
    EmptyCompletion,
    #[error("could not parse model output: {0}")]
    Unparseable(String),
}

/// Anything that turns a prompt into completion text.
pub trait ModelGateway {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, GatewayError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// DeepSeek chat-completions client. Blocking: one call per prompt, no retries.
pub struct DeepSeekGateway {
    client: Client,
    api_key: String,
    config: GatewayConfig,
}

impl DeepSeekGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let api_key = config.api_key.clone().ok_or(GatewayError::MissingApiKey)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }
}

impl ModelGateway for DeepSeekGateway {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, GatewayError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature: self.config.temperature,
        };

        debug!(model = %self.config.model, max_tokens, "sending completion request");
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        parse_completion(&body)
    }
}

/// Decode a chat-completions body and take its first non-blank completion.
fn parse_completion(body: &str) -> Result<String, GatewayError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
    completion_text(parsed)
}

fn completion_text(response: ChatResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(GatewayError::EmptyCompletion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let result = DeepSeekGateway::new(GatewayConfig::default());
        assert!(matches!(result, Err(GatewayError::MissingApiKey)));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "deepseek-chat",
            messages: [ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: 1000,
            temperature: 0.5,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "deepseek-chat");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
        assert_eq!(value["max_tokens"], 1000);
        assert_eq!(value["temperature"], 0.5);
    }

    #[test]
    fn test_completion_text() {
        let ok: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{}"}}]}"#,
        )
        .unwrap();
        assert_eq!(completion_text(ok).unwrap(), "{}");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(completion_text(empty), Err(GatewayError::EmptyCompletion)));

        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "  "}}]}"#).unwrap();
        assert!(matches!(completion_text(blank), Err(GatewayError::EmptyCompletion)));
    }

    #[test]
    fn test_malformed_envelope_is_its_own_error() {
        assert!(matches!(
            parse_completion("<html>bad gateway</html>"),
            Err(GatewayError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_completion(r#"{"choices": [{"message": "text"}]}"#),
            Err(GatewayError::MalformedResponse(_))
        ));
        assert_eq!(
            parse_completion(r#"{"choices": [{"message": {"content": "ok"}}]}"#).unwrap(),
            "ok"
        );
    }
}
