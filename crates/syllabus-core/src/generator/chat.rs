//! OpenAI-compatible chat-completions client (Hugging Face router by default).

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{GenerationError, QuestionGenerator};
use crate::config_file::ServiceConfig;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Posts a system + user message pair to a chat-completions endpoint.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_token: Option<String>,
    max_tokens: u32,
    temperature: f32,
}

impl ChatCompletionsClient {
    /// Build a client from resolved service configuration.
    ///
    /// `llm_timeout_secs` is applied to the HTTP client; `None` leaves reqwest's
    /// default (no timeout).
    pub fn from_config(config: &ServiceConfig) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.llm_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            api_url: config.llm_api_url.clone(),
            model: config.llm_model.clone(),
            api_token: config.llm_api_token.clone(),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
        })
    }

    async fn complete(&self, system_message: &str, prompt: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_message,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let mut req = self.client.post(&self.api_url).json(&request);
        if let Some(ref token) = self.api_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        parse_response(&body)
    }
}

/// Pull the first choice's content out of a chat-completions body.
fn parse_response(body: &str) -> Result<String, GenerationError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Decode(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(GenerationError::EmptyResponse)
}

impl QuestionGenerator for ChatCompletionsClient {
    fn name(&self) -> &str {
        &self.model
    }

    fn generate<'a>(
        &'a self,
        system_message: &'a str,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        Box::pin(self.complete(system_message, prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"1. What is a stack? [Remember]"}}]}"#;
        assert_eq!(
            parse_response(body).unwrap(),
            "1. What is a stack? [Remember]"
        );
    }

    #[test]
    fn test_parse_empty_choices() {
        assert!(matches!(
            parse_response(r#"{"choices":[]}"#),
            Err(GenerationError::EmptyResponse)
        ));
        assert!(matches!(
            parse_response(r#"{"error":"overloaded"}"#),
            Err(GenerationError::EmptyResponse)
        ));
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_response("<html>bad gateway</html>").unwrap_err();
        assert!(err.to_string().starts_with("Error processing AI response"));
    }

    #[test]
    fn test_from_config_carries_settings() {
        let config = ServiceConfig {
            llm_api_token: Some("hf_secret".into()),
            llm_max_tokens: 512,
            llm_temperature: 0.2,
            llm_timeout_secs: Some(30),
            ..ServiceConfig::default()
        };
        let client = ChatCompletionsClient::from_config(&config).unwrap();
        assert_eq!(client.api_url, config.llm_api_url);
        assert_eq!(client.model, config.llm_model);
        assert_eq!(client.api_token.as_deref(), Some("hf_secret"));
        assert_eq!(client.max_tokens, 512);
        assert_eq!(client.temperature, 0.2);
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: 10,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 10);
    }
}
