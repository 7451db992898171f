//! HTTP client for the upstream chat-completion endpoint.
//!
//! Posts a [`RequestBody`] to a configured deployment URL with a bearer
//! credential and hands back the model's reply text. The endpoint shape is
//! the OpenAI-compatible chat-completion surface that Azure AI deployments
//! expose; only the reply content is consumed here, the rest of the
//! envelope is ignored.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::traits::Transformer;
use crate::types::{RawCompletion, RequestBody};
use crate::{MuninError, Result};

/// Default request timeout. Upstream calls run on the order of seconds;
/// large fixed-width files push toward this bound.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Transformer backed by an HTTP(S) chat-completion endpoint.
///
/// ```rust,no_run
/// use munin::HttpTransformer;
///
/// let transformer = HttpTransformer::new(
///     "https://example.cognitiveservices.azure.com/openai/deployments/gpt-4.1/chat/completions?api-version=2025-01-01-preview",
///     std::env::var("AZURE_OPENAI_API_KEY").unwrap(),
/// );
/// ```
#[derive(Clone)]
pub struct HttpTransformer {
    endpoint: String,
    api_key: String,
    extra_headers: Vec<(String, String)>,
    timeout: Duration,
    http: Client,
}

impl HttpTransformer {
    /// Create a transformer with the default timeout.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a transformer with a custom request timeout.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            extra_headers: Vec::new(),
            timeout,
            http,
        }
    }

    /// Attach an extra header to every request (e.g. a deployment routing
    /// header some Azure model endpoints require).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    fn classify(&self, err: reqwest::Error) -> MuninError {
        if err.is_timeout() {
            MuninError::Timeout(self.timeout)
        } else {
            MuninError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl Transformer for HttpTransformer {
    async fn send(&self, body: &RequestBody) -> Result<RawCompletion> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body);
        for (name, value) in &self.extra_headers {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if (200..300).contains(&status) {
            // Unwrap the completion envelope; the gateway only ever sees
            // the model's reply text.
            let content = extract_content(&text)?;
            Ok(RawCompletion {
                status,
                body: content,
            })
        } else {
            Ok(RawCompletion { status, body: text })
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Pull `choices[0].message.content` out of a completion response.
fn extract_content(text: &str) -> Result<String> {
    let completion: ChatCompletion = serde_json::from_str(text)
        .map_err(|e| MuninError::parse(format!("malformed completion envelope: {e}"), text))?;

    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(MuninError::parse(
            "completion contained no message content",
            text,
        ));
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice_content() {
        let envelope = r#"{
            "choices": [{"message": {"role": "assistant", "content": "{\"a\":1}"}}],
            "usage": {"total_tokens": 12}
        }"#;
        assert_eq!(extract_content(envelope).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn empty_choices_is_a_parse_error() {
        let err = extract_content(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, MuninError::Parse { .. }));
    }

    #[test]
    fn null_content_is_a_parse_error() {
        let err = extract_content(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap_err();
        assert!(matches!(err, MuninError::Parse { .. }));
    }

    #[test]
    fn garbage_envelope_keeps_raw_text() {
        let err = extract_content("upstream exploded").unwrap_err();
        match err {
            MuninError::Parse { raw, .. } => assert_eq!(raw, "upstream exploded"),
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
