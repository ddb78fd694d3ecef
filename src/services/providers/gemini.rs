//! Google Gemini provider
//!
//! Thin pass-through over the `generateContent` REST endpoint. The caller's
//! prompt goes out verbatim; the first candidate's text comes back. Safety
//! blocks are reported as upstream errors rather than empty responses.

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::services::providers::GenerativeProvider;

const GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

/// Pulls the first candidate's text out of a response, turning safety blocks
/// and empty payloads into upstream errors.
fn extract_text(response: GenerateContentResponse) -> AppResult<String> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(AppError::Upstream(format!(
            "Prompt blocked by safety filters: {}",
            reason
        )));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Upstream("Gemini returned no candidates".to_string()))?;

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(AppError::Upstream(
            "Response blocked by safety filters".to_string(),
        ));
    }

    candidate
        .content
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        .ok_or_else(|| AppError::Upstream("Gemini response contained no text".to_string()))
}

#[async_trait::async_trait]
impl GenerativeProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_url, GEMINI_MODEL
        );

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = extract_text(payload)?;

        tracing::info!(
            chars = text.len(),
            provider = "gemini",
            "Generation completed"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_text(text: &str) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts: vec![Part {
                        text: Some(text.to_string()),
                    }],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
        }
    }

    #[test]
    fn extracts_first_candidate_text() {
        let text = extract_text(response_with_text("hello")).unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn prompt_block_is_an_upstream_error() {
        let response = GenerateContentResponse {
            candidates: vec![],
            prompt_feedback: Some(PromptFeedback {
                block_reason: Some("SAFETY".to_string()),
            }),
        };

        let err = extract_text(response).unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn safety_finish_reason_is_an_upstream_error() {
        let mut response = response_with_text("partial");
        response.candidates[0].finish_reason = Some("SAFETY".to_string());

        let err = extract_text(response).unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn empty_candidates_are_an_upstream_error() {
        let response = GenerateContentResponse {
            candidates: vec![],
            prompt_feedback: None,
        };

        let err = extract_text(response).unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn candidate_without_text_is_an_upstream_error() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content { parts: vec![] }),
                finish_reason: None,
            }],
            prompt_feedback: None,
        };

        let err = extract_text(response).unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn response_parses_from_api_json() {
        let payload = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "Delhi has several options." }], "role": "model" },
                "finishReason": "STOP"
            }],
            "promptFeedback": { "safetyRatings": [] }
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(extract_text(response).unwrap(), "Delhi has several options.");
    }
}
