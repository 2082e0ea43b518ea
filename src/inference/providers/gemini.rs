//! Generative Language API provider (`models/{model}:generateContent`).
//!
//! This module uses the API's own terminology:
//! - "contents" (array of role-tagged messages, roles `user` / `model`)
//! - "parts" (each message carries one text part)
//! - "systemInstruction" (out-of-band, never part of `contents`)
//! - "groundingMetadata.groundingChunks" (citations, when search grounding is on)

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::inference::types::non_blank;
use crate::inference::{
    Citation, Completion, CompletionProvider, CompletionRequest, Message, ProviderError,
};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// Generative Language API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize, Debug, Default)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize, Debug, Default)]
struct GoogleSearch {}

/// The request body for `generateContent`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GroundingChunk {
    web: Option<ChunkSource>,
    retrieved_context: Option<ChunkSource>,
}

#[derive(Deserialize, Debug)]
struct ChunkSource {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn messages_to_contents(messages: &[Message]) -> Vec<Content> {
    messages
        .iter()
        .map(|msg| Content {
            role: msg.role.as_str(),
            parts: vec![Part {
                text: msg.text.clone(),
            }],
        })
        .collect()
}

fn build_request(request: &CompletionRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: messages_to_contents(&request.messages),
        system_instruction: SystemInstruction {
            parts: vec![Part {
                text: request.system_instruction.clone(),
            }],
        },
        tools: request.grounding.then(|| vec![Tool::default()]),
    }
}

/// Pulls the first candidate's text and citations out of a response.
fn extract_completion(response: GenerateContentResponse) -> Result<Completion, ProviderError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("response contained no candidates".to_string()))?;

    let texts: Vec<String> = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if texts.is_empty() {
        return Err(ProviderError::Parse("response contained no text".to_string()));
    }

    let citations = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks.iter().map(chunk_to_citation).collect())
        .unwrap_or_default();

    Ok(Completion {
        text: texts.concat(),
        citations,
    })
}

/// `web` wins over `retrievedContext` per field; blank values fall through.
fn chunk_to_citation(chunk: &GroundingChunk) -> Citation {
    Citation {
        uri: pick_field(chunk, |s| s.uri.as_deref()),
        title: pick_field(chunk, |s| s.title.as_deref()),
    }
}

fn pick_field<'a>(
    chunk: &'a GroundingChunk,
    field: impl Fn(&'a ChunkSource) -> Option<&'a str>,
) -> Option<String> {
    non_blank(chunk.web.as_ref().and_then(&field))
        .or_else(|| non_blank(chunk.retrieved_context.as_ref().and_then(&field)))
}

/// Prefers the `error.message` of the JSON error envelope over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| body.to_string())
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generative Language API provider
pub struct GeminiProvider {
    api_key: HeaderValue,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Creates a new provider.
    ///
    /// Fails with `ProviderError::Config` if the key cannot be sent as a header
    /// value (embedded whitespace or control characters).
    ///
    /// # Arguments
    /// * `api_key` - Generative Language API key
    /// * `base_url` - Optional custom base URL (defaults to the public v1beta endpoint)
    pub fn new(api_key: &str, base_url: Option<String>) -> Result<Self, ProviderError> {
        if api_key.chars().any(char::is_whitespace) {
            return Err(ProviderError::Config(
                "API key must not contain whitespace".to_string(),
            ));
        }
        let mut header = HeaderValue::from_str(api_key)
            .map_err(|e| ProviderError::Config(format!("invalid API key: {e}")))?;
        header.set_sensitive(true);

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key: header,
            base_url,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        let body = build_request(&request);

        info!(
            "generateContent request: model={}, message_count={}, grounding={}",
            request.model,
            body.contents.len(),
            request.grounding
        );

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", self.api_key.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("generateContent response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Generative Language API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: error_message(&err_body),
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let completion = extract_completion(payload)?;
        info!(
            "generateContent complete: {} text bytes, {} citations",
            completion.text.len(),
            completion.citations.len()
        );
        Ok(completion)
    }
}
