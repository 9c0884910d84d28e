// SPDX-License-Identifier: MIT

//! Gemini Model - Google's Gemini API implementation

use super::{Content, GenerationConfig, Model, Part};
use crate::error::{CareerError, ModelError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini model implementation
pub struct GeminiModel {
    client: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl GeminiModel {
    /// Create a new GeminiModel for the given key and model name
    pub fn new(
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Result<Self, CareerError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ModelError::ApiKeyMissing("Gemini".to_string()).into());
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            model_name: model_name.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root (proxies, local fakes)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model_name)
    }
}

#[async_trait]
impl Model for GeminiModel {
    async fn generate_content(
        &self,
        history: &[Content],
        config: Option<&GenerationConfig>,
    ) -> Result<Content, CareerError> {
        let body = build_request_body(history, config);

        log::debug!(
            "Gemini request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );

        // The key stays out of the URL so transport errors cannot leak it
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await?;
            return Err(CareerError::api("Gemini", format!("{}: {}", status, text)));
        }

        let resp_json: Value = resp.json().await?;
        log::debug!("Gemini response: {}", resp_json);

        parse_response(&resp_json)
    }
}

/// Build the `generateContent` request body
pub fn build_request_body(history: &[Content], config: Option<&GenerationConfig>) -> Value {
    let contents: Vec<Value> = history
        .iter()
        .map(|c| {
            let parts: Vec<Value> = c.parts.iter().filter_map(part_to_gemini_json).collect();
            json!({ "role": c.role, "parts": parts })
        })
        .collect();

    let mut body = json!({ "contents": contents });

    if let Some(config) = config {
        let mut generation = serde_json::Map::new();
        if let Some(t) = config.temperature {
            generation.insert("temperature".to_string(), json!(t));
        }
        if let Some(n) = config.max_output_tokens {
            generation.insert("maxOutputTokens".to_string(), json!(n));
        }
        if let Some(p) = config.top_p {
            generation.insert("topP".to_string(), json!(p));
        }
        if let Some(k) = config.top_k {
            generation.insert("topK".to_string(), json!(k));
        }
        if !generation.is_empty() {
            body["generationConfig"] = Value::Object(generation);
        }
    }

    body
}

/// Serialize a Part to Gemini API JSON format
/// Returns None for parts that shouldn't be sent (e.g., Thinking)
pub fn part_to_gemini_json(part: &Part) -> Option<Value> {
    match part {
        Part::Text(t) => Some(json!({ "text": t })),
        Part::Thinking(_) => None,
    }
}

/// Parse a Gemini API JSON part into Parts
pub fn parse_gemini_part(p: &Value) -> Vec<Part> {
    let mut parts = Vec::new();

    if let Some(thought) = p.get("thought").and_then(|t| t.as_str()) {
        if !thought.is_empty() {
            parts.push(Part::Thinking(thought.to_string()));
        }
    }

    if let Some(text) = p.get("text").and_then(|t| t.as_str()) {
        parts.push(Part::Text(text.to_string()));
    }

    parts
}

/// Parse a full `generateContent` response into model content
pub fn parse_response(resp_json: &Value) -> Result<Content, CareerError> {
    let candidates = resp_json
        .get("candidates")
        .and_then(|c| c.as_array())
        .ok_or_else(|| ModelError::InvalidResponse("no candidates in response".to_string()))?;

    // An empty candidate list is a valid "nothing to say"
    let Some(candidate) = candidates.first() else {
        return Ok(Content {
            role: "model".to_string(),
            parts: vec![],
        });
    };

    if let Some(finish_reason) = candidate.get("finishReason").and_then(|v| v.as_str()) {
        log::debug!("Gemini finish reason: {}", finish_reason);
        if finish_reason == "SAFETY" {
            return Err(ModelError::Blocked.into());
        }
    }

    let parts_json = match candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        Some(p) => p,
        None => {
            log::error!("No content parts in candidate: {}", candidate);
            return Err(ModelError::InvalidResponse(format!(
                "no content parts in candidate: {}",
                candidate
            ))
            .into());
        }
    };

    Ok(Content {
        role: "model".to_string(),
        parts: parts_json.iter().flat_map(parse_gemini_part).collect(),
    })
}
