// SPDX-License-Identifier: MIT

//! Model module - defines the LLM model trait and shared types
//!
//! Model implementations are in their own submodules:
//! - [gemini] - Google's Gemini API

pub mod gemini;

use crate::error::CareerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for model generation
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationConfig {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    /// A single-part user message
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::Text(text.into())],
        }
    }

    /// Concatenated text parts, ignoring thinking output
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.as_str()),
                Part::Thinking(_) => None,
            })
            .collect()
    }
}

/// Parts of a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Part {
    /// Regular text output from the model
    Text(String),
    /// Thinking/reasoning content from thinking models
    Thinking(String),
}

/// Core trait for LLM model implementations
#[async_trait]
pub trait Model: Send + Sync {
    async fn generate_content(
        &self,
        history: &[Content],
        config: Option<&GenerationConfig>,
    ) -> Result<Content, CareerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_text_skips_thinking() {
        let content = Content {
            role: "model".to_string(),
            parts: vec![
                Part::Thinking("hmm".to_string()),
                Part::Text("What it takes ".to_string()),
                Part::Text("to be a Nurse".to_string()),
            ],
        };
        assert_eq!(content.text(), "What it takes to be a Nurse");
    }

    #[test]
    fn test_user_text() {
        let content = Content::user_text("hello");
        assert_eq!(content.role, "user");
        assert_eq!(content.parts, vec![Part::Text("hello".to_string())]);
    }
}
