// SPDX-License-Identifier: MIT

//! Prompt-in, text-out adapter over a [`Model`]
//!
//! The workflow never sees a model error: any failure is logged and turned
//! into an empty string, which the parsers downstream treat as malformed
//! output.

use super::model::{Content, GenerationConfig, Model};
use std::sync::Arc;

#[derive(Clone)]
pub struct TextGenerator {
    model: Arc<dyn Model>,
    config: GenerationConfig,
}

impl TextGenerator {
    pub fn new(model: Arc<dyn Model>, config: GenerationConfig) -> Self {
        Self { model, config }
    }

    /// Send a single user prompt and return the model's text.
    ///
    /// Returns `""` when the call fails.
    pub async fn generate(&self, prompt: &str) -> String {
        let history = [Content::user_text(prompt)];
        match self
            .model
            .generate_content(&history, Some(&self.config))
            .await
        {
            Ok(content) => {
                let text = content.text();
                log::debug!("Generated {} chars", text.len());
                text
            }
            Err(e) => {
                log::error!("Error calling model: {}", e);
                String::new()
            }
        }
    }
}
