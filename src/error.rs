// SPDX-License-Identifier: MIT

//! Typed error handling for career-graph
//!
//! Only invocation-level failures travel through these types. Upstream
//! model failures and malformed model output are recovered where they
//! happen and never reach a caller as an error.

use thiserror::Error;

/// Top-level error type for career-graph
#[derive(Debug, Error)]
pub enum CareerError {
    /// API errors from external services (Gemini)
    #[error("API error from {provider}: {message}")]
    Api { provider: String, message: String },

    /// Configuration errors (missing env vars, unparsable values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model/LLM-specific errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Graph store errors
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// HTTP request errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(String),
}

/// Model/LLM-specific errors
#[derive(Debug, Error)]
pub enum ModelError {
    /// API key not configured
    #[error("API key not configured for provider: {0}")]
    ApiKeyMissing(String),

    /// Response was blocked by the provider's safety filters
    #[error("Response blocked by safety filters")]
    Blocked,

    /// Invalid response from model
    #[error("Invalid response from model: {0}")]
    InvalidResponse(String),
}

/// Graph store errors
#[derive(Debug, Error)]
pub enum GraphError {
    /// Driver-level failure (connection, query, transaction)
    #[error(transparent)]
    Neo4j(#[from] neo4rs::Error),

    /// Write attempted after the store was closed
    #[error("graph store is closed")]
    Closed,

    /// Failure reported by a non-Neo4j store
    #[error("{0}")]
    Store(String),
}

impl CareerError {
    /// Create an API error
    pub fn api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create from a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<&str> for CareerError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<String> for CareerError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}
