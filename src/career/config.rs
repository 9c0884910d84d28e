// SPDX-License-Identifier: MIT

//! Process configuration loaded from the environment (and `.env`)

use crate::error::CareerError;
use crate::llm::GenerationConfig;
use std::env;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_NEO4J_URI: &str = "bolt://localhost:7687";
pub const DEFAULT_NEO4J_USER: &str = "neo4j";
pub const DEFAULT_NEO4J_PASSWORD: &str = "neo4jneo4j";

/// Connection settings for the Neo4j graph store
#[derive(Debug, Clone, PartialEq)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Target database; the server default when unset
    pub database: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub generation: GenerationConfig,
    pub neo4j: Neo4jConfig,
}

impl Config {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, CareerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CareerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let google_api_key = get("GOOGLE_API_KEY")
            .ok_or_else(|| CareerError::config("GOOGLE_API_KEY not found in environment"))?;

        let temperature = match get("GEMINI_TEMPERATURE") {
            Some(raw) => raw.trim().parse::<f32>().map_err(|e| {
                CareerError::config(format!("invalid GEMINI_TEMPERATURE '{}': {}", raw, e))
            })?,
            None => 0.7,
        };
        let max_output_tokens = match get("GEMINI_MAX_OUTPUT_TOKENS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                CareerError::config(format!("invalid GEMINI_MAX_OUTPUT_TOKENS '{}': {}", raw, e))
            })?,
            None => 500,
        };

        Ok(Self {
            google_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            generation: GenerationConfig {
                temperature: Some(temperature),
                max_output_tokens: Some(max_output_tokens),
                ..Default::default()
            },
            neo4j: Neo4jConfig {
                uri: get("NEO4J_URI").unwrap_or_else(|| DEFAULT_NEO4J_URI.to_string()),
                user: get("NEO4J_USER").unwrap_or_else(|| DEFAULT_NEO4J_USER.to_string()),
                password: get("NEO4J_PASSWORD")
                    .unwrap_or_else(|| DEFAULT_NEO4J_PASSWORD.to_string()),
                database: get("NEO4J_DATABASE"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "abc")])).unwrap();

        assert_eq!(config.google_api_key, "abc");
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.generation.temperature, Some(0.7));
        assert_eq!(config.generation.max_output_tokens, Some(500));
        assert_eq!(
            config.neo4j,
            Neo4jConfig {
                uri: "bolt://localhost:7687".to_string(),
                user: "neo4j".to_string(),
                password: "neo4jneo4j".to_string(),
                database: None,
            }
        );
    }

    #[test]
    fn test_missing_api_key() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, CareerError::Config(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        assert!(Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "abc"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_TEMPERATURE", "0.2"),
            ("GEMINI_MAX_OUTPUT_TOKENS", "1024"),
            ("NEO4J_URI", "neo4j://graph:7687"),
            ("NEO4J_DATABASE", "careers"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.generation.temperature, Some(0.2));
        assert_eq!(config.generation.max_output_tokens, Some(1024));
        assert_eq!(config.neo4j.uri, "neo4j://graph:7687");
        assert_eq!(config.neo4j.database.as_deref(), Some("careers"));
    }

    #[test]
    fn test_invalid_temperature() {
        let err = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "abc"),
            ("GEMINI_TEMPERATURE", "warm"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("GEMINI_TEMPERATURE"));
    }
}
