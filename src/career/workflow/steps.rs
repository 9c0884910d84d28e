// SPDX-License-Identifier: MIT

//! The five pipeline steps
//!
//! Each step consumes the previous state and returns the next one.

use super::parse;
use super::prompts;
use super::state::{Expanded, WorkflowState};
use crate::career::graph::GraphStore;
use crate::error::CareerError;
use crate::llm::TextGenerator;
use async_trait::async_trait;
use std::sync::Arc;

/// Placeholder emitted by the default follow-up translator
pub const PLACEHOLDER_CYPHER: &str = "MATCH (n) RETURN n";

/// A single stage of the workflow
#[async_trait]
pub trait Step: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, state: WorkflowState) -> Result<WorkflowState, CareerError>;
}

/// Extension point for turning a follow-up question into a graph query
pub trait QueryTranslator: Send + Sync {
    fn translate(&self, question: &str) -> String;
}

/// Default translator: ignores the question
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderTranslator;

impl QueryTranslator for PlaceholderTranslator {
    fn translate(&self, _question: &str) -> String {
        PLACEHOLDER_CYPHER.to_string()
    }
}

/// Rewrites the raw query into a task phrase
pub struct RewriteTask {
    generator: TextGenerator,
}

impl RewriteTask {
    pub fn new(generator: TextGenerator) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Step for RewriteTask {
    fn name(&self) -> &str {
        "process_input"
    }

    async fn run(&self, state: WorkflowState) -> Result<WorkflowState, CareerError> {
        let processed_text = self
            .generator
            .generate(&prompts::rewrite_task(&state.user_text))
            .await;
        Ok(WorkflowState {
            processed_text,
            ..state
        })
    }
}

/// Extracts and classifies role/type entities
pub struct ExtractEntities {
    generator: TextGenerator,
}

impl ExtractEntities {
    pub fn new(generator: TextGenerator) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Step for ExtractEntities {
    fn name(&self) -> &str {
        "extract_entities"
    }

    async fn run(&self, state: WorkflowState) -> Result<WorkflowState, CareerError> {
        let response = self
            .generator
            .generate(&prompts::extract_entities(&state.processed_text))
            .await;
        let extraction = parse::parse_entities(&response);
        log::info!("Extracted entities: {:?}", extraction);
        Ok(WorkflowState {
            extraction: Some(extraction),
            ..state
        })
    }
}

/// Upserts the accepted role
pub struct PersistRole {
    store: Arc<dyn GraphStore>,
}

impl PersistRole {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Step for PersistRole {
    fn name(&self) -> &str {
        "map_to_graph"
    }

    async fn run(&self, state: WorkflowState) -> Result<WorkflowState, CareerError> {
        match state.accepted_role() {
            Some((role, role_type)) => {
                log::info!("Mapping role into graph: {} ({})", role, role_type);
                self.store.upsert_role(role, role_type).await?;
            }
            None => log::info!("Skipping graph mapping: no usable role"),
        }
        Ok(state)
    }
}

/// Asks for skills/tools and writes the edges
pub struct ExpandGraph {
    generator: TextGenerator,
    store: Arc<dyn GraphStore>,
}

impl ExpandGraph {
    pub fn new(generator: TextGenerator, store: Arc<dyn GraphStore>) -> Self {
        Self { generator, store }
    }
}

#[async_trait]
impl Step for ExpandGraph {
    fn name(&self) -> &str {
        "expand_graph"
    }

    async fn run(&self, state: WorkflowState) -> Result<WorkflowState, CareerError> {
        let Some((role, _)) = state.accepted_role() else {
            log::info!("Skipping graph expansion: no usable role");
            return Ok(WorkflowState {
                expanded: Expanded::default(),
                ..state
            });
        };

        let response = self.generator.generate(&prompts::expand_role(role)).await;
        let expanded = parse::parse_expansion(&response);

        for skill in &expanded.skills {
            self.store.upsert_skill_edge(role, skill.name()).await?;
        }
        for tool in &expanded.tools {
            self.store.upsert_tool_edge(role, tool.name()).await?;
        }

        log::info!(
            "Expanded graph for role {} with {} skills and {} tools",
            role,
            expanded.skills.len(),
            expanded.tools.len()
        );
        Ok(WorkflowState { expanded, ..state })
    }
}

/// Follow-up hook; delegates to a [`QueryTranslator`]
pub struct FollowUp {
    translator: Arc<dyn QueryTranslator>,
}

impl FollowUp {
    pub fn new(translator: Arc<dyn QueryTranslator>) -> Self {
        Self { translator }
    }
}

impl Default for FollowUp {
    fn default() -> Self {
        Self::new(Arc::new(PlaceholderTranslator))
    }
}

#[async_trait]
impl Step for FollowUp {
    fn name(&self) -> &str {
        "query_graph"
    }

    async fn run(&self, state: WorkflowState) -> Result<WorkflowState, CareerError> {
        log::info!("Converting question to query: {}", state.followup_question);
        let cypher = self.translator.translate(&state.followup_question);
        Ok(WorkflowState { cypher, ..state })
    }
}
