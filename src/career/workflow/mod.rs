// SPDX-License-Identifier: MIT

//! Career workflow
//!
//! This module provides:
//! - `WorkflowState` - the record threaded through the steps
//! - `Step` and the five concrete steps
//! - `Pipeline` - runs the steps in a fixed linear order

pub mod parse;
mod pipeline;
pub mod prompts;
mod state;
mod steps;

pub use pipeline::Pipeline;
pub use state::{
    Expanded, ExpansionItem, Extraction, WorkflowInput, WorkflowState, NOT_CAREER_MESSAGE,
};
pub use steps::{
    ExpandGraph, ExtractEntities, FollowUp, PersistRole, PlaceholderTranslator, QueryTranslator,
    RewriteTask, Step, PLACEHOLDER_CYPHER,
};
