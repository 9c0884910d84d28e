// SPDX-License-Identifier: MIT

//! Graph store for roles, skills and tools
//!
//! This module provides:
//! - `GraphStore` - the write-side seam used by the workflow
//! - `Neo4jStore` - Bolt-backed implementation using `neo4rs`
//! - `MemoryGraphStore` - in-process implementation with a write log

mod memory;
mod neo4j;

pub use memory::{GraphWrite, MemoryGraphStore};
pub use neo4j::Neo4jStore;

use crate::error::GraphError;
use async_trait::async_trait;

/// Idempotent write operations on the career graph.
///
/// Every call is its own atomic write. Nothing is ever deleted.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Upsert a `Role` keyed by `(name, type)`
    async fn upsert_role(&self, name: &str, role_type: &str) -> Result<(), GraphError>;

    /// Upsert a `Skill` and a `(Role)-[:REQUIRES]->(Skill)` edge
    async fn upsert_skill_edge(&self, role_name: &str, skill_name: &str)
        -> Result<(), GraphError>;

    /// Upsert a `Tool` and a `(Role)-[:USES]->(Tool)` edge
    async fn upsert_tool_edge(&self, role_name: &str, tool_name: &str) -> Result<(), GraphError>;

    /// Release the underlying connection. Writes after this fail with
    /// [`GraphError::Closed`].
    async fn close(&self) -> Result<(), GraphError> {
        Ok(())
    }
}
