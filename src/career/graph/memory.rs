// SPDX-License-Identifier: MIT

//! In-memory graph store

use super::GraphStore;
use crate::error::GraphError;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// A single write call, in the order it was received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphWrite {
    Role { name: String, role_type: String },
    Skill { role: String, skill: String },
    Tool { role: String, tool: String },
}

#[derive(Debug, Default)]
struct Graph {
    roles: BTreeSet<(String, String)>,
    skills: BTreeSet<String>,
    tools: BTreeSet<String>,
    requires: BTreeSet<(String, String)>,
    uses: BTreeSet<(String, String)>,
    writes: Vec<GraphWrite>,
}

/// Set-backed graph with `MERGE` semantics.
///
/// Edges merge their role by name only, so an edge to a role that was never
/// upserted creates a role with an empty type, as the Cypher does.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    graph: Mutex<Graph>,
    closed: AtomicBool,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write call received so far
    pub async fn writes(&self) -> Vec<GraphWrite> {
        self.graph.lock().await.writes.clone()
    }

    /// Distinct `(name, type)` role nodes
    pub async fn roles(&self) -> Vec<(String, String)> {
        self.graph.lock().await.roles.iter().cloned().collect()
    }

    pub async fn skills(&self) -> Vec<String> {
        self.graph.lock().await.skills.iter().cloned().collect()
    }

    pub async fn tools(&self) -> Vec<String> {
        self.graph.lock().await.tools.iter().cloned().collect()
    }

    /// `(role, skill)` pairs joined by REQUIRES
    pub async fn requires(&self) -> Vec<(String, String)> {
        self.graph.lock().await.requires.iter().cloned().collect()
    }

    /// `(role, tool)` pairs joined by USES
    pub async fn uses(&self) -> Vec<(String, String)> {
        self.graph.lock().await.uses.iter().cloned().collect()
    }

    fn ensure_open(&self) -> Result<(), GraphError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(GraphError::Closed);
        }
        Ok(())
    }
}

fn merge_role_by_name(graph: &mut Graph, name: &str) {
    if !graph.roles.iter().any(|(n, _)| n == name) {
        graph.roles.insert((name.to_string(), String::new()));
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn upsert_role(&self, name: &str, role_type: &str) -> Result<(), GraphError> {
        self.ensure_open()?;
        let mut graph = self.graph.lock().await;
        graph.writes.push(GraphWrite::Role {
            name: name.to_string(),
            role_type: role_type.to_string(),
        });
        graph.roles.insert((name.to_string(), role_type.to_string()));
        Ok(())
    }

    async fn upsert_skill_edge(
        &self,
        role_name: &str,
        skill_name: &str,
    ) -> Result<(), GraphError> {
        self.ensure_open()?;
        let mut graph = self.graph.lock().await;
        graph.writes.push(GraphWrite::Skill {
            role: role_name.to_string(),
            skill: skill_name.to_string(),
        });
        graph.skills.insert(skill_name.to_string());
        merge_role_by_name(&mut graph, role_name);
        graph.requires.insert((role_name.to_string(), skill_name.to_string()));
        Ok(())
    }

    async fn upsert_tool_edge(&self, role_name: &str, tool_name: &str) -> Result<(), GraphError> {
        self.ensure_open()?;
        let mut graph = self.graph.lock().await;
        graph.writes.push(GraphWrite::Tool {
            role: role_name.to_string(),
            tool: tool_name.to_string(),
        });
        graph.tools.insert(tool_name.to_string());
        merge_role_by_name(&mut graph, role_name);
        graph.uses.insert((role_name.to_string(), tool_name.to_string()));
        Ok(())
    }

    async fn close(&self) -> Result<(), GraphError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
