// SPDX-License-Identifier: MIT

//! Neo4j graph store over Bolt

use super::GraphStore;
use crate::career::config::Neo4jConfig;
use crate::error::GraphError;
use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Query};
use tokio::sync::RwLock;

const UPSERT_ROLE: &str = "MERGE (r:Role {name: $role_name, type: $role_type})";

const UPSERT_SKILL_EDGE: &str = "
    MERGE (s:Skill {name: $skill_name})
    MERGE (r:Role {name: $role_name})
    MERGE (r)-[:REQUIRES]->(s)
";

const UPSERT_TOOL_EDGE: &str = "
    MERGE (t:Tool {name: $tool_name})
    MERGE (r:Role {name: $role_name})
    MERGE (r)-[:USES]->(t)
";

const SCHEMA: &[&str] = &[
    "CREATE CONSTRAINT skill_name IF NOT EXISTS FOR (s:Skill) REQUIRE s.name IS UNIQUE",
    "CREATE CONSTRAINT tool_name IF NOT EXISTS FOR (t:Tool) REQUIRE t.name IS UNIQUE",
    "CREATE INDEX role_name IF NOT EXISTS FOR (r:Role) ON (r.name)",
];

/// Long-lived Neo4j connection pool.
///
/// Opened once with [`Neo4jStore::connect`] and shared by every invocation.
/// [`GraphStore::close`] drops the pool.
pub struct Neo4jStore {
    graph: RwLock<Option<Graph>>,
}

impl Neo4jStore {
    /// Open a connection pool to the configured server
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, GraphError> {
        let mut builder = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str());
        if let Some(db) = &config.database {
            builder = builder.db(db.as_str());
        }

        log::info!("Connecting to Neo4j at {}", config.uri);
        let graph = Graph::connect(builder.build()?).await?;

        Ok(Self {
            graph: RwLock::new(Some(graph)),
        })
    }

    /// Create uniqueness constraints and indexes.
    ///
    /// Failures are logged and ignored; older servers reject some of these.
    pub async fn ensure_schema(&self) -> Result<(), GraphError> {
        let graph = self.open_graph().await?;
        for statement in SCHEMA {
            if let Err(e) = graph.run(query(statement)).await {
                log::warn!("Schema statement skipped ({}): {}", statement, e);
            }
        }
        Ok(())
    }

    /// Handle to the pool; the lock is not held across queries
    async fn open_graph(&self) -> Result<Graph, GraphError> {
        self.graph.read().await.clone().ok_or(GraphError::Closed)
    }

    /// Run a single statement in its own write transaction
    async fn write(&self, q: Query) -> Result<(), GraphError> {
        let graph = self.open_graph().await?;
        let mut txn = graph.start_txn().await?;
        txn.run(q).await?;
        txn.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn upsert_role(&self, name: &str, role_type: &str) -> Result<(), GraphError> {
        log::debug!("MERGE Role {{name: {}, type: {}}}", name, role_type);
        self.write(
            query(UPSERT_ROLE)
                .param("role_name", name)
                .param("role_type", role_type),
        )
        .await
    }

    async fn upsert_skill_edge(
        &self,
        role_name: &str,
        skill_name: &str,
    ) -> Result<(), GraphError> {
        log::debug!("MERGE ({})-[:REQUIRES]->({})", role_name, skill_name);
        self.write(
            query(UPSERT_SKILL_EDGE)
                .param("role_name", role_name)
                .param("skill_name", skill_name),
        )
        .await
    }

    async fn upsert_tool_edge(&self, role_name: &str, tool_name: &str) -> Result<(), GraphError> {
        log::debug!("MERGE ({})-[:USES]->({})", role_name, tool_name);
        self.write(
            query(UPSERT_TOOL_EDGE)
                .param("role_name", role_name)
                .param("tool_name", tool_name),
        )
        .await
    }

    async fn close(&self) -> Result<(), GraphError> {
        if self.graph.write().await.take().is_some() {
            log::info!("Neo4j connection pool released");
        }
        Ok(())
    }
}
