// SPDX-License-Identifier: MIT

//! Linear step executor

use super::state::{WorkflowInput, WorkflowState};
use super::steps::{
    ExpandGraph, ExtractEntities, FollowUp, PersistRole, QueryTranslator, RewriteTask, Step,
};
use crate::career::graph::GraphStore;
use crate::error::CareerError;
use crate::llm::TextGenerator;
use std::sync::Arc;

/// Runs its steps in order, threading the state through each
pub struct Pipeline {
    steps: Vec<Arc<dyn Step>>,
    store: Arc<dyn GraphStore>,
}

impl Pipeline {
    pub fn new(steps: Vec<Arc<dyn Step>>, store: Arc<dyn GraphStore>) -> Self {
        Self { steps, store }
    }

    /// Rewrite → Extract → Persist → Expand → FollowUp
    pub fn career(
        generator: TextGenerator,
        store: Arc<dyn GraphStore>,
        translator: Arc<dyn QueryTranslator>,
    ) -> Self {
        let steps: Vec<Arc<dyn Step>> = vec![
            Arc::new(RewriteTask::new(generator.clone())),
            Arc::new(ExtractEntities::new(generator.clone())),
            Arc::new(PersistRole::new(store.clone())),
            Arc::new(ExpandGraph::new(generator, store.clone())),
            Arc::new(FollowUp::new(translator)),
        ];
        Self::new(steps, store)
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run one invocation start to finish.
    ///
    /// A failing step aborts the invocation; writes already made stay in place.
    pub async fn invoke(&self, input: WorkflowInput) -> Result<WorkflowState, CareerError> {
        let mut state = WorkflowState::new(input);
        for step in &self.steps {
            log::info!("Executing step: {}", step.name());
            state = step.run(state).await.map_err(|e| {
                log::error!("Step {} failed: {}", step.name(), e);
                e
            })?;
        }
        Ok(state)
    }

    /// Close the graph store shared by the steps
    pub async fn shutdown(&self) -> Result<(), CareerError> {
        self.store.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::graph::MemoryGraphStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Appends its name to `processed_text` and records the order it ran in
    struct TraceStep {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Step for TraceStep {
        fn name(&self) -> &str {
            &self.name
        }

        async fn run(&self, state: WorkflowState) -> Result<WorkflowState, CareerError> {
            self.log.lock().unwrap().push(self.name.clone());
            Ok(WorkflowState {
                processed_text: format!("{}{}", state.processed_text, self.name),
                ..state
            })
        }
    }

    struct FailStep;

    #[async_trait]
    impl Step for FailStep {
        fn name(&self) -> &str {
            "fail"
        }

        async fn run(&self, _state: WorkflowState) -> Result<WorkflowState, CareerError> {
            Err(CareerError::other("boom"))
        }
    }

    fn trace(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Step> {
        Arc::new(TraceStep {
            name: name.to_string(),
            log: log.clone(),
        })
    }

    #[tokio::test]
    async fn test_steps_run_in_order_and_thread_state() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(
            vec![trace("a", &log), trace("b", &log), trace("c", &log)],
            Arc::new(MemoryGraphStore::new()),
        );

        let state = pipeline
            .invoke(WorkflowInput {
                user_text: "hi".to_string(),
                followup_question: String::new(),
            })
            .await
            .unwrap();

        assert_eq!(state.processed_text, "abc");
        assert_eq!(state.user_text, "hi");
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_failure_stops_later_steps() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(
            vec![trace("a", &log), Arc::new(FailStep), trace("c", &log)],
            Arc::new(MemoryGraphStore::new()),
        );

        let err = pipeline.invoke(WorkflowInput::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert_eq!(*log.lock().unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_shutdown_closes_store() {
        let store = Arc::new(MemoryGraphStore::new());
        let pipeline = Pipeline::new(vec![], store.clone());

        pipeline.shutdown().await.unwrap();

        assert!(store.upsert_role("Chef", "Career").await.is_err());
    }
}
