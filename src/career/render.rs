// SPDX-License-Identifier: MIT

//! Text rendering of workflow results for chat-style front-ends

use super::workflow::{ExpansionItem, Pipeline, WorkflowInput, WorkflowState};

/// Comma-joined display forms
pub fn join_items(items: &[ExpansionItem]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Markdown reply for a finished state; the apology message when rejected
pub fn render_reply(state: &WorkflowState) -> String {
    if let Some(message) = state.message() {
        return message.to_string();
    }

    let (role, role_type) = state.accepted_role().unwrap_or_default();
    format!(
        "**Task:** {}\n\n**Role:** {}\n**Type:** {}\n**Skills:** {}\n**Tools:** {}",
        state.processed_text.trim(),
        role,
        role_type,
        join_items(&state.expanded.skills),
        join_items(&state.expanded.tools)
    )
}

/// Invoke the pipeline and render the outcome, never failing
pub async fn run_and_render(pipeline: &Pipeline, input: WorkflowInput) -> String {
    match pipeline.invoke(input).await {
        Ok(state) => render_reply(&state),
        Err(e) => format!("Error running workflow: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::workflow::{Expanded, Extraction, NOT_CAREER_MESSAGE};

    #[test]
    fn test_render_accepted() {
        let state = WorkflowState {
            processed_text: "What it takes to be a Data Engineer\n".to_string(),
            extraction: Some(Extraction::Accepted {
                role: "Data Engineer".to_string(),
                role_type: "Career".to_string(),
            }),
            expanded: Expanded {
                skills: vec![
                    ExpansionItem::Name("SQL".to_string()),
                    ExpansionItem::Detailed {
                        name: "Python".to_string(),
                        subtopics: vec!["pandas".to_string(), "pyspark".to_string()],
                    },
                ],
                tools: vec![
                    ExpansionItem::Name("Airflow".to_string()),
                    ExpansionItem::Name("dbt".to_string()),
                ],
            },
            ..Default::default()
        };

        assert_eq!(
            render_reply(&state),
            "**Task:** What it takes to be a Data Engineer\n\n\
             **Role:** Data Engineer\n\
             **Type:** Career\n\
             **Skills:** SQL, Python → pandas, pyspark\n\
             **Tools:** Airflow, dbt"
        );
    }

    #[test]
    fn test_render_rejected_is_apology() {
        let state = WorkflowState {
            extraction: Some(Extraction::rejected()),
            ..Default::default()
        };
        assert_eq!(render_reply(&state), NOT_CAREER_MESSAGE);
    }

    #[test]
    fn test_join_items_empty() {
        assert_eq!(join_items(&[]), "");
    }
}
