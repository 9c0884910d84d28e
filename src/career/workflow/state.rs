// SPDX-License-Identifier: MIT

//! Per-invocation workflow state

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Reply used when the extracted entities are not usable for career guidance
pub const NOT_CAREER_MESSAGE: &str =
    "Sorry, I can only help with career-related questions. Try something like \"I want to be a data engineer\".";

/// Caller-supplied input for one invocation
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkflowInput {
    pub user_text: String,
    #[serde(default)]
    pub followup_question: String,
}

/// Outcome of entity extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Accepted { role: String, role_type: String },
    Rejected { message: String },
}

impl Extraction {
    pub fn rejected() -> Self {
        Self::Rejected {
            message: NOT_CAREER_MESSAGE.to_string(),
        }
    }
}

/// A skill or tool returned by the model: either a bare name or a name with subtopics
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ExpansionItem {
    Name(String),
    Detailed {
        name: String,
        #[serde(
            default,
            deserialize_with = "lenient_subtopics",
            skip_serializing_if = "Vec::is_empty"
        )]
        subtopics: Vec<String>,
    },
}

/// `null` and other non-list values become no subtopics; a lone string is one subtopic
fn lenient_subtopics<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    })
}

impl ExpansionItem {
    /// Name used as the graph node key
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detailed { name, .. } => name,
        }
    }
}

impl fmt::Display for ExpansionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detailed { name, subtopics } if !subtopics.is_empty() => {
                write!(f, "{} → {}", name, subtopics.join(", "))
            }
            other => f.write_str(other.name()),
        }
    }
}

/// Skills and tools associated with the accepted role
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Expanded {
    #[serde(default)]
    pub skills: Vec<ExpansionItem>,
    #[serde(default)]
    pub tools: Vec<ExpansionItem>,
}

/// Record threaded through the pipeline.
///
/// Steps take it by value and hand back a new one; nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub user_text: String,
    pub followup_question: String,
    pub processed_text: String,
    /// `None` until the extractor has run
    pub extraction: Option<Extraction>,
    pub expanded: Expanded,
    pub cypher: String,
}

impl WorkflowState {
    pub fn new(input: WorkflowInput) -> Self {
        Self {
            user_text: input.user_text,
            followup_question: input.followup_question,
            ..Default::default()
        }
    }

    /// `(role, type)` when the extraction was accepted
    pub fn accepted_role(&self) -> Option<(&str, &str)> {
        match &self.extraction {
            Some(Extraction::Accepted { role, role_type }) => Some((role, role_type)),
            _ => None,
        }
    }

    pub fn skip_workflow(&self) -> bool {
        matches!(self.extraction, Some(Extraction::Rejected { .. }))
    }

    /// Apology text for rejected states
    pub fn message(&self) -> Option<&str> {
        match &self.extraction {
            Some(Extraction::Rejected { message }) => Some(message),
            _ => None,
        }
    }

    /// Flat JSON view of the state
    pub fn to_json(&self) -> Value {
        let entities = match self.accepted_role() {
            Some((role, role_type)) => json!({ "role": role, "type": role_type }),
            None => json!({}),
        };
        json!({
            "user_text": self.user_text,
            "followup_question": self.followup_question,
            "processed_text": self.processed_text,
            "entities": entities,
            "skip_workflow": self.skip_workflow(),
            "message": self.message(),
            "expanded": self.expanded,
            "cypher": self.cypher,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_blank() {
        let state = WorkflowState::new(WorkflowInput {
            user_text: "I want to be a nurse".to_string(),
            followup_question: "What skills?".to_string(),
        });
        assert_eq!(state.user_text, "I want to be a nurse");
        assert_eq!(state.followup_question, "What skills?");
        assert!(state.extraction.is_none());
        assert!(!state.skip_workflow());
        assert!(state.accepted_role().is_none());
    }

    #[test]
    fn test_item_display() {
        let plain = ExpansionItem::Name("SQL".to_string());
        let detailed = ExpansionItem::Detailed {
            name: "Python".to_string(),
            subtopics: vec!["pandas".to_string(), "pyspark".to_string()],
        };
        let bare_detailed = ExpansionItem::Detailed {
            name: "Linux".to_string(),
            subtopics: vec![],
        };

        assert_eq!(plain.to_string(), "SQL");
        assert_eq!(detailed.to_string(), "Python → pandas, pyspark");
        assert_eq!(bare_detailed.to_string(), "Linux");
        assert_eq!(detailed.name(), "Python");
    }

    #[test]
    fn test_item_keeps_model_shape() {
        let items: Vec<ExpansionItem> =
            serde_json::from_value(json!(["SQL", {"name": "Spark", "subtopics": ["RDDs"]}]))
                .unwrap();
        assert_eq!(items[0], ExpansionItem::Name("SQL".to_string()));
        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            json!(["SQL", {"name": "Spark", "subtopics": ["RDDs"]}])
        );
    }

    #[test]
    fn test_to_json_accepted() {
        let state = WorkflowState {
            user_text: "I want to be a data engineer".to_string(),
            processed_text: "What it takes to be a Data Engineer".to_string(),
            extraction: Some(Extraction::Accepted {
                role: "Data Engineer".to_string(),
                role_type: "Career".to_string(),
            }),
            expanded: Expanded {
                skills: vec![ExpansionItem::Name("SQL".to_string())],
                tools: vec![ExpansionItem::Name("Airflow".to_string())],
            },
            cypher: "MATCH (n) RETURN n".to_string(),
            ..Default::default()
        };

        let json = state.to_json();
        assert_eq!(json["entities"], json!({"role": "Data Engineer", "type": "Career"}));
        assert_eq!(json["skip_workflow"], false);
        assert_eq!(json["message"], Value::Null);
        assert_eq!(json["expanded"], json!({"skills": ["SQL"], "tools": ["Airflow"]}));
        assert_eq!(json["cypher"], "MATCH (n) RETURN n");
    }

    #[test]
    fn test_to_json_rejected() {
        let state = WorkflowState {
            extraction: Some(Extraction::rejected()),
            ..Default::default()
        };

        let json = state.to_json();
        assert_eq!(json["entities"], json!({}));
        assert_eq!(json["skip_workflow"], true);
        assert_eq!(json["message"], NOT_CAREER_MESSAGE);
        assert_eq!(json["expanded"], json!({"skills": [], "tools": []}));
    }
}
