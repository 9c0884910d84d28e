// SPDX-License-Identifier: MIT

//! Parse-or-default handling of model output
//!
//! Nothing here fails: malformed output falls back to a stated default.

use super::state::{Expanded, ExpansionItem, Extraction};
use serde_json::Value;

/// Type assigned when the extractor falls back to raw text
pub const FALLBACK_TYPE: &str = "Career";

/// Trim the response and remove a surrounding ```json / ``` fence
pub fn strip_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Language tag runs to the end of the opening line
    let body = match rest.find('\n') {
        Some(idx) if rest[..idx].chars().all(|c| c.is_ascii_alphanumeric()) => &rest[idx + 1..],
        _ => rest.strip_prefix("json").unwrap_or(rest),
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Decode entity JSON, falling back to `{role: <raw>, type: "Career"}`,
/// then classify it.
pub fn parse_entities(response: &str) -> Extraction {
    let cleaned = strip_fence(response);
    let (role, role_type) = match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(obj)) => (
            obj.get("role").and_then(Value::as_str).map(str::to_string),
            obj.get("type").and_then(Value::as_str).map(str::to_string),
        ),
        // Valid JSON of the wrong shape carries no entities at all
        Ok(other) => {
            log::warn!("Entity response is not a JSON object: {}", other);
            (None, None)
        }
        Err(e) => {
            log::warn!("JSON decode error ({}). Raw response: {}", e, response);
            (Some(cleaned.to_string()), Some(FALLBACK_TYPE.to_string()))
        }
    };
    classify(role.as_deref(), role_type.as_deref())
}

/// Accept only a usable, specific role
pub fn classify(role: Option<&str>, role_type: Option<&str>) -> Extraction {
    let role = role.map(str::trim).unwrap_or_default();
    let role_type = role_type.map(str::trim).unwrap_or_default();

    let placeholder = matches!(role.to_lowercase().as_str(), "unknown" | "career");
    if role.is_empty() || role_type.is_empty() || placeholder {
        log::info!(
            "Rejecting entities (role: {:?}, type: {:?})",
            role,
            role_type
        );
        return Extraction::rejected();
    }

    Extraction::Accepted {
        role: role.to_string(),
        role_type: role_type.to_string(),
    }
}

/// Decode skill/tool JSON, falling back to empty lists
pub fn parse_expansion(response: &str) -> Expanded {
    let cleaned = strip_fence(response);
    let value = match serde_json::from_str::<Value>(cleaned) {
        Ok(v) => v,
        Err(e) => {
            log::warn!(
                "JSON decode error in expansion ({}). Raw response: {}",
                e,
                response
            );
            return Expanded::default();
        }
    };

    Expanded {
        skills: parse_items(&value, "skills"),
        tools: parse_items(&value, "tools"),
    }
}

fn parse_items(value: &Value, key: &str) -> Vec<ExpansionItem> {
    let Some(entries) = value.get(key).and_then(Value::as_array) else {
        if value.get(key).is_some() {
            log::warn!("Expansion key '{}' is not a list", key);
        }
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<ExpansionItem>(entry.clone()) {
            Ok(item) if !item.name().trim().is_empty() => Some(trim_item(item)),
            Ok(_) => {
                log::warn!("Dropping {} entry with empty name", key);
                None
            }
            Err(_) => {
                log::warn!("Dropping unrecognized {} entry: {}", key, entry);
                None
            }
        })
        .collect()
}

fn trim_item(item: ExpansionItem) -> ExpansionItem {
    match item {
        ExpansionItem::Name(name) => ExpansionItem::Name(name.trim().to_string()),
        ExpansionItem::Detailed { name, subtopics } => ExpansionItem::Detailed {
            name: name.trim().to_string(),
            subtopics,
        },
    }
}
