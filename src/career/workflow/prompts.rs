// SPDX-License-Identifier: MIT

//! Prompt templates for each model-backed step

pub fn rewrite_task(user_text: &str) -> String {
    format!(
        "Rewrite the query into a task form. \
         Example: 'I want to be a data engineer' -> 'What it takes to be a Data Engineer'\n\
         User: {}",
        user_text
    )
}

pub fn extract_entities(processed_text: &str) -> String {
    format!(
        "Extract main career entities from: {}. \
         Return only a JSON object with keys: role, type. \
         Use \"unknown\" as the role if the text is not about a career.",
        processed_text
    )
}

pub fn expand_role(role: &str) -> String {
    format!(
        "List 5 key skills and 3 tools required for the role: {}. \
         Return JSON with keys 'skills' and 'tools'. \
         Make sure the response is valid JSON format.",
        role
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_includes_example_and_input() {
        let prompt = rewrite_task("I want to be a nurse");
        assert!(prompt.contains("'What it takes to be a Data Engineer'"));
        assert!(prompt.ends_with("User: I want to be a nurse"));
    }

    #[test]
    fn test_expand_asks_for_counts() {
        let prompt = expand_role("Data Engineer");
        assert!(prompt.contains("5 key skills and 3 tools"));
        assert!(prompt.contains("role: Data Engineer"));
    }

    #[test]
    fn test_extract_names_keys() {
        assert!(extract_entities("x").contains("role, type"));
    }
}
