//! Prompt templates for the two transform operations.

pub fn polish_prompt(text: &str) -> String {
    format!(
        r#"Rewrite the following text for a professional resume/portfolio.
Make it concise, impactful, and use action verbs.
Keep the same language as the input.
Return ONLY the polished text, no explanations.

Input text: "{text}""#
    )
}

pub fn translate_prompt(fields_json: &str, target_label: &str) -> String {
    format!(
        r#"Translate the string values of the following JSON object into {target_label}.
Keep every key and the overall structure exactly as given.
Translate arrays of strings element by element.
Do not add, remove, or rename any keys.
Return ONLY the resulting JSON object, no explanations and no code fences.

{fields_json}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polish_prompt_embeds_text() {
        let prompt = polish_prompt("I did stuff at work");
        assert!(prompt.contains("I did stuff at work"));
        assert!(prompt.contains("polished text"));
    }

    #[test]
    fn test_translate_prompt_embeds_target_and_payload() {
        let prompt = translate_prompt("{\"name\":\"Dave\"}", "日本語 (Japanese)");
        assert!(prompt.contains("日本語"));
        assert!(prompt.contains("{\"name\":\"Dave\"}"));
    }
}
