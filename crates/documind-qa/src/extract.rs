//! JSON extraction from free-text model responses.

use documind_core::{DocumindError, QaPair, Result};

/// Find the first balanced `{...}` substring, respecting JSON strings.
fn extract_json(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in response[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&response[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a QA pair out of a free-text response.
///
/// Models wrap the JSON in prose and sometimes emit raw newlines inside
/// string values, which is invalid JSON; the fallback collapses all
/// whitespace runs to single spaces and parses again before giving up.
pub fn parse_qa_response(response: &str) -> Result<QaPair> {
    let json = extract_json(response).ok_or_else(|| {
        DocumindError::generation(format!("no JSON object in response: {}", preview(response)))
    })?;

    if let Ok(pair) = serde_json::from_str::<QaPair>(json) {
        return Ok(pair);
    }

    let collapsed = json.split_whitespace().collect::<Vec<_>>().join(" ");
    serde_json::from_str::<QaPair>(&collapsed).map_err(|e| {
        DocumindError::generation(format!("unparseable response ({}): {}", e, preview(response)))
    })
}

fn preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= 120 {
        trimmed.to_string()
    } else {
        let cut = trimmed
            .char_indices()
            .take_while(|(i, _)| *i < 120)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &trimmed[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_object() {
        let response = r#"{"question": "q", "context": "c", "answer": "a"}"#;
        let pair = parse_qa_response(response).unwrap();
        assert_eq!(pair.question, "q");
        assert_eq!(pair.answer, "a");
    }

    #[test]
    fn test_extract_object_wrapped_in_prose() {
        let response = r#"Here is the pair you asked for:
{"question": "What is GLUE?", "context": "[glue] benchmark", "answer": "A benchmark. Source: glue"}
Let me know if you want another."#;
        let pair = parse_qa_response(response).unwrap();
        assert_eq!(pair.question, "What is GLUE?");
    }

    #[test]
    fn test_braces_inside_strings_do_not_confuse_extraction() {
        let response = r#"{"question": "what does {x} mean?", "context": "c", "answer": "a"}"#;
        let pair = parse_qa_response(response).unwrap();
        assert_eq!(pair.question, "what does {x} mean?");
    }

    #[test]
    fn test_fallback_parses_embedded_newlines() {
        // Raw newlines inside string values are invalid JSON; the
        // whitespace-collapse fallback has to recover this response.
        let response = "{\"question\": \"What is\nSQuAD?\",\n \"context\": \"[squad]\na corpus\", \"answer\": \"A reading\ncomprehension corpus. Source: squad\"}";
        let pair = parse_qa_response(response).unwrap();
        assert_eq!(pair.question, "What is SQuAD?");
        assert_eq!(pair.answer, "A reading comprehension corpus. Source: squad");
    }

    #[test]
    fn test_response_without_json_fails() {
        let err = parse_qa_response("I cannot answer that.").unwrap_err();
        assert!(matches!(err, DocumindError::Generation { .. }));
    }

    #[test]
    fn test_unbalanced_object_fails() {
        let err = parse_qa_response(r#"{"question": "q""#).unwrap_err();
        assert!(matches!(err, DocumindError::Generation { .. }));
    }
}
