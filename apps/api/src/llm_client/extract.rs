//! Locates the JSON object embedded in free-form model output.
//!
//! Models often wrap the requested object in prose or markdown fences. Rather
//! than matching braces by hand (which breaks on `{`/`}` inside string
//! literals), each `{` is tried in order as the start of a value for
//! serde_json's incremental `StreamDeserializer`; the first offset that yields
//! a complete object wins and trailing text is ignored. An object that fails
//! to parse is skipped as a whole; a truncated one ends the search.

use serde_json::Value;

use super::LlmError;

pub fn extract_json_object(text: &str) -> Result<Value, LlmError> {
    let malformed = |reason: String| LlmError::MalformedJson {
        reason,
        raw: text.to_string(),
    };

    let mut first_error: Option<String> = None;
    let mut search_from = 0;

    while let Some(rel) = text[search_from..].find('{') {
        let offset = search_from + rel;
        let candidate = &text[offset..];
        let mut stream = serde_json::Deserializer::from_str(candidate).into_iter::<Value>();

        match stream.next() {
            Some(Ok(value @ Value::Object(_))) => return Ok(value),
            Some(Ok(_)) | None => search_from = offset + 1,
            // Everything after this `{` belongs to the truncated object.
            Some(Err(e)) if e.is_eof() => return Err(malformed(e.to_string())),
            // Skip the whole broken object so its nested objects are never picked.
            Some(Err(e)) => match object_end(candidate) {
                Some(end) => {
                    search_from = offset + end;
                    first_error.get_or_insert_with(|| e.to_string());
                }
                None => return Err(malformed(e.to_string())),
            },
        }
    }

    Err(malformed(
        first_error.unwrap_or_else(|| "no JSON object in text".to_string()),
    ))
}

/// Byte index just past the `}` closing the object that opens `text`, ignoring
/// braces inside string literals. `None` if the object never closes.
fn object_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_object_wrapped_in_prose_and_fences() {
        let text = "Here is your blueprint:\n```json\n{\"jobTitle\": \"Chef\"}\n```\nEnjoy!";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["jobTitle"], "Chef");
    }

    #[test]
    fn test_braces_inside_strings_do_not_confuse_the_scanner() {
        let text = r#"{"jobTitle": "Dev {backend}", "responsibilities": ["Write } and { carefully"]} trailing }"#;
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["jobTitle"], "Dev {backend}");
        assert_eq!(value["responsibilities"][0], "Write } and { carefully");
    }

    #[test]
    fn test_nested_objects_are_kept_whole() {
        let text = r#"{"a": {"b": {"c": 1}}, "d": 2}"#;
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["a"]["b"]["c"], 1);
        assert_eq!(value["d"], 2);
    }

    #[test]
    fn test_skips_stray_brace_before_real_object() {
        let text = r#"Use {placeholders} like this: {"jobTitle": "Nurse"}"#;
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["jobTitle"], "Nurse");
    }

    #[test]
    fn test_no_brace_fails_with_raw_text() {
        let text = "I'm sorry, I can't help with that.";
        match extract_json_object(text).unwrap_err() {
            LlmError::MalformedJson { reason, raw } => {
                assert_eq!(raw, text);
                assert_eq!(reason, "no JSON object in text");
            }
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_object_with_nested_object_is_malformed() {
        let text = r#"{"jobTitle":"X","details":{"level":"senior"},"responsibilities":["a""#;
        match extract_json_object(text).unwrap_err() {
            LlmError::MalformedJson { raw, .. } => assert_eq!(raw, text),
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_object_does_not_yield_its_inner_object() {
        let text = r#"{"jobTitle": Chef, "details": {"level": "senior"}} and nothing else"#;
        assert!(matches!(
            extract_json_object(text),
            Err(LlmError::MalformedJson { .. })
        ));
    }

    #[test]
    fn test_scanning_resumes_after_invalid_object_on_later_line() {
        let text = "Notes: {not json}\nThé answer: {\"jobTitle\": \"Nurse\"}";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["jobTitle"], "Nurse");
    }

    #[test]
    fn test_object_end_ignores_braces_in_strings() {
        assert_eq!(object_end("{abc} tail"), Some(5));
        assert_eq!(object_end(r#"{"a": "}\"{", "b": {}} x"#), Some(22));
        assert_eq!(object_end(r#"{"a": {"b": 1}"#), None);
    }

    #[test]
    fn test_truncated_object_fails_with_parse_reason() {
        let text = r#"{"jobTitle": "Pilot", "responsibilities": ["Fly"#;
        match extract_json_object(text).unwrap_err() {
            LlmError::MalformedJson { reason, raw } => {
                assert_eq!(raw, text);
                assert_ne!(reason, "no JSON object in text");
            }
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }
}
