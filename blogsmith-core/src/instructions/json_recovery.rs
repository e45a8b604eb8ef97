//! JSON salvage for noisy model output
//!
//! Three stages, first success wins:
//! 1. parse the whole response
//! 2. parse the first `{...}` block (brace-balanced, then greedy)
//! 3. strip markdown code fences and repeat 1 and 2

use crate::llm::{LLMError, LLMResult};
use regex_utils::json::{CODE_FENCE, OBJECT_BLOCK};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Parse `raw` into `T`, recovering from surrounding prose and code fences
pub fn recover_json<T: DeserializeOwned>(raw: &str) -> LLMResult<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LLMError::parse("empty response"));
    }

    let first_error = match serde_json::from_str::<T>(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if let Some(value) = parse_embedded(trimmed) {
        debug!("Recovered JSON from embedded object");
        return Ok(value);
    }

    let unfenced = CODE_FENCE.replace_all(trimmed, "");
    let unfenced = unfenced.trim();
    if let Ok(value) = serde_json::from_str::<T>(unfenced) {
        debug!("Recovered JSON after stripping code fences");
        return Ok(value);
    }
    if let Some(value) = parse_embedded(unfenced) {
        debug!("Recovered JSON from fenced block");
        return Ok(value);
    }

    Err(LLMError::parse(format!("no valid JSON object in response: {first_error}")))
}

fn parse_embedded<T: DeserializeOwned>(text: &str) -> Option<T> {
    if let Some(block) = first_balanced_object(text) {
        if let Ok(value) = serde_json::from_str(block) {
            return Some(value);
        }
    }
    OBJECT_BLOCK
        .find(text)
        .and_then(|m| serde_json::from_str(m.as_str()).ok())
}

/// The first brace-balanced `{...}` slice; braces inside strings are ignored
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
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
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
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
    use serde_json::Value;

    #[test]
    fn test_direct_parse() {
        let v: Value = recover_json(r#"{"topic": "rust"}"#).unwrap();
        assert_eq!(v["topic"], "rust");
    }

    #[test]
    fn test_prose_around_object() {
        let raw = "Sure! Here is the JSON:\n{\"topic\": \"rust\", \"n\": {\"a\": 1}}\nLet me know {if} you need more.";
        let v: Value = recover_json(raw).unwrap();
        assert_eq!(v["topic"], "rust");
        assert_eq!(v["n"]["a"], 1);
    }

    #[test]
    fn test_code_fenced_object() {
        let raw = "```json\n{\"contentType\": \"guide\"}\n```";
        let v: Value = recover_json(raw).unwrap();
        assert_eq!(v["contentType"], "guide");
    }

    #[test]
    fn test_braces_inside_strings() {
        let raw = r#"noise {"text": "a } brace", "ok": true} trailing }"#;
        assert_eq!(first_balanced_object(raw), Some(r#"{"text": "a } brace", "ok": true}"#));
        let v: Value = recover_json(raw).unwrap();
        assert_eq!(v["ok"], true);
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let raw = r#"{"q": "say \"hi\" {"}"#;
        assert_eq!(first_balanced_object(raw), Some(raw));
    }

    #[test]
    fn test_unrecoverable() {
        assert!(recover_json::<Value>("").is_err());
        assert!(recover_json::<Value>("no json here").is_err());
        assert!(recover_json::<Value>("{\"unterminated\": ").is_err());
        let err = recover_json::<Value>("{ not: json }").unwrap_err();
        assert!(matches!(err, LLMError::ParseError { .. }));
    }

    #[test]
    fn test_typed_target() {
        #[derive(serde::Deserialize)]
        struct Small {
            n: u32,
        }
        let s: Small = recover_json("```\n{\"n\": 7}\n```").unwrap();
        assert_eq!(s.n, 7);
    }
}
