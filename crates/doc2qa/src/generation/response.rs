//! Extraction of Q&A pairs from raw model completions
//!
//! Models routinely wrap the requested JSON in prose or code fences even when
//! told not to. Parsing is two stages: cut the text down to the outermost
//! `[...]` span, then parse that span as a JSON array. Anything that fails
//! either stage is a `MalformedResponse`; individual bad elements are dropped
//! or repaired instead.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{QaDataset, QaPair};

/// Slice from the first `[` to the last `]`, inclusive
pub fn extract_json_array(raw: &str) -> Result<&str> {
    let start = raw
        .find('[')
        .ok_or_else(|| Error::malformed("no opening '[' in response"))?;
    let end = raw
        .rfind(']')
        .ok_or_else(|| Error::malformed("no closing ']' in response"))?;

    if end < start {
        return Err(Error::malformed("closing ']' appears before opening '['"));
    }

    Ok(&raw[start..=end])
}

/// Parse a raw completion into an ordered dataset
pub fn parse_response(raw: &str) -> Result<QaDataset> {
    let json = extract_json_array(raw)?;

    let elements: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| Error::malformed(format!("invalid JSON array: {}", e)))?;

    let total = elements.len();
    let pairs: QaDataset = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| pair_from_value(index, element))
        .collect();

    if pairs.len() < total {
        tracing::warn!("Dropped {} of {} response elements", total - pairs.len(), total);
    }

    Ok(pairs)
}

fn pair_from_value(index: usize, element: Value) -> Option<QaPair> {
    let Value::Object(mut object) = element else {
        tracing::warn!("Dropping element {}: not an object", index);
        return None;
    };

    let question = match object.remove("question") {
        Some(Value::String(q)) if !q.trim().is_empty() => q,
        _ => {
            tracing::warn!("Dropping element {}: missing or empty question", index);
            return None;
        }
    };

    let answer = match object.remove("answer") {
        Some(Value::String(a)) => a,
        _ => {
            tracing::debug!("Element {} has no string answer, defaulting to empty", index);
            String::new()
        }
    };

    Some(QaPair { question, answer })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_array_preserved_in_order() {
        let raw = r#"[{"question":"Q1","answer":"A1"},{"question":"Q2","answer":"A2"},{"question":"Q3","answer":""}]"#;
        let pairs = parse_response(raw).unwrap();
        assert_eq!(
            pairs,
            vec![QaPair::new("Q1", "A1"), QaPair::new("Q2", "A2"), QaPair::new("Q3", "")]
        );
    }

    #[test]
    fn test_prose_and_code_fences_tolerated() {
        let raw = "Here is the result:\n```json\n[{\"question\":\"Q\",\"answer\":\"A\"}]\n```";
        assert_eq!(parse_response(raw).unwrap(), vec![QaPair::new("Q", "A")]);
    }

    #[test]
    fn test_drop_and_default_rules() {
        let raw = r#"[{"answer":"A only"}, {"question":"Q only"}]"#;
        assert_eq!(parse_response(raw).unwrap(), vec![QaPair::new("Q only", "")]);
    }

    #[test]
    fn test_non_object_and_non_string_elements() {
        let raw = r#"[42, "text", {"question": 7, "answer": "A"}, {"question": "  "}, {"question": "Q", "answer": 3}]"#;
        assert_eq!(parse_response(raw).unwrap(), vec![QaPair::new("Q", "")]);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_response("No pairs found: []").unwrap().is_empty());
    }

    #[test]
    fn test_unparseable_responses() {
        for raw in [
            "I could not find any facts.",
            "] backwards [",
            "[{\"question\": \"Q\", \"answer\": \"A\"},]",
            "[{\"question\": \"Q\"} and [more]",
        ] {
            let err = parse_response(raw).unwrap_err();
            assert!(matches!(err, Error::MalformedResponse(_)), "{raw:?} should be malformed");
        }
    }

    #[test]
    fn test_extract_uses_outermost_brackets() {
        let raw = "see [1] below:\n[{\"question\":\"Q\",\"answer\":\"[A]\"}] done";
        assert_eq!(
            extract_json_array(raw).unwrap(),
            "[1] below:\n[{\"question\":\"Q\",\"answer\":\"[A]\"}]"
        );
        assert!(parse_response(raw).is_err());
    }
}
