// Pull a JSON document out of free-form model output

use super::gateway::GatewayError;
use nom::{
    bytes::complete::{tag, tag_no_case, take_until},
    character::complete::{line_ending, space0},
    combinator::opt,
    sequence::{delimited, tuple},
    IResult,
};
use serde_json::Value;

/// Body of the first Markdown code fence, with an optional `json` info string.
fn fenced_block(input: &str) -> IResult<&str, &str> {
    let (input, _) = take_until("```")(input)?;
    delimited(
        tuple((tag("```"), opt(tag_no_case("json")), space0, opt(line_ending))),
        take_until("```"),
        tag("```"),
    )(input)
}

/// Outermost `{ ... }` span: first opening brace to last closing brace
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse model output as JSON.
///
/// Tries the fenced block (if any) as a whole, then its outermost brace span.
pub fn extract_json(text: &str) -> Result<Value, GatewayError> {
    let candidate = match fenced_block(text) {
        Ok((_, body)) => body,
        Err(_) => text,
    };

    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(value) => Ok(value),
        Err(err) => brace_span(candidate)
            .and_then(|span| serde_json::from_str(span).ok())
            .ok_or_else(|| GatewayError::Unparseable(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        assert_eq!(extract_json(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_json_fence() {
        let text = "Here you go:\n```json\n{\"a\": [1, 2]}\n```\nThanks";
        assert_eq!(extract_json(text).unwrap(), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_bare_fence() {
        let text = "```\n{\"ok\": true}\n```";
        assert_eq!(extract_json(text).unwrap(), json!({"ok": true}));
    }

    #[test]
    fn test_prose_around_object() {
        let text = "Analysis follows {\"x\": {\"y\": 2}} hope this helps";
        assert_eq!(extract_json(text).unwrap(), json!({"x": {"y": 2}}));
    }

    #[test]
    fn test_unparseable() {
        let result = extract_json("no json here");
        assert!(matches!(result, Err(GatewayError::Unparseable(_))));
        assert!(extract_json("} backwards {").is_err());
    }

    #[test]
    fn test_fenced_block_parser() {
        let (rest, body) = fenced_block("pre ```JSON  \r\n[1]``` post").unwrap();
        assert_eq!(body, "[1]");
        assert_eq!(rest, " post");
    }
}
