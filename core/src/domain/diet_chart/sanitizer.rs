use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, error};

use crate::domain::common::entities::app_errors::CoreError;

const FENCE: &str = "```";
const EXCERPT_RADIUS: usize = 60;

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("blank line pattern is valid"));

type Stage = fn(&str) -> String;

/// Structural clean-up stages, applied in order.
const STAGES: [Stage; 4] = [
    trim,
    unwrap_fenced_block,
    collapse_blank_lines,
    strip_parentheticals,
];

/// Remove formatting noise from raw model output.
///
/// Every stage either leaves the text untouched or shortens it, so the stage sequence is
/// repeated until nothing changes. The result is a fixed point, which makes this idempotent.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = STAGES.iter().fold(current.clone(), |text, stage| stage(&text));
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Sanitize and parse model output, with exactly one character-level repair attempt.
pub fn parse_llm_json(raw: &str) -> Result<Value, CoreError> {
    let cleaned = sanitize(raw);

    let first_error = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let repaired = strip_control_chars(&cleaned);
    if repaired == cleaned {
        return Err(parse_failure(&cleaned, &first_error));
    }

    debug!(error = %first_error, "retrying parse without control characters");
    serde_json::from_str::<Value>(&repaired).map_err(|e| parse_failure(&repaired, &e))
}

fn trim(text: &str) -> String {
    text.trim().to_string()
}

/// Take the content of a fenced block. Needs an opening fence and at least one more fence,
/// so a lone stray fence never truncates anything.
fn unwrap_fenced_block(text: &str) -> String {
    if !text.starts_with(FENCE) || text.matches(FENCE).count() < 2 {
        return text.to_string();
    }

    let inner = text.split(FENCE).nth(1).unwrap_or_default();
    strip_language_tag(inner).trim().to_string()
}

/// "json\n{...}" -> "\n{...}". The tag must start with a letter and be followed by
/// whitespace or the start of a JSON document.
fn strip_language_tag(segment: &str) -> &str {
    if !segment.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return segment;
    }

    let tag_len = segment
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(segment.len());
    let rest = &segment[tag_len..];

    if rest.starts_with(|c: char| c.is_whitespace() || c == '{' || c == '[') {
        rest
    } else {
        segment
    }
}

fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n").into_owned()
}

/// "(a (b) c)" -> "a b c". Only matched pairs are dropped; a stray parenthesis stays.
fn strip_parentheticals(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut open = Vec::new();
    let mut matched = vec![false; chars.len()];

    for (i, c) in chars.iter().enumerate() {
        match c {
            '(' => open.push(i),
            ')' => {
                if let Some(start) = open.pop() {
                    matched[start] = true;
                    matched[i] = true;
                }
            }
            _ => {}
        }
    }

    chars
        .into_iter()
        .zip(matched)
        .filter_map(|(c, dropped)| (!dropped).then_some(c))
        .collect()
}

fn strip_control_chars(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

fn parse_failure(text: &str, err: &serde_json::Error) -> CoreError {
    let offset = char_offset(text, err.line(), err.column());
    let excerpt = excerpt_around(text, offset);

    error!(
        error = %err,
        offset,
        excerpt = %excerpt,
        "model response is not valid JSON"
    );

    CoreError::ParseFailure {
        message: err.to_string(),
        offset,
        excerpt,
    }
}

/// Convert serde_json's 1-based line/column into a character offset into `text`.
fn char_offset(text: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let line_start: usize = text
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let mut byte = (line_start + column.saturating_sub(1)).min(text.len());
    while !text.is_char_boundary(byte) {
        byte -= 1;
    }

    text[..byte].chars().count()
}

fn excerpt_around(text: &str, offset: usize) -> String {
    let start = offset.saturating_sub(EXCERPT_RADIUS);
    text.chars().skip(start).take(EXCERPT_RADIUS * 2).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_fenced_json_yields_inner_payload_exactly() {
        assert_eq!(sanitize("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(sanitize("  ```\n{\"a\":1}\n```  "), "{\"a\":1}");
        assert_eq!(sanitize("```JSON {\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_single_stray_fence_does_not_truncate() {
        let raw = "```{\"a\":1}";
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn test_fence_not_at_start_is_left_alone() {
        let raw = "{\"note\":\"use ``` for code\", \"b\": \"```\"}";
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn test_blank_lines_collapse() {
        assert_eq!(sanitize("{\n\n\n\"a\": 1\n\n}"), "{\n\"a\": 1\n}");
    }

    #[test]
    fn test_parentheticals_are_unwrapped_including_nested() {
        assert_eq!(
            sanitize("{\"items\": [\"Dal (lentils)\", \"Almonds ((4-5))\"]}"),
            "{\"items\": [\"Dal lentils\", \"Almonds 4-5\"]}"
        );
        assert_eq!(sanitize("a (b (c) d) e"), "a b c d e");
    }

    #[test]
    fn test_unmatched_parenthesis_is_kept() {
        assert_eq!(sanitize("{\"a\": \"smiley :)\"}"), "{\"a\": \"smiley :)\"}");
        assert_eq!(strip_parentheticals(") a (b (c"), ") a (b c");
    }

    #[test]
    fn test_deep_nesting_is_stripped_in_one_pass() {
        let depth = 5_000;
        let nested = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(strip_parentheticals(&nested), "x");

        let noisy = "{\n\n\n\n\"a\": \"((b))\"\n\n}";
        let once = STAGES.iter().fold(noisy.to_string(), |text, stage| stage(&text));
        assert_eq!(once, "{\n\"a\": \"b\"\n}");
        assert_eq!(sanitize(noisy), once);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "```",
            "``````",
            "```json```",
            "```json\n{\"a\":1}\n```\ntrailing prose",
            "``(`)``(`)",
            "((((x))))",
            "\n\n\n\n",
            "```python\nprint(1)\n```",
            "Here is your plan:\n```json\n{\"a\": \"(b)\"}\n```",
            "{\"a\":\u{0007}1}",
        ];

        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_parse_recovers_from_control_characters() {
        let raw = "```json\n{\"note\": \"line one\u{0001}\tline two\"}\n```";
        let value = parse_llm_json(raw).expect("control characters should be repaired");
        assert_eq!(value, json!({ "note": "line oneline two" }));
    }

    #[test]
    fn test_parse_failure_reports_offset_and_excerpt() {
        let raw = "{\"weeklyPlan\": [ {\"day\": 1,, } ]}";
        let err = parse_llm_json(raw).expect_err("malformed JSON must fail");

        match err {
            CoreError::ParseFailure {
                offset, excerpt, ..
            } => {
                // the second comma sits at char 27
                assert!((26..=28).contains(&offset), "offset {offset}");
                assert!(excerpt.contains("\"day\": 1,,"));
            }
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_failure_on_prose() {
        let err = parse_llm_json("I'm sorry, I can't help with that.").expect_err("prose");
        assert_eq!(err.code(), "parse_failure");
    }

    #[test]
    fn test_char_offset_handles_multiline_and_multibyte() {
        let text = "{\n\"é\": x}";
        // line 2, column 7 (byte-based) points at `x`
        assert_eq!(char_offset(text, 2, 7), 7);
        assert_eq!(char_offset(text, 0, 0), 0);
    }
}
