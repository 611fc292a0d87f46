//! Per-line format transforms applied before highlighting.

use crate::config::TextType;
use memchr::memchr2_iter;
use serde_json::Value;
use std::borrow::Cow;

/// Transform one line according to the configured text type.
pub fn format_line(text_type: TextType, line: &str) -> Cow<'_, str> {
    match text_type {
        TextType::Plain => Cow::Borrowed(line),
        TextType::Json => indent_json_fragment(line),
    }
}

/// Re-indent the largest JSON object or array embedded in `line`.
///
/// Candidate fragments start at every `{` or `[` outside an already parsed
/// fragment; the longest one wins, the earliest on ties. Text before and after the
/// fragment is kept. Lines without a parseable fragment come back unchanged.
pub fn indent_json_fragment(line: &str) -> Cow<'_, str> {
    let mut best: Option<(usize, usize, Value)> = None;
    let mut resume = 0;
    for start in memchr2_iter(b'{', b'[', line.as_bytes()) {
        if start < resume {
            continue;
        }
        let Some((value, len)) = parse_fragment(&line[start..]) else {
            continue;
        };
        resume = start + len;
        if best.as_ref().map_or(true, |(_, best_len, _)| len > *best_len) {
            best = Some((start, len, value));
        }
    }

    let Some((start, len, value)) = best else {
        return Cow::Borrowed(line);
    };
    let end = start + len;

    match serde_json::to_string_pretty(&value) {
        Ok(pretty) => {
            let mut out = String::with_capacity(line.len() + pretty.len());
            out.push_str(&line[..start]);
            out.push_str(&pretty);
            out.push_str(&line[end..]);
            Cow::Owned(out)
        }
        Err(err) => {
            log::debug!("could not re-serialize JSON fragment: {}", err);
            Cow::Borrowed(line)
        }
    }
}

/// Parse one JSON value at the start of `text`, returning it with its byte length.
fn parse_fragment(text: &str) -> Option<(Value, usize)> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Some((value, stream.byte_offset())),
        _ => None,
    }
}
