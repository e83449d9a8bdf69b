//! Lenient JSON repair for model output.
//!
//! Generative models occasionally wrap their reply in markdown fences, add
//! prose around the object, or leave a trailing comma behind. This pass
//! tolerates those slips before the strict schema validation runs. If
//! nothing usable remains, the caller treats it as a failure.

use serde_json::Value;

/// Repair and parse near-valid JSON text. Returns `None` when no JSON value
/// can be recovered.
pub fn repair_json(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unfenced = strip_code_fences(trimmed);
    let sliced = slice_outer_json(unfenced)?;

    if let Ok(value) = serde_json::from_str(sliced) {
        return Some(value);
    }

    let rewritten = remove_trailing_commas(sliced);
    serde_json::from_str(&rewritten).ok()
}

/// Drop a surrounding markdown code fence (```json ... ```), if present.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip the info string on the opening fence line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Cut the substring from the first opening brace/bracket to its closing
/// counterpart at the end, discarding stray text around the JSON value.
fn slice_outer_json(text: &str) -> Option<&str> {
    let (open, close) = match (text.find('{'), text.find('[')) {
        (Some(obj), Some(arr)) if arr < obj => ('[', ']'),
        (None, Some(_)) => ('[', ']'),
        (Some(_), _) => ('{', '}'),
        (None, None) => return None,
    };
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Remove commas that directly precede a closing brace or bracket.
///
/// Works on a character level with a small string-literal state machine so
/// commas inside string values are left alone.
fn remove_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (index, c) in text.char_indices() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next_significant = text[index + 1..].chars().find(|c| !c.is_whitespace());
                if matches!(next_significant, Some('}') | Some(']')) {
                    // Trailing comma: drop it.
                    continue;
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}
