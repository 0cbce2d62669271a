// Best-effort mapping of free-text model output onto TravelOption records.

use super::types::{PlanOutcome, TravelOption};
use serde_json::{Map, Value};
use tracing::debug;

const FIELDS: [&str; 3] = ["travel_mode", "estimated_cost", "duration"];

/// Decode `text` into travel options, or hand it back untouched.
pub fn decode(text: &str) -> PlanOutcome {
    match decode_options(text) {
        Some(options) => PlanOutcome::Options { options },
        None => PlanOutcome::Raw {
            text: text.to_string(),
        },
    }
}

/// `None` on any mismatch: no JSON, wrong shape, a missing field, or an empty list.
pub fn decode_options(text: &str) -> Option<Vec<TravelOption>> {
    let value: Value = match serde_json::from_str(extract_json(text)) {
        Ok(v) => v,
        Err(e) => {
            debug!("model output is not JSON: {e}");
            return None;
        }
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) if has_all_fields(&map) => vec![Value::Object(map)],
        Value::Object(map) => {
            let mut arrays = map.into_iter().filter_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            });
            match (arrays.next(), arrays.next()) {
                (Some(items), None) => items,
                _ => return None,
            }
        }
        _ => return None,
    };

    if items.is_empty() {
        return None;
    }

    let options = items
        .iter()
        .map(|item| item.as_object().and_then(to_option))
        .collect::<Option<Vec<_>>>();
    if options.is_none() {
        debug!("model JSON is missing expected fields");
    }
    options
}

fn has_all_fields(map: &Map<String, Value>) -> bool {
    FIELDS.iter().all(|f| map.contains_key(*f))
}

fn to_option(map: &Map<String, Value>) -> Option<TravelOption> {
    Some(TravelOption {
        travel_mode: scalar(map.get(FIELDS[0])?)?,
        estimated_cost: scalar(map.get(FIELDS[1])?)?,
        duration: scalar(map.get(FIELDS[2])?)?,
    })
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Extract JSON from a response that might be wrapped in markdown code fences.
///
/// Fenced blocks tagged `json` win, then any fenced block holding valid JSON,
/// then the outermost bracketed span.
fn extract_json(text: &str) -> &str {
    let parses = |s: &str| serde_json::from_str::<Value>(s).is_ok();

    if let Some((_, body)) =
        fenced_blocks(text).find(|&(tag, body)| tag.eq_ignore_ascii_case("json") && parses(body))
    {
        return body;
    }
    if let Some((_, body)) = fenced_blocks(text)
        .find(|&(_, body)| (body.starts_with('{') || body.starts_with('[')) && parses(body))
    {
        return body;
    }
    if let Some(start) = text.find(|c: char| c == '{' || c == '[') {
        let close = if text[start..].starts_with('[') { ']' } else { '}' };
        if let Some(end) = text.rfind(close)
            && end > start
        {
            return &text[start..=end];
        }
    }
    text
}

/// Every closed ```` ``` ```` block as `(info tag, trimmed body)`, in order.
fn fenced_blocks<'a>(text: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let open = rest.find("```")?;
        let after = &rest[open + 3..];
        let close = after.find("```")?;
        let block = &after[..close];
        rest = &after[close + 3..];

        let tag_len = block
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(block.len());
        Some((&block[..tag_len], block[tag_len..].trim()))
    })
}
