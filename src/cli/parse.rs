use serde_json::Value;

/// Parse a `key=value` attribute.
///
/// The value is read as JSON when it parses (`42`, `true`, `{"a":1}`) and
/// kept as a plain string otherwise.
pub fn parse_attr(s: &str) -> std::result::Result<(String, Value), String> {
    let Some((key, raw)) = s.split_once('=') else {
        return Err(format!("expected KEY=VALUE, got '{}'", s));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("attribute name missing in '{}'", s));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Parse one participant's comma-separated slot list. Blank entries are
/// skipped, so `""` is a participant with no slots.
pub fn parse_slot_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|slot| !slot.is_empty())
        .map(str::to_string)
        .collect()
}
