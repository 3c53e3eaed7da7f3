use chrono::{DateTime, NaiveDateTime, Utc};

/// Timestamps without an offset, as produced by `datetime-local` inputs and
/// hand-typed slots
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const UTC_OUTPUT: &str = "%Y-%m-%dT%H:%M:%SZ";
const NAIVE_OUTPUT: &str = "%Y-%m-%dT%H:%M:%S";

/// Canonical form of a time slot.
///
/// - RFC 3339 with an offset becomes UTC `YYYY-MM-DDTHH:MM:SSZ`
/// - naive date-times gain seconds: `YYYY-MM-DDTHH:MM:SS`
/// - anything else (`"10am"`, `"Saturday"`) is only trimmed
pub fn normalize_slot(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.with_timezone(&Utc).format(UTC_OUTPUT).to_string();
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.format(NAIVE_OUTPUT).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_local_gains_seconds() {
        assert_eq!(normalize_slot("2024-06-01T09:00"), "2024-06-01T09:00:00");
        assert_eq!(normalize_slot("2024-06-01T09:00:00"), "2024-06-01T09:00:00");
        assert_eq!(normalize_slot("2024-06-01 09:00"), "2024-06-01T09:00:00");
    }

    #[test]
    fn test_offsets_converted_to_utc() {
        assert_eq!(
            normalize_slot("2024-06-01T14:30:00+05:30"),
            "2024-06-01T09:00:00Z"
        );
        assert_eq!(normalize_slot("2024-06-01T09:00:00Z"), "2024-06-01T09:00:00Z");
    }

    #[test]
    fn test_free_text_only_trimmed() {
        assert_eq!(normalize_slot("  10am "), "10am");
        assert_eq!(normalize_slot("Saturday morning"), "Saturday morning");
        assert_eq!(normalize_slot("2024-13-45T99:00"), "2024-13-45T99:00");
    }
}
