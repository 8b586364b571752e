use chrono::{NaiveDateTime, SecondsFormat, Utc};

use crate::error::TransformError;

/// Normalize an export timestamp to ISO-8601. Telegram desktop exports write
/// "2025-05-11 18:45:02"; values that already look ISO pass through, and an
/// absent timestamp becomes the current UTC time.
pub fn iso8601(ts: Option<&str>) -> Result<String, TransformError> {
    let Some(ts) = ts else {
        return Ok(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    };
    if ts.contains('T') {
        return Ok(ts.to_string());
    }
    let parsed = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| TransformError::MalformedTimestamp(ts.to_string()))?;
    Ok(format!("{}Z", parsed.format("%Y-%m-%dT%H:%M:%S")))
}

/// Unixtime fields in the export are strings. Unparseable values are dropped
/// rather than fatal; the ISO timestamp is the authoritative one.
pub fn to_unix_seconds(val: Option<&str>) -> Option<i64> {
    val?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_is_normalized() {
        assert_eq!(
            iso8601(Some("2025-05-11 18:45:02")).unwrap(),
            "2025-05-11T18:45:02Z"
        );
    }

    #[test]
    fn iso_input_passes_through() {
        assert_eq!(
            iso8601(Some("2025-05-11T18:45:02+02:00")).unwrap(),
            "2025-05-11T18:45:02+02:00"
        );
    }

    #[test]
    fn malformed_timestamp_is_a_transform_error() {
        assert!(matches!(
            iso8601(Some("yesterday")),
            Err(TransformError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn absent_timestamp_becomes_now() {
        let now = iso8601(None).unwrap();
        assert!(now.contains('T'));
        assert!(now.ends_with('Z'));
    }

    #[test]
    fn unixtime_strings_parse_leniently() {
        assert_eq!(to_unix_seconds(Some("1747075502")), Some(1747075502));
        assert_eq!(to_unix_seconds(Some("soon")), None);
        assert_eq!(to_unix_seconds(None), None);
    }
}
