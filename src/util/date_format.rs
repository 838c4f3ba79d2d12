use chrono::{DateTime, SecondsFormat, Utc};

/// Formats a timestamp the way the storefront API does: UTC, ISO-8601 with
/// millisecond precision and a `Z` suffix.
pub fn to_iso_millis(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_iso(input: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(input).map(|dt| dt.with_timezone(&Utc))
}

/// Serde adapter for `DateTime<Utc>` fields using the API's timestamp format.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_iso_millis(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        super::parse_iso(&value).map_err(serde::de::Error::custom)
    }
}

/// Same adapter for optional fields.
pub mod iso_millis_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&super::to_iso_millis(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) if !value.is_empty() => super::parse_iso(&value)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_timestamps_with_milliseconds() {
        let dt = parse_iso("2024-12-31T23:59:59.000Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn formats_with_millisecond_precision() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(to_iso_millis(&dt), "2024-12-31T23:59:59.000Z");
    }

    #[test]
    fn format_parse_round_trip() {
        let dt = parse_iso("2025-03-06T16:00:00.500Z").unwrap();
        assert_eq!(parse_iso(&to_iso_millis(&dt)).unwrap(), dt);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_iso("next thursday").is_err());
    }
}
