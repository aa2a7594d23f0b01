use chrono::Utc;

/// Current UTC time as an RFC 3339 string, used to stamp error log entries.
pub fn get_utc_iso_datetime() -> String {
    return Utc::now().to_rfc3339();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_timestamp_is_rfc3339() {
        let timestamp = get_utc_iso_datetime();
        assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
    }
}
