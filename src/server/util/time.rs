use chrono::{NaiveDate, NaiveDateTime, Utc};

/// Current UTC time as stored in the database.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a date entered in a form, a date without a time means midnight.
pub fn parse_form_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
