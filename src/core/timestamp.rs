use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d{4}-\d{2}-\d{2})[T ])?(\d{1,2}):(\d{2}):(\d{2})(?:\.(\d{1,9}))?$").unwrap()
});

/// A parsed event instant that remembers how it was written.
///
/// Time-only values (`HH:MM:SS`) are anchored to a caller-supplied base date
/// so the same input always yields the same instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    instant: NaiveDateTime,
    text: String,
    precision: u8,
}

impl Timestamp {
    pub fn parse(text: &str, base_date: NaiveDate) -> Option<Self> {
        let text = text.trim();
        let cap = RE_TIMESTAMP.captures(text)?;

        let date = match cap.get(1) {
            Some(m) => NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok()?,
            None => base_date,
        };
        let hours = cap.get(2)?.as_str().parse::<u32>().ok()?;
        let minutes = cap.get(3)?.as_str().parse::<u32>().ok()?;
        let seconds = cap.get(4)?.as_str().parse::<u32>().ok()?;

        let (nanos, precision) = match cap.get(5) {
            Some(m) => {
                let digits = m.as_str();
                let padded = format!("{digits:0<9}");
                (padded.parse::<u32>().ok()?, digits.len() as u8)
            }
            None => (0, 0),
        };

        let time = NaiveTime::from_hms_nano_opt(hours, minutes, seconds, nanos)?;

        Some(Self {
            instant: date.and_time(time),
            text: text.to_string(),
            precision,
        })
    }

    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of fractional-second digits present in the input.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn elapsed_since(&self, earlier: &Timestamp) -> TimeDelta {
        self.instant - earlier.instant
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
