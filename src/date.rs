use crate::error::Error;
use jiff::civil::Date;
use serde::de::{self, Deserialize, Deserializer};
use std::ops::Range;

/// Fixed-width, zero-padded date layout.
struct Layout {
    name: &'static str,
    separator: u8,
    separators: [usize; 2],
    day: Range<usize>,
    month: Range<usize>,
    year: Range<usize>,
}

const INPUT_LAYOUT: Layout = Layout {
    name: "DD/MM/YYYY",
    separator: b'/',
    separators: [2, 5],
    day: 0..2,
    month: 3..5,
    year: 6..10,
};

const REFERENCE_LAYOUT: Layout = Layout {
    name: "YYYY-MM-DD",
    separator: b'-',
    separators: [4, 7],
    day: 8..10,
    month: 5..7,
    year: 0..4,
};

impl Layout {
    fn parse(&self, text: &str) -> Result<Date, String> {
        let bytes = text.as_bytes();
        let shaped = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| {
                if self.separators.contains(&i) {
                    *b == self.separator
                } else {
                    b.is_ascii_digit()
                }
            });
        if !shaped {
            return Err(format!("expected {}", self.name));
        }

        let day = text[self.day.clone()]
            .parse::<i8>()
            .map_err(|e| e.to_string())?;
        let month = text[self.month.clone()]
            .parse::<i8>()
            .map_err(|e| e.to_string())?;
        let year = text[self.year.clone()]
            .parse::<i16>()
            .map_err(|e| e.to_string())?;

        Date::new(year, month, day).map_err(|e| e.to_string())
    }
}

/// Parse one trimmed input line in the exact `DD/MM/YYYY` form.
///
/// Leading zeros are mandatory and nothing may follow the year.
pub fn parse_input_date(line: &str) -> Result<Date, Error> {
    INPUT_LAYOUT.parse(line).map_err(|reason| Error::Parse {
        input: line.to_string(),
        reason,
    })
}

/// Format a date the way the rates service expects it (`YYYY-MM-DD`).
pub fn query_date(date: Date) -> String {
    date.strftime("%Y-%m-%d").to_string()
}

/// Decode the `referenceDate` string of a rate entry, which must be exactly `YYYY-MM-DD`.
pub fn deserialize_reference_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    REFERENCE_LAYOUT
        .parse(&raw)
        .map_err(|e| de::Error::custom(format!("invalid reference date {raw:?}: {e}")))
}
