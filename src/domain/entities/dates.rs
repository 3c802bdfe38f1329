use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Literal the backend stores for an end date that has not happened yet.
pub const PRESENT: &str = "Present";

/// Format of the HTML `<input type="date">` value.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

const MONTH_YEAR_FORMAT: &str = "%B %Y";

/// A calendar date that travels over the wire as `"<LongMonthName> <Year>"`.
///
/// Only month and year survive serialization: `2021-03-15` is sent as
/// `"March 2021"` and comes back as `2021-03-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthYear(pub NaiveDate);

impl MonthYear {
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Parses `"March 2021"` (full or abbreviated month, any case) into the
    /// first day of that month. ISO dates are accepted as well.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(&format!("1 {raw}"), "%d %B %Y")
            .or_else(|_| NaiveDate::parse_from_str(raw, INPUT_DATE_FORMAT))
            .ok()
            .map(MonthYear)
    }

    /// Value suitable for a date input field.
    pub fn to_input_value(&self) -> String {
        self.0.format(INPUT_DATE_FORMAT).to_string()
    }

    pub fn same_month(&self, other: NaiveDate) -> bool {
        self.0.year() == other.year() && self.0.month() == other.month()
    }
}

impl From<NaiveDate> for MonthYear {
    fn from(date: NaiveDate) -> Self {
        MonthYear(date)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(MONTH_YEAR_FORMAT))
    }
}

impl Serialize for MonthYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MonthYear::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid month-year date: {raw:?}")))
    }
}

/// End of an education or experience period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDate {
    Ongoing,
    On(MonthYear),
}

impl EndDate {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case(PRESENT) {
            Some(EndDate::Ongoing)
        } else {
            MonthYear::parse(raw).map(EndDate::On)
        }
    }

    pub fn is_ongoing(&self) -> bool {
        matches!(self, EndDate::Ongoing)
    }

    pub fn to_input_value(&self) -> String {
        match self {
            EndDate::Ongoing => PRESENT.to_string(),
            EndDate::On(date) => date.to_input_value(),
        }
    }
}

impl From<NaiveDate> for EndDate {
    fn from(date: NaiveDate) -> Self {
        EndDate::On(MonthYear(date))
    }
}

impl fmt::Display for EndDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndDate::Ongoing => f.write_str(PRESENT),
            EndDate::On(date) => date.fmt(f),
        }
    }
}

impl Serialize for EndDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EndDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        EndDate::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid end date: {raw:?}")))
    }
}

/// Parses a date input value (`YYYY-MM-DD`).
pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), INPUT_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_year_serializes_long_month_name() {
        let json = serde_json::to_string(&MonthYear(ymd(2021, 3, 15))).unwrap();
        assert_eq!(json, "\"March 2021\"");
    }

    #[test]
    fn month_year_parses_back_into_same_month() {
        let parsed: MonthYear = serde_json::from_str("\"March 2021\"").unwrap();
        assert!(parsed.same_month(ymd(2021, 3, 15)));
        assert_eq!(parsed.date(), ymd(2021, 3, 1));
    }

    #[test]
    fn month_year_accepts_abbreviations_and_case() {
        assert_eq!(MonthYear::parse("sep 1999").map(|m| m.date()), Some(ymd(1999, 9, 1)));
        assert_eq!(MonthYear::parse("DECEMBER 2020").map(|m| m.date()), Some(ymd(2020, 12, 1)));
    }

    #[test]
    fn month_year_rejects_garbage() {
        assert!(MonthYear::parse("Smarch 2021").is_none());
        assert!(MonthYear::parse("").is_none());
        assert!(serde_json::from_str::<MonthYear>("\"2021\"").is_err());
    }

    #[test]
    fn present_passes_through_unchanged() {
        assert_eq!(serde_json::to_string(&EndDate::Ongoing).unwrap(), "\"Present\"");
        let parsed: EndDate = serde_json::from_str("\"Present\"").unwrap();
        assert!(parsed.is_ongoing());
    }

    #[test]
    fn end_date_on_a_date_uses_month_year() {
        let end = EndDate::from(ymd(2023, 6, 30));
        assert_eq!(end.to_string(), "June 2023");
        assert_eq!(end.to_input_value(), "2023-06-30");
        assert_eq!(EndDate::parse("June 2023"), Some(EndDate::On(MonthYear(ymd(2023, 6, 1)))));
    }
}
