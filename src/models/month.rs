//! Calendar month keys
//!
//! Every record in the tracker is grouped under a calendar month. The key
//! serializes as "YYYY-MM" so stored documents stay readable and sortable.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month key (e.g., "2025-01")
///
/// Fields are private so a constructed key always holds a month in 1-12.
/// Derived ordering (year, then month) is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, rejecting months outside 1-12 and years the
    /// "YYYY-MM" form cannot hold
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(0..=9999).contains(&year) {
            return Err(MonthParseError::InvalidYear(year));
        }
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Get the month key for today's date
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    /// Get the month key containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Get the year component
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Get the month component (1-12)
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Get the first day of this month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("a month key holds a year and month chrono can represent")
    }

    /// Get the last day of this month
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// Get the next month, rolling December into January
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous month, rolling January into December
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a month key string ("YYYY-MM")
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();

        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(MonthParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = parts[0]
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Error type for month key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            MonthParseError::InvalidYear(y) => write!(f, "Invalid year: {}", y),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month_num: u32) -> MonthKey {
        MonthKey::new(year, month_num).unwrap()
    }

    #[test]
    fn test_first_and_last_day() {
        let jan = month(2025, 1);
        assert_eq!(jan.first_day(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(jan.last_day(), NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());

        let feb = month(2025, 2);
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

        // Leap year
        let feb_leap = month(2024, 2);
        assert_eq!(
            feb_leap.last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_navigation() {
        let jan = month(2025, 1);
        assert_eq!(jan.next(), month(2025, 2));
        assert_eq!(jan.prev(), month(2024, 12));

        let dec = month(2024, 12);
        assert_eq!(dec.next(), month(2025, 1));
    }

    #[test]
    fn test_contains() {
        let jan = month(2025, 1);
        assert!(jan.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(jan.contains(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
    }

    #[test]
    fn test_parse() {
        assert_eq!(MonthKey::parse("2025-01").unwrap(), month(2025, 1));
        assert_eq!(MonthKey::parse(" 2025-12 ").unwrap(), month(2025, 12));
    }

    #[test]
    fn test_parse_rejects_invalid_month() {
        assert_eq!(
            MonthKey::parse("2025-13"),
            Err(MonthParseError::InvalidMonth(13))
        );
        assert_eq!(
            MonthKey::parse("2025-00"),
            Err(MonthParseError::InvalidMonth(0))
        );
    }

    #[test]
    fn test_rejects_out_of_range_year() {
        assert_eq!(
            MonthKey::new(10000, 1),
            Err(MonthParseError::InvalidYear(10000))
        );
        assert_eq!(MonthKey::new(-1, 1), Err(MonthParseError::InvalidYear(-1)));
        assert_eq!(
            MonthKey::parse("999999-01"),
            Err(MonthParseError::InvalidYear(999999))
        );
    }

    #[test]
    fn test_first_day_at_year_bounds() {
        assert_eq!(
            month(0, 1).first_day(),
            NaiveDate::from_ymd_opt(0, 1, 1).unwrap()
        );
        assert_eq!(
            month(9999, 12).last_day(),
            NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_invalid_format() {
        assert!(MonthKey::parse("2025").is_err());
        assert!(MonthKey::parse("2025-01-15").is_err());
        assert!(MonthKey::parse("january").is_err());
        assert!(MonthKey::parse("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", month(2025, 1)), "2025-01");
        assert_eq!(format!("{}", month(987, 11)), "0987-11");
    }

    #[test]
    fn test_ordering() {
        assert!(month(2024, 12) < month(2025, 1));
        assert!(month(2025, 3) < month(2025, 4));
    }

    #[test]
    fn test_containing() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 19).unwrap();
        assert_eq!(MonthKey::containing(date), month(2025, 7));
    }

    #[test]
    fn test_serialization() {
        let key = month(2025, 3);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2025-03\"");

        let deserialized: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, deserialized);
    }

    #[test]
    fn test_deserialize_rejects_bad_key() {
        assert!(serde_json::from_str::<MonthKey>("\"2025-13\"").is_err());
        assert!(serde_json::from_str::<MonthKey>("\"next month\"").is_err());
    }
}
