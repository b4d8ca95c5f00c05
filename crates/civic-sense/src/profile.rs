//! Player profile and the age → level rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// The four civic attributes. Missing fields read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CivicScores {
    pub hygiene: i32,
    pub empathy: i32,
    pub discipline: i32,
    pub environment: i32,
}

impl CivicScores {
    pub const CATEGORIES: [&'static str; 4] = ["hygiene", "empathy", "discipline", "environment"];

    pub fn get(&self, category: &str) -> Option<i32> {
        match category {
            "hygiene" => Some(self.hygiene),
            "empathy" => Some(self.empathy),
            "discipline" => Some(self.discipline),
            "environment" => Some(self.environment),
            _ => None,
        }
    }
}

/// A player as served by `GET /user/{id}`.
///
/// Owned by the host and replaced wholesale after every backend round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default = "first_level")]
    pub current_level: u32,
    #[serde(default)]
    pub civic_scores: CivicScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
}

fn first_level() -> u32 {
    1
}

/// A calendar day, as used for dates of birth (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl FromStr for CalendarDate {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiError::InvalidDob(s.to_string());
        let mut parts = s.trim().split('-');
        let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if y.len() != 4 || m.len() != 2 || d.len() != 2 {
            return Err(invalid());
        }
        let year = y.parse().map_err(|_| invalid())?;
        let month = m.parse().map_err(|_| invalid())?;
        let day = d.parse().map_err(|_| invalid())?;
        CalendarDate::new(year, month, day).ok_or_else(invalid)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Whole years between `dob` and `today`. A birthday not yet reached this
/// year does not count. Dates of birth in the future give 0.
pub fn age_on(dob: CalendarDate, today: CalendarDate) -> u32 {
    let mut years = today.year - dob.year;
    if (today.month, today.day) < (dob.month, dob.day) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Mission level for an age: ≤3 → 1, 4–6 → 2, 7–8 → 3, 9–10 → 4, older → 5.
pub fn level_for_age(age: u32) -> u32 {
    match age {
        0..=3 => 1,
        4..=6 => 2,
        7..=8 => 3,
        9..=10 => 4,
        _ => 5,
    }
}

/// Level for a `YYYY-MM-DD` date of birth, evaluated on `today`.
pub fn level_for_dob(dob: &str, today: CalendarDate) -> Result<u32, ApiError> {
    let dob: CalendarDate = dob.parse()?;
    Ok(level_for_age(age_on(dob, today)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn level_bands() {
        let levels: Vec<u32> = (0..=12).map(level_for_age).collect();
        assert_eq!(levels, vec![1, 1, 1, 1, 2, 2, 2, 3, 3, 4, 4, 5, 5]);
    }

    #[test]
    fn birthday_not_yet_reached() {
        let dob = date("2018-10-19");
        assert_eq!(age_on(dob, date("2026-10-18")), 7);
        assert_eq!(age_on(dob, date("2026-10-19")), 8);
        assert_eq!(age_on(date("2030-01-01"), date("2026-10-18")), 0);
    }

    #[test]
    fn leap_day_birthdays() {
        let dob = date("2020-02-29");
        assert_eq!(age_on(dob, date("2025-02-28")), 4);
        assert_eq!(age_on(dob, date("2025-03-01")), 5);
    }

    #[test]
    fn invalid_dob_strings() {
        for bad in ["", "2020-13-01", "2021-02-29", "20-01-01", "2020/01/01", "2020-01-01-01", "abcd-ef-gh"] {
            assert!(
                matches!(bad.parse::<CalendarDate>(), Err(ApiError::InvalidDob(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn level_for_dob_end_to_end() {
        let today = date("2026-10-18");
        assert_eq!(level_for_dob("2021-05-01", today).unwrap(), 2);
        assert!(level_for_dob("not a date", today).is_err());
    }

    #[test]
    fn profile_missing_scores_read_as_zero() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"user_id":"u1","age":5,"current_level":2,"civic_scores":{"hygiene":10}}"#)
                .unwrap();
        assert_eq!(profile.civic_scores.hygiene, 10);
        assert_eq!(profile.civic_scores.empathy, 0);
        assert_eq!(profile.civic_scores.get("discipline"), Some(0));
        assert_eq!(profile.civic_scores.get("kindness"), None);
    }

    #[test]
    fn date_display_round_trips_format() {
        assert_eq!(date("2019-03-07").to_string(), "2019-03-07");
    }
}
