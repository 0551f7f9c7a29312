use crate::error::EntryError;

use core::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

/// The calendar unit a [`TimeOffset`] is expressed in.
///
/// Every unit maps to a fixed number of seconds. `Week` is always seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeUnit {
  Second,
  Minute,
  Hour,
  Day,
  Week,
}

impl TimeUnit {
  /// Length of one unit in seconds.
  pub const fn seconds(self) -> i64 {
    match self {
      TimeUnit::Second => 1,
      TimeUnit::Minute => 60,
      TimeUnit::Hour => 60 * 60,
      TimeUnit::Day => 24 * 60 * 60,
      TimeUnit::Week => 7 * 24 * 60 * 60,
    }
  }

  fn suffix(self) -> &'static str {
    match self {
      TimeUnit::Second => "s",
      TimeUnit::Minute => "m",
      TimeUnit::Hour => "h",
      TimeUnit::Day => "d",
      TimeUnit::Week => "w",
    }
  }

  fn parse_suffix(raw: &str) -> Option<Self> {
    let unit = match raw.to_ascii_lowercase().as_str() {
      "s" | "sec" | "secs" | "second" | "seconds" => TimeUnit::Second,
      "m" | "min" | "mins" | "minute" | "minutes" => TimeUnit::Minute,
      "h" | "hr" | "hrs" | "hour" | "hours" => TimeUnit::Hour,
      "d" | "day" | "days" => TimeUnit::Day,
      "w" | "week" | "weeks" => TimeUnit::Week,
      _ => return None,
    };
    Some(unit)
  }
}

/// An amount of [`TimeUnit`]s added to a creation timestamp to compute when
/// a [`TimeWindow`](crate::policy::window::TimeWindow) expires.
///
/// The amount may be zero or negative, which yields a window that is already
/// expired when armed.
///
/// Offsets can be read from configuration text:
///
/// ```
/// use fibre_cell::{TimeOffset, TimeUnit};
///
/// let offset: TimeOffset = "5 minutes".parse().unwrap();
/// assert_eq!(offset, TimeOffset::new(5, TimeUnit::Minute));
/// assert_eq!(offset.to_string(), "5m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOffset {
  pub amount: i64,
  pub unit: TimeUnit,
}

impl TimeOffset {
  pub const fn new(amount: i64, unit: TimeUnit) -> Self {
    Self { amount, unit }
  }

  pub const fn seconds(amount: i64) -> Self {
    Self::new(amount, TimeUnit::Second)
  }

  pub const fn minutes(amount: i64) -> Self {
    Self::new(amount, TimeUnit::Minute)
  }

  pub const fn hours(amount: i64) -> Self {
    Self::new(amount, TimeUnit::Hour)
  }

  pub const fn days(amount: i64) -> Self {
    Self::new(amount, TimeUnit::Day)
  }

  pub const fn weeks(amount: i64) -> Self {
    Self::new(amount, TimeUnit::Week)
  }

  /// The offset as a signed duration, or `None` if it does not fit.
  pub fn as_delta(&self) -> Option<TimeDelta> {
    self
      .amount
      .checked_mul(self.unit.seconds())
      .and_then(TimeDelta::try_seconds)
  }
}

impl fmt::Display for TimeOffset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.amount, self.unit.suffix())
  }
}

impl FromStr for TimeOffset {
  type Err = EntryError;

  /// Parses `"<amount><unit>"`, with optional whitespace between the two,
  /// e.g. `"30s"`, `"-2h"`, `"1 week"`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    let split = trimmed
      .char_indices()
      .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
      .map_or(trimmed.len(), |(i, _)| i);
    let (amount, unit) = trimmed.split_at(split);

    let amount = amount
      .parse::<i64>()
      .map_err(|_| EntryError::InvalidOffset(s.to_string()))?;
    let unit = TimeUnit::parse_suffix(unit.trim())
      .ok_or_else(|| EntryError::InvalidOffset(s.to_string()))?;

    Ok(Self::new(amount, unit))
  }
}
