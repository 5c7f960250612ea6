//! Which date the event is anchored to.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::form::ValidationError;
use crate::hebrew_month::HebrewMonth;

/// Day of a Hebrew month, 1-30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HebrewDay(u8);

impl HebrewDay {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 30;

    pub fn new(day: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&day).then_some(HebrewDay(day))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HebrewDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HebrewDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingHebrewDay);
        }
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(HebrewDay::new)
            .ok_or_else(|| ValidationError::InvalidHebrewDay(trimmed.to_string()))
    }
}

/// The two mutually exclusive ways of anchoring an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// A civil date. `after_sunset` moves it to the Hebrew day that
    /// starts on that evening.
    Gregorian { date: NaiveDate, after_sunset: bool },
    Hebrew { day: HebrewDay, month: HebrewMonth },
}

impl DateSource {
    pub fn is_hebrew(&self) -> bool {
        matches!(self, DateSource::Hebrew { .. })
    }

    /// Always false for Hebrew dates, which need no disambiguation.
    pub fn after_sunset(&self) -> bool {
        match self {
            DateSource::Gregorian { after_sunset, .. } => *after_sunset,
            DateSource::Hebrew { .. } => false,
        }
    }

    /// (year, month, day) for Gregorian dates.
    pub fn gregorian_parts(&self) -> Option<(i32, u32, u32)> {
        match self {
            DateSource::Gregorian { date, .. } => Some((date.year(), date.month(), date.day())),
            DateSource::Hebrew { .. } => None,
        }
    }

    /// (month, day) for Hebrew dates.
    pub fn hebrew_parts(&self) -> Option<(HebrewMonth, HebrewDay)> {
        match self {
            DateSource::Hebrew { day, month } => Some((*month, *day)),
            DateSource::Gregorian { .. } => None,
        }
    }
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSource::Gregorian {
                date,
                after_sunset: false,
            } => write!(f, "{}", date.format("%Y-%m-%d")),
            DateSource::Gregorian {
                date,
                after_sunset: true,
            } => write!(f, "{} (after sunset)", date.format("%Y-%m-%d")),
            DateSource::Hebrew { day, month } => write!(f, "{} {}", day, month),
        }
    }
}
