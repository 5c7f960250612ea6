//! Raw form state and validation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::date_source::{DateSource, HebrewDay};
use crate::hebrew_month::HebrewMonth;
use crate::location::DEFAULT_LOCATION;
use crate::request::EventRequest;

/// Month preselected for Hebrew input.
pub const DEFAULT_HEBREW_MONTH: HebrewMonth = HebrewMonth::Adar;

/// Reasons a form cannot be submitted. None of these involve the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please choose a Gregorian date")]
    MissingGregorianDate,

    #[error("Please enter a Hebrew day")]
    MissingHebrewDay,

    #[error("Hebrew day must be a number between 1 and 30, got \"{0}\"")]
    InvalidHebrewDay(String),

    #[error("Please enter an event title")]
    MissingTitle,
}

/// Everything the user has entered so far, possibly incomplete.
///
/// Both date branches are kept so that switching `is_hebrew` back and
/// forth does not lose input; only the active one is validated and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventForm {
    pub is_hebrew: bool,
    pub gregorian_date: Option<NaiveDate>,
    pub after_sunset: bool,
    /// Kept as typed; parsed during validation.
    pub hebrew_day: Option<String>,
    pub hebrew_month: HebrewMonth,
    pub location: String,
    pub title: String,
    pub create_sunset_event: bool,
}

impl Default for EventForm {
    fn default() -> Self {
        EventForm {
            is_hebrew: false,
            gregorian_date: None,
            after_sunset: false,
            hebrew_day: None,
            hebrew_month: DEFAULT_HEBREW_MONTH,
            location: DEFAULT_LOCATION.to_string(),
            title: String::new(),
            create_sunset_event: true,
        }
    }
}

impl EventForm {
    /// The date of the active branch, if it is complete and valid.
    pub fn date_source(&self) -> Result<DateSource, ValidationError> {
        if self.is_hebrew {
            let raw = self
                .hebrew_day
                .as_deref()
                .ok_or(ValidationError::MissingHebrewDay)?;
            let day: HebrewDay = raw.parse()?;
            Ok(DateSource::Hebrew {
                day,
                month: self.hebrew_month,
            })
        } else {
            let date = self
                .gregorian_date
                .ok_or(ValidationError::MissingGregorianDate)?;
            Ok(DateSource::Gregorian {
                date,
                after_sunset: self.after_sunset,
            })
        }
    }

    /// Checks the required fields of the active mode, then the title.
    pub fn validate(&self) -> Result<EventRequest, ValidationError> {
        let date = self.date_source()?;
        EventRequest::new(
            date,
            self.location.clone(),
            self.title.clone(),
            self.create_sunset_event,
        )
    }
}
