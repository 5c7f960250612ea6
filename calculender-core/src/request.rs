//! A validated event request and its wire form.

use serde::{Deserialize, Serialize};

use crate::date_source::DateSource;
use crate::form::ValidationError;

/// File name used when the title cannot provide one.
pub const FALLBACK_FILE_STEM: &str = "calendar-events";

/// A complete, validated request for a calendar file or feed.
///
/// Built by [`crate::form::EventForm::validate`] or [`EventRequest::new`];
/// the title is guaranteed to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRequest {
    date: DateSource,
    location: String,
    title: String,
    create_sunset_event: bool,
}

/// JSON body of `POST /api/generate-ics`.
///
/// Exactly one of the Gregorian triple and the Hebrew pair is populated;
/// the other is sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub is_hebrew: bool,
    pub greg_year: Option<i32>,
    pub greg_month: Option<u32>,
    pub greg_day: Option<u32>,
    pub after_sunset: bool,
    pub heb_month: Option<u8>,
    pub heb_day: Option<u8>,
    pub location: String,
    pub title: String,
    pub create_sunset_event: bool,
}

impl EventRequest {
    pub fn new(
        date: DateSource,
        location: impl Into<String>,
        title: impl Into<String>,
        create_sunset_event: bool,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        Ok(EventRequest {
            date,
            location: location.into(),
            title,
            create_sunset_event,
        })
    }

    pub fn date(&self) -> &DateSource {
        &self.date
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn create_sunset_event(&self) -> bool {
        self.create_sunset_event
    }

    pub fn payload(&self) -> EventPayload {
        let greg = self.date.gregorian_parts();
        let heb = self.date.hebrew_parts();

        EventPayload {
            is_hebrew: self.date.is_hebrew(),
            greg_year: greg.map(|(y, _, _)| y),
            greg_month: greg.map(|(_, m, _)| m),
            greg_day: greg.map(|(_, _, d)| d),
            after_sunset: self.date.after_sunset(),
            heb_month: heb.map(|(m, _)| m.code()),
            heb_day: heb.map(|(_, d)| d.get()),
            location: self.location.clone(),
            title: self.title.clone(),
            create_sunset_event: self.create_sunset_event,
        }
    }

    pub fn download_filename(&self) -> String {
        download_filename_for(&self.title)
    }
}

/// `"{title}.ics"`, with path separators replaced so the result stays a
/// single path component. Blank titles fall back to `calendar-events.ics`.
pub fn download_filename_for(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '-',
            c => c,
        })
        .collect();

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        format!("{FALLBACK_FILE_STEM}.ics")
    } else {
        format!("{stem}.ics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_source::HebrewDay;
    use crate::hebrew_month::HebrewMonth;
    use chrono::NaiveDate;

    fn gregorian(after_sunset: bool) -> DateSource {
        DateSource::Gregorian {
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            after_sunset,
        }
    }

    #[test]
    fn new_rejects_blank_title() {
        assert_eq!(
            EventRequest::new(gregorian(false), "Jerusalem", "  ", true),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn gregorian_payload_nulls_hebrew_fields() {
        let req = EventRequest::new(gregorian(true), "Haifa", "Birthday", false).unwrap();
        let payload = req.payload();

        assert!(!payload.is_hebrew);
        assert_eq!(payload.greg_year, Some(2024));
        assert_eq!(payload.greg_month, Some(5));
        assert_eq!(payload.greg_day, Some(10));
        assert!(payload.after_sunset);
        assert_eq!(payload.heb_month, None);
        assert_eq!(payload.heb_day, None);
        assert_eq!(payload.location, "Haifa");
        assert_eq!(payload.title, "Birthday");
        assert!(!payload.create_sunset_event);
    }

    #[test]
    fn hebrew_payload_nulls_gregorian_fields() {
        let date = DateSource::Hebrew {
            day: HebrewDay::new(15).unwrap(),
            month: HebrewMonth::Tishrei,
        };
        let req = EventRequest::new(date, "Jerusalem", "Sukkot", true).unwrap();
        let payload = req.payload();

        assert!(payload.is_hebrew);
        assert_eq!(payload.heb_day, Some(15));
        assert_eq!(payload.heb_month, Some(7));
        assert_eq!(payload.greg_year, None);
        assert_eq!(payload.greg_month, None);
        assert_eq!(payload.greg_day, None);
        assert!(!payload.after_sunset);
    }

    #[test]
    fn payload_json_shape() {
        let req = EventRequest::new(gregorian(false), "Jerusalem", "Test", true).unwrap();
        let json = serde_json::to_value(req.payload()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "is_hebrew": false,
                "greg_year": 2024,
                "greg_month": 5,
                "greg_day": 10,
                "after_sunset": false,
                "heb_month": null,
                "heb_day": null,
                "location": "Jerusalem",
                "title": "Test",
                "create_sunset_event": true,
            })
        );
    }

    #[test]
    fn filename_from_title() {
        assert_eq!(download_filename_for("Yahrzeit"), "Yahrzeit.ics");
        assert_eq!(download_filename_for("  Mom's birthday "), "Mom's birthday.ics");
        assert_eq!(download_filename_for("a/b\\c"), "a-b-c.ics");
    }

    #[test]
    fn filename_fallback() {
        assert_eq!(download_filename_for(""), "calendar-events.ics");
        assert_eq!(download_filename_for("   "), "calendar-events.ics");
        assert_eq!(download_filename_for(".."), "calendar-events.ics");
    }
}
