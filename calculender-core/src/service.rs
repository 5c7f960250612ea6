//! Submitting a form to the file generator.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use icalendar::parser::{read_calendar, unfold};
use thiserror::Error;
use tracing::debug;

use crate::backend::IcsBackend;
use crate::error::{CalculenderError, CalculenderResult};
use crate::form::{EventForm, ValidationError};
use crate::request::EventRequest;

/// Outcome of a failed submission, so callers can tell the user what
/// went wrong instead of showing one generic message.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A calendar file is already being generated")]
    Busy,

    #[error("There was a problem generating the calendar file. Make sure the calendar server is running")]
    Remote(#[from] CalculenderError),
}

/// A generated calendar file, held in memory until saved.
#[derive(Debug, Clone)]
pub struct DownloadedCalendar {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DownloadedCalendar {
    /// Write the file unchanged to `dir/filename`.
    pub fn save_to(&self, dir: &Path) -> CalculenderResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }

    /// Number of VEVENTs, if the bytes parse as iCalendar.
    pub fn event_count(&self) -> Option<usize> {
        let text = std::str::from_utf8(&self.bytes).ok()?;
        let unfolded = unfold(text);
        let calendar = read_calendar(&unfolded).ok()?;
        Some(
            calendar
                .components
                .iter()
                .filter(|c| c.name == "VEVENT")
                .count(),
        )
    }
}

/// Submits event requests to a backend, one at a time.
pub struct Calculender<B> {
    backend: B,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the request finishes, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<B: IcsBackend> Calculender<B> {
    pub fn new(backend: B) -> Self {
        Calculender {
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a download is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate the form and, if it is complete, fetch the calendar file.
    ///
    /// Validation failures return before the backend is contacted.
    pub async fn download(&self, form: &EventForm) -> Result<DownloadedCalendar, SubmitError> {
        let request = form.validate()?;
        self.submit(&request).await
    }

    /// Fetch the calendar file for an already validated request.
    pub async fn submit(&self, request: &EventRequest) -> Result<DownloadedCalendar, SubmitError> {
        let _guard = self.begin()?;

        debug!(title = %request.title(), date = %request.date(), "submitting event request");
        let bytes = self.backend.generate_ics(&request.payload()).await?;

        Ok(DownloadedCalendar {
            filename: request.download_filename(),
            bytes,
        })
    }

    fn begin(&self) -> Result<InFlight<'_>, SubmitError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| SubmitError::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hebrew_month::HebrewMonth;
    use crate::request::EventPayload;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    const SAMPLE_ICS: &str = "BEGIN:VCALENDAR\r\n\
        VERSION:2.0\r\n\
        PRODID:test\r\n\
        BEGIN:VEVENT\r\n\
        UID:1\r\n\
        SUMMARY:Test\r\n\
        DTSTART;VALUE=DATE:20250101\r\n\
        END:VEVENT\r\n\
        BEGIN:VEVENT\r\n\
        UID:2\r\n\
        SUMMARY:Start of Test\r\n\
        DTSTART:20241231T163000Z\r\n\
        DTEND:20241231T164500Z\r\n\
        END:VEVENT\r\n\
        END:VCALENDAR\r\n";

    /// Records every payload it receives and answers with fixed bytes.
    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<EventPayload>>,
        fail_with: Option<u16>,
    }

    impl RecordingBackend {
        fn calls(&self) -> Vec<EventPayload> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl IcsBackend for RecordingBackend {
        async fn generate_ics(&self, payload: &EventPayload) -> CalculenderResult<Vec<u8>> {
            self.calls.lock().unwrap().push(payload.clone());
            match self.fail_with {
                Some(status) => Err(CalculenderError::Status(status)),
                None => Ok(SAMPLE_ICS.as_bytes().to_vec()),
            }
        }
    }

    /// Blocks until released, so a request can be held in flight.
    #[derive(Default)]
    struct GatedBackend {
        gate: Notify,
    }

    impl IcsBackend for GatedBackend {
        async fn generate_ics(&self, _payload: &EventPayload) -> CalculenderResult<Vec<u8>> {
            self.gate.notified().await;
            Ok(b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n".to_vec())
        }
    }

    fn gregorian_form() -> EventForm {
        EventForm {
            gregorian_date: NaiveDate::from_ymd_opt(2024, 5, 10),
            title: "Birthday".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn missing_gregorian_date_never_calls_backend() {
        let service = Calculender::new(RecordingBackend::default());
        let form = EventForm {
            title: "Birthday".to_string(),
            ..Default::default()
        };

        let err = service.download(&form).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::MissingGregorianDate)
        ));
        assert!(service.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_hebrew_day_never_calls_backend() {
        let service = Calculender::new(RecordingBackend::default());
        let form = EventForm {
            is_hebrew: true,
            title: "Yahrzeit".to_string(),
            ..Default::default()
        };

        let err = service.download(&form).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::MissingHebrewDay)
        ));
        assert!(service.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn gregorian_submission_sends_gregorian_fields() {
        let service = Calculender::new(RecordingBackend::default());

        let file = service.download(&gregorian_form()).await.unwrap();
        assert_eq!(file.filename, "Birthday.ics");
        assert_eq!(file.bytes, SAMPLE_ICS.as_bytes());

        let calls = service.backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].greg_year, Some(2024));
        assert_eq!(calls[0].greg_month, Some(5));
        assert_eq!(calls[0].greg_day, Some(10));
        assert_eq!(calls[0].heb_month, None);
        assert_eq!(calls[0].heb_day, None);
    }

    #[tokio::test]
    async fn hebrew_submission_sends_hebrew_fields() {
        let service = Calculender::new(RecordingBackend::default());
        let form = EventForm {
            is_hebrew: true,
            hebrew_day: Some("15".to_string()),
            hebrew_month: HebrewMonth::Tishrei,
            title: "Sukkot".to_string(),
            ..Default::default()
        };

        service.download(&form).await.unwrap();

        let calls = service.backend.calls();
        assert_eq!(calls[0].heb_day, Some(15));
        assert_eq!(calls[0].heb_month, Some(7));
        assert_eq!(calls[0].greg_year, None);
        assert_eq!(calls[0].greg_month, None);
        assert_eq!(calls[0].greg_day, None);
    }

    #[tokio::test]
    async fn remote_failure_is_reported_as_remote() {
        let service = Calculender::new(RecordingBackend {
            fail_with: Some(500),
            ..Default::default()
        });

        let err = service.download(&gregorian_form()).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Remote(CalculenderError::Status(500))
        ));
        assert!(!service.is_busy());
    }

    #[tokio::test]
    async fn second_download_while_in_flight_is_busy() {
        let service = Calculender::new(GatedBackend::default());
        let form = gregorian_form();

        let first = service.download(&form);
        let second = async {
            let result = service.download(&form).await;
            assert!(service.is_busy());
            service.backend.gate.notify_one();
            result
        };

        let (first, second) = tokio::join!(first, second);
        assert!(first.is_ok());
        assert!(matches!(second, Err(SubmitError::Busy)));
        assert!(!service.is_busy());

        // The guard is released, so a new download goes through.
        service.backend.gate.notify_one();
        assert!(service.download(&form).await.is_ok());
    }

    #[test]
    fn event_count_of_generated_file() {
        let file = DownloadedCalendar {
            filename: "x.ics".to_string(),
            bytes: SAMPLE_ICS.as_bytes().to_vec(),
        };
        assert_eq!(file.event_count(), Some(2));

        let garbage = DownloadedCalendar {
            filename: "x.ics".to_string(),
            bytes: vec![0xff, 0xfe, 0x00],
        };
        assert_eq!(garbage.event_count(), None);
    }

    #[test]
    fn save_writes_bytes_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let file = DownloadedCalendar {
            filename: "Birthday.ics".to_string(),
            bytes: SAMPLE_ICS.as_bytes().to_vec(),
        };

        let path = file.save_to(&dir.path().join("nested")).unwrap();
        assert_eq!(path, dir.path().join("nested").join("Birthday.ics"));
        assert_eq!(std::fs::read(path).unwrap(), SAMPLE_ICS.as_bytes());
    }
}
