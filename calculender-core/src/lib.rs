//! Core types for calculender.
//!
//! This crate provides everything the CLI needs to talk to a calculender
//! server:
//! - `form` and `request` for collecting and validating an event request
//! - `backend` for the `POST /api/generate-ics` file download
//! - `subscription` for building `subscribe.ics` links
//! - `service` for orchestrating a submission

pub mod backend;
pub mod clipboard;
pub mod config;
pub mod copy_indicator;
pub mod date_source;
pub mod error;
pub mod form;
pub mod hebrew_month;
pub mod location;
pub mod request;
pub mod service;
pub mod subscription;

pub use date_source::{DateSource, HebrewDay};
pub use error::{CalculenderError, CalculenderResult};
pub use form::{EventForm, ValidationError};
pub use hebrew_month::HebrewMonth;
pub use request::{EventPayload, EventRequest};
