//! Colored terminal rendering for calculender-core types.

use calculender_core::location::KnownLocation;
use calculender_core::{EventRequest, HebrewMonth};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for HebrewMonth {
    fn render(&self) -> String {
        let base = format!("{} {}", self.name(), self.hebrew_name().dimmed());
        match self.note() {
            Some(note) => format!("{} {}", base, format!("({note})").dimmed()),
            None => base,
        }
    }
}

impl Render for KnownLocation {
    fn render(&self) -> String {
        if self.label == self.name {
            self.label.to_string()
        } else {
            format!("{} {}", self.label, format!("({})", self.name).dimmed())
        }
    }
}

impl Render for EventRequest {
    fn render(&self) -> String {
        let mut lines = vec![format!("📅 {}", self.title().bold())];
        lines.push(format!("   {}  {}", "Date:".dimmed(), self.date()));
        lines.push(format!("   {}  {}", "Place:".dimmed(), self.location()));
        if self.create_sunset_event() {
            lines.push(format!("   {}", "+ sunset entry".dimmed()));
        }
        lines.join("\n")
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
