//! Building an `EventForm` from flags, or interactively.

use std::io::IsTerminal;

use anyhow::Result;
use calculender_core::config::Config;
use calculender_core::location::{KNOWN_LOCATIONS, find_known};
use calculender_core::{EventForm, HebrewDay, HebrewMonth, ValidationError};
use chrono::NaiveDate;
use clap::Args;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

use crate::render::Render;

const OTHER_LOCATION: &str = "Other...";

/// Event fields shared by every command that talks to the server.
#[derive(Args, Debug, Default)]
pub struct FormArgs {
    /// Event title, also used as the file name. Omit to fill in the form interactively
    #[arg(short, long)]
    pub title: Option<String>,

    /// Gregorian date (YYYY-MM-DD, or e.g. "yesterday")
    #[arg(short, long, conflicts_with_all = ["hebrew", "heb_day", "heb_month"])]
    pub date: Option<String>,

    /// The event happened after sunset on --date
    #[arg(long)]
    pub after_sunset: bool,

    /// Use a Hebrew date (--heb-day and --heb-month)
    #[arg(long)]
    pub hebrew: bool,

    /// Hebrew day of the month (1-30)
    #[arg(long)]
    pub heb_day: Option<String>,

    /// Hebrew month, by name or number (see `calculender months`)
    #[arg(long)]
    pub heb_month: Option<HebrewMonth>,

    /// Place used for sunset times (see `calculender locations`)
    #[arg(short, long)]
    pub location: Option<String>,

    /// Skip the 15-minute entry at sunset
    #[arg(long)]
    pub no_sunset_event: bool,
}

impl FormArgs {
    /// Start from the configured defaults, apply the flags, and prompt for
    /// the rest when no title was given on an interactive terminal.
    pub fn into_form(self, config: &Config) -> Result<EventForm> {
        let interactive = self.title.is_none() && std::io::stdin().is_terminal();
        let form = self.apply(config.new_form())?;

        if interactive {
            prompt_form(form)
        } else {
            Ok(form)
        }
    }

    fn apply(self, mut form: EventForm) -> Result<EventForm> {
        form.is_hebrew = self.hebrew || self.heb_day.is_some() || self.heb_month.is_some();

        if let Some(date) = &self.date {
            form.gregorian_date = Some(parse_gregorian_date(date)?);
        }
        form.after_sunset = self.after_sunset;
        form.hebrew_day = self.heb_day;
        if let Some(month) = self.heb_month {
            form.hebrew_month = month;
        }
        if let Some(location) = self.location {
            form.location = location;
        }
        form.title = self.title.unwrap_or_default();
        if self.no_sunset_event {
            form.create_sunset_event = false;
        }

        Ok(form)
    }
}

/// Parse YYYY-MM-DD, falling back to natural language ("last friday").
pub fn parse_gregorian_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    fuzzydate::parse(trimmed)
        .map(|dt| dt.date())
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\". Expected YYYY-MM-DD", input))
}

fn prompt_form(mut form: EventForm) -> Result<EventForm> {
    // --- Date source ---
    let sources = ["Gregorian date", "Hebrew date"];
    let source = Select::new()
        .with_prompt("  Source date")
        .items(&sources)
        .default(usize::from(form.is_hebrew))
        .interact()?;
    form.is_hebrew = source == 1;

    if form.is_hebrew {
        let day: String = Input::new()
            .with_prompt("  Hebrew day (1-30)")
            .with_initial_text(form.hebrew_day.clone().unwrap_or_default())
            .validate_with(|input: &String| -> Result<(), String> {
                input
                    .parse::<HebrewDay>()
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;
        form.hebrew_day = Some(day);
        form.hebrew_month = prompt_month(form.hebrew_month)?;
    } else {
        let initial = form.gregorian_date.map(|d| d.format("%Y-%m-%d").to_string());
        form.gregorian_date = Some(prompt_with_retry(
            "  Gregorian date (YYYY-MM-DD)",
            initial,
            parse_gregorian_date,
        )?);
        form.after_sunset = Confirm::new()
            .with_prompt("  Did it happen after sunset?")
            .default(form.after_sunset)
            .interact()?;
    }

    // --- Location ---
    form.location = prompt_location(&form.location)?;

    // --- Title ---
    form.title = Input::new()
        .with_prompt("  Title")
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                Err(ValidationError::MissingTitle.to_string())
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    // --- Display options ---
    form.create_sunset_event = Confirm::new()
        .with_prompt("  Add a 15-minute entry at sunset?")
        .default(form.create_sunset_event)
        .interact()?;

    println!();
    Ok(form)
}

fn prompt_month(current: HebrewMonth) -> Result<HebrewMonth> {
    let labels: Vec<String> = HebrewMonth::CALENDAR_ORDER
        .iter()
        .map(|m| m.render())
        .collect();
    let default = HebrewMonth::CALENDAR_ORDER
        .iter()
        .position(|m| *m == current)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("  Hebrew month")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(HebrewMonth::CALENDAR_ORDER[selection])
}

fn prompt_location(current: &str) -> Result<String> {
    let mut labels: Vec<String> = KNOWN_LOCATIONS.iter().map(|l| l.render()).collect();
    labels.push(OTHER_LOCATION.to_string());

    let default = find_known(current)
        .and_then(|known| KNOWN_LOCATIONS.iter().position(|l| l == known))
        .unwrap_or(KNOWN_LOCATIONS.len());

    let selection = Select::new()
        .with_prompt("  Location for sunset times")
        .items(&labels)
        .default(default)
        .interact()?;

    if let Some(known) = KNOWN_LOCATIONS.get(selection) {
        return Ok(known.name.to_string());
    }

    let custom: String = Input::new()
        .with_prompt("  Location")
        .with_initial_text(current.to_string())
        .interact_text()?;
    Ok(custom.trim().to_string())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, initial: Option<String>, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(text) = &initial {
            input = input.with_initial_text(text.clone());
        }
        let raw = input.interact_text()?;
        match parse(&raw) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}
