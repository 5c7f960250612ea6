use std::path::PathBuf;

use anyhow::{Context, Result};
use calculender_core::EventForm;
use calculender_core::backend::HttpBackend;
use calculender_core::config::Config;
use calculender_core::service::Calculender;
use calculender_core::subscription::GOOGLE_IMPORT_HELP_URL;
use owo_colors::OwoColorize;
use tracing::debug;

use crate::render::{Render, pluralize};
use crate::utils::tui::create_spinner;

pub async fn run(form: &EventForm, out: Option<PathBuf>, config: &Config) -> Result<()> {
    let request = form.validate()?;
    let backend = HttpBackend::new(&config.server_url()?, config.request_timeout()?)?;
    let service = Calculender::new(backend);

    println!("{}\n", request.render());

    let spinner = create_spinner("Generating calendar file...".to_string());
    let result = service.submit(&request).await;
    spinner.finish_and_clear();
    let file = result?;

    let dir = out.unwrap_or_else(|| config.download_dir());
    let path = file
        .save_to(&dir)
        .with_context(|| format!("Could not save {} to {}", file.filename, dir.display()))?;
    debug!(path = %path.display(), bytes = file.bytes.len(), "saved calendar file");

    println!("{} {}", "✓".green(), path.display());
    if let Some(count) = file.event_count() {
        println!(
            "  {}",
            format!("{} {}", count, pluralize("event", count)).dimmed()
        );
    }

    println!();
    println!("Import the file into your calendar app. For Google Calendar:");
    println!("  {}", GOOGLE_IMPORT_HELP_URL.cyan());

    Ok(())
}
