use anyhow::Result;
use calculender_core::EventForm;
use calculender_core::clipboard::copy_to_clipboard;
use calculender_core::config::Config;
use calculender_core::copy_indicator::CopyIndicator;
use calculender_core::subscription::{LinkScheme, SubscriptionLink};
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn run(form: &EventForm, webcal: bool, copy: bool, config: &Config) -> Result<()> {
    let request = form.validate()?;
    let link = SubscriptionLink::new(&config.subscription_origin()?)?;
    let scheme = if webcal {
        LinkScheme::Webcal
    } else {
        LinkScheme::Origin
    };
    let url = link.render(&request, scheme);

    println!("{}\n", request.render());
    println!("{}", url);

    if copy {
        match copy_to_clipboard(&url).await {
            Ok(()) => show_copied().await,
            Err(e) => eprintln!("{}", format!("  Could not copy the link: {e}").red()),
        }
    }

    println!();
    println!("To subscribe, add it to your calendar app \"from URL\".");
    println!(
        "{}",
        "The calendar updates itself as new years are added.".dimmed()
    );

    Ok(())
}

/// Show the copied confirmation until the indicator lowers itself.
async fn show_copied() {
    let indicator = CopyIndicator::new();
    indicator.mark_copied();

    let spinner = create_spinner(format!("{} {}", "✓".green(), "Link copied!".green()));
    indicator.cleared().await;
    spinner.finish_and_clear();
    println!("{} Link copied", "✓".green());
}
