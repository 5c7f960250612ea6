use anyhow::Result;
use calculender_core::EventForm;
use calculender_core::config::Config;
use calculender_core::subscription::{LinkScheme, SubscriptionLink, google_import_url};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(form: &EventForm, config: &Config) -> Result<()> {
    let request = form.validate()?;
    let link = SubscriptionLink::new(&config.subscription_origin()?)?;
    let google = google_import_url(&link.render(&request, LinkScheme::Origin))?;

    println!("{}\n", request.render());
    if !link.is_https() {
        println!(
            "{}\n",
            format!(
                "Warning: {} is not https, Google Calendar will refuse to subscribe. Set subscription_origin to a public https address.",
                link.endpoint()
            )
            .yellow()
        );
    }
    println!("Opening Google Calendar to subscribe:\n");
    println!("{}\n", google.as_str().cyan());

    if open::that(google.as_str()).is_err() {
        println!("(Could not open browser automatically, please copy the URL above)");
    }

    Ok(())
}
