use anyhow::Result;
use calculender_core::backend::HttpBackend;
use calculender_core::config::Config;
use calculender_core::subscription::SubscriptionLink;
use owo_colors::OwoColorize;

pub fn run(init: bool) -> Result<()> {
    let config_path = Config::config_path()?;

    if init {
        if config_path.exists() {
            println!(
                "{}",
                format!("Config already exists at {}", config_path.display()).yellow()
            );
        } else {
            Config::create_default_config(&config_path)?;
            println!("{} Created {}", "✓".green(), config_path.display());
        }
        return Ok(());
    }

    let config = Config::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Downloads:  {}", config.download_dir().display());
    println!();
    println!("{}", "Server".bold());
    let backend = HttpBackend::new(&config.server_url()?, config.request_timeout()?)?;
    let link = SubscriptionLink::new(&config.subscription_origin()?)?;
    println!("  Files:      {}", backend.endpoint());
    println!("  Links:      {}", link.endpoint());

    Ok(())
}
