mod commands;
mod form;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use calculender_core::config::Config;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::form::FormArgs;

#[derive(Parser)]
#[command(name = "calculender")]
#[command(version)]
#[command(
    about = "Turn a Gregorian or Hebrew date into a yearly calendar file or subscription link"
)]
struct Cli {
    /// Log requests and built links to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a calendar file (.ics) to import by hand
    Download {
        #[command(flatten)]
        form: FormArgs,

        /// Directory to save the file in (default: your downloads folder)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print a subscription link and copy it to the clipboard
    Link {
        #[command(flatten)]
        form: FormArgs,

        /// Use webcal:// instead of https://
        #[arg(long)]
        webcal: bool,

        /// Only print the link
        #[arg(long)]
        no_copy: bool,
    },
    /// Subscribe in Google Calendar with one click
    Google {
        #[command(flatten)]
        form: FormArgs,
    },
    /// List Hebrew months and their numbers
    Months,
    /// List known locations for sunset times
    Locations,
    /// Show the config file location
    Config {
        /// Create a config file with every option commented out
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{}", format!("  {e}").yellow());
    }

    if let Err(e) = run(cli.command).await {
        eprintln!("{}", format!("  {e:#}").red());
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Download { form, out } => {
            let config = Config::load()?;
            let form = form.into_form(&config)?;
            commands::download::run(&form, out, &config).await
        }
        Commands::Link {
            form,
            webcal,
            no_copy,
        } => {
            let config = Config::load()?;
            let form = form.into_form(&config)?;
            commands::link::run(&form, webcal, !no_copy, &config).await
        }
        Commands::Google { form } => {
            let config = Config::load()?;
            let form = form.into_form(&config)?;
            commands::google::run(&form, &config)
        }
        Commands::Months => {
            commands::months::run();
            Ok(())
        }
        Commands::Locations => {
            commands::locations::run();
            Ok(())
        }
        Commands::Config { init } => commands::config::run(init),
    }
}

/// Diagnostics go to stderr so they never mix with printed links.
fn init_logging(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "calculender=debug,calculender_core=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))
}
