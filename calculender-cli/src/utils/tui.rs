use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["-", "\\", "|", "/"];

pub fn create_spinner(message: String) -> ProgressBar {
    let style = ProgressStyle::default_spinner().tick_strings(TICKS);
    let style = style
        .clone()
        .template("{msg} {spinner}")
        .unwrap_or(style);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
