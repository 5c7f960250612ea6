use calculender_core::HebrewMonth;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run() {
    println!("{}", "Hebrew months".bold());
    for month in HebrewMonth::CALENDAR_ORDER {
        println!("  {:>2}  {}", month.code().dimmed(), month.render());
    }
    println!();
    println!(
        "{}",
        "Pass the number or the name to --heb-month.".dimmed()
    );
}
