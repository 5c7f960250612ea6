use calculender_core::location::{DEFAULT_LOCATION, LocationGroup, locations_in};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run() {
    for (i, group) in [LocationGroup::Israel, LocationGroup::Worldwide]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            println!();
        }
        println!("{}", group.label().bold());
        for location in locations_in(group) {
            println!("  {}", location.render());
        }
    }

    println!();
    println!(
        "{}",
        format!("Default: {DEFAULT_LOCATION}. Any other place name can be passed to --location.")
            .dimmed()
    );
}
