use anyhow::Result;
use owo_colors::OwoColorize;
use salon_core::view;

use super::Salon;
use crate::render::Render;

pub fn run(salon: &Salon) -> Result<()> {
    for entry in view::resource_list(&salon.roster, None) {
        let key = if entry.key.is_empty() {
            "(any)".to_string()
        } else {
            entry.key.clone()
        };
        println!("{}  {}", entry.render(), key.dimmed());
    }

    Ok(())
}
