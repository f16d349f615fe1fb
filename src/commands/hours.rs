use anyhow::Result;
use salon_core::session::{Clock, SystemClock};
use salon_core::view;

use super::Salon;
use crate::render::render_list;

pub fn run(salon: &Salon) -> Result<()> {
    let today = SystemClock::new(salon.tz).today();
    let strip = view::opening_hours(today, salon.config.opening_hours.as_deref());

    println!("{}", render_list(&strip));

    Ok(())
}
