use anyhow::{Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use salon_core::remote::ScheduleSource;
use salon_core::roster::find_resource;
use salon_core::session::{Clock, SystemClock};
use salon_core::view;
use salon_core::week::{checked_add_weeks, iso_week, week_start};

use super::Salon;
use crate::render::Render;
use crate::utils::tui::with_spinner;

pub async fn run(
    salon: &Salon,
    resource: &str,
    service_id: u32,
    date: Option<String>,
    weeks: i64,
) -> Result<()> {
    let resource = find_resource(&salon.roster, resource)?;

    let day = match date {
        Some(s) => parse_date(&s)?,
        None => SystemClock::new(salon.tz).today(),
    };
    let anchor = shifted_week(day, weeks)?;

    let services = with_spinner(
        format!("Fetching services for {}", resource.display_name()),
        salon.api.fetch_resource_services(&resource.key),
    )
    .await
    .with_context(|| format!("Could not load services for {}", resource.display_name()))?;

    let Some(service) = services.find(service_id) else {
        let available: Vec<_> = services
            .services
            .iter()
            .map(|s| format!("{} ({})", s.service_id, s.name))
            .collect();
        anyhow::bail!(
            "{} does not offer service {}. Available: {}",
            resource.display_name(),
            service_id,
            available.join(", ")
        );
    };

    let week = iso_week(anchor);
    let schedule = with_spinner(
        format!("Fetching free times for week {}", week.week),
        salon
            .api
            .fetch_service_schedule(service_id, &resource.key, week),
    )
    .await
    .context("Could not load free times")?;

    let row = &view::service_list(std::slice::from_ref(service), Some(service_id))[0];
    println!("{}", resource.display_name().bold());
    println!("{}", row.render());
    println!();
    println!(
        "{}",
        view::week_grid(anchor, &schedule.slots, salon.tz).render()
    );

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}

/// Monday of the week `weeks` away from the one containing `day`.
fn shifted_week(day: NaiveDate, weeks: i64) -> Result<NaiveDate> {
    checked_add_weeks(week_start(day), weeks)
        .with_context(|| format!("Cannot move {weeks} weeks from {day}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2024-03-06").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
        );
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_date("06/03/2024").is_err());
        assert!(parse_date("tomorrow").is_err());
    }

    #[test]
    fn shifts_from_the_containing_monday() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(
            shifted_week(wednesday, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
        );
        assert_eq!(
            shifted_week(wednesday, -1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 26).unwrap()
        );
    }

    #[test]
    fn out_of_range_shift_is_an_error() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert!(shifted_week(wednesday, 1_000_000_000).is_err());
        assert!(shifted_week(wednesday, i64::MAX).is_err());
    }
}
