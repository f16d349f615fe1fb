use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use salon_core::remote::ScheduleSource;
use salon_core::roster::find_resource;
use salon_core::view;

use super::Salon;
use crate::render::Render;
use crate::utils::tui::with_spinner;

pub async fn run(salon: &Salon, resource: &str) -> Result<()> {
    let resource = find_resource(&salon.roster, resource)?;

    let services = with_spinner(
        format!("Fetching services for {}", resource.display_name()),
        salon.api.fetch_resource_services(&resource.key),
    )
    .await
    .with_context(|| format!("Could not load services for {}", resource.display_name()))?;

    let entry = &view::resource_list(std::slice::from_ref(resource), Some(resource))[0];
    println!("{}", entry.render());

    if services.services.is_empty() {
        println!("   {}", "No services".dimmed());
        return Ok(());
    }

    let rows = view::service_list(&services.services, None);
    for (row, service) in rows.iter().zip(&services.services) {
        println!("{}  {}", row.render(), format!("#{}", service.service_id).dimmed());
    }

    Ok(())
}
