use anyhow::Result;
use dialoguer::Select;
use owo_colors::OwoColorize;
use salon_core::booking::{BookingView, Direction, Panel, Phase};
use salon_core::remote::BookingApi;
use salon_core::session::{Session, SystemClock};

use super::Salon;
use crate::render::{Render, render_list, render_panel};
use crate::utils::tui::with_spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Resource(usize),
    Service(u32),
    Week(Direction),
    Quit,
}

pub async fn run(salon: &Salon) -> Result<()> {
    let mut session = Session::new(salon.api.clone(), SystemClock::new(salon.tz));

    loop {
        let view = session.booking().view(&salon.roster, salon.tz);
        print_view(&view);

        let items = menu(&view, session.booking().phase());
        let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();

        let Some(choice) = Select::new()
            .with_prompt("  What next?")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        if !apply(&mut session, salon, items[choice].1).await {
            break;
        }
        println!();
    }

    Ok(())
}

/// Run one menu action. Returns false when the user is done.
async fn apply(session: &mut Session<BookingApi>, salon: &Salon, action: Action) -> bool {
    match action {
        Action::Resource(index) => {
            let resource = salon.roster[index].clone();
            with_spinner(
                format!("Fetching services for {}", resource.display_name()),
                session.select_resource(resource),
            )
            .await;
        }
        Action::Service(service_id) => {
            let result = with_spinner("Fetching free times", session.select_service_id(service_id)).await;
            if let Err(e) = result {
                println!("   {}", e.to_string().red());
            }
        }
        Action::Week(direction) => {
            let result = with_spinner("Fetching free times", session.navigate_week(direction)).await;
            if let Err(e) = result {
                println!("   {}", e.to_string().red());
            }
        }
        Action::Quit => return false,
    }
    true
}

fn print_view(view: &BookingView) {
    println!("{}", "Frisörer".bold());
    println!("{}", render_list(&view.resources));

    if let Some(services) = render_panel(&view.services, |rows| {
        if rows.is_empty() {
            "   No services".dimmed().to_string()
        } else {
            render_list(rows)
        }
    }) {
        println!();
        println!("{}", "Behandlingar".bold());
        println!("{services}");
    }

    if let Some(schedule) = render_panel(&view.schedule, |grid| grid.render()) {
        println!();
        println!("{schedule}");
    }
    println!();
}

/// Menu entries for the current state: resources, then services, then week
/// navigation once a service is picked.
fn menu(view: &BookingView, phase: Phase) -> Vec<(String, Action)> {
    let mut items = Vec::new();

    if let Panel::Ready(rows) = &view.services {
        for row in rows.iter().filter(|r| !r.active) {
            items.push((
                format!("Book {} ({})", row.name, row.duration),
                Action::Service(row.service_id),
            ));
        }
    }

    if phase == Phase::ServiceSelected {
        items.push(("Next week →".to_string(), Action::Week(Direction::Forward)));
        items.push(("← Previous week".to_string(), Action::Week(Direction::Backward)));
    }

    for (index, entry) in view.resources.iter().enumerate() {
        let name = if entry.name.is_empty() {
            entry.lastname.clone()
        } else {
            format!("{} {}", entry.name, entry.lastname)
        };
        let label = if entry.selected {
            format!("Deselect {name}")
        } else {
            format!("Pick {name}")
        };
        items.push((label, Action::Resource(index)));
    }

    items.push(("Quit".to_string(), Action::Quit));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salon_core::booking::{Booking, FetchRequest};
    use salon_core::roster::default_roster;
    use salon_core::{ResourceServices, Service};

    fn service(id: u32, name: &str) -> Service {
        Service {
            service_id: id,
            name: name.to_string(),
            min_duration: 30,
            max_duration: 45,
            max_price: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
    }

    fn loaded_booking() -> Booking {
        let roster = default_roster();
        let mut booking = Booking::new(today());
        let Some(FetchRequest::Services { token, .. }) = booking.select_resource(roster[0].clone())
        else {
            panic!("expected services request");
        };
        booking.services_loaded(
            token,
            Ok(ResourceServices {
                services: vec![service(1, "Klippning"), service(2, "Färgning")],
            }),
        );
        booking
    }

    #[test]
    fn idle_menu_lists_resources_and_quit() {
        let roster = default_roster();
        let booking = Booking::new(today());
        let items = menu(&booking.view(&roster, chrono_tz::UTC), booking.phase());

        assert_eq!(items.len(), roster.len() + 1);
        assert_eq!(items[0].0, "Pick Sofia Seppälä");
        assert_eq!(items[5].0, "Pick Snabbast möjliga tid");
        assert_eq!(items.last().map(|i| i.1), Some(Action::Quit));
    }

    #[test]
    fn services_come_first_once_loaded() {
        let roster = default_roster();
        let booking = loaded_booking();
        let items = menu(&booking.view(&roster, chrono_tz::UTC), booking.phase());

        assert_eq!(items[0], ("Book Klippning (30min - 45min)".to_string(), Action::Service(1)));
        assert_eq!(items[1].1, Action::Service(2));
        assert_eq!(items[2], ("Deselect Sofia Seppälä".to_string(), Action::Resource(0)));
        assert!(!items.iter().any(|(_, a)| matches!(a, Action::Week(_))));
    }

    #[test]
    fn week_navigation_offered_with_service() {
        let roster = default_roster();
        let mut booking = loaded_booking();
        booking.select_service(service(2, "Färgning"), today()).unwrap();
        let items = menu(&booking.view(&roster, chrono_tz::UTC), booking.phase());

        // the active service is not offered again
        assert_eq!(items[0].1, Action::Service(1));
        assert_eq!(items[1].1, Action::Week(Direction::Forward));
        assert_eq!(items[2].1, Action::Week(Direction::Backward));
    }
}
