//! TUI rendering traits for salon view types.
//!
//! Extension traits that turn the render model from salon-core into colored
//! terminal text using owo_colors.

use owo_colors::OwoColorize;
use salon_core::Panel;
use salon_core::view::{ColumnBody, DayColumn, OpeningDay, ResourceEntry, ServiceRow, WeekGrid};

/// Width of the day label column in the schedule
const DAY_LABEL_WIDTH: usize = 12;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ResourceEntry {
    fn render(&self) -> String {
        let marker = if self.selected { "●" } else { "○" };
        let name = if self.name.is_empty() {
            self.lastname.clone()
        } else {
            format!("{} {}", self.name, self.lastname)
        };

        if self.selected {
            format!("{} {}", marker.green(), name.bold())
        } else {
            format!("{} {}", marker.dimmed(), name)
        }
    }
}

impl Render for ServiceRow {
    fn render(&self) -> String {
        let line = format!(
            "{:<32} {:>14} {:>8}",
            self.name, self.duration, self.price
        );
        if self.active {
            format!("{} {}", "▸".green(), line.green())
        } else {
            format!("  {}", line)
        }
    }
}

impl Render for DayColumn {
    fn render(&self) -> String {
        let label = format!("{} {}", self.day_name, self.date_label);
        let label = format!("{:<width$}", label, width = DAY_LABEL_WIDTH);

        match &self.body {
            ColumnBody::Times(_) => format!("{} {}", label.bold(), self.lines().join("  ")),
            ColumnBody::NoFreeTimes => {
                format!("{} {}", label.bold(), self.lines().join("").dimmed())
            }
        }
    }
}

impl Render for WeekGrid {
    fn render(&self) -> String {
        let mut lines = vec![format!(
            "{}  {}",
            self.header.title.bold(),
            self.header.range.dimmed()
        )];
        lines.extend(self.columns.iter().map(|c| format!("  {}", c.render())));
        lines.join("\n")
    }
}

impl Render for OpeningDay {
    fn render(&self) -> String {
        let hours = self.hours.as_deref().unwrap_or("");
        let line = format!("{:<4} {}", self.day_name, hours);
        if self.today {
            format!("{} {}", line.bold(), "(idag)".green())
        } else {
            line.dimmed().to_string()
        }
    }
}

/// Render a list of items, one per line.
pub fn render_list<T: Render>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.render())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a data panel. Hidden panels render nothing.
pub fn render_panel<T>(panel: &Panel<T>, ready: impl FnOnce(&T) -> String) -> Option<String> {
    match panel {
        Panel::Hidden => None,
        Panel::Loading => Some("   Loading...".dimmed().to_string()),
        Panel::Ready(value) => Some(ready(value)),
        Panel::Failed(msg) => Some(format!("   {}", msg.red())),
    }
}
