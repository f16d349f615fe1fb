//! Render model.
//!
//! Pure functions turning selection state and fetched data into the text a
//! display surface shows. Nothing here knows about terminals or colors.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use crate::model::{Resource, ScheduleSlot, Service};
use crate::week::{add_days, iso_week_number, week_days, weekday_index};

pub const DAY_NAMES: [&str; 7] = ["Mån", "Tis", "Ons", "Tor", "Fre", "Lör", "Sön"];
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mars", "April", "Maj", "Juni", "Juli", "Aug", "Sep", "Okt", "Nov", "Dec",
];
pub const NO_FREE_TIMES: &str = "Inga lediga tider";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub key: String,
    pub name: String,
    pub lastname: String,
    pub image_path: String,
    pub selected: bool,
}

pub fn resource_list(roster: &[Resource], selected: Option<&Resource>) -> Vec<ResourceEntry> {
    roster
        .iter()
        .map(|r| ResourceEntry {
            key: r.key.clone(),
            name: r.name.clone(),
            lastname: r.lastname.clone(),
            image_path: r.image_path(),
            selected: selected.is_some_and(|s| s.key == r.key),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRow {
    pub service_id: u32,
    pub name: String,
    pub duration: String,
    pub price: String,
    pub active: bool,
}

/// `"30min"` for a fixed length, `"30min - 45min"` for a range.
pub fn format_duration(min: u32, max: u32) -> String {
    if min == max {
        format!("{min}min")
    } else {
        format!("{min}min - {max}min")
    }
}

/// `"450kr"`, or blank when the service has no (or a zero) price.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p > 0.0 && p.fract() == 0.0 => format!("{}kr", p as i64),
        Some(p) if p > 0.0 => format!("{p}kr"),
        _ => String::new(),
    }
}

pub fn service_list(services: &[Service], selected_id: Option<u32>) -> Vec<ServiceRow> {
    services
        .iter()
        .map(|s| ServiceRow {
            service_id: s.service_id,
            name: s.name.clone(),
            duration: format_duration(s.min_duration, s.max_duration),
            price: format_price(s.max_price),
            active: selected_id == Some(s.service_id),
        })
        .collect()
}

/// "4 Mars"
pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTH_NAMES[date.month0() as usize])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekHeader {
    /// "Vecka 10"
    pub title: String,
    /// "4 Mars - 10 Mars"
    pub range: String,
}

pub fn week_header(anchor: NaiveDate) -> WeekHeader {
    let end = add_days(anchor, 6);
    WeekHeader {
        title: format!("Vecka {}", iso_week_number(anchor)),
        range: format!("{} - {}", day_label(anchor), day_label(end)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnBody {
    /// Slot times in the order the API returned them
    Times(Vec<String>),
    NoFreeTimes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub date_label: String,
    pub body: ColumnBody,
}

impl DayColumn {
    /// Lines to show under the column heading.
    pub fn lines(&self) -> Vec<&str> {
        match &self.body {
            ColumnBody::Times(times) => times.iter().map(String::as_str).collect(),
            ColumnBody::NoFreeTimes => vec![NO_FREE_TIMES],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    pub header: WeekHeader,
    pub columns: Vec<DayColumn>,
}

/// Seven columns for `[anchor, anchor + 6]`. Each slot goes to the column of
/// its calendar day in `tz`, time of day ignored.
pub fn week_grid(anchor: NaiveDate, slots: &[ScheduleSlot], tz: Tz) -> WeekGrid {
    let columns = week_days(anchor)
        .into_iter()
        .map(|day| {
            let times: Vec<String> = slots
                .iter()
                .filter(|slot| slot.date.local_date(tz) == day)
                .map(|slot| slot.time.clone())
                .collect();

            DayColumn {
                date: day,
                day_name: DAY_NAMES[weekday_index(day)],
                date_label: day_label(day),
                body: if times.is_empty() {
                    ColumnBody::NoFreeTimes
                } else {
                    ColumnBody::Times(times)
                },
            }
        })
        .collect();

    WeekGrid {
        header: week_header(anchor),
        columns,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningDay {
    pub day_name: &'static str,
    pub hours: Option<String>,
    pub today: bool,
}

/// Monday-to-Sunday strip with today's entry flagged.
pub fn opening_hours(today: NaiveDate, hours: Option<&[String]>) -> Vec<OpeningDay> {
    let today_index = weekday_index(today);
    DAY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| OpeningDay {
            day_name: *name,
            hours: hours.and_then(|h| h.get(i).cloned()),
            today: i == today_index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SlotTime;
    use crate::roster::default_roster;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(date: &str, time: &str) -> ScheduleSlot {
        ScheduleSlot {
            date: SlotTime::parse(date).unwrap(),
            time: time.to_string(),
        }
    }

    fn service(id: u32, min: u32, max: u32, price: Option<f64>) -> Service {
        Service {
            service_id: id,
            name: format!("Service {id}"),
            min_duration: min,
            max_duration: max,
            max_price: price,
        }
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(30, 30), "30min");
        assert_eq!(format_duration(30, 45), "30min - 45min");
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(Some(450.0)), "450kr");
        assert_eq!(format_price(Some(99.5)), "99.5kr");
        assert_eq!(format_price(Some(0.0)), "");
        assert_eq!(format_price(None), "");
    }

    #[test]
    fn service_rows_mark_selected() {
        let services = vec![service(1, 30, 30, Some(300.0)), service(2, 45, 60, None)];
        let rows = service_list(&services, Some(2));

        assert_eq!(rows.len(), 2);
        assert!(!rows[0].active);
        assert!(rows[1].active);
        assert_eq!(rows[0].duration, "30min");
        assert_eq!(rows[0].price, "300kr");
        assert_eq!(rows[1].duration, "45min - 60min");
        assert_eq!(rows[1].price, "");
    }

    #[test]
    fn resource_rows_mark_selected() {
        let roster = default_roster();
        let rows = resource_list(&roster, Some(&roster[1]));
        assert_eq!(rows.len(), roster.len());
        assert_eq!(rows.iter().filter(|r| r.selected).count(), 1);
        assert!(rows[1].selected);

        let none = resource_list(&roster, None);
        assert!(none.iter().all(|r| !r.selected));
    }

    #[test]
    fn header_shows_week_and_range() {
        let header = week_header(date(2024, 2, 26));
        assert_eq!(header.title, "Vecka 9");
        assert_eq!(header.range, "26 Feb - 3 Mars");
    }

    #[test]
    fn grid_has_seven_labelled_columns() {
        let grid = week_grid(date(2023, 12, 25), &[], chrono_tz::UTC);
        assert_eq!(grid.columns.len(), 7);
        assert_eq!(grid.columns[0].day_name, "Mån");
        assert_eq!(grid.columns[0].date_label, "25 Dec");
        assert_eq!(grid.columns[6].day_name, "Sön");
        assert_eq!(grid.columns[6].date_label, "31 Dec");
        assert_eq!(grid.header.title, "Vecka 52");
    }

    #[test]
    fn empty_days_show_placeholder() {
        let slots = vec![
            slot("2024-03-05T10:00:00", "10:00"),
            slot("2024-03-05T09:00:00", "09:00"),
            slot("2024-03-07T14:30:00", "14:30"),
            // outside the displayed week
            slot("2024-03-11T10:00:00", "10:00"),
        ];
        let grid = week_grid(date(2024, 3, 4), &slots, chrono_tz::Europe::Stockholm);

        assert_eq!(grid.columns[0].body, ColumnBody::NoFreeTimes);
        assert_eq!(grid.columns[0].lines(), vec![NO_FREE_TIMES]);
        // fetch order, not sorted
        assert_eq!(grid.columns[1].lines(), vec!["10:00", "09:00"]);
        assert_eq!(grid.columns[3].lines(), vec!["14:30"]);
        let empty = grid
            .columns
            .iter()
            .filter(|c| c.body == ColumnBody::NoFreeTimes)
            .count();
        assert_eq!(empty, 5);
    }

    #[test]
    fn opening_hours_flags_today() {
        let hours: Vec<String> = ["10-18", "10-18", "10-18", "10-19", "10-18", "10-15", "Stängt"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        // a Sunday
        let strip = opening_hours(date(2024, 3, 10), Some(hours.as_slice()));

        assert_eq!(strip.len(), 7);
        assert!(strip[6].today);
        assert_eq!(strip.iter().filter(|d| d.today).count(), 1);
        assert_eq!(strip[6].hours.as_deref(), Some("Stängt"));

        let bare = opening_hours(date(2024, 3, 4), None);
        assert!(bare[0].today);
        assert!(bare[0].hours.is_none());
    }
}
