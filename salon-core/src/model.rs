//! Wire and domain types for the booking API.
//!
//! The API speaks camelCase JSON; these types mirror it and are shared by the
//! remote client, the selection state machine and the render model.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

/// A bookable staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub lastname: String,
    /// Profile picture reference (file stem, e.g. "sofia")
    #[serde(default)]
    pub image: String,
    /// Booking API key. Empty for the "first available" pseudo resource.
    pub key: String,
}

impl Resource {
    pub fn new(name: &str, lastname: &str, image: &str, key: &str) -> Self {
        Resource {
            name: name.to_string(),
            lastname: lastname.to_string(),
            image: image.to_string(),
            key: key.to_string(),
        }
    }

    /// Full display name. The pseudo resource has only a last name.
    pub fn display_name(&self) -> String {
        match (self.name.is_empty(), self.lastname.is_empty()) {
            (true, _) => self.lastname.clone(),
            (false, true) => self.name.clone(),
            (false, false) => format!("{} {}", self.name, self.lastname),
        }
    }

    pub fn image_path(&self) -> String {
        format!("assets/img/profile/{}.jpg", self.image)
    }
}

/// A bookable offering of one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_id: u32,
    pub name: String,
    pub min_duration: u32,
    pub max_duration: u32,
    #[serde(default)]
    pub max_price: Option<f64>,
}

/// Body of `GET /services/{key}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceServices {
    #[serde(default)]
    pub services: Vec<Service>,
}

impl ResourceServices {
    pub fn find(&self, service_id: u32) -> Option<&Service> {
        self.services.iter().find(|s| s.service_id == service_id)
    }
}

/// One free appointment time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleSlot {
    pub date: SlotTime,
    /// Display string provided by the API (e.g. "10:30")
    pub time: String,
}

/// Body of `GET /slots/service/{id}/resource/{key}/{year}-{week}/`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceSchedule {
    #[serde(default)]
    pub slots: Vec<ScheduleSlot>,
}

/// Start time of a slot as sent by the API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotTime {
    /// Wall-clock time in the salon's zone (no offset on the wire)
    Floating(NaiveDateTime),
    /// Time with an explicit UTC offset
    Offset(DateTime<FixedOffset>),
}

impl SlotTime {
    /// Parse the formats the API is known to send: RFC 3339, a floating
    /// `YYYY-MM-DDTHH:MM[:SS]`, or a bare date.
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(SlotTime::Offset(dt));
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(SlotTime::Floating(dt));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(SlotTime::Floating)
    }

    /// Calendar day of the slot in the salon's time zone.
    pub fn local_date(&self, tz: Tz) -> NaiveDate {
        match self {
            SlotTime::Floating(dt) => dt.date(),
            SlotTime::Offset(dt) => tz.from_utc_datetime(&dt.naive_utc()).date_naive(),
        }
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SlotTime::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid slot date '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_uses_camel_case_fields() {
        let json = r#"{"services":[
            {"serviceId":12,"name":"Klippning","minDuration":30,"maxDuration":45,"maxPrice":450},
            {"serviceId":13,"name":"Tvätt","minDuration":15,"maxDuration":15}
        ]}"#;
        let parsed: ResourceServices = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.services.len(), 2);
        assert_eq!(parsed.services[0].service_id, 12);
        assert_eq!(parsed.services[0].max_price, Some(450.0));
        assert_eq!(parsed.services[1].max_price, None);
        assert_eq!(parsed.find(13).map(|s| s.name.as_str()), Some("Tvätt"));
    }

    #[test]
    fn missing_arrays_decode_as_empty() {
        let services: ResourceServices = serde_json::from_str("{}").unwrap();
        let schedule: ServiceSchedule = serde_json::from_str("{}").unwrap();
        assert!(services.services.is_empty());
        assert!(schedule.slots.is_empty());
    }

    #[test]
    fn slot_time_accepts_floating_and_offset_forms() {
        let floating = SlotTime::parse("2024-03-04T10:00:00").unwrap();
        assert!(matches!(floating, SlotTime::Floating(_)));

        let short = SlotTime::parse("2024-03-04T10:00").unwrap();
        assert_eq!(short, floating);

        let offset = SlotTime::parse("2024-03-04T23:30:00Z").unwrap();
        assert!(matches!(offset, SlotTime::Offset(_)));

        let date_only = SlotTime::parse("2024-03-04").unwrap();
        assert!(matches!(date_only, SlotTime::Floating(_)));

        assert!(SlotTime::parse("next tuesday").is_none());
    }

    #[test]
    fn offset_slot_lands_on_salon_day() {
        // 23:30 UTC is already the next day in Stockholm
        let slot = SlotTime::parse("2024-03-04T23:30:00Z").unwrap();
        assert_eq!(
            slot.local_date(chrono_tz::Europe::Stockholm),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert_eq!(
            slot.local_date(chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
    }

    #[test]
    fn bad_slot_date_is_a_decode_error() {
        let json = r#"{"slots":[{"date":"soon","time":"10:00"}]}"#;
        assert!(serde_json::from_str::<ServiceSchedule>(json).is_err());
    }

    #[test]
    fn display_name_handles_pseudo_resource() {
        let sofia = Resource::new("Sofia", "Seppälä", "sofia", "QN225Q");
        let any = Resource::new("", "Snabbast möjliga tid", "dog", "");
        assert_eq!(sofia.display_name(), "Sofia Seppälä");
        assert_eq!(any.display_name(), "Snabbast möjliga tid");
        assert_eq!(sofia.image_path(), "assets/img/profile/sofia.jpg");
    }
}
