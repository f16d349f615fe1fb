//! Selection state machine.
//!
//! `Booking` tracks the chosen resource and service, the Monday of the
//! displayed week, and the two panels that depend on remote data. Every
//! transition updates selection synchronously and returns the fetch the
//! caller should run; the response comes back through `services_loaded` or
//! `schedule_loaded` together with the request's token.
//!
//! Each panel keeps its own request sequence. Only a response carrying the
//! latest token issued for that panel is applied; anything older is dropped,
//! so a slow reply can never overwrite a newer selection.

use std::str::FromStr;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::error::{BookingError, BookingResult};
use crate::model::{Resource, ResourceServices, ScheduleSlot, Service, ServiceSchedule};
use crate::view::{self, ResourceEntry, ServiceRow, WeekGrid};
use crate::week::{IsoWeek, add_days, iso_week, week_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ResourceSelected,
    ServiceSelected,
}

impl Phase {
    fn describe(&self) -> &'static str {
        match self {
            Phase::Idle => "no resource is selected",
            Phase::ResourceSelected => "no service is selected",
            Phase::ServiceSelected => "a service is selected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn days(&self) -> i64 {
        match self {
            Direction::Forward => 7,
            Direction::Backward => -7,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Direction::Forward),
            "backward" => Ok(Direction::Backward),
            other => Err(format!("Unknown direction '{other}'. Expected forward or backward")),
        }
    }
}

/// Which resource and service the user has picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    resource: Option<Resource>,
    service: Option<Service>,
}

impl SelectionState {
    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match (&self.resource, &self.service) {
            (None, _) => Phase::Idle,
            (Some(_), None) => Phase::ResourceSelected,
            (Some(_), Some(_)) => Phase::ServiceSelected,
        }
    }
}

/// A display area fed by a remote fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Hidden,
    Loading,
    Ready(T),
    /// The fetch failed; the message is shown in place of the content
    Failed(String),
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> Panel<U> {
        match self {
            Panel::Hidden => Panel::Hidden,
            Panel::Loading => Panel::Loading,
            Panel::Ready(value) => Panel::Ready(f(value)),
            Panel::Failed(msg) => Panel::Failed(msg.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Make every outstanding token stale.
    fn invalidate(&mut self) {
        self.latest += 1;
    }

    fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// I/O a transition asks the caller to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Services {
        token: RequestToken,
        resource_key: String,
    },
    Schedule {
        token: RequestToken,
        service_id: u32,
        resource_key: String,
        week: IsoWeek,
    },
}

/// Everything a display surface needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingView {
    pub resources: Vec<ResourceEntry>,
    pub services: Panel<Vec<ServiceRow>>,
    pub schedule: Panel<WeekGrid>,
}

#[derive(Debug)]
pub struct Booking {
    selection: SelectionState,
    anchor: NaiveDate,
    /// Service id to restore if the next resource offers it too
    carried_service: Option<u32>,
    services: Panel<Vec<Service>>,
    schedule: Panel<Vec<ScheduleSlot>>,
    services_seq: RequestSequence,
    schedule_seq: RequestSequence,
}

impl Booking {
    /// Start idle, showing the week that contains `today`.
    pub fn new(today: NaiveDate) -> Self {
        Booking {
            selection: SelectionState::default(),
            anchor: week_start(today),
            carried_service: None,
            services: Panel::Hidden,
            schedule: Panel::Hidden,
            services_seq: RequestSequence::default(),
            schedule_seq: RequestSequence::default(),
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn phase(&self) -> Phase {
        self.selection.phase()
    }

    /// Monday of the displayed week.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn services(&self) -> &Panel<Vec<Service>> {
        &self.services
    }

    pub fn schedule(&self) -> &Panel<Vec<ScheduleSlot>> {
        &self.schedule
    }

    /// Pick `resource`, or deselect it if it is already picked.
    pub fn select_resource(&mut self, resource: Resource) -> Option<FetchRequest> {
        let toggling_off = self
            .selection
            .resource
            .as_ref()
            .is_some_and(|current| current.key == resource.key);

        self.schedule = Panel::Hidden;
        self.schedule_seq.invalidate();

        if toggling_off {
            tracing::debug!(key = %resource.key, "resource deselected");
            self.selection = SelectionState::default();
            self.carried_service = None;
            self.services = Panel::Hidden;
            self.services_seq.invalidate();
            return None;
        }

        tracing::debug!(key = %resource.key, "resource selected");
        let previous = self.selection.service.take().map(|s| s.service_id);
        self.carried_service = previous.or(self.carried_service);

        let resource_key = resource.key.clone();
        self.selection.resource = Some(resource);
        self.services = Panel::Loading;

        Some(FetchRequest::Services {
            token: self.services_seq.issue(),
            resource_key,
        })
    }

    /// Apply the response to a services request.
    pub fn services_loaded(
        &mut self,
        token: RequestToken,
        result: BookingResult<ResourceServices>,
    ) -> Option<FetchRequest> {
        if !self.services_seq.is_current(token) {
            tracing::debug!(?token, "discarding stale services response");
            return None;
        }

        // A service picked while the list was loading counts as well as one
        // carried over from the previous resource.
        let wanted = self
            .carried_service
            .take()
            .or(self.selection.service.as_ref().map(|s| s.service_id));

        let services = match result {
            Ok(services) => services,
            Err(e) => {
                tracing::warn!(error = %e, "could not load services");
                self.services = Panel::Failed(e.to_string());
                self.clear_service();
                return None;
            }
        };

        let kept = wanted.and_then(|id| services.find(id).cloned());
        self.services = Panel::Ready(services.services);

        let resource_key = self.selection.resource.as_ref()?.key.clone();
        match kept {
            Some(service) => {
                let service_id = service.service_id;
                self.selection.service = Some(service);
                Some(self.request_schedule(service_id, resource_key))
            }
            None => {
                if let Some(id) = wanted {
                    tracing::debug!(service_id = id, "service not offered by resource");
                }
                self.clear_service();
                None
            }
        }
    }

    /// Pick a service of the selected resource and jump back to the week
    /// containing `today`.
    pub fn select_service(
        &mut self,
        service: Service,
        today: NaiveDate,
    ) -> BookingResult<FetchRequest> {
        let resource_key = match &self.selection.resource {
            Some(resource) => resource.key.clone(),
            None => {
                return Err(BookingError::InvalidTransition {
                    action: "select a service",
                    phase: Phase::Idle.describe(),
                });
            }
        };

        if let Panel::Ready(offered) = &self.services {
            if !offered.iter().any(|s| s.service_id == service.service_id) {
                return Err(BookingError::UnknownService(service.service_id));
            }
        }

        tracing::debug!(service_id = service.service_id, "service selected");
        let service_id = service.service_id;
        self.selection.service = Some(service);
        self.carried_service = None;
        self.anchor = week_start(today);

        Ok(self.request_schedule(service_id, resource_key))
    }

    /// Move the displayed week by seven days. Only valid with a service
    /// selected.
    pub fn navigate_week(&mut self, direction: Direction) -> BookingResult<FetchRequest> {
        let (resource, service) = match (&self.selection.resource, &self.selection.service) {
            (Some(r), Some(s)) => (r.key.clone(), s.service_id),
            _ => {
                return Err(BookingError::InvalidTransition {
                    action: "change week",
                    phase: self.phase().describe(),
                });
            }
        };

        self.anchor = add_days(self.anchor, direction.days());
        tracing::debug!(anchor = %self.anchor, ?direction, "week changed");

        Ok(self.request_schedule(service, resource))
    }

    /// Apply the response to a schedule request. Returns whether it was
    /// applied.
    pub fn schedule_loaded(
        &mut self,
        token: RequestToken,
        result: BookingResult<ServiceSchedule>,
    ) -> bool {
        if !self.schedule_seq.is_current(token) {
            tracing::debug!(?token, "discarding stale schedule response");
            return false;
        }

        self.schedule = match result {
            Ok(schedule) => Panel::Ready(schedule.slots),
            Err(e) => {
                tracing::warn!(error = %e, "could not load schedule");
                Panel::Failed(e.to_string())
            }
        };
        true
    }

    /// Render model for the current state.
    pub fn view(&self, roster: &[Resource], tz: Tz) -> BookingView {
        let selected_id = self.selection.service.as_ref().map(|s| s.service_id);
        BookingView {
            resources: view::resource_list(roster, self.selection.resource.as_ref()),
            services: self
                .services
                .map(|services| view::service_list(services, selected_id)),
            schedule: self
                .schedule
                .map(|slots| view::week_grid(self.anchor, slots, tz)),
        }
    }

    fn clear_service(&mut self) {
        self.selection.service = None;
        self.schedule = Panel::Hidden;
        self.schedule_seq.invalidate();
    }

    fn request_schedule(&mut self, service_id: u32, resource_key: String) -> FetchRequest {
        self.schedule = Panel::Loading;
        FetchRequest::Schedule {
            token: self.schedule_seq.issue(),
            service_id,
            resource_key,
            week: iso_week(self.anchor),
        }
    }
}
