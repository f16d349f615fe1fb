//! Async driver for the selection state machine.
//!
//! `Session` runs the fetches that `Booking` transitions ask for and feeds
//! the responses straight back, so callers can simply await a transition.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::booking::{Booking, Direction, FetchRequest};
use crate::error::{BookingError, BookingResult};
use crate::model::{Resource, Service};
use crate::remote::ScheduleSource;

/// Source of "today" for week resets.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock, read in the salon's time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        SystemClock { tz }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub struct Session<S, C = SystemClock> {
    source: S,
    clock: C,
    booking: Booking,
}

impl<S: ScheduleSource, C: Clock> Session<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        let booking = Booking::new(clock.today());
        Session {
            source,
            clock,
            booking,
        }
    }

    pub fn booking(&self) -> &Booking {
        &self.booking
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Select or deselect `resource`, loading its services.
    pub async fn select_resource(&mut self, resource: Resource) {
        let request = self.booking.select_resource(resource);
        self.run(request).await;
    }

    pub async fn select_service(&mut self, service: Service) -> BookingResult<()> {
        let request = self.booking.select_service(service, self.clock.today())?;
        self.run(Some(request)).await;
        Ok(())
    }

    /// Select one of the loaded services by id.
    pub async fn select_service_id(&mut self, service_id: u32) -> BookingResult<()> {
        let service = self
            .booking
            .services()
            .ready()
            .and_then(|services| services.iter().find(|s| s.service_id == service_id))
            .cloned()
            .ok_or(BookingError::UnknownService(service_id))?;

        self.select_service(service).await
    }

    pub async fn navigate_week(&mut self, direction: Direction) -> BookingResult<()> {
        let request = self.booking.navigate_week(direction)?;
        self.run(Some(request)).await;
        Ok(())
    }

    /// Execute requests until the state machine stops asking for more.
    async fn run(&mut self, mut request: Option<FetchRequest>) {
        while let Some(next) = request.take() {
            request = match next {
                FetchRequest::Services {
                    token,
                    resource_key,
                } => {
                    let result = self.source.fetch_resource_services(&resource_key).await;
                    self.booking.services_loaded(token, result)
                }
                FetchRequest::Schedule {
                    token,
                    service_id,
                    resource_key,
                    week,
                } => {
                    let result = self
                        .source
                        .fetch_service_schedule(service_id, &resource_key, week)
                        .await;
                    self.booking.schedule_loaded(token, result);
                    None
                }
            };
        }
    }
}
