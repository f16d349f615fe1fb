//! Read-only access to the remote booking API.

pub mod client;

use std::future::Future;

use crate::error::BookingResult;
use crate::model::{ResourceServices, ServiceSchedule};
use crate::week::IsoWeek;

pub use client::BookingApi;

/// Where services and free slots come from.
pub trait ScheduleSource {
    /// `GET /services/{resource_key}`
    fn fetch_resource_services(
        &self,
        resource_key: &str,
    ) -> impl Future<Output = BookingResult<ResourceServices>> + Send;

    /// `GET /slots/service/{service_id}/resource/{resource_key}/{year}-{week}/`
    fn fetch_service_schedule(
        &self,
        service_id: u32,
        resource_key: &str,
        week: IsoWeek,
    ) -> impl Future<Output = BookingResult<ServiceSchedule>> + Send;
}
