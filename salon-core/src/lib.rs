//! Core of the salon booking client.
//!
//! - `week`: ISO week numbers and Monday-based week arithmetic
//! - `remote`: read-only client for the booking API
//! - `booking`: the resource/service/week selection state machine
//! - `view`: pure render model for resource, service and schedule panels
//! - `session`: async driver wiring the state machine to a schedule source

pub mod booking;
pub mod config;
pub mod error;
pub mod model;
pub mod remote;
pub mod roster;
pub mod session;
pub mod view;
pub mod week;

pub use booking::{Booking, BookingView, Direction, Panel, Phase};
pub use error::{BookingError, BookingResult};
pub use model::{Resource, ResourceServices, ScheduleSlot, Service, ServiceSchedule, SlotTime};
pub use week::IsoWeek;
