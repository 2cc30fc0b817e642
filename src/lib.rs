//! Ticket marketing engine.
//!
//! Selects events for a customer by city, by distance between cities, or by
//! closeness to the customer's birthday, and sorts events by a named field.

pub mod city;
pub mod distance;
pub mod engine;
pub mod error;
pub mod logger;
pub mod model;
pub mod notify;
pub mod sort;

pub use engine::{BirthdayWindow, MarketingEngine, DEFAULT_DAYS_FAR, DEFAULT_MAX_CITIES};
pub use error::{MarketingError, Result};
pub use model::{Customer, Event};
pub use notify::{ConsoleSink, MemorySink, NotificationSink};
pub use sort::SortField;
