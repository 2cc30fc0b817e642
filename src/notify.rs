//! Notification sinks: where (customer, event) matches are delivered.

use crate::model::{Customer, Event};

/// `"{customer} from {customer city} event {event} at {date}"`
pub fn notification_line(customer: &Customer, event: &Event) -> String {
    format!(
        "{} from {} event {} at {}",
        customer.name,
        customer.city,
        event.name(),
        event.date()
    )
}

/// Receives one call per selected event. Delivery cannot fail.
pub trait NotificationSink {
    fn send(&mut self, customer: &Customer, event: &Event);
}

/// Prints each notification to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn send(&mut self, customer: &Customer, event: &Event) {
        tracing::debug!(customer = customer.id, event = event.id(), "notify");
        println!("{}", notification_line(customer, event));
    }
}

/// Keeps rendered notifications in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
    event_ids: Vec<u32>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Ids of notified events, in delivery order.
    pub fn event_ids(&self) -> &[u32] {
        &self.event_ids
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.event_ids.clear();
    }
}

impl NotificationSink for MemorySink {
    fn send(&mut self, customer: &Customer, event: &Event) {
        self.lines.push(notification_line(customer, event));
        self.event_ids.push(event.id());
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn send(&mut self, customer: &Customer, event: &Event) {
        (**self).send(customer, event)
    }
}
