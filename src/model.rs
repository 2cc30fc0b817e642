//! Events, customers, and the demo data set.

use chrono::NaiveDate;
use serde::Serialize;

/// A ticketed event. Fields are fixed at construction; identity is the id.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    id: u32,
    name: String,
    city: String,
    date: NaiveDate,
}

impl Event {
    pub fn new(id: u32, name: impl Into<String>, city: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            date,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// `"{name} - {city} - {date}"`
    pub fn listing_line(&self) -> String {
        format!("{} - {} - {}", self.name, self.city, self.date)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Event {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub birth_date: NaiveDate,
}

// ─── Demo data ───────────────────────────────────────────────────

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // Literal dates below are all valid.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The twelve events of the demo run, in their original order.
pub fn sample_events() -> Vec<Event> {
    vec![
        Event::new(1, "Phantom of the Opera", "New York", ymd(2023, 12, 23)),
        Event::new(2, "Metallica", "Los Angeles", ymd(2023, 12, 2)),
        Event::new(3, "Metallica", "New York", ymd(2023, 12, 6)),
        Event::new(4, "Metallica", "Boston", ymd(2023, 10, 23)),
        Event::new(5, "LadyGaGa", "New York", ymd(2023, 9, 20)),
        Event::new(6, "LadyGaGa", "Boston", ymd(2023, 8, 1)),
        Event::new(7, "LadyGaGa", "Chicago", ymd(2023, 7, 4)),
        Event::new(8, "LadyGaGa", "San Francisco", ymd(2023, 7, 7)),
        Event::new(9, "LadyGaGa", "Washington", ymd(2023, 5, 22)),
        Event::new(10, "Metallica", "Chicago", ymd(2023, 1, 1)),
        Event::new(11, "Phantom of the Opera", "San Francisco", ymd(2023, 7, 4)),
        Event::new(12, "Phantom of the Opera", "Chicago", ymd(2024, 5, 15)),
    ]
}

/// The demo customer: John from New York, born 1995-05-10.
pub fn sample_customer() -> Customer {
    Customer {
        id: 1,
        name: "John".into(),
        city: "New York".into(),
        birth_date: ymd(1995, 5, 10),
    }
}
