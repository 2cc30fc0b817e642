//! Built-in city coordinate table.
//!
//! Coordinates are abstract grid units, not lat/lon. Lookups ignore ASCII case.

use crate::error::{MarketingError, Result};

/// A city with its grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    pub x: i32,
    pub y: i32,
}

// ─── Built-in dataset ───────────────────────────────────────────

const BUILTIN_CITIES: &[City] = &[
    City { name: "New York", x: 3572, y: 1455 },
    City { name: "Los Angeles", x: 462, y: 975 },
    City { name: "San Francisco", x: 183, y: 1233 },
    City { name: "Boston", x: 3778, y: 1566 },
    City { name: "Chicago", x: 2608, y: 1525 },
    City { name: "Washington", x: 3358, y: 1320 },
];

/// All cities in the built-in table, in table order.
pub fn builtin_cities() -> &'static [City] {
    BUILTIN_CITIES
}

/// Find a city by name, ignoring ASCII case.
pub fn builtin_lookup(name: &str) -> Option<&'static City> {
    BUILTIN_CITIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
}

/// Like [`builtin_lookup`], but a missing city is an error.
pub fn resolve(name: &str) -> Result<&'static City> {
    builtin_lookup(name).ok_or_else(|| MarketingError::UnknownCity(name.to_string()))
}

/// Case-folding rule shared by every city comparison in the crate.
pub fn same_city(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
