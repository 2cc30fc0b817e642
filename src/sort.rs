//! Sortable event fields, resolved by name at runtime.

use crate::error::MarketingError;
use crate::model::Event;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    City,
    Date,
}

impl SortField {
    pub const ALL: [SortField; 4] = [Self::Id, Self::Name, Self::City, Self::Date];

    /// Ascending order of two events by this field.
    pub fn compare(self, a: &Event, b: &Event) -> Ordering {
        match self {
            Self::Id => a.id().cmp(&b.id()),
            Self::Name => a.name().cmp(b.name()),
            Self::City => a.city().cmp(b.city()),
            Self::Date => a.date().cmp(&b.date()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(f, "Id"),
            Self::Name => write!(f, "Name"),
            Self::City => write!(f, "City"),
            Self::Date => write!(f, "Date"),
        }
    }
}

impl FromStr for SortField {
    type Err = MarketingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| MarketingError::UnknownField(s.to_string()))
    }
}
