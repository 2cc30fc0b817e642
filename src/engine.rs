//! Marketing engine: picks events for a customer and notifies the sink.
//!
//! Three selections are available:
//! - same city (ASCII case-insensitive)
//! - closest cities (Manhattan distance, stable on ties)
//! - close to the customer's next birthday
//!
//! Each `select_*` function is pure; the engine's `notify_*` methods run the
//! selection and deliver one notification per match, in selection order.

use chrono::{Datelike, NaiveDate};

use crate::city;
use crate::distance::DistanceCache;
use crate::error::Result;
use crate::model::{Customer, Event};
use crate::notify::NotificationSink;
use crate::sort::SortField;

pub const DEFAULT_MAX_CITIES: usize = 5;
pub const DEFAULT_DAYS_FAR: i64 = 30;

/// Which events count as "close" to a birthday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BirthdayWindow {
    /// `date - birthday < days_far`. Every event before the birthday passes.
    #[default]
    Trailing,
    /// `|date - birthday| < days_far`.
    Symmetric,
}

// ─── Birthday arithmetic ─────────────────────────────────────────

/// The birthday in `year`. Feb 29 falls on Feb 28 outside leap years.
fn birthday_in(year: i32, birth_date: NaiveDate) -> NaiveDate {
    birth_date
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, birth_date.month(), 28))
        .unwrap_or(birth_date)
}

/// This year's birthday, or next year's if it is already behind `today`.
pub fn next_birthday(birth_date: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = birthday_in(today.year(), birth_date);
    if this_year < today {
        birthday_in(today.year() + 1, birth_date)
    } else {
        this_year
    }
}

// ─── Selections ──────────────────────────────────────────────────

pub fn select_same_city<'a>(events: &'a [Event], customer: &Customer) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| city::same_city(e.city(), &customer.city))
        .collect()
}

/// The `max_cities` events nearest to the customer's city.
///
/// Every event city is resolved before anything is returned, so an unknown
/// city fails the whole selection.
pub fn select_closest<'a>(
    events: &'a [Event],
    customer: &Customer,
    max_cities: usize,
    cache: &mut DistanceCache,
) -> Result<Vec<&'a Event>> {
    let home = city::resolve(&customer.city)?;

    let mut ranked = events
        .iter()
        .map(|e| -> Result<(u32, &'a Event)> {
            let c = city::resolve(e.city())?;
            Ok((cache.distance(c, home), e))
        })
        .collect::<Result<Vec<_>>>()?;

    // sort_by_key is stable: ties keep list order
    ranked.sort_by_key(|(d, _)| *d);

    Ok(ranked
        .into_iter()
        .take(max_cities)
        .map(|(_, e)| e)
        .collect())
}

pub fn select_near_birthday<'a>(
    events: &'a [Event],
    customer: &Customer,
    days_far: i64,
    window: BirthdayWindow,
    today: NaiveDate,
) -> Vec<&'a Event> {
    let birthday = next_birthday(customer.birth_date, today);
    tracing::debug!(%birthday, days_far, ?window, "birthday window");

    events
        .iter()
        .filter(|e| {
            let offset = e.date().signed_duration_since(birthday).num_days();
            match window {
                BirthdayWindow::Trailing => offset < days_far,
                BirthdayWindow::Symmetric => offset.abs() < days_far,
            }
        })
        .collect()
}

// ─── Engine ──────────────────────────────────────────────────────

pub struct MarketingEngine<S> {
    events: Vec<Event>,
    cache: DistanceCache,
    sink: S,
}

impl<S: NotificationSink> MarketingEngine<S> {
    pub fn new(events: Vec<Event>, sink: S) -> Self {
        Self::with_cache(events, DistanceCache::unbounded(), sink)
    }

    pub fn with_cache(events: Vec<Event>, cache: DistanceCache, sink: S) -> Self {
        Self { events, cache, sink }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn cache(&self) -> &DistanceCache {
        &self.cache
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Notify the customer of every event in their city. Returns the count sent.
    pub fn notify_same_city(&mut self, customer: &Customer) -> usize {
        let matched = select_same_city(&self.events, customer);
        tracing::info!(customer = %customer.name, city = %customer.city, matched = matched.len(), "same-city selection");
        for e in &matched {
            self.sink.send(customer, e);
        }
        matched.len()
    }

    pub fn notify_closest_cities(&mut self, customer: &Customer, max_cities: usize) -> Result<usize> {
        let matched = select_closest(&self.events, customer, max_cities, &mut self.cache)?;
        tracing::info!(
            customer = %customer.name,
            max_cities,
            matched = matched.len(),
            cached_pairs = self.cache.len(),
            "closest-cities selection"
        );
        for e in &matched {
            self.sink.send(customer, e);
        }
        Ok(matched.len())
    }

    pub fn notify_near_birthday(
        &mut self,
        customer: &Customer,
        days_far: i64,
        window: BirthdayWindow,
        today: NaiveDate,
    ) -> usize {
        let matched = select_near_birthday(&self.events, customer, days_far, window, today);
        tracing::info!(customer = %customer.name, days_far, matched = matched.len(), "birthday selection");
        for e in &matched {
            self.sink.send(customer, e);
        }
        matched.len()
    }

    /// Sort by a field named at runtime (case-insensitive).
    ///
    /// Unknown names fail before any ordering is produced. The events
    /// themselves are never reordered.
    pub fn sort_events_by_field(&self, field_name: &str, ascending: bool) -> Result<Vec<&Event>> {
        let field: SortField = field_name.parse()?;
        Ok(self.sort_events(field, ascending))
    }

    /// Stable in both directions: equal keys keep list order.
    pub fn sort_events(&self, field: SortField, ascending: bool) -> Vec<&Event> {
        let mut sorted: Vec<&Event> = self.events.iter().collect();
        if ascending {
            sorted.sort_by(|a, b| field.compare(a, b));
        } else {
            sorted.sort_by(|a, b| field.compare(b, a));
        }
        tracing::debug!(%field, ascending, count = sorted.len(), "sorted events");
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarketingError;
    use crate::model::{sample_customer, sample_events};
    use crate::notify::MemorySink;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn engine() -> MarketingEngine<MemorySink> {
        MarketingEngine::new(sample_events(), MemorySink::new())
    }

    fn ids(events: &[&Event]) -> Vec<u32> {
        events.iter().map(|e| e.id()).collect()
    }

    // ─── Same city ───────────────────────────────────────────────

    #[test]
    fn test_same_city_new_york() {
        let mut engine = engine();
        let sent = engine.notify_same_city(&sample_customer());
        assert_eq!(sent, 3);
        assert_eq!(engine.sink().event_ids(), &[1, 3, 5]);
        assert_eq!(
            engine.sink().lines()[0],
            "John from New York event Phantom of the Opera at 2023-12-23"
        );
    }

    #[test]
    fn test_same_city_ignores_case() {
        let mut customer = sample_customer();
        customer.city = "nEW yORK".into();
        let events = sample_events();
        assert_eq!(ids(&select_same_city(&events, &customer)), vec![1, 3, 5]);
    }

    #[test]
    fn test_same_city_no_match() {
        let mut customer = sample_customer();
        customer.city = "Springfield".into();
        let mut engine = engine();
        assert_eq!(engine.notify_same_city(&customer), 0);
        assert!(engine.sink().lines().is_empty());
    }

    // ─── Closest cities ──────────────────────────────────────────

    #[test]
    fn test_closest_three() {
        let mut engine = engine();
        let sent = engine.notify_closest_cities(&sample_customer(), 3).unwrap();
        assert_eq!(sent, 3);
        assert_eq!(engine.sink().event_ids(), &[1, 3, 5]);
    }

    #[test]
    fn test_closest_default_breaks_ties_by_list_order() {
        let mut engine = engine();
        engine
            .notify_closest_cities(&sample_customer(), DEFAULT_MAX_CITIES)
            .unwrap();
        // New York x3 (0), then Boston x2 (317)
        assert_eq!(engine.sink().event_ids(), &[1, 3, 5, 4, 6]);
    }

    #[test]
    fn test_closest_ascending_distance() {
        let events = sample_events();
        let mut cache = DistanceCache::unbounded();
        let picked = select_closest(&events, &sample_customer(), 7, &mut cache).unwrap();
        // Washington (349) before Chicago (1034)
        assert_eq!(ids(&picked), vec![1, 3, 5, 4, 6, 9, 7]);
    }

    #[test]
    fn test_closest_more_than_available() {
        let events = sample_events();
        let mut cache = DistanceCache::unbounded();
        let picked = select_closest(&events, &sample_customer(), 100, &mut cache).unwrap();
        assert_eq!(picked.len(), events.len());
        // San Francisco is the farthest from New York
        assert_eq!(picked.last().unwrap().city(), "San Francisco");
    }

    #[test]
    fn test_closest_reuses_cached_distances() {
        let mut engine = engine();
        engine.notify_closest_cities(&sample_customer(), 5).unwrap();
        // one computation per distinct event city
        assert_eq!(engine.cache().misses(), 6);
        assert_eq!(engine.cache().hits(), 6);

        engine.notify_closest_cities(&sample_customer(), 5).unwrap();
        assert_eq!(engine.cache().misses(), 6);
        assert_eq!(engine.cache().hits(), 18);
    }

    #[test]
    fn test_closest_unknown_customer_city() {
        let mut customer = sample_customer();
        customer.city = "Springfield".into();
        let mut engine = engine();
        let err = engine.notify_closest_cities(&customer, 5).unwrap_err();
        assert_eq!(err, MarketingError::UnknownCity("Springfield".into()));
    }

    #[test]
    fn test_closest_unknown_event_city_sends_nothing() {
        let mut events = sample_events();
        events.push(Event::new(13, "Local Band", "Atlantis", d(2023, 6, 1)));
        let mut engine = MarketingEngine::new(events, MemorySink::new());

        let err = engine.notify_closest_cities(&sample_customer(), 1).unwrap_err();
        assert_eq!(err, MarketingError::UnknownCity("Atlantis".into()));
        assert!(engine.sink().event_ids().is_empty());
    }

    #[test]
    fn test_closest_with_bounded_cache() {
        let cache = DistanceCache::bounded(std::num::NonZeroUsize::new(2).unwrap());
        let mut engine = MarketingEngine::with_cache(sample_events(), cache, MemorySink::new());
        engine.notify_closest_cities(&sample_customer(), 3).unwrap();

        assert_eq!(engine.cache().len(), 2);
        assert_eq!(engine.into_sink().event_ids(), &[1, 3, 5]);
    }

    // ─── Birthday ────────────────────────────────────────────────

    #[test]
    fn test_next_birthday_rolls_over() {
        let born = d(1995, 5, 10);
        assert_eq!(next_birthday(born, d(2023, 1, 15)), d(2023, 5, 10));
        assert_eq!(next_birthday(born, d(2023, 5, 10)), d(2023, 5, 10));
        assert_eq!(next_birthday(born, d(2023, 5, 11)), d(2024, 5, 10));
    }

    #[test]
    fn test_next_birthday_leap_day() {
        let born = d(2000, 2, 29);
        assert_eq!(next_birthday(born, d(2023, 1, 1)), d(2023, 2, 28));
        assert_eq!(next_birthday(born, d(2024, 1, 1)), d(2024, 2, 29));
        assert_eq!(next_birthday(born, d(2023, 3, 1)), d(2024, 2, 29));
    }

    #[test]
    fn test_birthday_window_boundary_excluded() {
        let events = vec![
            Event::new(1, "On the edge", "Boston", d(2023, 6, 9)),
            Event::new(2, "Just inside", "Boston", d(2023, 6, 8)),
            Event::new(3, "Birthday party", "Boston", d(2023, 5, 10)),
        ];
        let customer = sample_customer();
        let picked = select_near_birthday(
            &events,
            &customer,
            DEFAULT_DAYS_FAR,
            BirthdayWindow::Trailing,
            d(2023, 1, 1),
        );
        assert_eq!(ids(&picked), vec![2, 3]);
    }

    #[test]
    fn test_trailing_window_keeps_past_events() {
        let mut engine = engine();
        let sent = engine.notify_near_birthday(
            &sample_customer(),
            DEFAULT_DAYS_FAR,
            BirthdayWindow::Trailing,
            d(2023, 1, 15),
        );
        // Washington on 05-22 is 12 days after; Chicago on 01-01 is far before
        assert_eq!(sent, 2);
        assert_eq!(engine.sink().event_ids(), &[9, 10]);
    }

    #[test]
    fn test_symmetric_window() {
        let events = sample_events();
        let picked = select_near_birthday(
            &events,
            &sample_customer(),
            DEFAULT_DAYS_FAR,
            BirthdayWindow::Symmetric,
            d(2023, 1, 15),
        );
        assert_eq!(ids(&picked), vec![9]);
    }

    // ─── Sorting ─────────────────────────────────────────────────

    #[test]
    fn test_sort_by_date_ascending() {
        let engine = engine();
        let sorted = engine.sort_events_by_field("Date", true).unwrap();
        assert_eq!(ids(&sorted), vec![10, 9, 7, 11, 8, 6, 5, 4, 2, 3, 1, 12]);
        assert!(sorted.windows(2).all(|w| w[0].date() <= w[1].date()));
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let engine = engine();
        let sorted = engine.sort_events_by_field("date", false).unwrap();
        // 7 and 11 share 2023-07-04 and keep list order
        assert_eq!(ids(&sorted), vec![12, 1, 3, 2, 4, 5, 6, 8, 7, 11, 9, 10]);
    }

    #[test]
    fn test_sort_unknown_field() {
        let engine = engine();
        let err = engine.sort_events_by_field("Foo", true).unwrap_err();
        assert_eq!(err, MarketingError::UnknownField("Foo".into()));
    }

    #[test]
    fn test_sort_reverse_without_ties() {
        let engine = engine();
        let asc = engine.sort_events_by_field("Id", true).unwrap();
        let mut desc = engine.sort_events_by_field("Id", false).unwrap();
        desc.reverse();
        assert_eq!(ids(&asc), ids(&desc));
    }

    #[test]
    fn test_sort_leaves_events_untouched() {
        let engine = engine();
        let sorted = engine.sort_events(SortField::Name, true);
        assert_eq!(sorted[0].name(), "LadyGaGa");
        // still restartable
        assert_eq!(sorted.iter().count(), sorted.iter().count());

        let order: Vec<u32> = engine.events().iter().map(Event::id).collect();
        assert_eq!(order, (1..=12).collect::<Vec<_>>());
    }
}
