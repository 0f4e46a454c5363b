use std::net::Ipv4Addr;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::models::{Event, EventType, JobType, MarketingSource};

pub const LOCATIONS: [&str; 18] = [
    "UK",
    "USA",
    "Germany",
    "India",
    "South Africa",
    "France",
    "Spain",
    "Canada",
    "Mexico",
    "China",
    "Japan",
    "Nigeria",
    "Kenya",
    "Australia",
    "New Zealand",
    "Brazil",
    "Italy",
    "Russia",
];

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 65;

const HISTORY_DAYS: i64 = 3 * 365;

fn pick<T: Copy, R: Rng>(rng: &mut R, values: &[T]) -> T {
    values[rng.random_range(0..values.len())]
}

/// Generates `n` events with timestamps in the three years before now.
pub fn generate_synthetic_events(n: usize) -> Vec<Event> {
    let mut rng = rand::rng();
    generate_synthetic_events_with(&mut rng, Utc::now(), n)
}

/// Every field is drawn independently and uniformly from its domain.
pub fn generate_synthetic_events_with<R: Rng>(
    rng: &mut R,
    now: DateTime<Utc>,
    n: usize,
) -> Vec<Event> {
    let start = now - Duration::days(HISTORY_DAYS);
    let span_seconds = (now - start).num_seconds();

    (0..n)
        .map(|_| {
            let timestamp = start + Duration::seconds(rng.random_range(0..=span_seconds));
            let ip = Ipv4Addr::from(rng.random::<u32>());
            let location = pick(rng, &LOCATIONS);
            let age = rng.random_range(MIN_AGE..=MAX_AGE);
            let job_type = pick(rng, &JobType::ALL);
            let event_type = pick(rng, &EventType::ALL);
            let marketing_source = pick(rng, &MarketingSource::ALL);

            Event::new(
                timestamp,
                ip,
                location,
                age,
                job_type,
                event_type,
                marketing_source,
            )
        })
        .collect()
}
