use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::models::{
    AnomalyReport, DailyCount, Distribution, Event, EventType, GroupCount, GroupKey,
    MarketingBreakdown, MarketingCount, TimeUnit,
};
use crate::services::utils::{mean, std_dev};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Location,
    Time(TimeUnit),
    Age,
}

impl Dimension {
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Location => "location",
            Dimension::Time(_) => "time_unit",
            Dimension::Age => "age",
        }
    }

    fn title(self) -> String {
        let label = match self {
            Dimension::Location => "Location",
            Dimension::Time(unit) => unit.label(),
            Dimension::Age => "Age",
        };
        format!("Sales Metrics by {label}")
    }

    fn key_of(self, event: &Event) -> GroupKey {
        match self {
            Dimension::Location => GroupKey::Text(event.location),
            Dimension::Time(unit) => time_unit_of(event, unit),
            Dimension::Age => GroupKey::Number(i64::from(event.age)),
        }
    }
}

pub fn time_unit_of(event: &Event, unit: TimeUnit) -> GroupKey {
    match unit {
        TimeUnit::Hour => GroupKey::Number(i64::from(event.hour)),
        TimeUnit::Day => GroupKey::Date(event.day),
        TimeUnit::Week => GroupKey::Number(i64::from(event.timestamp.iso_week().week())),
        TimeUnit::Month => GroupKey::Number(i64::from(event.timestamp.month())),
        TimeUnit::Year => GroupKey::Number(i64::from(event.timestamp.year())),
    }
}

/// Counts events per (dimension value, event type). Groups keep the order in
/// which their dimension value first appears; within a group event types
/// follow [`EventType::ALL`] and empty pairs are left out.
pub fn distribution_by<'a, I>(events: I, dimension: Dimension) -> Distribution
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut order: Vec<GroupKey> = Vec::new();
    let mut counts: HashMap<GroupKey, [usize; EventType::COUNT]> = HashMap::new();

    for event in events {
        let key = dimension.key_of(event);
        let slots = counts.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            [0; EventType::COUNT]
        });
        slots[event.event_type.index()] += 1;
    }

    let groups = order
        .into_iter()
        .flat_map(|key| {
            let slots = counts.get(&key).copied().unwrap_or_default();
            EventType::ALL
                .into_iter()
                .zip(slots)
                .filter(|(_, count)| *count > 0)
                .map(move |(event_type, count)| GroupCount {
                    key: key.clone(),
                    event_type,
                    count,
                })
        })
        .collect();

    Distribution {
        title: dimension.title(),
        dimension: dimension.name(),
        groups,
    }
}

/// Event counts per (location, marketing source), sorted by location then
/// source.
pub fn marketing_breakdown(events: &[Event]) -> MarketingBreakdown {
    let mut counts = BTreeMap::new();
    for event in events {
        *counts
            .entry((event.location, event.marketing_source))
            .or_insert(0usize) += 1;
    }

    let rows = counts
        .into_iter()
        .map(|((location, marketing_source), count)| MarketingCount {
            location,
            marketing_source,
            count,
        })
        .collect();

    MarketingBreakdown {
        title: "Top Marketing Strategies by Region",
        rows,
    }
}

/// Flags days whose event count is strictly above mean + 2 * population
/// standard deviation of the daily counts of this same sample.
pub fn detect_anomalies(events: &[Event]) -> AnomalyReport {
    let mut per_day = BTreeMap::new();
    for event in events {
        *per_day.entry(event.day).or_insert(0usize) += 1;
    }

    let counts: Vec<f64> = per_day.values().map(|count| *count as f64).collect();
    let mean = mean(&counts).unwrap_or(0.0);
    let std_dev = std_dev(&counts, 0).unwrap_or(0.0);
    let threshold = mean + 2.0 * std_dev;

    let days = per_day
        .into_iter()
        .map(|(day, events)| DailyCount {
            day,
            events,
            anomaly: events as f64 > threshold,
        })
        .collect();

    AnomalyReport {
        title: "Anomalies in Activity",
        mean,
        std_dev,
        threshold,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobType, MarketingSource};
    use crate::services::generator::generate_synthetic_events_with;
    use crate::services::locations::{filter_by_locations, resolve_locations};
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;
    use std::net::Ipv4Addr;

    fn sample(seed: u64, n: usize) -> Vec<Event> {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 8, 30, 0).unwrap();
        generate_synthetic_events_with(&mut StdRng::seed_from_u64(seed), now, n)
    }

    fn event_at(timestamp: DateTime<Utc>, location: &'static str, event_type: EventType) -> Event {
        Event::new(
            timestamp,
            Ipv4Addr::LOCALHOST,
            location,
            40,
            JobType::Prototype,
            event_type,
            MarketingSource::Newsletter,
        )
    }

    #[test]
    fn distribution_counts_sum_to_input_size() {
        let events = sample(11, 1000);
        for dimension in [
            Dimension::Location,
            Dimension::Age,
            Dimension::Time(TimeUnit::Hour),
            Dimension::Time(TimeUnit::Day),
            Dimension::Time(TimeUnit::Week),
            Dimension::Time(TimeUnit::Month),
            Dimension::Time(TimeUnit::Year),
        ] {
            assert_eq!(distribution_by(&events, dimension).total(), events.len());
        }
    }

    #[test]
    fn distribution_groups_follow_first_seen_order() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let events = vec![
            event_at(t, "Kenya", EventType::DemoRequest),
            event_at(t, "UK", EventType::JobPlaced),
            event_at(t, "Kenya", EventType::JobPlaced),
            event_at(t, "Kenya", EventType::DemoRequest),
        ];

        let distribution = distribution_by(&events, Dimension::Location);
        let rows: Vec<(GroupKey, EventType, usize)> = distribution
            .groups
            .into_iter()
            .map(|group| (group.key, group.event_type, group.count))
            .collect();

        assert_eq!(
            rows,
            vec![
                (GroupKey::Text("Kenya"), EventType::JobPlaced, 1),
                (GroupKey::Text("Kenya"), EventType::DemoRequest, 2),
                (GroupKey::Text("UK"), EventType::JobPlaced, 1),
            ]
        );
        assert_eq!(distribution.title, "Sales Metrics by Location");
    }

    #[test]
    fn europe_filter_only_yields_selected_countries() {
        let events = sample(12, 1000);
        let selected: HashSet<&str> = ["UK", "Germany"].into_iter().collect();

        let distribution = distribution_by(filter_by_locations(&events, &selected), Dimension::Location);
        assert!(!distribution.groups.is_empty());
        for group in &distribution.groups {
            assert!(matches!(group.key, GroupKey::Text("UK") | GroupKey::Text("Germany")));
        }

        let europe = resolve_locations(["Europe"]);
        let distribution = distribution_by(filter_by_locations(&events, &europe), Dimension::Location);
        for group in &distribution.groups {
            match group.key {
                GroupKey::Text(country) => assert!(europe.contains(country)),
                ref other => panic!("unexpected key {other:?}"),
            }
        }
    }

    #[test]
    fn time_units_bucket_timestamps() {
        let t = Utc.with_ymd_and_hms(2021, 1, 3, 17, 45, 0).unwrap();
        let event = event_at(t, "UK", EventType::JobPlaced);

        assert_eq!(time_unit_of(&event, TimeUnit::Hour), GroupKey::Number(17));
        assert_eq!(
            time_unit_of(&event, TimeUnit::Day),
            GroupKey::Date(NaiveDate::from_ymd_opt(2021, 1, 3).unwrap())
        );
        // 2021-01-03 is a Sunday in ISO week 53 of 2020
        assert_eq!(time_unit_of(&event, TimeUnit::Week), GroupKey::Number(53));
        assert_eq!(time_unit_of(&event, TimeUnit::Month), GroupKey::Number(1));
        assert_eq!(time_unit_of(&event, TimeUnit::Year), GroupKey::Number(2021));
    }

    #[test]
    fn marketing_breakdown_is_sorted_and_complete() {
        let events = sample(13, 1000);
        let breakdown = marketing_breakdown(&events);

        let total: usize = breakdown.rows.iter().map(|row| row.count).sum();
        assert_eq!(total, events.len());

        let keys: Vec<_> = breakdown
            .rows
            .iter()
            .map(|row| (row.location, row.marketing_source))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn equal_daily_counts_are_never_anomalous() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let events: Vec<Event> = (0..10)
            .flat_map(|day| {
                (0..3).map(move |i| {
                    event_at(start + Duration::days(day) + Duration::hours(i), "UK", EventType::JobPlaced)
                })
            })
            .collect();

        let report = detect_anomalies(&events);
        assert_eq!(report.days.len(), 10);
        assert_eq!(report.std_dev, 0.0);
        assert_eq!(report.threshold, report.mean);
        assert_eq!(report.anomalous_days().count(), 0);
    }

    #[test]
    fn spike_day_is_flagged() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut events: Vec<Event> = (0..20)
            .map(|day| event_at(start + Duration::days(day), "UK", EventType::JobPlaced))
            .collect();
        let spike = start + Duration::days(5);
        events.extend((0..10).map(|_| event_at(spike, "UK", EventType::DemoRequest)));

        let report = detect_anomalies(&events);
        let flagged: Vec<NaiveDate> = report.anomalous_days().map(|day| day.day).collect();
        assert_eq!(flagged, vec![spike.date_naive()]);
        assert!(report.days.windows(2).all(|pair| pair[0].day < pair[1].day));
    }

    #[test]
    fn anomalies_of_empty_sample() {
        let report = detect_anomalies(&[]);
        assert!(report.days.is_empty());
        assert_eq!(report.threshold, 0.0);
    }
}
