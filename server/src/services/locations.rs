use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

use crate::models::Event;

pub const CONTINENTS: [(&str, &[&str]); 6] = [
    ("Europe", &["UK", "Germany", "France", "Spain", "Italy", "Russia"]),
    ("North America", &["USA", "Canada", "Mexico"]),
    ("Asia", &["India", "China", "Japan"]),
    ("Africa", &["South Africa", "Nigeria", "Kenya"]),
    ("Oceania", &["Australia", "New Zealand"]),
    ("South America", &["Brazil"]),
];

pub fn continent_names() -> impl Iterator<Item = &'static str> {
    CONTINENTS.iter().map(|(name, _)| *name)
}

pub fn countries_of(continent: &str) -> &'static [&'static str] {
    CONTINENTS
        .iter()
        .find(|(name, _)| *name == continent)
        .map(|(_, countries)| *countries)
        .unwrap_or(&[])
}

/// Union of the country buckets of every selected continent. Unknown
/// continent names contribute nothing.
pub fn resolve_locations<I, S>(selected_continents: I) -> HashSet<&'static str>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    selected_continents
        .into_iter()
        .flat_map(|continent| countries_of(continent.as_ref()).iter().copied())
        .collect()
}

pub fn filter_by_locations<'a, S>(
    events: &'a [Event],
    countries: &'a HashSet<S>,
) -> impl Iterator<Item = &'a Event> + 'a
where
    S: Borrow<str> + Eq + Hash,
{
    events
        .iter()
        .filter(move |event| countries.contains(event.location))
}

/// Distinct locations in first-seen order.
pub fn unique_locations(events: &[Event]) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    events
        .iter()
        .map(|event| event.location)
        .filter(|location| seen.insert(*location))
        .collect()
}
