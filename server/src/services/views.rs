use std::collections::HashSet;

use serde::Serialize;

use crate::models::{
    AnomalyReport, Distribution, Event, MarketingBreakdown, Role, SummaryReport, TimeUnit,
};
use crate::services::analytics::{
    detect_anomalies, distribution_by, marketing_breakdown, Dimension,
};
use crate::services::locations::{filter_by_locations, resolve_locations};
use crate::services::summary::summary_statistics;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum View {
    GeoDistribution,
    TimeDistribution,
    AgeDistribution,
    SummaryStatistics,
    MarketingStrategies,
    Anomalies,
}

impl View {
    pub fn label(self) -> &'static str {
        match self {
            View::GeoDistribution => "Distribution by Location",
            View::TimeDistribution => "Distribution By Time",
            View::AgeDistribution => "Distribution by Age",
            View::SummaryStatistics => "Summary Statistics",
            View::MarketingStrategies => "Marketing Strategies",
            View::Anomalies => "Anomalies",
        }
    }
}

const USER_VIEWS: &[View] = &[
    View::GeoDistribution,
    View::TimeDistribution,
    View::AgeDistribution,
    View::SummaryStatistics,
    View::MarketingStrategies,
];

const ADMIN_VIEWS: &[View] = &[
    View::GeoDistribution,
    View::TimeDistribution,
    View::AgeDistribution,
    View::SummaryStatistics,
    View::MarketingStrategies,
    View::Anomalies,
];

/// Views a role may open, in tab order.
pub fn visible_views(role: Role) -> &'static [View] {
    match role {
        Role::Admin => ADMIN_VIEWS,
        Role::User => USER_VIEWS,
    }
}

pub fn can_view(role: Role, view: View) -> bool {
    visible_views(role).contains(&view)
}

/// A view together with the filter values its controls currently hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewRequest {
    Geo { continents: Vec<String> },
    Time { unit: TimeUnit },
    Age { countries: Vec<String> },
    Summary,
    Marketing,
    Anomalies,
}

impl ViewRequest {
    pub fn view(&self) -> View {
        match self {
            ViewRequest::Geo { .. } => View::GeoDistribution,
            ViewRequest::Time { .. } => View::TimeDistribution,
            ViewRequest::Age { .. } => View::AgeDistribution,
            ViewRequest::Summary => View::SummaryStatistics,
            ViewRequest::Marketing => View::MarketingStrategies,
            ViewRequest::Anomalies => View::Anomalies,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewData {
    Distribution(Distribution),
    Summary(SummaryReport),
    Marketing(MarketingBreakdown),
    Anomalies(AnomalyReport),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("the {role} role cannot open the {} view", .view.label())]
    Forbidden { role: Role, view: View },
}

pub fn render_view(
    role: Role,
    events: &[Event],
    request: &ViewRequest,
) -> Result<ViewData, ViewError> {
    let view = request.view();
    if !can_view(role, view) {
        return Err(ViewError::Forbidden { role, view });
    }

    let data = match request {
        ViewRequest::Geo { continents } => {
            let countries = resolve_locations(continents);
            ViewData::Distribution(distribution_by(
                filter_by_locations(events, &countries),
                Dimension::Location,
            ))
        }
        ViewRequest::Time { unit } => {
            ViewData::Distribution(distribution_by(events, Dimension::Time(*unit)))
        }
        ViewRequest::Age { countries } => {
            let countries: HashSet<&str> = countries.iter().map(String::as_str).collect();
            ViewData::Distribution(distribution_by(
                filter_by_locations(events, &countries),
                Dimension::Age,
            ))
        }
        ViewRequest::Summary => ViewData::Summary(summary_statistics(events)),
        ViewRequest::Marketing => ViewData::Marketing(marketing_breakdown(events)),
        ViewRequest::Anomalies => ViewData::Anomalies(detect_anomalies(events)),
    };

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupKey;
    use crate::services::generator::generate_synthetic_events_with;
    use chrono::{TimeZone, Utc};
    use rand::{rngs::StdRng, SeedableRng};

    fn sample() -> Vec<Event> {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        generate_synthetic_events_with(&mut StdRng::seed_from_u64(31), now, 1000)
    }

    #[test]
    fn only_admins_see_anomalies() {
        assert!(can_view(Role::Admin, View::Anomalies));
        assert!(!can_view(Role::User, View::Anomalies));
        assert_eq!(visible_views(Role::User).len(), 5);
        assert_eq!(visible_views(Role::Admin).len(), 6);
        for view in visible_views(Role::User) {
            assert!(can_view(Role::Admin, *view));
        }
    }

    #[test]
    fn user_anomaly_request_is_forbidden() {
        let events = sample();
        let err = render_view(Role::User, &events, &ViewRequest::Anomalies).unwrap_err();
        assert_eq!(
            err,
            ViewError::Forbidden {
                role: Role::User,
                view: View::Anomalies
            }
        );

        let data = render_view(Role::Admin, &events, &ViewRequest::Anomalies).unwrap();
        assert!(matches!(data, ViewData::Anomalies(_)));
    }

    #[test]
    fn geo_request_filters_by_continent() {
        let events = sample();
        let request = ViewRequest::Geo {
            continents: vec!["Oceania".into(), "Atlantis".into()],
        };

        let ViewData::Distribution(distribution) = render_view(Role::User, &events, &request).unwrap()
        else {
            panic!("geo view must return a distribution");
        };
        assert!(!distribution.groups.is_empty());
        for group in distribution.groups {
            assert!(matches!(
                group.key,
                GroupKey::Text("Australia") | GroupKey::Text("New Zealand")
            ));
        }
    }

    #[test]
    fn age_request_with_unknown_country_is_empty() {
        let events = sample();
        let request = ViewRequest::Age {
            countries: vec!["Atlantis".into()],
        };

        let ViewData::Distribution(distribution) = render_view(Role::User, &events, &request).unwrap()
        else {
            panic!("age view must return a distribution");
        };
        assert!(distribution.groups.is_empty());
    }

    #[test]
    fn time_request_covers_whole_sample() {
        let events = sample();
        let request = ViewRequest::Time {
            unit: TimeUnit::Month,
        };

        let ViewData::Distribution(distribution) = render_view(Role::User, &events, &request).unwrap()
        else {
            panic!("time view must return a distribution");
        };
        assert_eq!(distribution.total(), events.len());
        assert_eq!(distribution.title, "Sales Metrics by Month");
    }
}
