use std::fmt;
use std::net::Ipv4Addr;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    JobPlaced,
    JobRequested,
    DemoRequest,
    AssistantRequest,
}

impl EventType {
    pub const COUNT: usize = 4;

    pub const ALL: [EventType; Self::COUNT] = [
        EventType::JobPlaced,
        EventType::JobRequested,
        EventType::DemoRequest,
        EventType::AssistantRequest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::JobPlaced => "job_placed",
            EventType::JobRequested => "job_requested",
            EventType::DemoRequest => "demo_request",
            EventType::AssistantRequest => "assistant_request",
        }
    }

    /// Position of the variant in [`EventType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarketingSource {
    #[serde(rename = "Google Ads")]
    GoogleAds,
    LinkedIn,
    Newsletter,
    Webinar,
}

impl MarketingSource {
    pub const ALL: [MarketingSource; 4] = [
        MarketingSource::GoogleAds,
        MarketingSource::LinkedIn,
        MarketingSource::Newsletter,
        MarketingSource::Webinar,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MarketingSource::GoogleAds => "Google Ads",
            MarketingSource::LinkedIn => "LinkedIn",
            MarketingSource::Newsletter => "Newsletter",
            MarketingSource::Webinar => "Webinar",
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobType {
    #[serde(rename = "AI assistant")]
    AiAssistant,
    Prototype,
    #[serde(rename = "Analytics Tool")]
    AnalyticsTool,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::AiAssistant, JobType::Prototype, JobType::AnalyticsTool];

    pub fn as_str(self) -> &'static str {
        match self {
            JobType::AiAssistant => "AI assistant",
            JobType::Prototype => "Prototype",
            JobType::AnalyticsTool => "Analytics Tool",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(EventType, MarketingSource, JobType);

/// One synthetic interaction record.
///
/// `hour` and `day` are derived from `timestamp` in [`Event::new`] and never
/// recomputed.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub ip: Ipv4Addr,
    pub location: &'static str,
    pub age: u8,
    pub job_type: JobType,
    pub event_type: EventType,
    pub marketing_source: MarketingSource,
    pub hour: u32,
    pub day: NaiveDate,
}

impl Event {
    pub fn new(
        timestamp: DateTime<Utc>,
        ip: Ipv4Addr,
        location: &'static str,
        age: u8,
        job_type: JobType,
        event_type: EventType,
        marketing_source: MarketingSource,
    ) -> Self {
        Event {
            timestamp,
            ip,
            location,
            age,
            job_type,
            event_type,
            marketing_source,
            hour: timestamp.hour(),
            day: timestamp.date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn derived_fields_follow_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2024, 2, 29, 23, 15, 0).unwrap();
        let event = Event::new(
            timestamp,
            Ipv4Addr::new(10, 0, 0, 1),
            "UK",
            30,
            JobType::Prototype,
            EventType::DemoRequest,
            MarketingSource::Webinar,
        );

        assert_eq!(event.hour, 23);
        assert_eq!(event.day, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn event_type_index_matches_all() {
        for (i, event_type) in EventType::ALL.iter().enumerate() {
            assert_eq!(event_type.index(), i);
        }
    }

    #[test]
    fn enums_serialize_with_display_names() {
        assert_eq!(
            serde_json::to_string(&MarketingSource::GoogleAds).unwrap(),
            "\"Google Ads\""
        );
        assert_eq!(
            serde_json::to_string(&EventType::AssistantRequest).unwrap(),
            "\"assistant_request\""
        );
        assert_eq!(JobType::AnalyticsTool.to_string(), "Analytics Tool");
    }
}
