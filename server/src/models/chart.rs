use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{EventType, MarketingSource};

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Hour => "Hour",
            TimeUnit::Day => "Day",
            TimeUnit::Week => "Week",
            TimeUnit::Month => "Month",
            TimeUnit::Year => "Year",
        }
    }
}

/// Value of the grouping dimension for one bucket.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum GroupKey {
    Text(&'static str),
    Number(i64),
    Date(NaiveDate),
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GroupCount {
    pub key: GroupKey,
    pub event_type: EventType,
    pub count: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Distribution {
    pub title: String,
    pub dimension: &'static str,
    pub groups: Vec<GroupCount>,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.groups.iter().map(|group| group.count).sum()
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MarketingCount {
    pub location: &'static str,
    pub marketing_source: MarketingSource,
    pub count: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MarketingBreakdown {
    pub title: &'static str,
    pub rows: Vec<MarketingCount>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub events: usize,
    pub anomaly: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AnomalyReport {
    pub title: &'static str,
    pub mean: f64,
    pub std_dev: f64,
    pub threshold: f64,
    pub days: Vec<DailyCount>,
}

impl AnomalyReport {
    pub fn anomalous_days(&self) -> impl Iterator<Item = &DailyCount> {
        self.days.iter().filter(|day| day.anomaly)
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SummaryRow {
    pub stat: &'static str,
    pub values: Vec<Option<String>>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SummaryTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<SummaryRow>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SummaryReport {
    pub text: String,
    pub table: SummaryTable,
}
