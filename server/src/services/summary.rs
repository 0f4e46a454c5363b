use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{Event, SummaryReport, SummaryRow, SummaryTable};
use crate::services::utils::{mean, quantile, std_dev};

const STATS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

enum ColumnStats {
    Categorical {
        count: usize,
        unique: usize,
        top: Option<(String, usize)>,
    },
    Numeric {
        count: usize,
        values: Vec<f64>,
    },
    Timestamp {
        count: usize,
        seconds: Vec<f64>,
    },
}

impl ColumnStats {
    fn categorical(values: impl Iterator<Item = String>) -> Self {
        let mut order: Vec<String> = Vec::new();
        let mut freq: HashMap<String, usize> = HashMap::new();
        let mut count = 0;

        for value in values {
            count += 1;
            let slot = freq.entry(value.clone()).or_insert_with(|| {
                order.push(value);
                0
            });
            *slot += 1;
        }

        // Ties go to the value seen first.
        let mut top: Option<(String, usize)> = None;
        for value in order.iter() {
            let n = freq[value];
            if top.as_ref().map_or(true, |(_, best)| n > *best) {
                top = Some((value.clone(), n));
            }
        }

        ColumnStats::Categorical {
            count,
            unique: order.len(),
            top,
        }
    }

    fn numeric(values: impl Iterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = values.collect();
        values.sort_by(f64::total_cmp);
        ColumnStats::Numeric {
            count: values.len(),
            values,
        }
    }

    fn timestamp(values: impl Iterator<Item = DateTime<Utc>>) -> Self {
        let mut seconds: Vec<f64> = values.map(|t| t.timestamp() as f64).collect();
        seconds.sort_by(f64::total_cmp);
        ColumnStats::Timestamp {
            count: seconds.len(),
            seconds,
        }
    }

    fn cell(&self, stat: &str) -> Option<String> {
        match self {
            ColumnStats::Categorical { count, unique, top } => match stat {
                "count" => Some(count.to_string()),
                "unique" => Some(unique.to_string()),
                "top" => top.as_ref().map(|(value, _)| value.clone()),
                "freq" => top.as_ref().map(|(_, n)| n.to_string()),
                _ => None,
            },
            ColumnStats::Numeric { count, values } => match stat {
                "count" => Some(count.to_string()),
                "mean" => mean(values).map(format_number),
                "std" => std_dev(values, 1).map(format_number),
                _ => quantile_for(stat)
                    .and_then(|q| quantile(values, q))
                    .map(format_number),
            },
            ColumnStats::Timestamp { count, seconds } => match stat {
                "count" => Some(count.to_string()),
                "mean" => mean(seconds).and_then(format_timestamp),
                _ => quantile_for(stat)
                    .and_then(|q| quantile(seconds, q))
                    .and_then(format_timestamp),
            },
        }
    }
}

fn quantile_for(stat: &str) -> Option<f64> {
    match stat {
        "min" => Some(0.0),
        "25%" => Some(0.25),
        "50%" => Some(0.5),
        "75%" => Some(0.75),
        "max" => Some(1.0),
        _ => None,
    }
}

fn format_number(value: f64) -> String {
    format!("{value:.6}")
}

fn format_timestamp(seconds: f64) -> Option<String> {
    DateTime::from_timestamp(seconds.round() as i64, 0)
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
}

fn column_stats(events: &[Event]) -> Vec<(&'static str, ColumnStats)> {
    vec![
        (
            "timestamp",
            ColumnStats::timestamp(events.iter().map(|e| e.timestamp)),
        ),
        (
            "ip",
            ColumnStats::categorical(events.iter().map(|e| e.ip.to_string())),
        ),
        (
            "location",
            ColumnStats::categorical(events.iter().map(|e| e.location.to_string())),
        ),
        (
            "age",
            ColumnStats::numeric(events.iter().map(|e| f64::from(e.age))),
        ),
        (
            "job_type",
            ColumnStats::categorical(events.iter().map(|e| e.job_type.to_string())),
        ),
        (
            "event_type",
            ColumnStats::categorical(events.iter().map(|e| e.event_type.to_string())),
        ),
        (
            "marketing_source",
            ColumnStats::categorical(events.iter().map(|e| e.marketing_source.to_string())),
        ),
        (
            "hour",
            ColumnStats::numeric(events.iter().map(|e| f64::from(e.hour))),
        ),
        (
            "day",
            ColumnStats::categorical(events.iter().map(|e| e.day.to_string())),
        ),
    ]
}

/// Describes every column of the sample: counts and most frequent values for
/// categorical columns, moments and quartiles for numeric ones.
pub fn summary_statistics(events: &[Event]) -> SummaryReport {
    let columns = column_stats(events);

    let rows = STATS
        .iter()
        .map(|&stat| SummaryRow {
            stat,
            values: columns.iter().map(|(_, stats)| stats.cell(stat)).collect(),
        })
        .collect();

    let table = SummaryTable {
        columns: columns.iter().map(|(name, _)| *name).collect(),
        rows,
    };

    SummaryReport {
        text: render_table(&table),
        table,
    }
}

/// Renders the table as fixed-width text, one line per statistic, with `NaN`
/// for cells that do not apply to a column.
pub fn render_table(table: &SummaryTable) -> String {
    let label_width = table.rows.iter().map(|row| row.stat.len()).max().unwrap_or(0);

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            table
                .rows
                .iter()
                .map(|row| row.values[i].as_deref().unwrap_or("NaN").len())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format!("{:label_width$}", "");
    for (name, width) in table.columns.iter().zip(widths.iter().copied()) {
        out.push_str(&format!("  {name:>width$}"));
    }
    out.push('\n');

    for row in &table.rows {
        out.push_str(&format!("{:<label_width$}", row.stat));
        for (value, width) in row.values.iter().zip(widths.iter().copied()) {
            let value = value.as_deref().unwrap_or("NaN");
            out.push_str(&format!("  {value:>width$}"));
        }
        out.push('\n');
    }

    out
}
