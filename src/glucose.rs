use crate::models::{GlucoseReading, GlucoseSummary};
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;

/// mg/dL
pub const HIGH_THRESHOLD: f64 = 180.0;
pub const LOW_THRESHOLD: f64 = 70.0;
pub const MAX_LEVEL: f64 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseRisk {
    Low,
    Normal,
    High,
}

impl GlucoseRisk {
    pub fn classify(level: f64) -> Self {
        if level > HIGH_THRESHOLD {
            GlucoseRisk::High
        } else if level < LOW_THRESHOLD {
            GlucoseRisk::Low
        } else {
            GlucoseRisk::Normal
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyGlucosePoint {
    pub hour: NaiveDateTime,
    pub average: f64,
    pub count: u32,
}

pub fn hourly_averages<'a, I>(readings: I) -> Vec<HourlyGlucosePoint>
where
    I: IntoIterator<Item = &'a GlucoseReading>,
{
    let mut buckets: BTreeMap<NaiveDateTime, (f64, u32)> = BTreeMap::new();
    for reading in readings {
        let bucket = buckets.entry(floor_to_hour(reading.reading_time)).or_default();
        bucket.0 += reading.glucose_level;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(hour, (sum, count))| HourlyGlucosePoint {
            hour,
            average: sum / f64::from(count),
            count,
        })
        .collect()
}

pub fn summarize<'a, I>(readings: I) -> GlucoseSummary
where
    I: IntoIterator<Item = &'a GlucoseReading>,
{
    let mut readings: Vec<&GlucoseReading> = readings.into_iter().collect();
    readings.sort_by_key(|reading| reading.reading_time);

    let latest = readings.last().map(|reading| (*reading).clone());
    let average = if readings.is_empty() {
        None
    } else {
        let sum: f64 = readings.iter().map(|reading| reading.glucose_level).sum();
        Some(sum / readings.len() as f64)
    };
    let count_risk = |risk: GlucoseRisk| {
        readings
            .iter()
            .filter(|reading| GlucoseRisk::classify(reading.glucose_level) == risk)
            .count()
    };

    GlucoseSummary {
        readings: readings.len(),
        average,
        high_readings: count_risk(GlucoseRisk::High),
        low_readings: count_risk(GlucoseRisk::Low),
        hourly: hourly_averages(readings.iter().copied()),
        latest_risk: latest.as_ref().map(|reading| GlucoseRisk::classify(reading.glucose_level)),
        latest,
    }
}

fn floor_to_hour(time: NaiveDateTime) -> NaiveDateTime {
    time.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}
