use crate::glucose::{GlucoseRisk, HourlyGlucosePoint};
use crate::streak::DayStatus;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub const DAILY_MEDICATION: &str = "Daily Medication";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationRecord {
    pub user_id: String,
    pub med_name: String,
    #[serde(default)]
    pub dosage: Option<f64>,
    #[serde(default)]
    pub time_taken: Option<NaiveTime>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlucoseReading {
    pub user_id: String,
    pub glucose_level: f64,
    pub reading_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub medications: Vec<MedicationRecord>,
    #[serde(default)]
    pub glucose_readings: Vec<GlucoseReading>,
}

impl AppData {
    pub fn medications_for<'a>(
        &'a self,
        user_id: &'a str,
    ) -> impl Iterator<Item = &'a MedicationRecord> + 'a {
        self.medications
            .iter()
            .filter(move |record| record.user_id == user_id)
    }

    pub fn glucose_for<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a GlucoseReading> + 'a {
        self.glucose_readings
            .iter()
            .filter(move |reading| reading.user_id == user_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct LogMedicationRequest {
    pub med_name: String,
    pub dosage: Option<f64>,
    pub time_taken: Option<NaiveTime>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct LogGlucoseRequest {
    pub glucose_level: f64,
    pub reading_time: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MonthQuery {
    pub month: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub user_id: String,
    pub today: NaiveDate,
    pub length: u32,
    pub is_active: bool,
    pub last_logged: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub status: DayStatus,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub month: String,
    pub weeks: Vec<Vec<Option<CalendarDay>>>,
    pub adherent_days: u32,
    pub missed_days: u32,
    pub adherence_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct DailyStatusPoint {
    pub date: NaiveDate,
    pub status: DayStatus,
}

#[derive(Debug, Serialize)]
pub struct GlucoseLogResponse {
    pub reading: GlucoseReading,
    pub risk: GlucoseRisk,
}

#[derive(Debug, Serialize)]
pub struct GlucoseSummary {
    pub readings: usize,
    pub average: Option<f64>,
    pub high_readings: usize,
    pub low_readings: usize,
    pub hourly: Vec<HourlyGlucosePoint>,
    pub latest: Option<GlucoseReading>,
    pub latest_risk: Option<GlucoseRisk>,
}
