use crate::models::{CalendarDay, CalendarResponse, DailyStatusPoint};
use crate::streak::{classify_days, DayStatus};
use chrono::{Datelike, Days, Months, NaiveDate};
use std::collections::BTreeSet;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Parses `YYYY-MM` into the first day of that month. Years outside 1..=9999 are rejected.
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d").ok()?;
    (MIN_YEAR..=MAX_YEAR).contains(&date.year()).then_some(date)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(start: NaiveDate) -> NaiveDate {
    start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start)
}

pub fn build_calendar(
    dates: &BTreeSet<NaiveDate>,
    month: NaiveDate,
    today: NaiveDate,
) -> CalendarResponse {
    let first = month_start(month);
    let last = month_end(first);
    let statuses = classify_days(dates, first, last, today);

    let mut weeks = Vec::new();
    let mut cursor = Some(week_start(first));
    while let Some(start) = cursor.filter(|start| *start <= last) {
        let week = (0..7)
            .map(|offset| {
                let date = start.checked_add_days(Days::new(offset))?;
                statuses.get(&date).map(|status| CalendarDay {
                    date,
                    day: date.day(),
                    status: *status,
                })
            })
            .collect();
        weeks.push(week);
        cursor = start.checked_add_days(Days::new(7));
    }

    let adherent_days = count(statuses.values(), DayStatus::Adherent);
    let missed_days = count(statuses.values(), DayStatus::Missed);
    let elapsed = adherent_days + missed_days;
    let adherence_rate = if elapsed == 0 {
        0.0
    } else {
        f64::from(adherent_days) / f64::from(elapsed)
    };

    CalendarResponse {
        month: first.format("%Y-%m").to_string(),
        weeks,
        adherent_days,
        missed_days,
        adherence_rate,
    }
}

/// The last `days` days ending today, oldest first.
pub fn recent_days(dates: &BTreeSet<NaiveDate>, today: NaiveDate, days: u32) -> Vec<DailyStatusPoint> {
    if days == 0 {
        return Vec::new();
    }
    let start = today
        .checked_sub_days(Days::new(u64::from(days) - 1))
        .unwrap_or(NaiveDate::MIN);
    classify_days(dates, start, today, today)
        .into_iter()
        .map(|(date, status)| DailyStatusPoint { date, status })
        .collect()
}

fn count<'a>(statuses: impl Iterator<Item = &'a DayStatus>, wanted: DayStatus) -> u32 {
    statuses.filter(|status| **status == wanted).count() as u32
}

fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}
