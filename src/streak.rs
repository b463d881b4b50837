use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakResult {
    pub length: u32,
    pub is_active: bool,
}

impl StreakResult {
    pub const BROKEN: StreakResult = StreakResult {
        length: 0,
        is_active: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Adherent,
    Missed,
    Upcoming,
}

/// Length of the unbroken run of days ending at the most recent adherence date.
///
/// The run only counts while it is still alive: if the latest date is older than
/// yesterday the result is zero, whatever happened before. Dates after `today`
/// are ignored.
pub fn compute_streak<I>(dates: I, today: NaiveDate) -> StreakResult
where
    I: IntoIterator<Item = NaiveDate>,
{
    let dates: BTreeSet<NaiveDate> = dates.into_iter().filter(|date| *date <= today).collect();

    let mut walk = dates.iter().rev();
    let Some(&most_recent) = walk.next() else {
        return StreakResult::BROKEN;
    };

    if (today - most_recent).num_days() > 1 {
        return StreakResult::BROKEN;
    }

    let mut length = 1u32;
    let mut cursor = most_recent;
    for &date in walk {
        if (cursor - date).num_days() != 1 {
            break;
        }
        length = length.saturating_add(1);
        cursor = date;
    }

    StreakResult {
        length,
        is_active: true,
    }
}

pub fn classify_days(
    dates: &BTreeSet<NaiveDate>,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> BTreeMap<NaiveDate, DayStatus> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| (date, day_status(dates, date, today)))
        .collect()
}

pub fn day_status(dates: &BTreeSet<NaiveDate>, date: NaiveDate, today: NaiveDate) -> DayStatus {
    if date > today {
        DayStatus::Upcoming
    } else if dates.contains(&date) {
        DayStatus::Adherent
    } else {
        DayStatus::Missed
    }
}
