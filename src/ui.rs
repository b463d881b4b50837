use crate::models::{CalendarResponse, DailyStatusPoint, StreakResponse};
use crate::streak::DayStatus;

pub fn render_index(
    streak: &StreakResponse,
    recent: &[DailyStatusPoint],
    calendar: &CalendarResponse,
) -> String {
    let status = if streak.is_active {
        "Keep it up!"
    } else {
        "Log today to start a new streak."
    };
    let last_logged = streak
        .last_logged
        .map(|date| date.to_string())
        .unwrap_or_else(|| "never".to_string());

    INDEX_HTML
        .replace("{{USER}}", &streak.user_id)
        .replace("{{TODAY}}", &streak.today.to_string())
        .replace("{{STREAK}}", &streak.length.to_string())
        .replace("{{STREAK_STATUS}}", status)
        .replace("{{LAST_LOGGED}}", &last_logged)
        .replace("{{RECENT}}", &render_recent(recent))
        .replace("{{MONTH}}", &calendar.month)
        .replace("{{CALENDAR}}", &render_calendar(calendar))
        .replace(
            "{{RATE}}",
            &format!("{:.0}%", calendar.adherence_rate * 100.0),
        )
}

fn render_recent(recent: &[DailyStatusPoint]) -> String {
    recent
        .iter()
        .map(|point| {
            format!(
                r#"<li class="day {}"><span>{}</span><b>{}</b></li>"#,
                status_class(point.status),
                point.date.format("%a"),
                status_mark(point.status),
            )
        })
        .collect()
}

fn render_calendar(calendar: &CalendarResponse) -> String {
    let mut rows = String::new();
    for week in &calendar.weeks {
        rows.push_str("<tr>");
        for cell in week {
            match cell {
                Some(day) => rows.push_str(&format!(
                    r#"<td class="{}">{} {}</td>"#,
                    status_class(day.status),
                    day.day,
                    status_mark(day.status),
                )),
                None => rows.push_str("<td></td>"),
            }
        }
        rows.push_str("</tr>");
    }
    rows
}

fn status_class(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Adherent => "adherent",
        DayStatus::Missed => "missed",
        DayStatus::Upcoming => "upcoming",
    }
}

fn status_mark(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Adherent => "&#10003;",
        DayStatus::Missed => "&middot;",
        DayStatus::Upcoming => "",
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Medication Adherence</title>
  <style>
    :root {
      --bg: #f4f7f5;
      --ink: #1f2d2a;
      --accent: #2f8f6f;
      --miss: #d9735b;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(31, 45, 42, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      display: grid;
      gap: 4px;
    }

    .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      opacity: 0.7;
    }

    .value {
      font-size: 1.8rem;
      font-weight: 600;
    }

    button {
      border: none;
      border-radius: 14px;
      padding: 14px 22px;
      font-size: 1rem;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    .recent {
      display: flex;
      gap: 8px;
      list-style: none;
      padding: 0;
      margin: 0;
    }

    .day {
      flex: 1;
      display: grid;
      place-items: center;
      gap: 4px;
      padding: 10px 0;
      border-radius: 12px;
      background: #eef2f0;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      text-align: center;
    }

    td, th {
      padding: 8px 0;
    }

    .adherent {
      color: var(--accent);
      font-weight: 600;
    }

    .missed {
      color: var(--miss);
    }

    .upcoming {
      opacity: 0.45;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Medication Adherence</h1>
      <p class="subtitle">Signed in as <b id="user">{{USER}}</b> &middot; {{TODAY}}</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Current streak</span>
        <span id="streak" class="value">{{STREAK}} days</span>
        <span>{{STREAK_STATUS}}</span>
      </div>
      <div class="stat">
        <span class="label">Last logged</span>
        <span id="last-logged" class="value">{{LAST_LOGGED}}</span>
      </div>
      <div class="stat">
        <span class="label">Adherence this month</span>
        <span id="rate" class="value">{{RATE}}</span>
      </div>
    </section>

    <form method="post" action="/checkin?user={{USER}}">
      <button id="checkin-btn" type="submit">Mark as taken</button>
    </form>

    <section>
      <h2>Last 7 days</h2>
      <ul class="recent">{{RECENT}}</ul>
    </section>

    <section>
      <h2>Calendar {{MONTH}}</h2>
      <table>
        <thead>
          <tr><th>Mon</th><th>Tue</th><th>Wed</th><th>Thu</th><th>Fri</th><th>Sat</th><th>Sun</th></tr>
        </thead>
        <tbody>{{CALENDAR}}</tbody>
      </table>
    </section>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{build_calendar, recent_days};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    #[test]
    fn index_shows_streak_and_calendar() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let dates: BTreeSet<_> = [today, today.pred_opt().unwrap()].into_iter().collect();
        let streak = StreakResponse {
            user_id: "alice".into(),
            today,
            length: 2,
            is_active: true,
            last_logged: Some(today),
        };
        let recent = recent_days(&dates, today, 7);
        let calendar = build_calendar(&dates, today, today);

        let html = render_index(&streak, &recent, &calendar);
        assert!(html.contains(r#"<span id="streak" class="value">2 days</span>"#));
        assert!(html.contains("Calendar 2026-10"));
        assert!(html.contains("/checkin?user=alice"));
        assert!(!html.contains("{{"));
    }
}
