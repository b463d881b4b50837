use crate::calendar::{build_calendar, month_start, parse_month, recent_days};
use crate::context::RequestContext;
use crate::errors::AppError;
use crate::glucose::{summarize, GlucoseRisk, MAX_LEVEL};
use crate::models::{
    AppData, CalendarResponse, GlucoseLogResponse, GlucoseReading, GlucoseSummary,
    LogGlucoseRequest, LogMedicationRequest, MedicationRecord, MonthQuery, StreakResponse,
    DAILY_MEDICATION,
};
use crate::repository::AdherenceRepository;
use crate::state::AppState;
use crate::storage::commit;
use crate::streak::compute_streak;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use chrono::NaiveDate;
use tracing::info;

const MAX_MED_NAME_LEN: usize = 100;
const RECENT_DAYS: u32 = 7;

pub async fn index(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    let data = state.data.lock().await;
    let dates = data.adherence_dates(&ctx.user_id);
    let streak = streak_response(&data, &ctx);
    let recent = recent_days(&dates, ctx.today, RECENT_DAYS);
    let calendar = build_calendar(&dates, month_start(ctx.today), ctx.today);
    Html(render_index(&streak, &recent, &calendar))
}

pub async fn get_streak(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<StreakResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(streak_response(&data, &ctx)))
}

pub async fn checkin(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<StreakResponse>, AppError> {
    let response = apply_checkin(&state, &ctx).await?;
    Ok(Json(response))
}

pub async fn checkin_form(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Redirect, AppError> {
    apply_checkin(&state, &ctx).await?;
    Ok(Redirect::to(&format!("/?user={}", ctx.user_id)))
}

pub async fn log_medication(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<LogMedicationRequest>,
) -> Result<(StatusCode, Json<MedicationRecord>), AppError> {
    let med_name = payload.med_name.trim();
    if med_name.is_empty() {
        return Err(AppError::bad_request("med_name must not be empty"));
    }
    if med_name.chars().count() > MAX_MED_NAME_LEN {
        return Err(AppError::bad_request("med_name must be at most 100 characters"));
    }
    if let Some(dosage) = payload.dosage {
        if !dosage.is_finite() || dosage < 0.0 {
            return Err(AppError::bad_request("dosage must be a non-negative number"));
        }
    }

    let record = MedicationRecord {
        user_id: ctx.user_id.clone(),
        med_name: med_name.to_string(),
        dosage: payload.dosage,
        time_taken: payload.time_taken,
        date: payload.date.unwrap_or(ctx.today),
    };
    append_medication(&state, record.clone()).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_medications(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<MedicationRecord>>, AppError> {
    let month = query.month.as_deref().map(require_month).transpose()?;

    let data = state.data.lock().await;
    let mut records: Vec<MedicationRecord> = data
        .medications_for(&ctx.user_id)
        .filter(|record| month.is_none_or(|start| month_start(record.date) == start))
        .cloned()
        .collect();
    records.sort_by_key(|record| (record.date, record.time_taken));

    Ok(Json(records))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let month = match query.month.as_deref() {
        Some(value) => require_month(value)?,
        None => month_start(ctx.today),
    };

    let data = state.data.lock().await;
    let dates = data.adherence_dates(&ctx.user_id);
    Ok(Json(build_calendar(&dates, month, ctx.today)))
}

pub async fn log_glucose(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<LogGlucoseRequest>,
) -> Result<(StatusCode, Json<GlucoseLogResponse>), AppError> {
    let level = payload.glucose_level;
    if !level.is_finite() || level <= 0.0 || level > MAX_LEVEL {
        return Err(AppError::bad_request(
            "glucose_level must be a positive number of at most 600 mg/dL",
        ));
    }

    let reading = GlucoseReading {
        user_id: ctx.user_id.clone(),
        glucose_level: payload.glucose_level,
        reading_time: payload.reading_time.unwrap_or_else(|| state.clock.now()),
    };
    let risk = GlucoseRisk::classify(reading.glucose_level);

    {
        let mut data = state.data.lock().await;
        commit(&state.data_path, &mut data, |next| {
            next.glucose_readings.push(reading.clone())
        })
        .await?;
    }
    info!(user_id = %ctx.user_id, level = reading.glucose_level, ?risk, "logged glucose reading");

    Ok((StatusCode::CREATED, Json(GlucoseLogResponse { reading, risk })))
}

pub async fn get_glucose(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<GlucoseSummary>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(summarize(data.glucose_for(&ctx.user_id))))
}

async fn apply_checkin(state: &AppState, ctx: &RequestContext) -> Result<StreakResponse, AppError> {
    let record = MedicationRecord {
        user_id: ctx.user_id.clone(),
        med_name: DAILY_MEDICATION.to_string(),
        dosage: None,
        time_taken: Some(state.clock.now().time()),
        date: ctx.today,
    };
    append_medication(state, record).await?;

    let data = state.data.lock().await;
    Ok(streak_response(&data, ctx))
}

async fn append_medication(state: &AppState, record: MedicationRecord) -> Result<(), AppError> {
    let mut data = state.data.lock().await;
    commit(&state.data_path, &mut data, |next| next.medications.push(record.clone())).await?;
    info!(user_id = %record.user_id, med_name = %record.med_name, date = %record.date, "logged medication");
    Ok(())
}

fn streak_response(data: &AppData, ctx: &RequestContext) -> StreakResponse {
    let dates = data.adherence_dates(&ctx.user_id);
    let result = compute_streak(dates.iter().copied(), ctx.today);
    StreakResponse {
        user_id: ctx.user_id.clone(),
        today: ctx.today,
        length: result.length,
        is_active: result.is_active,
        last_logged: dates.range(..=ctx.today).next_back().copied(),
    }
}

fn require_month(value: &str) -> Result<NaiveDate, AppError> {
    parse_month(value).ok_or_else(|| AppError::bad_request("month must be formatted as YYYY-MM"))
}
