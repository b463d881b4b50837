use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/checkin", post(handlers::checkin_form))
        .route("/api/checkin", post(handlers::checkin))
        .route("/api/streak", get(handlers::get_streak))
        .route(
            "/api/medications",
            get(handlers::list_medications).post(handlers::log_medication),
        )
        .route("/api/calendar", get(handlers::get_calendar))
        .route(
            "/api/glucose",
            get(handlers::get_glucose).post(handlers::log_glucose),
        )
        .with_state(state)
}
