use crate::errors::AppError;
use crate::state::AppState;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use chrono::NaiveDate;
use serde::Deserialize;

pub const USER_HEADER: &str = "x-user-id";
pub const ANONYMOUS: &str = "anonymous";
const MAX_USER_ID_LEN: usize = 64;

/// Who is asking and which calendar day it is for them. Built fresh for every request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_id: String,
    pub today: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    user: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let from_header = match parts.headers.get(USER_HEADER) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| AppError::bad_request("x-user-id must be visible ASCII"))?
                    .to_string(),
            ),
            None => None,
        };

        let raw = match from_header {
            Some(value) => Some(value),
            None => Query::<UserQuery>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|Query(query)| query.user),
        };

        Ok(Self {
            user_id: normalize_user_id(raw.as_deref())?,
            today: state.clock.today(),
        })
    }
}

pub fn normalize_user_id(raw: Option<&str>) -> Result<String, AppError> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Ok(ANONYMOUS.to_string());
    }

    let valid = value.len() <= MAX_USER_ID_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !valid {
        return Err(AppError::bad_request(
            "user id must be at most 64 characters of letters, digits, '_', '.' or '-'",
        ));
    }

    Ok(value.to_string())
}
