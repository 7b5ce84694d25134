use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::domain::CalendarService;
use crate::error::{AppError, AppResult};
use crate::AppState;

/// The user behind the request's `Authorization: Bearer <token>` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub u64);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Please sign in to continue".to_string()))?;

        let user_id = state.auth_service.authenticate(token)?;
        debug!("Authenticated request for user {}", user_id);
        Ok(AuthenticatedUser(user_id))
    }
}

/// Query parameters shared by the calendar endpoints
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    /// `YYYY-MM-DD`
    pub selected: Option<String>,
}

impl CalendarQuery {
    /// Month, year and selected day, defaulting to the month of `today`
    pub fn resolve(&self, today: NaiveDate) -> AppResult<(u32, i32, NaiveDate)> {
        let month = self.month.unwrap_or_else(|| today.month());
        let year = self.year.unwrap_or_else(|| today.year());
        CalendarService::validate_month(month)?;

        let selected = match self.selected.as_deref() {
            Some(key) if !key.trim().is_empty() => CalendarService::parse_date_key(key)?,
            _ => today,
        };
        Ok((month, year, selected))
    }
}

/// Parse a `:date` path segment
pub fn path_date(key: &str) -> AppResult<NaiveDate> {
    CalendarService::parse_date_key(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_query_defaults_to_today() {
        let today = date(2025, 8, 20);
        let resolved = CalendarQuery::default().resolve(today).unwrap();
        assert_eq!(resolved, (8, 2025, today));
    }

    #[test]
    fn test_calendar_query_overrides() {
        let query = CalendarQuery {
            month: Some(2),
            year: Some(2024),
            selected: Some("2024-02-29".to_string()),
        };
        assert_eq!(
            query.resolve(date(2025, 8, 20)).unwrap(),
            (2, 2024, date(2024, 2, 29))
        );
    }

    #[test]
    fn test_calendar_query_rejects_bad_values() {
        let bad_month = CalendarQuery {
            month: Some(0),
            ..CalendarQuery::default()
        };
        assert!(bad_month.resolve(date(2025, 1, 1)).is_err());

        let bad_date = CalendarQuery {
            selected: Some("tomorrow".to_string()),
            ..CalendarQuery::default()
        };
        assert!(bad_date.resolve(date(2025, 1, 1)).is_err());
    }
}
