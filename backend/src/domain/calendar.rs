//! Calendar domain logic shared by the to-do, meal and finance pages.
//!
//! Produces the month grid each page renders: leading padding cells so the
//! first day lands under its weekday column, then one cell per day carrying
//! the page's own [`DaySummary`]. Dates are keyed as `YYYY-MM-DD` in the
//! user's local calendar.

use chrono::{Datelike, Local, NaiveDate};
use shared::{CalendarDay, CalendarDayType, CalendarMonth, DaySummary};
use tracing::debug;

use crate::error::{AppError, AppResult};

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Calendar service that handles all calendar-related business logic
#[derive(Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Today in the server's local timezone
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn format_date_key(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    pub fn parse_date_key(key: &str) -> AppResult<NaiveDate> {
        NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", key)))
    }

    pub fn validate_month(month: u32) -> AppResult<()> {
        if (1..=12).contains(&month) {
            Ok(())
        } else {
            Err(AppError::validation(format!("Invalid month: {}", month)))
        }
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: i32) -> u32 {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|date| date.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// Step `direction` months forward (or back when negative)
    pub fn navigate_month(&self, month: u32, year: i32, direction: i32) -> (u32, i32) {
        let zero_based = year * 12 + (month as i32 - 1) + direction;
        let new_year = zero_based.div_euclid(12);
        let new_month = zero_based.rem_euclid(12) as u32 + 1;
        (new_month, new_year)
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Build the month grid. `summarize` is asked for the figures of every
    /// real day of the month.
    pub fn generate_calendar_month<F>(
        &self,
        month: u32,
        year: i32,
        today: NaiveDate,
        selected: NaiveDate,
        summarize: F,
    ) -> AppResult<CalendarMonth>
    where
        F: Fn(NaiveDate) -> DaySummary,
    {
        Self::validate_month(month)?;

        let days_in_month = self.days_in_month(month, year);
        let first_day = self.first_day_of_month(month, year);
        debug!(
            "Generating calendar for {}/{}: {} days, first weekday {}",
            month, year, days_in_month, first_day
        );

        let mut days = Vec::with_capacity((first_day + days_in_month) as usize);

        for _ in 0..first_day {
            days.push(CalendarDay {
                day: 0,
                date_key: None,
                day_type: CalendarDayType::PaddingBefore,
                is_today: false,
                is_selected: false,
                summary: DaySummary::default(),
            });
        }

        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| AppError::validation(format!("Invalid date {}-{}-{}", year, month, day)))?;

            days.push(CalendarDay {
                day,
                date_key: Some(Self::format_date_key(date)),
                day_type: CalendarDayType::MonthDay,
                is_today: date == today,
                is_selected: date == selected,
                summary: summarize(date),
            });
        }

        Ok(CalendarMonth {
            month,
            year,
            month_label: format!("{} {}", self.month_name(month), year),
            first_day_of_week: first_day,
            day_names: DAY_NAMES.iter().map(|d| d.to_string()).collect(),
            days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        let service = CalendarService::new();
        assert_eq!(service.days_in_month(1, 2025), 31);
        assert_eq!(service.days_in_month(4, 2025), 30);
        assert_eq!(service.days_in_month(2, 2024), 29);
        assert_eq!(service.days_in_month(2, 2025), 28);
        assert_eq!(service.days_in_month(2, 1900), 28);
        assert_eq!(service.days_in_month(2, 2000), 29);
    }

    #[test]
    fn test_first_day_of_month() {
        let service = CalendarService::new();
        // June 1st 2025 is a Sunday, January 1st 2025 a Wednesday
        assert_eq!(service.first_day_of_month(6, 2025), 0);
        assert_eq!(service.first_day_of_month(1, 2025), 3);
    }

    #[test]
    fn test_navigate_month_rolls_over_years() {
        let service = CalendarService::new();
        assert_eq!(service.navigate_month(12, 2024, 1), (1, 2025));
        assert_eq!(service.navigate_month(1, 2025, -1), (12, 2024));
        assert_eq!(service.navigate_month(3, 2025, 0), (3, 2025));
        assert_eq!(service.navigate_month(3, 2025, -15), (12, 2023));
    }

    #[test]
    fn test_date_keys() {
        assert_eq!(CalendarService::format_date_key(date(2025, 3, 7)), "2025-03-07");
        assert_eq!(CalendarService::parse_date_key("2025-03-07").unwrap(), date(2025, 3, 7));
        assert!(CalendarService::parse_date_key("03/07/2025").is_err());
        assert!(CalendarService::parse_date_key("2025-02-30").is_err());
    }

    #[test]
    fn test_generate_calendar_month_layout() {
        let service = CalendarService::new();
        let today = date(2025, 1, 15);
        let selected = date(2025, 1, 20);

        let calendar = service
            .generate_calendar_month(1, 2025, today, selected, |d| DaySummary {
                item_count: if d.day() % 2 == 0 { 1 } else { 0 },
                ..DaySummary::default()
            })
            .unwrap();

        assert_eq!(calendar.month_label, "January 2025");
        assert_eq!(calendar.first_day_of_week, 3);
        assert_eq!(calendar.days.len(), 3 + 31);
        assert_eq!(calendar.day_names[0], "Sun");

        let padding: Vec<_> = calendar
            .days
            .iter()
            .take_while(|d| d.day_type == CalendarDayType::PaddingBefore)
            .collect();
        assert_eq!(padding.len(), 3);
        assert!(padding.iter().all(|d| d.date_key.is_none() && d.day == 0));

        let fifteenth = &calendar.days[3 + 14];
        assert_eq!(fifteenth.date_key.as_deref(), Some("2025-01-15"));
        assert!(fifteenth.is_today);
        assert!(!fifteenth.is_selected);

        let twentieth = &calendar.days[3 + 19];
        assert!(twentieth.is_selected);
        assert_eq!(twentieth.summary.item_count, 1);
    }

    #[test]
    fn test_generate_calendar_rejects_bad_month() {
        let service = CalendarService::new();
        let today = date(2025, 1, 1);
        assert!(service
            .generate_calendar_month(13, 2025, today, today, |_| DaySummary::default())
            .is_err());
    }
}
