//! Form input parsing shared by the domain services.
//!
//! Numbers arrive from forms as typed text. These helpers turn that text into
//! values or an [`AppError::Validation`] with a message fit for the form.

use crate::error::{AppError, AppResult};

const CURRENCY_SYMBOL: &str = "$";

/// Trimmed value of a required text field
pub fn required(value: &str, message: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(trimmed.to_string())
}

/// Parse the leading integer of `input` the way a browser `parseInt` does:
/// optional sign, then digits, anything after is ignored. `"250kcal"` is 250,
/// `"12.9"` is 12, `"kcal"` has no value.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Clean and parse a money amount: strips the currency symbol, commas and spaces
pub fn clean_and_parse_amount(input: &str) -> Result<f64, String> {
    let cleaned = input
        .trim()
        .replace(CURRENCY_SYMBOL, "")
        .replace(',', "")
        .replace(' ', "");

    if cleaned.is_empty() {
        return Err("Empty amount after cleaning".to_string());
    }

    let amount: f64 = cleaned
        .parse()
        .map_err(|e| format!("Invalid number format: {}", e))?;

    if !amount.is_finite() {
        return Err("Amount must be a finite number".to_string());
    }
    Ok(amount)
}

/// A required amount that must be greater than zero
pub fn positive_amount(input: &str, field: &str) -> AppResult<f64> {
    if input.trim().is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    let amount = clean_and_parse_amount(input)
        .map_err(|e| AppError::validation(format!("{}: {}", field, e)))?;
    if amount <= 0.0 {
        return Err(AppError::validation(format!("{} must be greater than 0", field)));
    }
    Ok(amount)
}

/// A required whole number greater than zero (sets, reps)
pub fn positive_count(input: &str, field: &str) -> AppResult<u32> {
    if input.trim().is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    match parse_leading_int(input) {
        Some(n) if n > 0 => u32::try_from(n)
            .map_err(|_| AppError::validation(format!("{} is too large", field))),
        Some(_) => Err(AppError::validation(format!("{} must be greater than 0", field))),
        None => Err(AppError::validation(format!("{} must be a whole number", field))),
    }
}

/// An optional positive amount; blank input means "not given"
pub fn optional_amount(input: &str, field: &str) -> AppResult<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    positive_amount(input, field).map(Some)
}
