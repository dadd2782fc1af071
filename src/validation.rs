// src/validation.rs

use std::borrow::Cow;

use validator::ValidationError;

use crate::form::FieldValue;

pub const EMPTY: &str = "empty";
pub const INVALID_NUMBER: &str = "invalid_number";
pub const NOT_POSITIVE: &str = "not_positive";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Walidator pól tekstowych (nazwa, opis). Pusty po przycięciu tekst jest błędem.
pub fn validate_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error(EMPTY, "cannot be empty"));
    }
    Ok(())
}

/// Walidator pól liczbowych (rozmiar, cena, ilość).
pub fn validate_number(value: &FieldValue) -> Result<(), ValidationError> {
    let number = coerce_number(value);
    if !number.is_finite() {
        return Err(error(INVALID_NUMBER, "must be a valid number"));
    }
    if number <= 0.0 {
        return Err(error(NOT_POSITIVE, "must be greater than zero"));
    }
    Ok(())
}

/// Zamiana surowej wartości z formularza na liczbę, tak jak robi to pole typu `number`:
/// pusty tekst to 0, śmieci to NaN.
pub fn coerce_number(value: &FieldValue) -> f64 {
    match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
    }
}
