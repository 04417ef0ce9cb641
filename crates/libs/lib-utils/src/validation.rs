//! # Validation Utilities
//!
//! Input validation helpers shared by every form. All checks are synchronous
//! and return a user-facing message on failure.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} required", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format (basic check).
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err("Invalid email format".to_string()),
    }
}

/// Validate minimum length.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.trim().chars().count() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}

/// Parse a decimal amount typed by a user.
///
/// Accepts either `,` or `.` as decimal separator (`"5,50"` and `"5.50"` are
/// both 5.5). Empty, non-numeric, non-finite and negative input is rejected.
pub fn parse_decimal(value: &str, field_name: &str) -> Result<f64, String> {
    let cleaned = value.trim().replace(',', ".");
    if cleaned.is_empty() {
        return Err(format!("{} required", field_name));
    }
    // `f64::from_str` also accepts "inf" and "NaN"; only plain numbers are valid here.
    if !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+') {
        return Err(format!("{} must be a number", field_name));
    }
    let parsed: f64 = cleaned
        .parse()
        .map_err(|_| format!("{} must be a number", field_name))?;
    if !parsed.is_finite() {
        return Err(format!("{} must be a number", field_name));
    }
    if parsed < 0.0 {
        return Err(format!("{} must be zero or greater", field_name));
    }
    Ok(parsed)
}

/// Parse a non-negative whole quantity.
pub fn parse_quantity(value: &str, field_name: &str) -> Result<u32, String> {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        return Err(format!("{} required", field_name));
    }
    cleaned
        .parse::<u32>()
        .map_err(|_| format!("{} must be a whole number zero or greater", field_name))
}

/// Keep only the ASCII digits of a phone-like value.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate the digit count of a phone-like value, ignoring formatting.
pub fn validate_phone_digits(
    value: &str,
    min: usize,
    max: usize,
    field_name: &str,
) -> Result<(), String> {
    let count = digits_only(value).len();
    if count < min {
        Err(format!("{} must have at least {} digits", field_name, min))
    } else if count > max {
        Err(format!("{} must have at most {} digits", field_name, max))
    } else {
        Ok(())
    }
}
