//! # Shared Utility Functions
//!
//! Contact-number helpers used by the advertisement and profile views.
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_phone, whatsapp_link};
//!
//! assert_eq!(format_phone("83999887766"), "(83) 99988-7766");
//! assert_eq!(
//!     whatsapp_link("(83) 99988-7766", None).as_deref(),
//!     Some("https://wa.me/5583999887766")
//! );
//! ```

/// Country prefix prepended to local numbers in contact links.
pub const COUNTRY_CODE: &str = "55";

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a phone number with the `(XX) XXXXX-XXXX` display mask, or
/// `(XX) XXXX-XXXX` for ten-digit landlines.
///
/// Extra digits beyond eleven are dropped; short inputs get a partial mask.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_phone;
///
/// assert_eq!(format_phone("83999887766"), "(83) 99988-7766");
/// assert_eq!(format_phone("8332165544"), "(83) 3216-5544");
/// assert_eq!(format_phone("8399988"), "(83) 99988");
/// assert_eq!(format_phone("839"), "(83) 9");
/// assert_eq!(format_phone("8"), "8");
/// ```
pub fn format_phone(value: &str) -> String {
    let numbers = digits(value);
    let numbers: String = numbers.chars().take(11).collect();
    // Digits are ASCII, so byte offsets are char offsets.
    let (area, rest) = match numbers.len() {
        0..=1 => return numbers,
        _ => numbers.split_at(2),
    };
    match rest.len() {
        0..=5 => format!("({}) {}", area, rest),
        8 => format!("({}) {}-{}", area, &rest[..4], &rest[4..]),
        _ => format!("({}) {}-{}", area, &rest[..5], &rest[5..]),
    }
}

/// Build a `wa.me` link for a contact number with an optional prefilled message.
///
/// Returns `None` when the number has fewer than ten digits.
pub fn whatsapp_link(number: &str, message: Option<&str>) -> Option<String> {
    let numbers = digits(number);
    if numbers.len() < 10 {
        return None;
    }
    let base = format!("https://wa.me/{}{}", COUNTRY_CODE, numbers);
    Some(match message {
        Some(text) if !text.is_empty() => {
            format!("{}?text={}", base, urlencoding::encode(text))
        }
        _ => base,
    })
}
