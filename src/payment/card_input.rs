// src/payment/card_input.rs
//! Normalization applied to card fields as they are typed.

use crate::utils::{digits_only, truncate_chars};

const CARD_NUMBER_MAX_CHARS: usize = 19;
const CVV_MAX_DIGITS: usize = 4;

/// Group in blocks of four separated by single spaces, capped at 19 chars.
pub fn format_card_number(value: &str) -> String {
    let cleaned: Vec<char> = value.chars().filter(|c| !c.is_whitespace()).collect();
    let grouped = cleaned
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&grouped, CARD_NUMBER_MAX_CHARS).to_string()
}

/// Digits only, rendered as `MM/YY` once two digits are present.
pub fn format_expiry_date(value: &str) -> String {
    let cleaned = digits_only(value);
    if cleaned.len() >= 2 {
        let year_end = cleaned.len().min(4);
        format!("{}/{}", &cleaned[..2], &cleaned[2..year_end])
    } else {
        cleaned
    }
}

pub fn format_cvv(value: &str) -> String {
    let digits = digits_only(value);
    truncate_chars(&digits, CVV_MAX_DIGITS).to_string()
}

/// Last four card characters for display, never the full number.
pub fn last_four(card_number: &str) -> Option<String> {
    let digits = digits_only(card_number);
    (digits.len() >= 4).then(|| digits[digits.len() - 4..].to_string())
}
