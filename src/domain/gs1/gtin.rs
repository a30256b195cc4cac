//! GTIN format and check digit helpers

use validator::ValidationError;

const GTIN_LENGTHS: [usize; 4] = [8, 12, 13, 14];

/// GTIN-8, -12, -13 or -14: digits only, one of the standard lengths
pub fn validate_gtin_format(gtin: &str) -> Result<(), ValidationError> {
    let trimmed = gtin.trim();

    let message = if trimmed.is_empty() {
        "GTIN is required".to_string()
    } else if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        "GTIN must contain digits only".to_string()
    } else if !GTIN_LENGTHS.contains(&trimmed.len()) {
        format!("GTIN must be 8, 12, 13 or 14 digits, got {}", trimmed.len())
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new("gtin");
    error.message = Some(message.into());
    Err(error)
}

/// GS1 mod-10 check digit for the digits preceding it
///
/// Weights alternate 3, 1, 3, ... starting from the rightmost digit.
pub fn compute_check_digit(body: &str) -> Option<u8> {
    let mut sum = 0u32;

    for (index, byte) in body.bytes().rev().enumerate() {
        if !byte.is_ascii_digit() {
            return None;
        }
        let weight = if index % 2 == 0 { 3 } else { 1 };
        sum += u32::from(byte - b'0') * weight;
    }

    Some(((10 - sum % 10) % 10) as u8)
}

/// Whether the last digit of `gtin` is its correct check digit
pub fn has_valid_check_digit(gtin: &str) -> bool {
    let gtin = gtin.trim();

    if gtin.len() < 2 {
        return false;
    }

    let (body, check) = gtin.split_at(gtin.len() - 1);
    match (compute_check_digit(body), check.bytes().next()) {
        (Some(expected), Some(actual)) if actual.is_ascii_digit() => expected == actual - b'0',
        _ => false,
    }
}
