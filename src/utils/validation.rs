//! Validation utilities

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::types::*;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> KhataResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(KhataError::Validation(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Parse an amount typed by the user
///
/// Rejects anything that is not a plain decimal number greater than zero.
pub fn parse_amount(input: &str) -> KhataResult<BigDecimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(KhataError::Validation("Amount is required".to_string()));
    }

    let amount = BigDecimal::from_str(trimmed)
        .map_err(|_| KhataError::Validation(format!("'{}' is not a valid amount", trimmed)))?;
    validate_positive_amount(&amount)?;

    Ok(amount)
}

/// Validate that a customer name is valid
pub fn validate_customer_name(name: &str) -> KhataResult<()> {
    if name.trim().is_empty() {
        return Err(KhataError::Validation(
            "Customer name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > 100 {
        return Err(KhataError::Validation(
            "Customer name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a phone number: optional leading '+', digits, spaces and dashes, 7 to 15 digits
pub fn validate_phone(phone: &str) -> KhataResult<()> {
    let trimmed = phone.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return Err(KhataError::Validation(format!(
            "Phone number '{}' contains invalid characters",
            phone
        )));
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(KhataError::Validation(format!(
            "Phone number '{}' must have between 7 and 15 digits",
            phone
        )));
    }

    Ok(())
}

/// Validate a free-form note
pub fn validate_notes(notes: &str) -> KhataResult<()> {
    if notes.chars().count() > 500 {
        return Err(KhataError::Validation(
            "Notes cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a shop profile during setup or settings edits
pub fn validate_shop_profile(profile: &ShopProfile) -> KhataResult<()> {
    if profile.name.trim().is_empty() {
        return Err(KhataError::Validation(
            "Shop name cannot be empty".to_string(),
        ));
    }

    if profile.owner_name.trim().is_empty() {
        return Err(KhataError::Validation(
            "Owner name cannot be empty".to_string(),
        ));
    }

    let currency = profile.currency.trim();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(KhataError::Validation(format!(
            "Currency '{}' must be a three letter ISO code",
            profile.currency
        )));
    }

    Ok(())
}
