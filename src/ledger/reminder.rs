//! Payment reminder text shared with customers

use chrono::{DateTime, TimeZone};

use crate::ledger::balance::Balance;
use crate::types::*;
use crate::utils::format::{format_currency, format_date_in};

/// Compose the plain-text reminder for one customer as of `now`
///
/// The message states the magnitude of the balance only, without its direction.
///
/// Payments are directed to the shop's UPI number, falling back to the shop
/// phone, then `N/A`.
pub fn compose_reminder<Tz: TimeZone>(
    shop: &ShopProfile,
    customer: &Customer,
    balance: &Balance,
    now: &DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let amount = format_currency(&balance.magnitude(), &shop.currency);
    let statement_date = format_date_in(now.timestamp_millis(), &now.timezone());
    let payment_number = shop
        .phone_pe_number
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .or(Some(shop.phone.as_str()).filter(|n| !n.trim().is_empty()))
        .unwrap_or("N/A");

    format!(
        "*PAYMENT REMINDER*\n\n\
         Namaste {customer},\n\n\
         Your total pending amount at *{shop}* is *{amount}* as of {date}.\n\n\
         Please pay using PhonePe/GPay:\n*{payment}*\n\n\
         For any queries, please call:\n{phone}\n\n\
         Thank you!",
        customer = customer.name,
        shop = shop.name,
        amount = amount,
        date = statement_date,
        payment = payment_number,
        phone = shop.phone,
    )
}
