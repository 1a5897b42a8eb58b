//! Value formatting shared by command handlers.

use std::fmt::Display;

use chrono::DateTime;
use rust_decimal::Decimal;

/// Probability as cents, e.g. `0.655` → `65.5¢`.
#[must_use]
pub fn cents(price: Decimal) -> String {
    format!("{}¢", (price * Decimal::ONE_HUNDRED).round_dp(2).normalize())
}

/// Price with its cent rendering, e.g. `0.65 (65¢)`.
#[must_use]
pub fn price(price: Decimal) -> String {
    format!("{} ({})", price.normalize(), cents(price))
}

/// Dollar amount to two places.
#[must_use]
pub fn usd(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Decimal with an explicit sign.
#[must_use]
pub fn signed(value: Decimal) -> String {
    if value.is_sign_negative() {
        value.normalize().to_string()
    } else {
        format!("+{}", value.normalize())
    }
}

/// Value or `-` when absent.
#[must_use]
pub fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Optional decimal, normalized, or `-`.
#[must_use]
pub fn decimal_or_dash(value: Option<Decimal>) -> String {
    or_dash(value.map(|v| v.normalize()))
}

/// Unix seconds as a UTC timestamp; falls back to the raw number.
#[must_use]
pub fn timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0).map_or_else(
        || ts.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

/// Shorten to at most `max` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Flag triple as a short status word.
#[must_use]
pub fn market_status(active: Option<bool>, closed: Option<bool>, accepting: Option<bool>) -> &'static str {
    match (closed, active, accepting) {
        (Some(true), _, _) => "closed",
        (_, Some(false), _) => "inactive",
        (_, _, Some(false)) => "paused",
        _ => "active",
    }
}
