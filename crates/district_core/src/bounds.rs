//! Numeric clamp helpers for bounded stats.

/// Upper bound of the crime and prosperity indices.
pub const PERCENT_MAX: u8 = 100;

/// Apply a signed delta to a [0, 100] index, clamping at both ends.
pub fn shift_percent(value: u8, delta: i32) -> u8 {
    (i32::from(value) + delta).clamp(0, i32::from(PERCENT_MAX)) as u8
}

/// Add `amount` to `value` without exceeding `max`.
pub fn add_capped(value: u32, amount: u32, max: u32) -> u32 {
    value.saturating_add(amount).min(max)
}

/// Clamp a signed grid coordinate into `[0, len)`.
pub fn clamp_coord(target: i64, len: u32) -> u32 {
    target.clamp(0, i64::from(len.saturating_sub(1))) as u32
}

/// Scale a price by a percentage, flooring the result.
pub fn scale_pct(price: u64, pct: u64) -> u64 {
    price.saturating_mul(pct) / 100
}
