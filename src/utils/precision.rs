// src/utils/precision.rs
use rust_decimal::Decimal;

/// Rounds a price to the NEAREST multiple of tick_size (ties to even).
/// Example: price=2069.995, tick=0.01 -> 2070.00
pub fn normalize_price(price: Decimal, tick_size: Decimal) -> Decimal {
    if tick_size.is_zero() {
        return price;
    }
    (price / tick_size).round() * tick_size
}

/// `base * (1 + pct)`, snapped to the tick grid.
pub fn offset_price(base: Decimal, pct: Decimal, tick_size: Decimal) -> Decimal {
    normalize_price(base * (Decimal::ONE + pct), tick_size)
}
