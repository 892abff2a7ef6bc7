//! Euro coin helpers for the currency games.
//!
//! Amounts are `f64` euros. Sums of fractional coins drift, so equality is
//! always checked with [`amounts_match`].

use crate::core::constants::CURRENCY_TOLERANCE;

/// Every euro coin, largest first.
pub const EURO_COINS: [f64; 8] = [2.00, 1.00, 0.50, 0.20, 0.10, 0.05, 0.02, 0.01];

/// Rounding slack so a difference of exactly the tolerance still matches.
const ROUNDING_SLACK: f64 = 1e-9;

/// True when `a` and `b` differ by at most the currency tolerance.
pub fn amounts_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= CURRENCY_TOLERANCE + ROUNDING_SLACK
}

pub fn total(coins: &[f64]) -> f64 {
    coins.iter().sum()
}

/// Greedy split of `target` into euro coins.
///
/// A target of exactly 1 € or 2 € skips that coin so the chest shows
/// change rather than the single matching coin.
pub fn coin_breakdown(target: f64) -> Vec<f64> {
    let start = if amounts_match(target, 1.00) || amounts_match(target, 2.00) {
        EURO_COINS
            .iter()
            .position(|&c| c < target - CURRENCY_TOLERANCE)
            .unwrap_or(0)
    } else {
        0
    };

    let mut remaining = target;
    let mut coins = Vec::new();
    for &coin in &EURO_COINS[start..] {
        while remaining >= coin - CURRENCY_TOLERANCE {
            remaining -= coin;
            coins.push(coin);
        }
    }
    if remaining > 0.005 {
        coins.push(0.01);
    }
    coins
}

/// Greedy split of `target` using only `denominations` (any order).
/// Returns `None` when they cannot make the amount exactly.
pub fn change_breakdown(target: f64, denominations: &[f64]) -> Option<Vec<f64>> {
    let mut sorted = denominations.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut remaining = target;
    let mut coins = Vec::new();
    for coin in sorted {
        while remaining >= coin - CURRENCY_TOLERANCE {
            remaining -= coin;
            coins.push(coin);
        }
    }
    amounts_match(remaining, 0.0).then_some(coins)
}

/// Format as the game shows money: `1.50€`.
pub fn format_euros(amount: f64) -> String {
    format!("{:.2}€", amount)
}

/// Short coin label: `50c`, `2€`.
pub fn coin_label(value: f64) -> String {
    if value < 1.0 - CURRENCY_TOLERANCE {
        format!("{}c", (value * 100.0).round() as u32)
    } else {
        format!("{}€", value.round() as u32)
    }
}
