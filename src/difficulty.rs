//! Level → difficulty parameters for every mini-game.
//!
//! All scaling lives here; mini-games ask for a profile and never compare
//! the level themselves. Every function is pure and total: a level below 1
//! is treated as level 1. Range bounds and set sizes never shrink as the
//! level rises, and intervals never drop below their documented floor.

use crate::core::constants::*;
use rand::Rng;

/// Inclusive range for a random draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRange {
    pub min: u32,
    pub max: u32,
}

impl TargetRange {
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

fn clamp_level(level: u32) -> u32 {
    level.max(1)
}

/// Upper bound of Snorlax's food target.
pub fn snorlax_max_target(level: u32) -> u32 {
    match clamp_level(level) {
        1..=3 => 10,
        4..=7 => 20,
        8..=15 => 50,
        _ => 100,
    }
}

pub fn snorlax_target(level: u32) -> TargetRange {
    TargetRange {
        min: SNORLAX_MIN_TARGET,
        max: snorlax_max_target(level),
    }
}

/// Wake meter growth per second (meter runs 0.0 → 1.0).
pub fn snorlax_wake_rate(level: u32) -> f64 {
    let rate = SNORLAX_BASE_WAKE_RATE * (1.0 + clamp_level(level) as f64 * SNORLAX_WAKE_RATE_PER_LEVEL);
    rate.max(SNORLAX_BASE_WAKE_RATE)
}

/// The wake meter only runs once the player is past the first levels.
pub fn snorlax_timer_active(level: u32) -> bool {
    clamp_level(level) >= SNORLAX_TIMER_MIN_LEVEL
}

pub fn diglett_target(level: u32) -> TargetRange {
    let level = clamp_level(level);
    TargetRange {
        min: 10 + level.saturating_mul(3) / 2,
        max: level.saturating_mul(2).saturating_add(20),
    }
}

pub fn diglett_spawn_interval_ms(level: u32) -> u64 {
    DIGLETT_BASE_SPAWN_INTERVAL_MS
        .saturating_sub(clamp_level(level) as u64 * DIGLETT_SPAWN_INTERVAL_STEP_MS)
        .max(DIGLETT_MIN_SPAWN_INTERVAL_MS)
}

/// Numbers a spawned diglett can carry.
pub fn diglett_values(_level: u32) -> &'static [u32] {
    &[1, 2, 5]
}

/// Amounts (in euros) Meowth can ask for.
pub fn meowth_target_money(level: u32) -> &'static [f64] {
    if clamp_level(level) < 5 {
        &[0.50, 1.00, 2.00]
    } else {
        &[0.50, 1.00, 1.50, 2.00, 2.50, 5.00]
    }
}

pub fn pikachu_count(level: u32) -> TargetRange {
    match clamp_level(level) {
        1..=5 => TargetRange { min: 3, max: 10 },
        6..=10 => TargetRange { min: 5, max: 15 },
        _ => TargetRange { min: 8, max: 20 },
    }
}

pub fn pikachu_spawn_interval_ms(level: u32) -> u64 {
    PIKACHU_BASE_SPAWN_INTERVAL_MS
        .saturating_sub(clamp_level(level) as u64 * PIKACHU_SPAWN_INTERVAL_STEP_MS)
        .max(PIKACHU_MIN_SPAWN_INTERVAL_MS)
}

pub fn chansey_reward(level: u32) -> u64 {
    CHANSEY_BASE_REWARD + clamp_level(level) as u64 * CHANSEY_REWARD_PER_LEVEL
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnorlaxProfile {
    pub target: TargetRange,
    pub wake_rate: f64,
    pub timer_active: bool,
}

impl SnorlaxProfile {
    pub fn for_level(level: u32) -> Self {
        Self {
            target: snorlax_target(level),
            wake_rate: snorlax_wake_rate(level),
            timer_active: snorlax_timer_active(level),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiglettProfile {
    pub target: TargetRange,
    pub spawn_interval_ms: u64,
    pub values: &'static [u32],
}

impl DiglettProfile {
    pub fn for_level(level: u32) -> Self {
        Self {
            target: diglett_target(level),
            spawn_interval_ms: diglett_spawn_interval_ms(level),
            values: diglett_values(level),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeowthProfile {
    pub targets: &'static [f64],
}

impl MeowthProfile {
    pub fn for_level(level: u32) -> Self {
        Self {
            targets: meowth_target_money(level),
        }
    }
}

/// Chansey's market: what things cost, what the customer pays with and
/// which coins the till holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketProfile {
    pub price: TargetRange,
    pub payments: &'static [u32],
    pub denominations: &'static [f64],
    pub reward: u64,
}

impl MarketProfile {
    pub fn for_level(level: u32) -> Self {
        let level = clamp_level(level);
        let (price, payments, denominations) = match level {
            1..=3 => (TargetRange { min: 1, max: 8 }, MARKET_PAYMENTS[0], MARKET_COINS[0]),
            4..=8 => (TargetRange { min: 5, max: 18 }, MARKET_PAYMENTS[1], MARKET_COINS[1]),
            _ => (TargetRange { min: 10, max: 45 }, MARKET_PAYMENTS[2], MARKET_COINS[2]),
        };
        Self {
            price,
            payments,
            denominations,
            reward: chansey_reward(level),
        }
    }
}

const MARKET_PAYMENTS: [&[u32]; 3] = [&[5, 10], &[10, 20], &[20, 50]];
const MARKET_COINS: [&[f64]; 3] = [&[1.0, 2.0], &[0.5, 1.0, 2.0], &[0.2, 0.5, 1.0, 2.0]];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PikachuProfile {
    pub count: TargetRange,
    pub spawn_interval_ms: u64,
}

impl PikachuProfile {
    pub fn for_level(level: u32) -> Self {
        Self {
            count: pikachu_count(level),
            spawn_interval_ms: pikachu_spawn_interval_ms(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snorlax_tiers() {
        assert_eq!(snorlax_max_target(1), 10);
        assert_eq!(snorlax_max_target(3), 10);
        assert_eq!(snorlax_max_target(4), 20);
        assert_eq!(snorlax_max_target(8), 50);
        assert_eq!(snorlax_max_target(16), 100);
        assert_eq!(snorlax_max_target(10_000), 100);
    }

    #[test]
    fn test_snorlax_timer_starts_at_level_4() {
        assert!(!snorlax_timer_active(3));
        assert!(snorlax_timer_active(4));
    }

    #[test]
    fn test_diglett_target_formula() {
        assert_eq!(diglett_target(1), TargetRange { min: 11, max: 22 });
        assert_eq!(diglett_target(5), TargetRange { min: 17, max: 30 });
    }

    #[test]
    fn test_spawn_interval_floors() {
        assert_eq!(diglett_spawn_interval_ms(1), 1450);
        assert_eq!(diglett_spawn_interval_ms(20), 500);
        assert_eq!(diglett_spawn_interval_ms(u32::MAX), 500);
        assert_eq!(pikachu_spawn_interval_ms(1), 980);
        assert_eq!(pikachu_spawn_interval_ms(25), 500);
        assert_eq!(pikachu_spawn_interval_ms(u32::MAX), 500);
    }

    #[test]
    fn test_level_zero_treated_as_one() {
        assert_eq!(diglett_target(0), diglett_target(1));
        assert_eq!(MarketProfile::for_level(0), MarketProfile::for_level(1));
        assert_eq!(chansey_reward(0), 12);
    }

    #[test]
    fn test_market_tiers() {
        let low = MarketProfile::for_level(3);
        assert_eq!(low.payments, &[5, 10]);
        let mid = MarketProfile::for_level(4);
        assert_eq!(mid.price, TargetRange { min: 5, max: 18 });
        let high = MarketProfile::for_level(9);
        assert_eq!(high.denominations.len(), 4);
        assert_eq!(high.reward, 28);
    }

    #[test]
    fn test_target_range_sample_in_bounds() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
        let range = TargetRange { min: 4, max: 6 };
        for _ in 0..100 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }
}
