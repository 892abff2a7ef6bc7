//! Meowth's chests: find the chest holding exactly the amount Meowth asks for.

use super::money::{amounts_match, coin_breakdown, format_euros, total};
use crate::core::constants::{
    MEOWTH_MIN_WRONG_AMOUNT, MEOWTH_OVER_OFFSET, MEOWTH_REWARD, MEOWTH_SHORT_OFFSET,
};
use crate::core::player_state::ItemKey;
use crate::difficulty::MeowthProfile;
use crate::session::{ItemEffect, Minigame, MinigameOutcome};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Chest {
    pub coins: Vec<f64>,
}

impl Chest {
    pub fn total(&self) -> f64 {
        total(&self.coins)
    }
}

#[derive(Debug, Clone)]
pub struct MeowthGame {
    pub target: f64,
    pub chests: Vec<Chest>,
    pub revealed_chest: Option<usize>,
}

impl MeowthGame {
    pub fn correct_chest(&self) -> Option<usize> {
        self.chests.iter().position(|c| amounts_match(c.total(), self.target))
    }

    pub fn choose(&self, index: usize) -> MinigameOutcome {
        match self.chests.get(index) {
            Some(chest) if amounts_match(chest.total(), self.target) => {
                MinigameOutcome::success(MEOWTH_REWARD)
            }
            _ => MinigameOutcome::recoverable_failure(),
        }
    }

    pub fn request(&self) -> String {
        format!("¡Meowth quiere {}! ¿Qué cofre tiene justo eso?", format_euros(self.target))
    }
}

impl Minigame for MeowthGame {
    fn init<R: Rng>(level: u32, rng: &mut R) -> Self {
        let profile = MeowthProfile::for_level(level);
        let target = profile.targets.choose(rng).copied().unwrap_or(1.0);

        let short = (target - MEOWTH_SHORT_OFFSET).max(MEOWTH_MIN_WRONG_AMOUNT);
        let over = target + MEOWTH_OVER_OFFSET;
        let mut chests: Vec<Chest> = [target, short, over]
            .into_iter()
            .map(|amount| Chest {
                coins: coin_breakdown(amount),
            })
            .collect();
        chests.shuffle(rng);

        Self {
            target,
            chests,
            revealed_chest: None,
        }
    }

    fn name(&self) -> &'static str {
        "meowth"
    }

    fn item_effect(&self, key: ItemKey) -> Option<ItemEffect> {
        (key == ItemKey::Lupa && self.revealed_chest.is_none()).then_some(ItemEffect::RevealAnswer)
    }

    fn apply_item(&mut self, effect: ItemEffect) -> Option<MinigameOutcome> {
        if effect == ItemEffect::RevealAnswer {
            self.revealed_chest = self.correct_chest();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_exactly_one_chest_matches() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for level in [1, 5, 12] {
            for _ in 0..30 {
                let g = MeowthGame::init(level, &mut rng);
                assert_eq!(g.chests.len(), 3);
                let matching = g
                    .chests
                    .iter()
                    .filter(|c| amounts_match(c.total(), g.target))
                    .count();
                assert_eq!(matching, 1, "target {} chests {:?}", g.target, g.chests);
            }
        }
    }

    #[test]
    fn test_low_levels_ask_small_amounts() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..30 {
            let g = MeowthGame::init(2, &mut rng);
            assert!(g.target <= 2.0);
        }
    }

    #[test]
    fn test_choose() {
        let g = MeowthGame::init(3, &mut ChaCha8Rng::seed_from_u64(1));
        let right = g.correct_chest().unwrap();
        assert!(g.choose(right).is_success());
        assert_eq!(g.choose((right + 1) % 3), MinigameOutcome::recoverable_failure());
        assert_eq!(g.choose(10), MinigameOutcome::recoverable_failure());
    }

    #[test]
    fn test_lupa_points_at_correct_chest() {
        let mut g = MeowthGame::init(6, &mut ChaCha8Rng::seed_from_u64(2));
        assert_eq!(g.item_effect(ItemKey::Potion), None);
        g.apply_item(ItemEffect::RevealAnswer);
        assert_eq!(g.revealed_chest, g.correct_chest());
        assert_eq!(g.item_effect(ItemKey::Lupa), None);
    }

    #[test]
    fn test_request_names_the_target() {
        let mut g = MeowthGame::init(1, &mut ChaCha8Rng::seed_from_u64(3));
        g.target = 1.5;
        assert_eq!(g.request(), "¡Meowth quiere 1.50€! ¿Qué cofre tiene justo eso?");
    }
}
