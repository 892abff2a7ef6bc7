//! Silhouette scanner: drag wallet coins onto the matching coin shadows.

use super::money::{amounts_match, EURO_COINS};
use crate::core::constants::{SILHOUETTE_DISTRACTORS, SILHOUETTE_REWARD, SILHOUETTE_TARGETS};
use crate::core::player_state::ItemKey;
use crate::session::{ItemEffect, Minigame, MinigameOutcome};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Silhouette {
    pub value: f64,
    pub filled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalletCoin {
    pub id: usize,
    pub value: f64,
    pub placed: bool,
}

#[derive(Debug, Clone)]
pub struct SilhouetteGame {
    pub silhouettes: Vec<Silhouette>,
    pub wallet: Vec<WalletCoin>,
    /// Wallet coin id for each silhouette, once revealed.
    pub revealed_matches: Option<Vec<usize>>,
}

impl SilhouetteGame {
    pub fn all_filled(&self) -> bool {
        self.silhouettes.iter().all(|s| s.filled)
    }

    /// Drop wallet coin `coin_id` on silhouette `zone`. A coin already
    /// placed, or an unknown coin/zone, is ignored.
    pub fn drop_coin(&mut self, coin_id: usize, zone: usize) -> Option<MinigameOutcome> {
        let coin = self.wallet.iter().find(|c| c.id == coin_id && !c.placed)?.value;
        let silhouette = self.silhouettes.get_mut(zone)?;

        if silhouette.filled || !amounts_match(silhouette.value, coin) {
            return Some(MinigameOutcome::recoverable_failure());
        }
        silhouette.filled = true;
        if let Some(c) = self.wallet.iter_mut().find(|c| c.id == coin_id) {
            c.placed = true;
        }
        self.all_filled()
            .then(|| MinigameOutcome::success(SILHOUETTE_REWARD))
    }

    fn matching_coins(&self) -> Vec<usize> {
        self.silhouettes
            .iter()
            .filter_map(|s| {
                self.wallet
                    .iter()
                    .find(|c| amounts_match(c.value, s.value))
                    .map(|c| c.id)
            })
            .collect()
    }
}

impl Minigame for SilhouetteGame {
    fn init<R: Rng>(_level: u32, rng: &mut R) -> Self {
        let mut coins = EURO_COINS.to_vec();
        coins.shuffle(rng);
        let (targets, rest) = coins.split_at(SILHOUETTE_TARGETS);

        let mut values: Vec<f64> = targets.to_vec();
        values.extend(rest.iter().take(SILHOUETTE_DISTRACTORS));
        values.shuffle(rng);

        Self {
            silhouettes: targets
                .iter()
                .map(|&value| Silhouette {
                    value,
                    filled: false,
                })
                .collect(),
            wallet: values
                .into_iter()
                .enumerate()
                .map(|(id, value)| WalletCoin {
                    id,
                    value,
                    placed: false,
                })
                .collect(),
            revealed_matches: None,
        }
    }

    fn name(&self) -> &'static str {
        "silhouette"
    }

    fn item_effect(&self, key: ItemKey) -> Option<ItemEffect> {
        (key == ItemKey::Lupa && self.revealed_matches.is_none()).then_some(ItemEffect::RevealAnswer)
    }

    fn apply_item(&mut self, effect: ItemEffect) -> Option<MinigameOutcome> {
        if effect == ItemEffect::RevealAnswer {
            self.revealed_matches = Some(self.matching_coins());
        }
        None
    }
}
