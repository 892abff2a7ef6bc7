//! Item shop: trades coins for power-ups.

use super::player_store::PlayerStore;
use super::storage::Storage;
use crate::core::constants::{POKEBALL_PRICE, POTION_PRICE};
use crate::core::player_state::ItemKey;
use crate::session::AudioCue;
use rand::Rng;

/// Price in coins, or `None` for items that can only be found as drops.
pub fn price_of(key: ItemKey) -> Option<u64> {
    match key {
        ItemKey::Potion => Some(POTION_PRICE),
        ItemKey::Pokeball => Some(POKEBALL_PRICE),
        ItemKey::Paralizador | ItemKey::Lupa | ItemKey::Escudo => None,
    }
}

/// Items on sale, in display order.
pub fn catalogue() -> impl Iterator<Item = (ItemKey, u64)> {
    ItemKey::ALL
        .into_iter()
        .filter_map(|key| price_of(key).map(|p| (key, p)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseResult {
    Bought { key: ItemKey, remaining_coins: u64 },
    CannotAfford { price: u64, coins: u64 },
    NotForSale,
}

impl PurchaseResult {
    /// Sound to play for this result.
    pub fn cue(&self) -> AudioCue {
        match self {
            PurchaseResult::Bought { .. } => AudioCue::UiSelect,
            PurchaseResult::CannotAfford { .. } | PurchaseResult::NotForSale => AudioCue::CannotAfford,
        }
    }
}

/// Buy one unit of `key`. Coins and inventory only change on success.
pub fn purchase<S: Storage, R: Rng>(store: &mut PlayerStore<S, R>, key: ItemKey) -> PurchaseResult {
    let Some(price) = price_of(key) else {
        return PurchaseResult::NotForSale;
    };
    if !store.spend_coins(price) {
        return PurchaseResult::CannotAfford {
            price,
            coins: store.coins(),
        };
    }
    store.add_item(key, 1);
    PurchaseResult::Bought {
        key,
        remaining_coins: store.coins(),
    }
}
