//! The persistent player record: coins, level, inventory.
//!
//! Fields are only writable inside the crate. Every mutation the game
//! performs goes through [`crate::store::PlayerStore`], which persists and
//! notifies after each change.

use super::constants::{INITIAL_COINS, INITIAL_HIGH_SCORE, INITIAL_LEVEL};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU32;

/// Inventory items. Serialized as the lowercase names used in save files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKey {
    Potion,
    Pokeball,
    Paralizador,
    Lupa,
    Escudo,
}

impl ItemKey {
    pub const ALL: [ItemKey; 5] = [
        ItemKey::Potion,
        ItemKey::Pokeball,
        ItemKey::Paralizador,
        ItemKey::Lupa,
        ItemKey::Escudo,
    ];

    /// Items that can be found through a random drop.
    pub const DROPPABLE: [ItemKey; 5] = Self::ALL;

    /// Save-file / command-line name
    pub fn name(&self) -> &'static str {
        match self {
            ItemKey::Potion => "potion",
            ItemKey::Pokeball => "pokeball",
            ItemKey::Paralizador => "paralizador",
            ItemKey::Lupa => "lupa",
            ItemKey::Escudo => "escudo",
        }
    }

    /// Name shown to the player
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemKey::Potion => "Poción",
            ItemKey::Pokeball => "Pokéball",
            ItemKey::Paralizador => "Paralizador",
            ItemKey::Lupa => "Lupa",
            ItemKey::Escudo => "Escudo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Canonical player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub(crate) coins: u64,
    pub(crate) level: NonZeroU32,
    #[serde(default, deserialize_with = "known_items")]
    pub(crate) inventory: BTreeMap<ItemKey, u32>,
    #[serde(default)]
    pub(crate) high_score: u64,
}

/// Inventory names this build does not know are skipped so the rest of the
/// record still loads.
fn known_items<'de, D>(deserializer: D) -> Result<BTreeMap<ItemKey, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
    let mut inventory = BTreeMap::new();
    for (name, count) in raw {
        match ItemKey::from_name(&name) {
            Some(key) => {
                inventory.insert(key, count);
            }
            None => log::warn!("Skipping unknown item '{}' ({}) in saved inventory", name, count),
        }
    }
    Ok(inventory)
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::initial()
    }
}

impl PlayerState {
    /// The record a brand-new player starts with.
    pub fn initial() -> Self {
        Self {
            coins: INITIAL_COINS,
            level: NonZeroU32::new(INITIAL_LEVEL).unwrap_or(NonZeroU32::MIN),
            inventory: ItemKey::ALL.into_iter().map(|k| (k, 0)).collect(),
            high_score: INITIAL_HIGH_SCORE,
        }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn level(&self) -> u32 {
        self.level.get()
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Count held for `key`; keys never seen before count as 0.
    pub fn item_count(&self, key: ItemKey) -> u32 {
        self.inventory.get(&key).copied().unwrap_or(0)
    }

    pub fn inventory(&self) -> &BTreeMap<ItemKey, u32> {
        &self.inventory
    }

    pub(crate) fn add_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub(crate) fn spend_coins(&mut self, amount: u64) -> bool {
        match self.coins.checked_sub(amount) {
            Some(remaining) => {
                self.coins = remaining;
                true
            }
            None => false,
        }
    }

    pub(crate) fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
    }

    /// Returns false when already at level 1.
    pub(crate) fn level_down(&mut self) -> bool {
        match NonZeroU32::new(self.level.get() - 1) {
            Some(lower) => {
                self.level = lower;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_level(&mut self, level: NonZeroU32) {
        self.level = level;
    }

    pub(crate) fn add_item(&mut self, key: ItemKey, count: u32) {
        let slot = self.inventory.entry(key).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    pub(crate) fn use_item(&mut self, key: ItemKey) -> bool {
        match self.inventory.get_mut(&key) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}
