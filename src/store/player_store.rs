//! The player state store: owns the record, persists it after every
//! mutation and notifies subscribers.

use super::storage::Storage;
use super::subscribers::{StateEvent, Subscribers, SubscriptionId};
use crate::core::constants::{ITEM_DROP_CHANCE, STORAGE_KEY};
use crate::core::player_state::{ItemKey, PlayerState};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::io;
use std::num::NonZeroU32;
use thiserror::Error;

/// Failures while reading or writing the persisted record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("player record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read the persisted record, or `None` if there is none.
pub fn read_state(storage: &impl Storage) -> Result<Option<PlayerState>, StoreError> {
    match storage.read(STORAGE_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Load the persisted record. Missing or unreadable records yield a fresh
/// initial state; failures are logged, never returned.
pub fn load_state(storage: &impl Storage) -> PlayerState {
    match read_state(storage) {
        Ok(Some(state)) => state,
        Ok(None) => {
            log::info!("No saved player state, starting fresh");
            PlayerState::initial()
        }
        Err(e) => {
            log::warn!("Failed to load player state, starting fresh: {}", e);
            PlayerState::initial()
        }
    }
}

/// Serialize and write the full record.
pub fn write_state(storage: &mut impl Storage, state: &PlayerState) -> Result<(), StoreError> {
    let json = serde_json::to_string(state)?;
    storage.write(STORAGE_KEY, &json)?;
    Ok(())
}

/// Single owner of the player record.
///
/// Mutators apply the change in memory first, then persist, then notify.
/// A failed write is logged and leaves the in-memory change in place.
pub struct PlayerStore<S: Storage, R: Rng = StdRng> {
    state: PlayerState,
    storage: S,
    rng: R,
    subscribers: Subscribers,
}

impl<S: Storage> PlayerStore<S, StdRng> {
    /// Open the store with an entropy-seeded drop generator.
    pub fn with_entropy(storage: S) -> Self {
        Self::open(storage, StdRng::from_entropy())
    }
}

impl<S: Storage, R: Rng> PlayerStore<S, R> {
    /// Open the store, loading the persisted record (or the initial state).
    pub fn open(storage: S, rng: R) -> Self {
        let state = load_state(&storage);
        Self {
            state,
            storage,
            rng,
            subscribers: Subscribers::default(),
        }
    }

    /// Re-read the persisted record without touching the in-memory one.
    pub fn load(&self) -> PlayerState {
        load_state(&self.storage)
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn coins(&self) -> u64 {
        self.state.coins()
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    pub fn item_count(&self, key: ItemKey) -> u32 {
        self.state.item_count(key)
    }

    /// Persist the current record and notify subscribers.
    pub fn save(&mut self) {
        self.persist();
        self.subscribers.notify(&StateEvent::Changed(&self.state));
    }

    pub fn add_coins(&mut self, amount: u64) {
        self.state.add_coins(amount);
        log::debug!("Coins: {} (+{})", self.state.coins(), amount);
        self.save();
    }

    /// Deduct `amount` if the balance covers it. Nothing changes otherwise.
    pub fn spend_coins(&mut self, amount: u64) -> bool {
        if !self.state.spend_coins(amount) {
            return false;
        }
        self.save();
        true
    }

    pub fn level_up(&mut self) {
        self.state.level_up();
        self.save();
    }

    /// Drop one level, never below 1. A no-op at level 1.
    pub fn level_down(&mut self) {
        if self.state.level_down() {
            self.save();
        }
    }

    pub fn set_level(&mut self, level: NonZeroU32) {
        self.state.set_level(level);
        self.save();
    }

    pub fn add_item(&mut self, key: ItemKey, count: u32) {
        self.state.add_item(key, count);
        self.save();
    }

    /// Consume one unit of `key` if any is held.
    pub fn use_item(&mut self, key: ItemKey) -> bool {
        if !self.state.use_item(key) {
            return false;
        }
        self.save();
        true
    }

    /// Roll for a bonus item. On a hit one random droppable item is added
    /// and returned; on a miss nothing changes.
    pub fn check_item_drop(&mut self) -> Option<ItemKey> {
        if !self.rng.gen_bool(ITEM_DROP_CHANCE) {
            return None;
        }
        let key = *ItemKey::DROPPABLE.choose(&mut self.rng)?;
        self.add_item(key, 1);
        log::info!("Drop! Found {}", key.name());
        Some(key)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StateEvent<'_>) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Wipe progress back to the initial state and tell subscribers to
    /// rebuild.
    pub fn reset(&mut self) {
        self.state = PlayerState::initial();
        self.persist();
        log::info!("Player state reset");
        self.subscribers.notify(&StateEvent::Reset(&self.state));
    }

    fn persist(&mut self) {
        if let Err(e) = write_state(&mut self.storage, &self.state) {
            log::warn!("Failed to save player state: {}", e);
        }
    }
}
