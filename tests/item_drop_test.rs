//! Statistical checks for the post-win item drop.

use pokeplay::{ItemKey, MemoryStorage, PlayerStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

const ROLLS: u32 = 100_000;

#[test]
fn test_drop_rate_is_about_ten_percent() {
    let mut store = PlayerStore::open(MemoryStorage::new(), ChaCha8Rng::seed_from_u64(42));
    let drops = (0..ROLLS).filter(|_| store.check_item_drop().is_some()).count() as f64;
    let rate = drops / ROLLS as f64;
    assert!((0.09..=0.11).contains(&rate), "drop rate {rate}");
}

#[test]
fn test_every_item_can_drop_with_similar_odds() {
    let mut store = PlayerStore::open(MemoryStorage::new(), ChaCha8Rng::seed_from_u64(7));
    let mut counts: HashMap<ItemKey, u32> = HashMap::new();
    for _ in 0..ROLLS {
        if let Some(key) = store.check_item_drop() {
            *counts.entry(key).or_default() += 1;
        }
    }

    let total: u32 = counts.values().sum();
    for key in ItemKey::DROPPABLE {
        let share = f64::from(counts.get(&key).copied().unwrap_or(0)) / f64::from(total);
        assert!((0.17..=0.23).contains(&share), "{} share {share}", key.name());
        assert_eq!(store.item_count(key), counts[&key]);
    }
}

#[test]
fn test_miss_changes_nothing() {
    let mut store = PlayerStore::open(MemoryStorage::new(), ChaCha8Rng::seed_from_u64(3));
    for _ in 0..200 {
        let before = store.state().clone();
        if store.check_item_drop().is_none() {
            assert_eq!(*store.state(), before);
        }
    }
}
