//! Player store behaviour through the public API: resource guards,
//! persistence round-trips and subscriber notifications.

use pokeplay::core::constants::STORAGE_KEY;
use pokeplay::store::{read_state, StateEvent};
use pokeplay::{FileStorage, ItemKey, MemoryStorage, PlayerState, PlayerStore, Storage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::io;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir() -> PathBuf {
    let n = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("pokeplay_store_test_{}_{}", std::process::id(), n))
}

fn memory_store() -> PlayerStore<MemoryStorage, ChaCha8Rng> {
    PlayerStore::open(MemoryStorage::new(), ChaCha8Rng::seed_from_u64(42))
}

/// Reads nothing, fails every write.
struct ReadOnlyDisk;

impl Storage for ReadOnlyDisk {
    fn read(&self, _key: &str) -> io::Result<Option<String>> {
        Ok(None)
    }

    fn write(&mut self, _key: &str, _data: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

// =========================================================================
// Resource guards
// =========================================================================

#[test]
fn test_spend_coins_guard() {
    let mut store = memory_store();
    assert_eq!(store.level(), 1);
    assert_eq!(store.coins(), 500);
    assert!(store.spend_coins(50));
    assert_eq!(store.coins(), 450);
    assert!(!store.spend_coins(1000));
    assert_eq!(store.coins(), 450);
}

#[test]
fn test_level_floor() {
    let mut store = memory_store();
    store.level_down();
    assert_eq!(store.level(), 1);
    for _ in 0..3 {
        store.level_up();
    }
    for _ in 0..5 {
        store.level_down();
    }
    assert_eq!(store.level(), 1);
}

#[test]
fn test_use_item_guard() {
    let mut store = memory_store();
    assert!(!store.use_item(ItemKey::Potion));
    assert_eq!(store.item_count(ItemKey::Potion), 0);
    store.add_item(ItemKey::Potion, 2);
    assert!(store.use_item(ItemKey::Potion));
    assert_eq!(store.item_count(ItemKey::Potion), 1);
}

#[test]
fn test_random_call_sequences_keep_invariants() {
    let mut driver = ChaCha8Rng::seed_from_u64(2024);
    let mut store = PlayerStore::open(MemoryStorage::new(), ChaCha8Rng::seed_from_u64(7));
    let notified = Rc::new(RefCell::new(0u32));
    let n = Rc::clone(&notified);
    store.subscribe(move |_| *n.borrow_mut() += 1);

    for step in 0..5_000 {
        let before = store.state().clone();
        let calls_before = *notified.borrow();
        let key = ItemKey::ALL[driver.gen_range(0..ItemKey::ALL.len())];

        match driver.gen_range(0..9) {
            0 => store.add_coins(driver.gen_range(0..200)),
            1 => {
                let amount = driver.gen_range(0..1_000);
                let afford = amount <= before.coins();
                assert_eq!(store.spend_coins(amount), afford, "step {step}");
                if !afford {
                    assert_eq!(*store.state(), before, "step {step}");
                    assert_eq!(*notified.borrow(), calls_before, "step {step}");
                }
            }
            2 => store.level_up(),
            3 => {
                store.level_down();
                if before.level() == 1 {
                    assert_eq!(*store.state(), before, "step {step}");
                    assert_eq!(*notified.borrow(), calls_before, "step {step}");
                }
            }
            4 => store.set_level(NonZeroU32::new(driver.gen_range(1..50)).unwrap()),
            5 => store.add_item(key, driver.gen_range(0..3)),
            6 => {
                let owned = before.item_count(key) > 0;
                assert_eq!(store.use_item(key), owned, "step {step}");
                if !owned {
                    assert_eq!(*store.state(), before, "step {step}");
                    assert_eq!(*notified.borrow(), calls_before, "step {step}");
                }
            }
            7 => {
                if store.check_item_drop().is_none() {
                    assert_eq!(*store.state(), before, "step {step}");
                }
            }
            _ => {
                // rare, so the state has time to grow between resets
                if driver.gen_bool(0.1) {
                    store.reset();
                    assert_eq!(*store.state(), PlayerState::initial());
                }
            }
        }

        assert!(store.level() >= 1, "step {step}");
        assert_eq!(store.load(), *store.state(), "step {step}");
    }
}

// =========================================================================
// Persistence
// =========================================================================

#[test]
fn test_round_trip_through_files() {
    let dir = temp_dir();
    {
        let mut store = PlayerStore::open(
            FileStorage::with_dir(&dir).unwrap(),
            ChaCha8Rng::seed_from_u64(1),
        );
        store.add_coins(25);
        store.level_up();
        store.add_item(ItemKey::Escudo, 3);
        assert_eq!(store.load(), *store.state());
    }

    let reopened = PlayerStore::open(
        FileStorage::with_dir(&dir).unwrap(),
        ChaCha8Rng::seed_from_u64(1),
    );
    assert_eq!(reopened.coins(), 525);
    assert_eq!(reopened.level(), 2);
    assert_eq!(reopened.item_count(ItemKey::Escudo), 3);
    assert!(dir.join(format!("{}.json", STORAGE_KEY)).exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_partial_record_fills_defaults() {
    let storage = MemoryStorage::new();
    storage.insert(STORAGE_KEY, r#"{"coins":7,"level":4}"#);
    let store = PlayerStore::open(storage, ChaCha8Rng::seed_from_u64(0));
    assert_eq!(store.coins(), 7);
    assert_eq!(store.level(), 4);
    assert_eq!(store.item_count(ItemKey::Lupa), 0);
}

#[test]
fn test_malformed_records_fall_back_to_initial_state() {
    for bad in [
        "not json",
        r#"{"coins":10,"level":0}"#,
        r#"{"coins":-5,"level":2}"#,
        r#"{"coins":10,"level":2,"inventory":{"potion":-1}}"#,
    ] {
        let storage = MemoryStorage::new();
        storage.insert(STORAGE_KEY, bad);
        assert!(read_state(&storage).is_err(), "{bad} should not parse");
        let store = PlayerStore::open(storage, ChaCha8Rng::seed_from_u64(0));
        assert_eq!(*store.state(), PlayerState::initial(), "{bad}");
    }
}

#[test]
fn test_unknown_items_do_not_wipe_progress() {
    let storage = MemoryStorage::new();
    storage.insert(
        STORAGE_KEY,
        r#"{"coins":4200,"level":17,"inventory":{"potion":3,"masterball":1},"highScore":9}"#,
    );
    let mut store = PlayerStore::open(storage.clone(), ChaCha8Rng::seed_from_u64(0));
    assert_eq!(store.coins(), 4200);
    assert_eq!(store.level(), 17);
    assert_eq!(store.item_count(ItemKey::Potion), 3);

    store.add_coins(1);
    let saved = read_state(&storage).unwrap().unwrap();
    assert_eq!(saved.coins(), 4201);
    assert_eq!(saved.level(), 17);
    assert_eq!(saved.high_score(), 9);
}

#[test]
fn test_failed_writes_keep_memory_state_and_notify() {
    let mut store = PlayerStore::open(ReadOnlyDisk, ChaCha8Rng::seed_from_u64(0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |event| sink.borrow_mut().push(event.state().coins()));

    store.add_coins(10);
    assert_eq!(store.coins(), 510);
    assert_eq!(*seen.borrow(), vec![510]);
}

// =========================================================================
// Subscribers
// =========================================================================

#[test]
fn test_subscribers_run_in_registration_order() {
    let mut store = memory_store();
    let order = Rc::new(RefCell::new(Vec::new()));
    for name in ["hud", "shop", "menu"] {
        let order = Rc::clone(&order);
        store.subscribe(move |_| order.borrow_mut().push(name));
    }
    store.level_up();
    assert_eq!(*order.borrow(), vec!["hud", "shop", "menu"]);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let mut store = memory_store();
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    let id = store.subscribe(move |_| *c.borrow_mut() += 1);

    store.add_coins(1);
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.add_coins(1);
    assert_eq!(*count.borrow(), 1);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn test_panicking_subscriber_does_not_block_others() {
    let mut store = memory_store();
    let reached = Rc::new(RefCell::new(false));
    store.subscribe(|_| panic!("broken HUD"));
    let r = Rc::clone(&reached);
    store.subscribe(move |_| *r.borrow_mut() = true);

    store.add_coins(5);
    assert!(*reached.borrow());
    assert_eq!(store.subscriber_count(), 2);
    assert_eq!(store.coins(), 505);
}

#[test]
fn test_no_notification_on_failed_guard() {
    let mut store = memory_store();
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    store.subscribe(move |_| *c.borrow_mut() += 1);

    assert!(!store.spend_coins(10_000));
    assert!(!store.use_item(ItemKey::Pokeball));
    store.level_down();
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn test_reset_broadcasts_reset_event() {
    let mut store = memory_store();
    store.set_level(NonZeroU32::new(9).unwrap());
    store.add_item(ItemKey::Potion, 4);

    let resets = Rc::new(RefCell::new(Vec::new()));
    let r = Rc::clone(&resets);
    store.subscribe(move |event: &StateEvent<'_>| {
        r.borrow_mut().push((event.is_reset(), event.state().level()))
    });

    store.reset();
    assert_eq!(*resets.borrow(), vec![(true, 1)]);
    assert_eq!(*store.state(), PlayerState::initial());
    assert_eq!(store.load(), PlayerState::initial());
}
