//! Pokeplay - progression and economy engine for arithmetic mini-games
//!
//! Exposes the player store, difficulty tables, mini-games and the session
//! lifecycle for front ends and tests.

pub mod build_info;
pub mod core;
pub mod difficulty;
pub mod minigames;
pub mod session;
pub mod store;

pub use crate::core::player_state::{ItemKey, PlayerState};
pub use session::{MinigameOutcome, MinigameSession, SessionPhase};
pub use store::{FileStorage, MemoryStorage, PlayerStore, Storage};
