//! Mini-game session lifecycle: the contract between a mini-game, the
//! player store and the presentation/audio collaborators.

pub mod controller;
pub mod timers;

pub use controller::*;
pub use timers::{TimerId, Timers};

use crate::core::player_state::ItemKey;
use std::num::NonZeroU64;

/// What the presentation layer reports when a round is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinigameOutcome {
    Success { reward: NonZeroU64 },
    Failure { recoverable: bool },
}

impl MinigameOutcome {
    /// Success paying `reward` coins. A zero reward is bumped to 1.
    pub fn success(reward: u64) -> Self {
        let reward = NonZeroU64::new(reward).unwrap_or_else(|| {
            log::warn!("Success reported with a zero reward, paying 1 coin");
            NonZeroU64::MIN
        });
        MinigameOutcome::Success { reward }
    }

    pub fn recoverable_failure() -> Self {
        MinigameOutcome::Failure { recoverable: true }
    }

    pub fn round_failed() -> Self {
        MinigameOutcome::Failure { recoverable: false }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MinigameOutcome::Success { .. })
    }
}

/// Whether a win also advances the player's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelPolicy {
    #[default]
    AdvanceOnWin,
    /// The game's own mechanic is the progression; wins pay coins only.
    KeepLevel,
}

/// Gameplay effect of a consumed power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    /// Push an internal timer/meter back.
    ReduceTimer,
    /// Stop timer advancement for a while.
    FreezeTimer { duration_ms: u64 },
    /// Show the correct answer.
    RevealAnswer,
    /// Win the round outright.
    AutoWin,
    /// Absorb the next failure without penalty.
    Shield,
}

/// Fire-and-forget sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Success,
    Failure,
    UiSelect,
    CannotAfford,
    ItemUsed,
    CannotUse,
}

pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Callbacks into the presentation layer.
pub trait Presenter {
    /// Coins were paid out; show the reward text.
    fn on_reward_granted(&mut self, _reward: u64) {}

    fn on_item_effect_applied(&mut self, _key: ItemKey) {}

    /// A random bonus item was found after a win.
    fn on_item_dropped(&mut self, _key: ItemKey) {}

    fn navigate_to_menu(&mut self);
}

/// Collaborator that ignores everything. Useful for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: AudioCue) {}
}

impl Presenter for Silent {
    fn navigate_to_menu(&mut self) {}
}

/// Capability every mini-game implements so the session can drive it.
///
/// A game builds its whole problem in [`Minigame::init`]. Games that keep
/// drawing random content while the round runs own an RNG seeded there.
pub trait Minigame: Sized {
    fn init<R: rand::Rng>(level: u32, rng: &mut R) -> Self;

    fn name(&self) -> &'static str;

    fn level_policy(&self) -> LevelPolicy {
        LevelPolicy::AdvanceOnWin
    }

    /// Run the game's own timed callbacks. May decide the round.
    fn advance(&mut self, _elapsed_ms: u64) -> Option<MinigameOutcome> {
        None
    }

    /// Apply the game's penalty for a wrong move inside a continuing round.
    fn on_recoverable_failure(&mut self) {}

    /// What `key` would do in this game right now, if anything.
    fn item_effect(&self, _key: ItemKey) -> Option<ItemEffect> {
        None
    }

    /// Apply a consumed item's effect. May decide the round.
    fn apply_item(&mut self, _effect: ItemEffect) -> Option<MinigameOutcome> {
        None
    }

    /// Drop all pending spawn/hide timers.
    fn cancel_timers(&mut self) {}
}
