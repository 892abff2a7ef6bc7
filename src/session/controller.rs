//! Drives one mini-game session from Init to its return to the menu.
//!
//! The presentation layer evaluates player input through the game and
//! hands the resulting [`MinigameOutcome`] to [`MinigameSession::report_outcome`].
//! The session applies the reward/penalty policy to the player store and
//! calls back into the presentation and audio collaborators.
//!
//! Bonus item drops are not part of the outcome policy. The presentation
//! layer rolls them through [`MinigameSession::roll_item_drop`] whenever
//! it decides a drop chance is due.

use super::timers::Timers;
use super::{AudioCue, AudioSink, ItemEffect, LevelPolicy, Minigame, MinigameOutcome, Presenter};
use crate::core::constants::{FAILURE_DISPLAY_DELAY_MS, VICTORY_DISPLAY_DELAY_MS};
use crate::core::player_state::ItemKey;
use crate::store::{PlayerStore, Storage};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Player is solving the problem.
    Active,
    /// Won; waiting out the victory display before returning to the menu.
    ResolvedSuccess,
    /// Lost; waiting out the failure display before returning to the menu.
    ResolvedFailure,
    /// Back at the menu. Nothing further happens.
    Closed,
}

impl SessionPhase {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SessionPhase::ResolvedSuccess | SessionPhase::ResolvedFailure)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session is not active (phase: {phase:?})")]
    NotActive { phase: SessionPhase },
}

/// Result of asking to use a power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUse {
    /// One unit was consumed and its effect applied.
    Applied(ItemEffect),
    /// None held; nothing consumed.
    NotOwned,
    /// The item does nothing here right now; nothing consumed.
    NoEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    ReturnToMenu,
}

pub struct MinigameSession<G: Minigame> {
    game: G,
    phase: SessionPhase,
    timers: Timers<SessionTimer>,
    shield_armed: bool,
    presenter: Box<dyn Presenter>,
    audio: Box<dyn AudioSink>,
}

impl<G: Minigame> MinigameSession<G> {
    /// Init: build the problem from the player's current level and go Active.
    pub fn start<S: Storage, D: Rng, R: Rng>(
        store: &PlayerStore<S, D>,
        rng: &mut R,
        presenter: Box<dyn Presenter>,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let game = G::init(store.level(), rng);
        log::debug!("Starting {} at level {}", game.name(), store.level());
        Self {
            game,
            phase: SessionPhase::Active,
            timers: Timers::new(),
            shield_armed: false,
            presenter,
            audio,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Mutable access for the presentation layer to feed player input.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn shield_armed(&self) -> bool {
        self.shield_armed
    }

    /// Apply a decided outcome to the player store.
    pub fn report_outcome<S: Storage, D: Rng>(
        &mut self,
        store: &mut PlayerStore<S, D>,
        outcome: MinigameOutcome,
    ) -> Result<SessionPhase, SessionError> {
        self.ensure_active()?;
        match outcome {
            MinigameOutcome::Success { reward } => self.resolve_success(store, reward.get()),
            MinigameOutcome::Failure { recoverable: true } => {
                self.audio.play(AudioCue::Failure);
                if self.take_shield() {
                    log::debug!("{}: shield absorbed a wrong move", self.game.name());
                } else {
                    self.game.on_recoverable_failure();
                }
            }
            MinigameOutcome::Failure { recoverable: false } => self.resolve_failure(store),
        }
        Ok(self.phase)
    }

    /// Spend one `key` on its effect in this game.
    pub fn request_item_use<S: Storage, D: Rng>(
        &mut self,
        store: &mut PlayerStore<S, D>,
        key: ItemKey,
    ) -> Result<ItemUse, SessionError> {
        self.ensure_active()?;

        let effect = match key {
            ItemKey::Escudo if self.shield_armed => None,
            ItemKey::Escudo => Some(ItemEffect::Shield),
            _ => self.game.item_effect(key),
        };
        let Some(effect) = effect else {
            self.audio.play(AudioCue::CannotUse);
            return Ok(ItemUse::NoEffect);
        };
        if !store.use_item(key) {
            self.audio.play(AudioCue::CannotUse);
            return Ok(ItemUse::NotOwned);
        }

        self.audio.play(AudioCue::ItemUsed);
        self.presenter.on_item_effect_applied(key);
        let decided = match effect {
            ItemEffect::Shield => {
                self.shield_armed = true;
                None
            }
            other => self.game.apply_item(other),
        };
        if let Some(outcome) = decided {
            self.report_outcome(store, outcome)?;
        }
        Ok(ItemUse::Applied(effect))
    }

    /// Advance time. While Active this runs the game's timers (which may
    /// decide the round); once resolved it runs the return-to-menu delay.
    pub fn advance<S: Storage, D: Rng>(
        &mut self,
        store: &mut PlayerStore<S, D>,
        elapsed_ms: u64,
    ) -> SessionPhase {
        match self.phase {
            SessionPhase::Active => {
                if let Some(outcome) = self.game.advance(elapsed_ms) {
                    // Active was just checked, so this cannot fail.
                    let _ = self.report_outcome(store, outcome);
                }
            }
            SessionPhase::ResolvedSuccess | SessionPhase::ResolvedFailure => {
                for event in self.timers.advance(elapsed_ms) {
                    match event {
                        SessionTimer::ReturnToMenu => self.close(),
                    }
                }
            }
            SessionPhase::Closed => {}
        }
        self.phase
    }

    /// Roll the store's bonus drop and announce a found item. Independent of
    /// how the round goes; does nothing once the session is closed.
    pub fn roll_item_drop<S: Storage, D: Rng>(
        &mut self,
        store: &mut PlayerStore<S, D>,
    ) -> Option<ItemKey> {
        if self.phase == SessionPhase::Closed {
            return None;
        }
        let key = store.check_item_drop()?;
        log::info!("{}: found a {}", self.game.name(), key.name());
        self.presenter.on_item_dropped(key);
        Some(key)
    }

    /// Player navigated away: cancel everything and go back to the menu.
    pub fn leave(&mut self) {
        if self.phase != SessionPhase::Closed {
            self.close();
        }
    }

    fn resolve_success<S: Storage, D: Rng>(&mut self, store: &mut PlayerStore<S, D>, reward: u64) {
        self.game.cancel_timers();
        store.add_coins(reward);
        if self.game.level_policy() == LevelPolicy::AdvanceOnWin {
            store.level_up();
        }

        self.audio.play(AudioCue::Success);
        self.presenter.on_reward_granted(reward);

        log::info!("{} won: +{} coins, level {}", self.game.name(), reward, store.level());
        self.phase = SessionPhase::ResolvedSuccess;
        self.timers.after(VICTORY_DISPLAY_DELAY_MS, SessionTimer::ReturnToMenu);
    }

    fn resolve_failure<S: Storage, D: Rng>(&mut self, store: &mut PlayerStore<S, D>) {
        self.game.cancel_timers();
        if self.take_shield() {
            log::debug!("{}: shield absorbed the level penalty", self.game.name());
        } else {
            store.level_down();
        }
        self.audio.play(AudioCue::Failure);

        log::info!("{} lost, level {}", self.game.name(), store.level());
        self.phase = SessionPhase::ResolvedFailure;
        self.timers.after(FAILURE_DISPLAY_DELAY_MS, SessionTimer::ReturnToMenu);
    }

    fn close(&mut self) {
        self.game.cancel_timers();
        self.timers.cancel_all();
        self.phase = SessionPhase::Closed;
        self.presenter.navigate_to_menu();
    }

    fn take_shield(&mut self) -> bool {
        std::mem::replace(&mut self.shield_armed, false)
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Active {
            Ok(())
        } else {
            Err(SessionError::NotActive { phase: self.phase })
        }
    }
}
