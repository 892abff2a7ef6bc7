//! Pikachu count: Pikachus flash on screen one after another, then the
//! player says how many there were.

use super::options::distinct_options;
use crate::core::constants::{
    ANSWER_OPTION_COUNT, PIKACHU_OPTIONS_DELAY_MS, PIKACHU_OPTION_SPREAD, PIKACHU_REWARD,
};
use crate::core::player_state::ItemKey;
use crate::difficulty::PikachuProfile;
use crate::session::{ItemEffect, Minigame, MinigameOutcome, Timers};
use rand::Rng;

/// How long each Pikachu stays on screen.
const PIKACHU_VISIBLE_MS: u64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PikachuPhase {
    /// Waiting for the player to press start.
    Intro,
    Spawning,
    Guessing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PikachuTimer {
    Spawn,
    Vanish,
    ShowOptions,
}

#[derive(Debug, Clone)]
pub struct PikachuGame {
    pub profile: PikachuProfile,
    pub count: u32,
    pub options: Vec<u32>,
    pub phase: PikachuPhase,
    pub spawned: u32,
    pub on_screen: u32,
    pub revealed_answer: Option<u32>,
    timers: Timers<PikachuTimer>,
}

impl PikachuGame {
    /// Start (or replay) the sequence.
    pub fn start(&mut self) {
        self.timers.cancel_all();
        self.phase = PikachuPhase::Spawning;
        self.spawned = 0;
        self.on_screen = 0;

        let interval = self.profile.spawn_interval_ms;
        self.timers.every(interval, PikachuTimer::Spawn, Some(self.count));
        self.timers.after(
            interval * u64::from(self.count) + PIKACHU_OPTIONS_DELAY_MS,
            PikachuTimer::ShowOptions,
        );
    }

    /// Answer how many appeared. Ignored until the options are shown.
    pub fn guess(&self, answer: u32) -> Option<MinigameOutcome> {
        if self.phase != PikachuPhase::Guessing {
            return None;
        }
        Some(if answer == self.count {
            MinigameOutcome::success(PIKACHU_REWARD)
        } else {
            MinigameOutcome::recoverable_failure()
        })
    }
}

impl Minigame for PikachuGame {
    fn init<R: Rng>(level: u32, rng: &mut R) -> Self {
        let profile = PikachuProfile::for_level(level);
        let count = profile.count.sample(rng);
        let low = count.saturating_sub(PIKACHU_OPTION_SPREAD).max(1);
        let options = distinct_options(
            count,
            low..=count + PIKACHU_OPTION_SPREAD,
            ANSWER_OPTION_COUNT,
            rng,
        );

        Self {
            profile,
            count,
            options,
            phase: PikachuPhase::Intro,
            spawned: 0,
            on_screen: 0,
            revealed_answer: None,
            timers: Timers::new(),
        }
    }

    fn name(&self) -> &'static str {
        "pikachu"
    }

    fn advance(&mut self, elapsed_ms: u64) -> Option<MinigameOutcome> {
        for event in self.timers.advance(elapsed_ms) {
            match event {
                PikachuTimer::Spawn => {
                    self.spawned += 1;
                    self.on_screen += 1;
                    self.timers.after(PIKACHU_VISIBLE_MS, PikachuTimer::Vanish);
                }
                PikachuTimer::Vanish => self.on_screen = self.on_screen.saturating_sub(1),
                PikachuTimer::ShowOptions => self.phase = PikachuPhase::Guessing,
            }
        }
        None
    }

    fn on_recoverable_failure(&mut self) {
        log::debug!("pikachu: wrong count, replaying {} spawns", self.count);
        self.start();
    }

    fn item_effect(&self, key: ItemKey) -> Option<ItemEffect> {
        (key == ItemKey::Lupa && self.revealed_answer.is_none()).then_some(ItemEffect::RevealAnswer)
    }

    fn apply_item(&mut self, effect: ItemEffect) -> Option<MinigameOutcome> {
        if effect == ItemEffect::RevealAnswer {
            self.revealed_answer = Some(self.count);
        }
        None
    }

    fn cancel_timers(&mut self) {
        self.timers.cancel_all();
    }
}
