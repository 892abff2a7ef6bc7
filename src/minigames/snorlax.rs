//! Snorlax's snack: subtraction under a wake-up meter.
//!
//! Snorlax wants `target` snacks and has eaten `eaten`; the player picks
//! how many are missing. Past the first levels a meter fills while the
//! player thinks, and a wrong answer jolts it up. A full meter ends the
//! round.

use super::options::distinct_options;
use crate::core::constants::{
    ANSWER_OPTION_COUNT, PARALYZE_DURATION_MS, POTION_WAKE_REDUCTION, SNORLAX_REWARD,
    SNORLAX_WRONG_ANSWER_PENALTY,
};
use crate::core::player_state::ItemKey;
use crate::difficulty::SnorlaxProfile;
use crate::session::{ItemEffect, Minigame, MinigameOutcome};
use rand::seq::SliceRandom;
use rand::Rng;

/// Snack flavours, only used for the question text.
pub const SNACKS: [&str; 4] = ["caramelos", "bayas", "manzanas", "donas"];

#[derive(Debug, Clone)]
pub struct SnorlaxGame {
    pub profile: SnorlaxProfile,
    pub target: u32,
    pub eaten: u32,
    pub snack: &'static str,
    pub options: Vec<u32>,
    /// 0.0 asleep, 1.0 awake.
    pub wake_progress: f64,
    pub revealed_answer: Option<u32>,
    /// Meter time still frozen by a paralizador.
    paralysis_left_ms: u64,
}

impl SnorlaxGame {
    pub fn correct_answer(&self) -> u32 {
        self.target - self.eaten
    }

    /// Evaluate a chosen option.
    pub fn answer(&self, choice: u32) -> MinigameOutcome {
        if choice == self.correct_answer() {
            MinigameOutcome::success(SNORLAX_REWARD)
        } else {
            MinigameOutcome::recoverable_failure()
        }
    }

    pub fn question(&self) -> String {
        format!(
            "Snorlax quiere {} {}. Ya se comió {}. ¿Cuántos faltan?",
            self.target, self.snack, self.eaten
        )
    }

    pub fn is_paralyzed(&self) -> bool {
        self.paralysis_left_ms > 0
    }

    fn is_awake(&self) -> bool {
        self.wake_progress >= 1.0
    }
}

impl Minigame for SnorlaxGame {
    fn init<R: Rng>(level: u32, rng: &mut R) -> Self {
        let profile = SnorlaxProfile::for_level(level);
        let target = profile.target.sample(rng);
        let eaten = rng.gen_range(1..target);
        let correct = target - eaten;
        let options = distinct_options(correct, 1..=profile.target.max, ANSWER_OPTION_COUNT, rng);
        let snack = SNACKS.choose(rng).copied().unwrap_or(SNACKS[0]);

        Self {
            profile,
            target,
            eaten,
            snack,
            options,
            wake_progress: 0.0,
            revealed_answer: None,
            paralysis_left_ms: 0,
        }
    }

    fn name(&self) -> &'static str {
        "snorlax"
    }

    fn advance(&mut self, elapsed_ms: u64) -> Option<MinigameOutcome> {
        // Only the part of the tick after the freeze ends fills the meter.
        let frozen_ms = elapsed_ms.min(self.paralysis_left_ms);
        self.paralysis_left_ms -= frozen_ms;
        if !self.profile.timer_active {
            return None;
        }
        let awake_ms = elapsed_ms - frozen_ms;
        self.wake_progress += self.profile.wake_rate * awake_ms as f64 / 1000.0;
        self.is_awake().then(MinigameOutcome::round_failed)
    }

    fn on_recoverable_failure(&mut self) {
        self.wake_progress += SNORLAX_WRONG_ANSWER_PENALTY;
    }

    fn item_effect(&self, key: ItemKey) -> Option<ItemEffect> {
        match key {
            ItemKey::Potion if self.wake_progress > 0.0 => Some(ItemEffect::ReduceTimer),
            ItemKey::Pokeball => Some(ItemEffect::AutoWin),
            ItemKey::Paralizador if self.profile.timer_active && !self.is_paralyzed() => {
                Some(ItemEffect::FreezeTimer {
                    duration_ms: PARALYZE_DURATION_MS,
                })
            }
            ItemKey::Lupa if self.revealed_answer.is_none() => Some(ItemEffect::RevealAnswer),
            _ => None,
        }
    }

    fn apply_item(&mut self, effect: ItemEffect) -> Option<MinigameOutcome> {
        match effect {
            ItemEffect::ReduceTimer => {
                self.wake_progress = (self.wake_progress - POTION_WAKE_REDUCTION).max(0.0);
            }
            ItemEffect::FreezeTimer { duration_ms } => self.paralysis_left_ms = duration_ms,
            ItemEffect::RevealAnswer => self.revealed_answer = Some(self.correct_answer()),
            ItemEffect::AutoWin => return Some(MinigameOutcome::success(SNORLAX_REWARD)),
            ItemEffect::Shield => {}
        }
        None
    }

    fn cancel_timers(&mut self) {
        self.paralysis_left_ms = 0;
    }
}
