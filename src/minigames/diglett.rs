//! Diglett counter: tap popping digletts until their numbers add up to the
//! target exactly.

use crate::core::constants::{DIGLETT_REWARD, DIGLETT_VISIBLE_MS, PARALYZE_DURATION_MS};
use crate::core::player_state::ItemKey;
use crate::difficulty::DiglettProfile;
use crate::session::{ItemEffect, LevelPolicy, Minigame, MinigameOutcome, Timers};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diglett {
    pub id: u32,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiglettTimer {
    Spawn,
    Hide(u32),
    ResumeHiding,
}

#[derive(Debug, Clone)]
pub struct DiglettGame {
    pub profile: DiglettProfile,
    pub target: u32,
    pub sum: u32,
    /// Digletts currently above ground, oldest first.
    pub visible: Vec<Diglett>,
    pub frozen: bool,
    pub revealed_remaining: Option<u32>,
    next_id: u32,
    rng: StdRng,
    timers: Timers<DiglettTimer>,
}

impl DiglettGame {
    pub fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.sum)
    }

    /// Tap a visible diglett. Taps on one that already hid are ignored.
    ///
    /// An overshooting tap does not count towards the sum.
    pub fn tap(&mut self, id: u32) -> Option<MinigameOutcome> {
        let index = self.visible.iter().position(|d| d.id == id)?;
        let diglett = self.visible.remove(index);
        self.timers.cancel_where(|t| *t == DiglettTimer::Hide(id));

        let sum = self.sum + diglett.value;
        if sum > self.target {
            return Some(MinigameOutcome::recoverable_failure());
        }
        self.sum = sum;
        if self.revealed_remaining.is_some() {
            self.revealed_remaining = Some(self.remaining());
        }
        (sum == self.target).then(|| MinigameOutcome::success(DIGLETT_REWARD))
    }

    fn spawn(&mut self) {
        let value = self.profile.values.choose(&mut self.rng).copied().unwrap_or(1);
        let id = self.next_id;
        self.next_id += 1;
        self.visible.push(Diglett { id, value });
        if !self.frozen {
            self.timers.after(DIGLETT_VISIBLE_MS, DiglettTimer::Hide(id));
        }
    }

    fn hide(&mut self, id: u32) {
        self.visible.retain(|d| d.id != id);
    }

    fn resume_hiding(&mut self) {
        self.frozen = false;
        for id in self.visible.iter().map(|d| d.id).collect::<Vec<_>>() {
            self.timers.after(DIGLETT_VISIBLE_MS, DiglettTimer::Hide(id));
        }
    }
}

impl Minigame for DiglettGame {
    fn init<R: Rng>(level: u32, rng: &mut R) -> Self {
        let profile = DiglettProfile::for_level(level);
        let target = profile.target.sample(rng);
        let mut timers = Timers::new();
        timers.every(profile.spawn_interval_ms, DiglettTimer::Spawn, None);

        Self {
            profile,
            target,
            sum: 0,
            visible: Vec::new(),
            frozen: false,
            revealed_remaining: None,
            next_id: 0,
            rng: StdRng::seed_from_u64(rng.gen()),
            timers,
        }
    }

    fn name(&self) -> &'static str {
        "diglett"
    }

    fn level_policy(&self) -> LevelPolicy {
        LevelPolicy::KeepLevel
    }

    fn advance(&mut self, elapsed_ms: u64) -> Option<MinigameOutcome> {
        for event in self.timers.advance(elapsed_ms) {
            match event {
                DiglettTimer::Spawn => self.spawn(),
                DiglettTimer::Hide(id) => self.hide(id),
                DiglettTimer::ResumeHiding => self.resume_hiding(),
            }
        }
        None
    }

    fn on_recoverable_failure(&mut self) {
        self.sum = 0;
        self.visible.clear();
        self.timers.cancel_where(|t| matches!(t, DiglettTimer::Hide(_)));
        if self.revealed_remaining.is_some() {
            self.revealed_remaining = Some(self.target);
        }
    }

    fn item_effect(&self, key: ItemKey) -> Option<ItemEffect> {
        match key {
            ItemKey::Lupa if self.revealed_remaining.is_none() => Some(ItemEffect::RevealAnswer),
            ItemKey::Paralizador if !self.frozen => Some(ItemEffect::FreezeTimer {
                duration_ms: PARALYZE_DURATION_MS,
            }),
            _ => None,
        }
    }

    fn apply_item(&mut self, effect: ItemEffect) -> Option<MinigameOutcome> {
        match effect {
            ItemEffect::RevealAnswer => self.revealed_remaining = Some(self.remaining()),
            ItemEffect::FreezeTimer { duration_ms } => {
                self.frozen = true;
                self.timers.cancel_where(|t| matches!(t, DiglettTimer::Hide(_)));
                self.timers.after(duration_ms, DiglettTimer::ResumeHiding);
            }
            _ => {}
        }
        None
    }

    fn cancel_timers(&mut self) {
        self.timers.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    fn game() -> DiglettGame {
        DiglettGame::init(1, &mut ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_target_in_profile_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for level in [1, 5, 30] {
            let g = DiglettGame::init(level, &mut rng);
            assert!(g.profile.target.contains(g.target));
            assert_eq!(g.level_policy(), LevelPolicy::KeepLevel);
        }
    }

    #[test]
    fn test_spawns_on_interval_and_hides() {
        let mut g = game();
        // level 1: one spawn every 1450ms
        g.advance(1449);
        assert!(g.visible.is_empty());
        g.advance(1);
        assert_eq!(g.visible.len(), 1);
        let first = g.visible[0].id;
        assert!([1, 2, 5].contains(&g.visible[0].value));
        g.advance(3000);
        assert!(g.visible.iter().all(|d| d.id != first));
    }

    #[test]
    fn test_exact_sum_wins() {
        let mut g = game();
        g.target = 3;
        g.visible = vec![Diglett { id: 100, value: 1 }, Diglett { id: 101, value: 2 }];
        assert_eq!(g.tap(100), None);
        assert_eq!(g.sum, 1);
        assert_eq!(g.tap(101), Some(MinigameOutcome::success(20)));
    }

    #[test]
    fn test_overshoot_is_recoverable_and_resets() {
        let mut g = game();
        g.target = 4;
        g.sum = 3;
        g.visible = vec![Diglett { id: 7, value: 5 }, Diglett { id: 8, value: 1 }];
        assert_eq!(g.tap(7), Some(MinigameOutcome::recoverable_failure()));
        assert_eq!(g.sum, 3);
        g.on_recoverable_failure();
        assert_eq!(g.sum, 0);
        assert!(g.visible.is_empty());
    }

    #[test]
    fn test_tap_on_hidden_diglett_ignored() {
        let mut g = game();
        assert_eq!(g.tap(999), None);
        assert_eq!(g.sum, 0);
    }

    #[test]
    fn test_paralizador_keeps_digletts_up() {
        let mut g = game();
        g.advance(1450);
        assert_eq!(g.visible.len(), 1);
        g.apply_item(ItemEffect::FreezeTimer { duration_ms: 5000 });
        g.advance(4000);
        // 2 more spawned, none hid
        assert_eq!(g.visible.len(), 3);
        g.advance(1000);
        assert!(!g.frozen);
        g.advance(3000);
        assert!(g.visible.len() < 4);
    }

    #[test]
    fn test_lupa_tracks_remaining() {
        let mut g = game();
        g.target = 10;
        g.apply_item(ItemEffect::RevealAnswer);
        assert_eq!(g.revealed_remaining, Some(10));
        g.visible = vec![Diglett { id: 50, value: 2 }];
        g.tap(50);
        assert_eq!(g.revealed_remaining, Some(8));
        assert_eq!(g.item_effect(ItemKey::Lupa), None);
        assert_eq!(g.item_effect(ItemKey::Pokeball), None);
    }
}
