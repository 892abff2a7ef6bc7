//! Chansey's market: the customer pays for a berry with a note and the
//! player hands back the change from the till.

use super::money::{amounts_match, change_breakdown, format_euros, total};
use crate::core::player_state::ItemKey;
use crate::difficulty::MarketProfile;
use crate::session::{ItemEffect, Minigame, MinigameOutcome};
use rand::Rng;

/// Why a submitted change was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeHint {
    TooMuch,
    NotEnough,
}

impl ChangeHint {
    pub fn message(&self) -> &'static str {
        match self {
            ChangeHint::TooMuch => "¡Es demasiado!",
            ChangeHint::NotEnough => "¡Falta dinero!",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChanseyGame {
    pub profile: MarketProfile,
    pub price: u32,
    pub payment: u32,
    /// Coins the player has put in the change box so far.
    pub given: Vec<f64>,
    pub last_hint: Option<ChangeHint>,
    pub revealed_change: Option<Vec<f64>>,
}

/// First payment option strictly above `price`, else the next multiple of ten.
pub fn payment_for(price: u32, payments: &[u32]) -> u32 {
    payments
        .iter()
        .copied()
        .find(|&p| p > price)
        .unwrap_or(price + 10 - price % 10)
}

impl ChanseyGame {
    pub fn change_due(&self) -> f64 {
        f64::from(self.payment - self.price)
    }

    pub fn given_total(&self) -> f64 {
        total(&self.given)
    }

    /// Put one coin in the change box. Coins the till does not hold are refused.
    pub fn add_coin(&mut self, value: f64) -> bool {
        if !self.profile.denominations.iter().any(|&d| amounts_match(d, value)) {
            return false;
        }
        self.given.push(value);
        self.last_hint = None;
        true
    }

    pub fn clear_change(&mut self) {
        self.given.clear();
    }

    /// Hand over the change. A wrong amount empties the box.
    pub fn submit(&mut self) -> MinigameOutcome {
        let given = self.given_total();
        let due = self.change_due();
        if amounts_match(given, due) {
            self.last_hint = None;
            return MinigameOutcome::success(self.profile.reward);
        }
        self.last_hint = Some(if given > due {
            ChangeHint::TooMuch
        } else {
            ChangeHint::NotEnough
        });
        self.given.clear();
        MinigameOutcome::recoverable_failure()
    }

    pub fn describe(&self) -> String {
        format!(
            "Baya: {} | Pagas con: {}",
            format_euros(f64::from(self.price)),
            format_euros(f64::from(self.payment))
        )
    }
}

impl Minigame for ChanseyGame {
    fn init<R: Rng>(level: u32, rng: &mut R) -> Self {
        let profile = MarketProfile::for_level(level);
        let price = profile.price.sample(rng);
        let payment = payment_for(price, profile.payments);
        Self {
            profile,
            price,
            payment,
            given: Vec::new(),
            last_hint: None,
            revealed_change: None,
        }
    }

    fn name(&self) -> &'static str {
        "chansey"
    }

    fn item_effect(&self, key: ItemKey) -> Option<ItemEffect> {
        (key == ItemKey::Lupa && self.revealed_change.is_none()).then_some(ItemEffect::RevealAnswer)
    }

    fn apply_item(&mut self, effect: ItemEffect) -> Option<MinigameOutcome> {
        if effect == ItemEffect::RevealAnswer {
            self.revealed_change = change_breakdown(self.change_due(), self.profile.denominations);
            if self.revealed_change.is_none() {
                log::warn!("chansey: till cannot make {} exactly", self.change_due());
            }
        }
        None
    }
}
