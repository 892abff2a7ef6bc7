//! Player record and tunable constants.

pub mod constants;
pub mod player_state;

pub use constants::*;
pub use player_state::*;
