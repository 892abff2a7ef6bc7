//! Player state store, storage backends and the item shop.

pub mod player_store;
pub mod shop;
pub mod storage;
pub mod subscribers;

pub use player_store::*;
pub use shop::*;
pub use storage::*;
pub use subscribers::{StateEvent, SubscriptionId};
