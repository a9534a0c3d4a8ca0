//! Game state and the turn engine
//!
//! The `Game` struct in `state` is the root type; the sibling modules hang
//! additional `impl Game` blocks off it: `actions` for the player-facing
//! command surface, `effects` for card effect dispatch, `autodraw` for
//! chained draw resolution, and `pending` for deferred-choice resolution.

pub mod actions;
pub mod autodraw;
pub mod effects;
pub mod events;
pub mod pending;
pub mod phase;
pub mod state;
pub mod trade_row;

pub use actions::Action;
pub use autodraw::MAX_AUTODRAW_PASSES;
pub use events::{EventLog, GameEvent, GameObserver};
pub use pending::{PendingAction, ScrapZones, UpgradeKind};
pub use phase::Phase;
pub use state::{Game, MAX_PLAYERS};
pub use trade_row::{SlotSelector, TradeRow, TRADE_ROW_SLOTS};
