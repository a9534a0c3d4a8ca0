//! Symbeline Realms rules engine
//!
//! A deterministic, server-authoritative engine for the Symbeline Realms
//! deck-builder: four allied factions, a five-slot trade row, the d10/d4
//! deck-flow tracker, and hidden-information projections for clients.
//!
//! The engine is a plain state machine. Clients submit [`game::Action`]
//! values through [`game::Game::submit`]; the engine validates, mutates,
//! and notifies registered [`game::GameObserver`]s. What a client may see
//! is rendered separately through [`view::render`].
//!
//! All randomness flows through a single seedable ChaCha12 RNG, so a game
//! constructed with the same seed and driven by the same action sequence
//! replays identically.

pub mod core;
pub mod error;
pub mod game;
pub mod view;
pub mod zones;

pub use error::{EngineError, Result};
pub use game::{Action, Game, GameEvent, GameObserver, PendingAction, Phase};
