//! Error types for the Symbeline Realms engine

use thiserror::Error;

/// Failure taxonomy for engine actions.
///
/// Deck exhaustion is deliberately *not* an error: drawing from an empty
/// deck-plus-discard yields `None` and callers treat it as an absence.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Action submitted in the wrong phase, by the wrong player, or while a
    /// pending action is outstanding. Always rejected before any mutation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Not enough trade or combat to pay for the action.
    #[error("insufficient {resource}: need {needed}, have {available}")]
    ResourceInsufficient {
        resource: &'static str,
        needed: u32,
        available: u32,
    },

    /// Unknown card id, empty slot, or out-of-range index.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// The auto-draw chain hit its safety bound. This indicates a
    /// pathological card catalog, not a corrupted game.
    #[error("auto-draw chain exceeded {passes} passes")]
    ChainOverrun { passes: usize },

    /// An inbound request document could not be parsed.
    #[error("malformed request: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
