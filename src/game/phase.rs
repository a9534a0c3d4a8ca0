//! Turn phase state machine
//!
//! The engine runs a deliberately small machine:
//! `NotStarted -> DrawOrder -> Main -> (GameOver)`. Every turn re-enters
//! `DrawOrder`, where the active player chooses (or skips) a draw order
//! before main-phase actions open up.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Game constructed but not yet started.
    NotStarted,

    /// Waiting for the active player's draw-order choice.
    DrawOrder,

    /// Main phase: play, buy, attack, scrap, end turn.
    Main,

    /// A player's authority reached zero.
    GameOver,
}

impl Phase {
    /// Can the active player submit main-phase actions?
    pub fn is_main(&self) -> bool {
        matches!(self, Phase::Main)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Phase::GameOver)
    }
}
