//! Strongly-typed wrappers for game concepts
//!
//! Newtypes for the three id spaces (card types, card instances, players)
//! plus the small closed enums shared across the engine. Distinct types keep
//! catalog ids, per-copy ids and player indices from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog id of a card definition. Many instances share one type id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardTypeId(u32);

impl CardTypeId {
    pub const fn new(id: u32) -> Self {
        CardTypeId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Globally-unique id of a single card copy.
///
/// Allocated by the `Game` and stable for the copy's whole lifetime; never
/// reused within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(u32);

impl InstanceId {
    pub fn new(id: u32) -> Self {
        InstanceId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player index into the game's player array (at most 4 players).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub fn new(id: u8) -> Self {
        PlayerId(id)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five factions of Symbeline Realms.
///
/// The four allied factions participate in ally-ability tracking; unaligned
/// cards (starters, Explorers) never trigger or enable ally effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Concord,
    Veil,
    Forge,
    Wilds,
    Unaligned,
}

impl Faction {
    /// Bit position in the per-player faction bitset, `None` for unaligned.
    pub fn ally_bit(&self) -> Option<u8> {
        match self {
            Faction::Concord => Some(0),
            Faction::Veil => Some(1),
            Faction::Forge => Some(2),
            Faction::Wilds => Some(3),
            Faction::Unaligned => None,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Faction::Concord => "Concord",
            Faction::Veil => "Veil",
            Faction::Forge => "Forge",
            Faction::Wilds => "Wilds",
            Faction::Unaligned => "Unaligned",
        };
        write!(f, "{s}")
    }
}

/// Card kinds. Ships and units go to the played zone when played;
/// bases persist in a base zone until destroyed or scrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Ship,
    Base,
    Unit,
}

/// Base placement tiers. Frontier bases shield interior bases: attackers
/// must clear the frontier before interior bases can be targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Frontier,
    Interior,
}

/// Player name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: impl Into<String>) -> Self {
        PlayerName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerName {
    fn from(s: String) -> Self {
        PlayerName(s)
    }
}

impl From<&str> for PlayerName {
    fn from(s: &str) -> Self {
        PlayerName(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ally_bits() {
        assert_eq!(Faction::Concord.ally_bit(), Some(0));
        assert_eq!(Faction::Wilds.ally_bit(), Some(3));
        assert_eq!(Faction::Unaligned.ally_bit(), None);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CardTypeId::new(7).to_string(), "7");
        assert_eq!(InstanceId::new(42).to_string(), "42");
        assert_eq!(PlayerId::new(1).index(), 1);
    }

    #[test]
    fn test_player_name() {
        let name = PlayerName::new("Alice");
        assert_eq!(name.as_str(), "Alice");
    }
}
