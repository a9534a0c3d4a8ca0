//! Player representation
//!
//! Resource counters, the d10/d4 deck-flow tracker, per-turn faction
//! tracking, the stateful effect context, and ownership of the player's
//! deck zones.

use crate::core::{Faction, PlayerId, PlayerName};
use crate::zones::PlayerDeck;
use serde::{Deserialize, Serialize};

/// Default starting authority.
pub const STARTING_AUTHORITY: u32 = 50;

/// Baseline hand size before the d4 flow bonus/penalty.
pub const BASE_HAND_SIZE: i32 = 5;

/// The d10/d4 deck-flow tracker.
///
/// The d10 counts buy/scrap momentum in [0, 9]. Each wrap past 9 bumps the
/// d4 by one; each wrap below 0 drops it by one. The d4 is the per-turn
/// bonus (or penalty) to hand size and may go negative internally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowTracker {
    d10: u8,
    d4: i8,
}

impl FlowTracker {
    pub fn new() -> Self {
        FlowTracker::default()
    }

    pub fn d10(&self) -> u8 {
        self.d10
    }

    pub fn d4(&self) -> i8 {
        self.d4
    }

    /// Increment the d10 `steps` times, wrapping 9 -> 0 into the d4.
    pub fn shift_up(&mut self, steps: u8) {
        for _ in 0..steps {
            if self.d10 == 9 {
                self.d10 = 0;
                self.d4 = self.d4.saturating_add(1);
            } else {
                self.d10 += 1;
            }
        }
    }

    /// Decrement the d10 `steps` times, wrapping 0 -> 9 out of the d4.
    pub fn shift_down(&mut self, steps: u8) {
        for _ in 0..steps {
            if self.d10 == 0 {
                self.d10 = 9;
                self.d4 = self.d4.saturating_sub(1);
            } else {
                self.d10 -= 1;
            }
        }
    }
}

/// Stateful effect modifiers that persist for the rest of the turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectContext {
    /// Next acquisition up to this cost is free.
    pub free_acquisition: Option<u32>,

    /// Next acquisition goes to the top of the draw pile instead of discard.
    pub top_deck_next: bool,
}

impl EffectContext {
    pub fn reset(&mut self) {
        *self = EffectContext::default();
    }
}

/// Represents a player in the game
#[derive(Debug, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Player name
    pub name: PlayerName,

    /// Authority (health). Floored at 0; reaching 0 loses the game.
    pub authority: u32,

    /// Trade available this turn.
    pub trade: u32,

    /// Combat available this turn.
    pub combat: u32,

    /// Deck-flow tracker.
    pub flow: FlowTracker,

    /// Stateful effect modifiers, reset at turn start.
    pub context: EffectContext,

    /// Bitset of allied factions played this turn.
    factions_played: u8,

    /// The player's deck zones. Exactly one per player.
    pub deck: PlayerDeck,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>) -> Self {
        Player {
            id,
            name: name.into(),
            authority: STARTING_AUTHORITY,
            trade: 0,
            combat: 0,
            flow: FlowTracker::new(),
            context: EffectContext::default(),
            factions_played: 0,
            deck: PlayerDeck::new(),
        }
    }

    pub fn gain_authority(&mut self, amount: u32) {
        self.authority += amount;
    }

    pub fn gain_trade(&mut self, amount: u32) {
        self.trade += amount;
    }

    pub fn gain_combat(&mut self, amount: u32) {
        self.combat += amount;
    }

    /// Apply damage, flooring authority at 0. Returns true if the player
    /// is out of the game.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.authority = self.authority.saturating_sub(amount);
        self.authority == 0
    }

    /// Has a card of this faction been recorded as played this turn?
    /// Unaligned cards never register.
    pub fn faction_played(&self, faction: Faction) -> bool {
        faction
            .ally_bit()
            .map(|bit| self.factions_played & (1 << bit) != 0)
            .unwrap_or(false)
    }

    pub fn mark_faction_played(&mut self, faction: Faction) {
        if let Some(bit) = faction.ally_bit() {
            self.factions_played |= 1 << bit;
        }
    }

    /// Hand size for the coming turn: baseline plus the d4, floored at 0.
    pub fn draw_count(&self) -> usize {
        (BASE_HAND_SIZE + self.flow.d4() as i32).max(0) as usize
    }

    /// Reset per-turn state. Called when this player's turn begins.
    pub fn start_turn(&mut self) {
        self.trade = 0;
        self.combat = 0;
        self.factions_played = 0;
        self.context.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_wrap_up() {
        let mut flow = FlowTracker::new();
        flow.shift_up(9);
        assert_eq!(flow.d10(), 9);
        assert_eq!(flow.d4(), 0);

        flow.shift_up(1);
        assert_eq!(flow.d10(), 0);
        assert_eq!(flow.d4(), 1);
    }

    #[test]
    fn test_flow_wrap_down() {
        let mut flow = FlowTracker::new();
        flow.shift_down(1);
        assert_eq!(flow.d10(), 9);
        assert_eq!(flow.d4(), -1);

        flow.shift_up(1);
        assert_eq!(flow.d10(), 0);
        assert_eq!(flow.d4(), 0);
    }

    #[test]
    fn test_authority_floor() {
        let mut player = Player::new(PlayerId::new(0), "Alice");
        assert!(!player.take_damage(49));
        assert_eq!(player.authority, 1);

        assert!(player.take_damage(10));
        assert_eq!(player.authority, 0);
    }

    #[test]
    fn test_faction_tracking() {
        let mut player = Player::new(PlayerId::new(0), "Bob");
        assert!(!player.faction_played(Faction::Veil));

        player.mark_faction_played(Faction::Veil);
        assert!(player.faction_played(Faction::Veil));
        assert!(!player.faction_played(Faction::Forge));

        // Unaligned never registers.
        player.mark_faction_played(Faction::Unaligned);
        assert!(!player.faction_played(Faction::Unaligned));

        player.start_turn();
        assert!(!player.faction_played(Faction::Veil));
    }

    #[test]
    fn test_draw_count_floor() {
        let mut player = Player::new(PlayerId::new(0), "Cass");
        assert_eq!(player.draw_count(), 5);

        player.flow.shift_up(10);
        assert_eq!(player.draw_count(), 6);

        player.flow.shift_down(20);
        assert_eq!(player.flow.d4(), -1);
        assert_eq!(player.draw_count(), 4);
    }
}
