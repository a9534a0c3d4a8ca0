//! Automatic draw chains
//!
//! Cards whose primary effects include a draw fire it automatically while
//! they sit in hand with the spent flag clear. Each newly drawn card may
//! itself carry a draw, so resolution loops in passes until a pass draws
//! nothing. The flag is set before the draw happens, so a card reaching the
//! hand twice in one shuffle cycle never fires twice.

use crate::core::PlayerId;
use crate::game::state::Game;
use crate::game::GameEvent;
use crate::{EngineError, Result};

/// Upper bound on chain passes. A legal deck can never approach this (each
/// pass permanently spends at least one card's draw), so hitting it means
/// corrupted state rather than an exotic combo.
pub const MAX_AUTODRAW_PASSES: usize = 32;

impl Game {
    /// Fire every unspent hand draw for `player`, chaining through the
    /// cards drawn along the way. Returns the total number of cards drawn.
    pub(crate) fn resolve_auto_draws(&mut self, player: PlayerId) -> Result<u32> {
        let idx = player.index();
        let mut passes = 0;
        let mut total_drawn = 0;

        loop {
            // Collect this pass's triggers before mutating anything; each
            // trigger is spent up front so reshuffles mid-pass cannot
            // re-arm it.
            let mut triggers = Vec::new();
            for card in self.players[idx].deck.hand.iter_mut() {
                if let Some(count) = card.pending_auto_draw() {
                    card.draw_spent = true;
                    triggers.push((card.instance_id, count));
                }
            }

            if triggers.is_empty() {
                break;
            }

            passes += 1;
            if passes > MAX_AUTODRAW_PASSES {
                return Err(EngineError::ChainOverrun { passes });
            }

            for (instance, count) in triggers {
                self.emit(GameEvent::AutoDrawTriggered { player, instance });
                total_drawn += self.draw_cards(player, count as u32);
            }
        }

        if passes > 0 {
            self.emit(GameEvent::AutoDrawComplete {
                player,
                passes,
                drawn: total_drawn,
            });
        }
        Ok(total_drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardCatalog, CardKind, CardType, CardTypeId, Effect, Faction};
    use std::sync::Arc;

    fn drawer(id: u32) -> CardType {
        CardType::new(
            CardTypeId::new(id),
            format!("Courier {id}"),
            2,
            Faction::Concord,
            CardKind::Ship,
        )
        .primary(Effect::Draw(1))
    }

    fn plain(id: u32) -> CardType {
        CardType::new(
            CardTypeId::new(id),
            format!("Freighter {id}"),
            2,
            Faction::Forge,
            CardKind::Ship,
        )
        .primary(Effect::GainTrade(1))
    }

    fn two_player_game() -> Game {
        let mut game = Game::new(&["Alice", "Bob"]).unwrap();
        game.seed_rng(11);
        game
    }

    /// Empty a player's draw pile and discard so tests control exactly
    /// which cards a chain can reach.
    fn clear_piles(game: &mut Game, player: PlayerId) {
        let deck = &mut game.player_mut(player).unwrap().deck;
        while deck.draw_pile.remove_at(0).is_some() {}
        while deck.discard.remove_at(0).is_some() {}
    }

    fn give(game: &mut Game, player: PlayerId, ty: CardType, to_hand: bool) {
        let card = game.mint(&Arc::new(ty));
        let deck = &mut game.player_mut(player).unwrap().deck;
        if to_hand {
            deck.hand.add(card);
        } else {
            deck.draw_pile.add(card);
        }
    }

    #[test]
    fn test_single_draw_fires_once() {
        let mut game = two_player_game();
        let p0 = PlayerId::new(0);
        clear_piles(&mut game, p0);
        give(&mut game, p0, drawer(100), true);
        give(&mut game, p0, plain(101), false);
        give(&mut game, p0, plain(102), false);

        let drawn = game.resolve_auto_draws(p0).unwrap();
        assert_eq!(drawn, 1);
        assert_eq!(game.player(p0).unwrap().deck.hand.len(), 2);

        // The spent flag holds: a second resolution draws nothing.
        let drawn = game.resolve_auto_draws(p0).unwrap();
        assert_eq!(drawn, 0);
    }

    #[test]
    fn test_chain_through_drawn_cards() {
        let mut game = two_player_game();
        let p0 = PlayerId::new(0);
        clear_piles(&mut game, p0);
        give(&mut game, p0, drawer(100), true);
        give(&mut game, p0, drawer(101), false);
        give(&mut game, p0, drawer(102), false);
        give(&mut game, p0, plain(103), false);

        // Each draw surfaces the next drawer: 3 cards total over 3+ passes.
        let drawn = game.resolve_auto_draws(p0).unwrap();
        assert_eq!(drawn, 3);
        assert_eq!(game.player(p0).unwrap().deck.hand.len(), 4);
        assert!(game.player(p0).unwrap().deck.draw_pile.is_empty());
    }

    #[test]
    fn test_exhausted_deck_stops_chain() {
        let mut game = two_player_game();
        let p0 = PlayerId::new(0);
        clear_piles(&mut game, p0);
        give(&mut game, p0, drawer(100), true);

        // Nothing to draw anywhere; the trigger fires but draws zero.
        let drawn = game.resolve_auto_draws(p0).unwrap();
        assert_eq!(drawn, 0);
        assert!(game.player(p0).unwrap().deck.hand.iter().next().unwrap().draw_spent);
    }

    #[test]
    fn test_starter_decks_never_chain() {
        let mut game = Game::with_catalog(&["Alice", "Bob"], CardCatalog::standard()).unwrap();
        game.seed_rng(3);
        let p0 = PlayerId::new(0);
        game.draw_cards(p0, 5);

        // Scouts and Vipers carry no draw effects.
        let drawn = game.resolve_auto_draws(p0).unwrap();
        assert_eq!(drawn, 0);
    }
}
