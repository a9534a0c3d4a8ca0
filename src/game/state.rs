//! Main game state structure
//!
//! `Game` composes the players, trade row, catalog, RNG, the single
//! pending-action slot, and the observer list. It is mutated by exactly one
//! external call at a time; nothing here blocks or suspends.

use crate::core::{
    CardCatalog, CardInstance, CardType, InstanceId, Player, PlayerId, PlayerName,
};
use crate::game::{GameEvent, GameObserver, PendingAction, Phase, TradeRow};
use crate::{EngineError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::sync::Arc;

/// Maximum players per game.
pub const MAX_PLAYERS: usize = 4;

/// Starting deck composition: 8 Scouts and 2 Vipers.
const STARTING_SCOUTS: usize = 8;
const STARTING_VIPERS: usize = 2;

/// Complete game state and the root of the engine's ownership tree: the
/// game owns its players, trade row, and catalog; each player's deck owns
/// its card instances.
pub struct Game {
    pub(crate) players: Vec<Player>,
    pub(crate) active_idx: usize,
    pub(crate) turn_number: u32,
    pub(crate) phase: Phase,
    pub(crate) trade_row: TradeRow,
    pub(crate) catalog: CardCatalog,

    /// At most one deferred choice outstanding at a time. A queued choice
    /// blocks all main-phase actions until resolved or skipped.
    pub(crate) pending: Option<PendingAction>,

    pub(crate) winner: Option<PlayerId>,
    pub(crate) loser: Option<PlayerId>,

    /// Deterministic RNG for shuffles and art seeds; seed it explicitly
    /// for reproducible games.
    pub(crate) rng: ChaCha12Rng,

    /// Unified instance-id allocator.
    pub(crate) next_instance: u32,

    /// Draw count fixed when `DrawOrder` was entered, so the permutation
    /// check validates against a stable number.
    pub(crate) expected_draws: usize,

    pub(crate) observers: Vec<Box<dyn GameObserver>>,
}

impl Game {
    /// Create a game with the standard catalog. 2 to 4 players.
    pub fn new<N: Into<PlayerName> + Clone>(names: &[N]) -> Result<Self> {
        Game::with_catalog(names, CardCatalog::standard())
    }

    /// Create a game over a custom catalog.
    pub fn with_catalog<N: Into<PlayerName> + Clone>(
        names: &[N],
        catalog: CardCatalog,
    ) -> Result<Self> {
        if names.len() < 2 || names.len() > MAX_PLAYERS {
            return Err(EngineError::InvalidState(format!(
                "need 2-{MAX_PLAYERS} players, got {}",
                names.len()
            )));
        }

        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let mut next_instance = 0u32;

        let mut players = Vec::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            let mut player = Player::new(PlayerId::new(idx as u8), name.clone().into());
            for _ in 0..STARTING_SCOUTS {
                let card = mint(catalog.scout(), &mut next_instance, &mut rng);
                player.deck.draw_pile.add(card);
            }
            for _ in 0..STARTING_VIPERS {
                let card = mint(catalog.viper(), &mut next_instance, &mut rng);
                player.deck.draw_pile.add(card);
            }
            players.push(player);
        }

        let trade_row = TradeRow::new(catalog.trade_pool(), Arc::clone(catalog.explorer()));

        Ok(Game {
            players,
            active_idx: 0,
            turn_number: 1,
            phase: Phase::NotStarted,
            trade_row,
            catalog,
            pending: None,
            winner: None,
            loser: None,
            rng,
            next_instance,
            expected_draws: 0,
            observers: Vec::new(),
        })
    }

    /// Set the RNG seed for deterministic gameplay. Call before `start`.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Register a narrative/UI observer.
    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Shuffle everything and enter the first player's draw-order choice.
    pub fn start(&mut self) -> Result<()> {
        if self.phase != Phase::NotStarted {
            return Err(EngineError::InvalidState("game already started".into()));
        }

        for idx in 0..self.players.len() {
            self.players[idx].deck.shuffle_draw_pile(&mut self.rng);
        }
        self.trade_row.shuffle_pool(&mut self.rng);
        self.trade_row.fill_slots(&mut self.next_instance, &mut self.rng);

        self.emit(GameEvent::GameStarted);
        self.enter_draw_order();
        Ok(())
    }

    // === Accessors ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn active_player(&self) -> PlayerId {
        self.players[self.active_idx].id
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .get(id.index())
            .ok_or_else(|| EngineError::InvalidTarget(format!("unknown player {id}")))
    }

    /// Mutable player access. Exposed for host-level setup (custom starting
    /// resources, scenario injection); ordinary play goes through `submit`.
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .get_mut(id.index())
            .ok_or_else(|| EngineError::InvalidTarget(format!("unknown player {id}")))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn trade_row(&self) -> &TradeRow {
        &self.trade_row
    }

    pub fn trade_row_mut(&mut self) -> &mut TradeRow {
        &mut self.trade_row
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn loser(&self) -> Option<PlayerId> {
        self.loser
    }

    pub fn has_pending_action(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Draw count the active player must supply a permutation for.
    pub fn expected_draws(&self) -> usize {
        self.expected_draws
    }

    /// The next player in turn order after `id` (the default target of
    /// opponent-facing effects in a 2-player game).
    pub fn next_opponent(&self, id: PlayerId) -> PlayerId {
        let idx = (id.index() + 1) % self.players.len();
        self.players[idx].id
    }

    // === Internals shared across the game submodules ===

    /// Mint a fresh card instance of a shared type.
    pub(crate) fn mint(&mut self, ty: &Arc<CardType>) -> CardInstance {
        mint(ty, &mut self.next_instance, &mut self.rng)
    }

    /// Deliver each event to every observer, in registration order.
    /// Observers are pure spectators; their behavior cannot alter state.
    pub(crate) fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    /// Queue a deferred choice. Fails if one is already outstanding; effect
    /// handlers treat that as a soft failure and log it.
    pub(crate) fn enqueue_pending(&mut self, pending: PendingAction) -> Result<()> {
        if self.pending.is_some() {
            return Err(EngineError::InvalidState(
                "a pending action is already outstanding".into(),
            ));
        }
        let player = pending.player();
        self.pending = Some(pending);
        self.emit(GameEvent::PendingQueued { player });
        Ok(())
    }

    /// Draw up to `count` cards for a player, stopping early on exhaustion.
    /// Returns the number actually drawn.
    pub(crate) fn draw_cards(&mut self, id: PlayerId, count: u32) -> u32 {
        let idx = id.index();
        let mut drawn = 0;
        for _ in 0..count {
            let deck = &mut self.players[idx].deck;
            if deck.draw_top(&mut self.rng).is_none() {
                break;
            }
            drawn += 1;
        }
        if drawn > 0 {
            self.emit(GameEvent::CardsDrawn { player: id, count: drawn });
        }
        drawn
    }

    /// Begin the active player's turn: reset per-turn state, fix the
    /// expected draw count, and wait for the draw-order choice.
    pub(crate) fn enter_draw_order(&mut self) {
        let idx = self.active_idx;
        self.players[idx].start_turn();

        let available =
            self.players[idx].deck.draw_pile.len() + self.players[idx].deck.discard.len();
        self.expected_draws = self.players[idx].draw_count().min(available);

        self.phase = Phase::DrawOrder;
        let player = self.players[idx].id;
        let turn = self.turn_number;
        self.emit(GameEvent::TurnStarted { player, turn });
    }

    /// Record the end of the game. Idempotent guard: winner and loser are
    /// recorded exactly once.
    pub(crate) fn mark_game_over(&mut self, winner: PlayerId, loser: PlayerId) {
        if self.phase.is_over() {
            return;
        }
        self.phase = Phase::GameOver;
        self.winner = Some(winner);
        self.loser = Some(loser);
        self.emit(GameEvent::GameEnded { winner, loser });
    }

    /// Locate a card in the active player's hand, by id.
    pub(crate) fn require_in_hand(&self, player: PlayerId, id: InstanceId) -> Result<()> {
        if self.player(player)?.deck.hand.contains(id) {
            Ok(())
        } else {
            Err(EngineError::InvalidTarget(format!("card {id} not in hand")))
        }
    }
}

fn mint(ty: &Arc<CardType>, next_instance: &mut u32, rng: &mut ChaCha12Rng) -> CardInstance {
    let id = InstanceId::new(*next_instance);
    *next_instance += 1;
    CardInstance::new(id, Arc::clone(ty), rng.gen())
}
