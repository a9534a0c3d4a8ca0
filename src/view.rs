//! Per-viewer JSON projection
//!
//! The engine's state is authoritative and complete; clients only ever see
//! a projection rendered for a specific viewer. Hidden information never
//! enters the projection: an opponent's hand appears as a count, and draw
//! piles are counts for everyone (their order is secret even from their
//! owner).

use crate::core::{CardInstance, CardKind, Faction, InstanceId, Placement, Player, PlayerId};
use crate::game::{Action, Game, PendingAction, Phase, TRADE_ROW_SLOTS};
use crate::{EngineError, Result};
use serde::Serialize;

/// Who a projection is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// A seated player: sees their own hand, opponents' hands as counts.
    Player(PlayerId),

    /// A non-seated watcher with full visibility of every hand.
    Spectator,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// One visible card.
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub instance_id: InstanceId,
    pub card_id: u32,
    pub name: String,
    pub faction: Faction,
    pub kind: CardKind,
    pub cost: u32,
    pub art_seed: u32,

    #[serde(skip_serializing_if = "is_zero")]
    pub attack_bonus: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub trade_bonus: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub authority_bonus: u32,

    // Base-only fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outpost: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "is_zero")]
    pub damage_taken: u32,
}

impl CardView {
    fn render(card: &CardInstance) -> Self {
        CardView {
            instance_id: card.instance_id,
            card_id: card.type_id().as_u32(),
            name: card.name().to_owned(),
            faction: card.faction(),
            kind: card.kind(),
            cost: card.cost(),
            art_seed: card.art_seed,
            attack_bonus: card.attack_bonus,
            trade_bonus: card.trade_bonus,
            authority_bonus: card.authority_bonus,
            defense: card.defense(),
            outpost: card.is_base().then(|| card.is_outpost()),
            deployed: card.is_base().then_some(card.deployed),
            placement: card.deployed.then_some(card.placement),
            damage_taken: card.damage_taken,
        }
    }
}

/// One player as seen by the viewer. Exactly one of `hand` and
/// `hand_count` is present.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub player_id: PlayerId,
    pub name: String,
    pub authority: u32,
    pub trade: u32,
    pub combat: u32,
    pub d10: u8,
    pub d4: i8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<CardView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_count: Option<usize>,

    pub draw_pile_count: usize,
    pub discard: Vec<CardView>,
    pub played: Vec<CardView>,
    pub frontier_bases: Vec<CardView>,
    pub interior_bases: Vec<CardView>,
}

impl PlayerView {
    fn render(player: &Player, full_hand: bool) -> Self {
        let deck = &player.deck;
        let (hand, hand_count) = if full_hand {
            (Some(deck.hand.iter().map(CardView::render).collect()), None)
        } else {
            (None, Some(deck.hand.len()))
        };
        PlayerView {
            player_id: player.id,
            name: player.name.to_string(),
            authority: player.authority,
            trade: player.trade,
            combat: player.combat,
            d10: player.flow.d10(),
            d4: player.flow.d4(),
            hand,
            hand_count,
            draw_pile_count: deck.draw_pile.len(),
            discard: deck.discard.iter().map(CardView::render).collect(),
            played: deck.played.iter().map(CardView::render).collect(),
            frontier_bases: deck.frontier_bases.iter().map(CardView::render).collect(),
            interior_bases: deck.interior_bases.iter().map(CardView::render).collect(),
        }
    }
}

/// The marketplace as everyone sees it (the trade row has no secrets
/// beyond pool order, which renders as a count).
#[derive(Debug, Clone, Serialize)]
pub struct TradeRowView {
    pub slots: [Option<CardView>; TRADE_ROW_SLOTS],
    pub pool_count: usize,
    pub explorer_cost: u32,
}

/// A full game snapshot for one viewer.
///
/// Seated viewers get the `you` / `opponents` split; spectators get one
/// uniform `players` array with every hand visible.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub turn: u32,
    pub phase: Phase,
    pub active_player: PlayerId,
    pub is_your_turn: bool,
    pub game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_draws: Option<usize>,
    pub trade_row: TradeRowView,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub you: Option<PlayerView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub opponents: Vec<PlayerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<PlayerView>>,
}

/// Project the game for a viewer.
pub fn render(game: &Game, viewer: Viewer) -> GameView {
    let (you, opponents, players) = match viewer {
        Viewer::Player(seat) => {
            let mut you = None;
            let mut opponents = Vec::new();
            for player in game.players() {
                if player.id == seat {
                    you = Some(PlayerView::render(player, true));
                } else {
                    opponents.push(PlayerView::render(player, false));
                }
            }
            (you, opponents, None)
        }
        Viewer::Spectator => {
            let all = game
                .players()
                .iter()
                .map(|p| PlayerView::render(p, true))
                .collect();
            (None, Vec::new(), Some(all))
        }
    };

    let row = game.trade_row();
    let mut slots: [Option<CardView>; TRADE_ROW_SLOTS] = Default::default();
    for (idx, slot) in row.slots().iter().enumerate() {
        slots[idx] = slot.as_ref().map(CardView::render);
    }

    let is_your_turn = matches!(viewer, Viewer::Player(p) if p == game.active_player());
    GameView {
        turn: game.turn_number(),
        phase: game.phase(),
        active_player: game.active_player(),
        is_your_turn,
        game_over: game.is_game_over(),
        winner: game.winner(),
        pending: game.pending_action().copied(),
        expected_draws: (game.phase() == Phase::DrawOrder).then(|| game.expected_draws()),
        trade_row: TradeRowView {
            slots,
            pool_count: row.pool_remaining(),
            explorer_cost: row.explorer_cost(),
        },
        you,
        opponents,
        players,
    }
}

/// Project and serialize in one step.
pub fn serialize_view(game: &Game, viewer: Viewer) -> Result<serde_json::Value> {
    serde_json::to_value(render(game, viewer))
        .map_err(|e| EngineError::Malformed(format!("view serialization failed: {e}")))
}

/// Parse a client-submitted action from its JSON command form.
pub fn parse_action(value: &serde_json::Value) -> Result<Action> {
    serde_json::from_value(value.clone())
        .map_err(|e| EngineError::Malformed(format!("bad action: {e}")))
}
