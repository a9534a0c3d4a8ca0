//! Observer events
//!
//! Narrative and UI hooks subscribe to the engine's event stream through
//! `GameObserver` trait objects registered on the `Game`. Observers are pure
//! spectators: they receive a shared reference to each event after the
//! corresponding mutation has committed, and nothing they do can feed back
//! into game state.

use crate::core::{CardTypeId, Effect, InstanceId, PlayerId};

/// Everything noteworthy the engine does, in commit order.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameStarted,
    TurnStarted {
        player: PlayerId,
        turn: u32,
    },
    CardsDrawn {
        player: PlayerId,
        count: u32,
    },
    CardPlayed {
        player: PlayerId,
        instance: InstanceId,
        card_type: CardTypeId,
    },
    AllyTriggered {
        player: PlayerId,
        instance: InstanceId,
    },
    EffectApplied {
        player: PlayerId,
        source: InstanceId,
        effect: Effect,
    },
    AutoDrawTriggered {
        player: PlayerId,
        instance: InstanceId,
    },
    AutoDrawComplete {
        player: PlayerId,
        passes: usize,
        drawn: u32,
    },
    CardPurchased {
        player: PlayerId,
        card_type: CardTypeId,
    },
    ExplorerPurchased {
        player: PlayerId,
    },
    CardScrapped {
        owner: PlayerId,
        instance: InstanceId,
    },
    BaseDestroyed {
        owner: PlayerId,
        instance: InstanceId,
    },
    PlayerAttacked {
        attacker: PlayerId,
        defender: PlayerId,
        amount: u32,
    },
    PendingQueued {
        player: PlayerId,
    },
    PendingResolved {
        player: PlayerId,
    },
    GameEnded {
        winner: PlayerId,
        loser: PlayerId,
    },
}

/// Registered narrative/UI hook. Observer behavior never affects the
/// engine: the event is shared and the return type is unit.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

/// Convenience observer that records every event, used by tests and demo
/// harnesses that want to assert on trigger ordering.
#[derive(Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

// Shared handle so a caller can register the log and still read it back.
impl GameObserver for std::rc::Rc<std::cell::RefCell<EventLog>> {
    fn on_event(&mut self, event: &GameEvent) {
        self.borrow_mut().events.push(event.clone());
    }
}
