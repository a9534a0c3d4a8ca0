//! Core game types and entities

pub mod card;
pub mod catalog;
pub mod effect;
pub mod player;
pub mod types;

pub use card::{BaseStats, CardInstance, CardType};
pub use catalog::{CardCatalog, EXPLORER, SCOUT, VIPER};
pub use effect::Effect;
pub use player::{EffectContext, FlowTracker, Player, BASE_HAND_SIZE, STARTING_AUTHORITY};
pub use types::{CardKind, CardTypeId, Faction, InstanceId, Placement, PlayerId, PlayerName};
