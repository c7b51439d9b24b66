//! Battle engine - ATB scheduling, Bravery/HP damage exchange, BREAK
//!
//! The session owns both combatants and all mutable battle state; the
//! presentation layer only reads snapshots, consumes the event log, and
//! issues action requests.

pub mod combatant;
pub mod constants;
pub mod log;
pub mod policy;
pub mod session;
pub mod snapshot;

pub use combatant::{BrvAttackResult, Combatant};
pub use constants::*;
pub use log::{BattleEvent, BattleEventLog, LogCategory};
pub use policy::EnemyAction;
pub use session::{BattlePhase, BattleSession};
pub use snapshot::{BattleSnapshot, CombatantSnapshot};
