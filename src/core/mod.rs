pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::{BattleConfig, CombatantSpec};
pub use rng::{Randomness, ScriptedRng, SeededRng};
