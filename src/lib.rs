//! Stellar Duel - real-time turn-meter bravery combat simulator

pub mod battle;
pub mod core;
pub mod ui;
