//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Battle tick counter (simulation time unit)
pub type Tick = u64;

/// Which side of the duel a combatant fights on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The side this one is fighting against
    pub fn opponent(&self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involutive() {
        assert_eq!(Side::Player.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent().opponent(), Side::Enemy);
    }
}
