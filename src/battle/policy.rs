//! Enemy decision policy
//!
//! One random draw, no planning: rebuild Bravery when low or on a 40%
//! roll, otherwise cash it in.

use crate::battle::combatant::Combatant;
use crate::battle::constants::{ENEMY_BRV_ATTACK_CHANCE, ENEMY_BRV_FLOOR};
use crate::core::rng::Randomness;

/// Action the enemy chose for this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    BrvAttack,
    HpAttack,
}

/// Pick the enemy's next action
pub fn decide(enemy: &Combatant, rng: &mut dyn Randomness) -> EnemyAction {
    let roll = rng.uniform();
    if roll < ENEMY_BRV_ATTACK_CHANCE || enemy.brv < ENEMY_BRV_FLOOR {
        EnemyAction::BrvAttack
    } else {
        EnemyAction::HpAttack
    }
}
