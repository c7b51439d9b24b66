//! Read-only state snapshots for the presentation layer
//!
//! The session hands these out after every tick and action; the host never
//! touches live combatant state.

use serde::{Deserialize, Serialize};

use crate::battle::combatant::Combatant;
use crate::battle::constants::{ATB_MAX, SKILL_MP_COST};
use crate::battle::session::BattlePhase;
use crate::core::types::Tick;

/// Frozen view of one combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub brv: i32,
    pub max_brv: i32,
    /// Gauge value in [0, 2000]
    pub atb: f32,
    pub is_broken: bool,
}

impl CombatantSnapshot {
    pub fn of(fighter: &Combatant) -> Self {
        Self {
            name: fighter.name.clone(),
            hp: fighter.hp,
            max_hp: fighter.max_hp,
            mp: fighter.mp,
            max_mp: fighter.max_mp,
            brv: fighter.brv,
            max_brv: fighter.max_brv,
            atb: fighter.atb,
            is_broken: fighter.is_broken,
        }
    }

    /// Fill fractions for resource bars, each in [0, 1]
    pub fn hp_ratio(&self) -> f32 {
        ratio(self.hp as f32, self.max_hp as f32)
    }

    pub fn mp_ratio(&self) -> f32 {
        ratio(self.mp as f32, self.max_mp as f32)
    }

    pub fn brv_ratio(&self) -> f32 {
        ratio(self.brv as f32, self.max_brv as f32)
    }

    pub fn atb_ratio(&self) -> f32 {
        ratio(self.atb, ATB_MAX)
    }
}

fn ratio(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max).clamp(0.0, 1.0)
    }
}

/// Frozen view of the whole battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub player: CombatantSnapshot,
    pub enemy: CombatantSnapshot,
    pub phase: BattlePhase,
    pub tick: Tick,
    pub auto_mode: bool,
    pub running: bool,
    /// Gate for the player's basic action controls
    pub player_can_act: bool,
    /// Gate for the skill control (ready and enough MP)
    pub player_can_skill: bool,
}

impl BattleSnapshot {
    pub fn capture(
        player: &Combatant,
        enemy: &Combatant,
        phase: BattlePhase,
        tick: Tick,
        auto_mode: bool,
        running: bool,
    ) -> Self {
        let player_can_act = phase == BattlePhase::Running && player.can_act();
        Self {
            player: CombatantSnapshot::of(player),
            enemy: CombatantSnapshot::of(enemy),
            phase,
            tick,
            auto_mode,
            running,
            player_can_act,
            player_can_skill: player_can_act && player.mp >= SKILL_MP_COST,
        }
    }
}
