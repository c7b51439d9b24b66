//! Combatant model - one fighter's battle state and damage operations
//!
//! The Bravery economy: BRV attacks steal the defender's Bravery into the
//! attacker's pool; HP attacks cash the banked pool in for permanent hit
//! point damage and drop the attacker back to a small baseline. Driving a
//! defender's Bravery to zero inflicts BREAK, which amplifies the next HP
//! attack against them.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{
    ATB_ACTION_COST, ATB_ACTION_THRESHOLD, ATB_MAX, BREAK_BONUS, BRV_BASELINE, BRV_DAMAGE_SCALE,
    HP_CONVERSION_RATE, SPEED_MAX, SPEED_MIN, VARIANCE_MAX, VARIANCE_MIN,
};
use crate::core::config::CombatantSpec;
use crate::core::rng::Randomness;

/// Outcome of a single BRV attack
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BrvAttackResult {
    /// Bravery stolen from the target
    pub brv_damage: i32,
    /// 1.5 when the blow caused a BREAK, 1.0 otherwise. Reported for the
    /// log and for callers that care; not folded into the damage itself.
    pub break_bonus: f64,
    /// Whether this blow drove the target into BREAK
    pub broke: bool,
}

/// One fighter's mutable battle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub brv: i32,
    pub max_brv: i32,
    pub attack: i32,
    pub defense: i32,
    /// Turn gauge in [0, ATB_MAX]; an action unlocks at the threshold
    pub atb: f32,
    /// Per-tick gauge fill rate, rolled once at creation
    pub speed: f32,
    /// BREAK debuff; cleared by the next HP attack against this combatant
    pub is_broken: bool,
}

impl Combatant {
    /// Build a combatant from its spec, rolling the personal gauge speed
    pub fn from_spec(spec: &CombatantSpec, rng: &mut dyn Randomness) -> Self {
        Self {
            name: spec.name.clone(),
            hp: spec.hp,
            max_hp: spec.hp,
            mp: spec.mp,
            max_mp: spec.mp,
            brv: spec.brv,
            max_brv: spec.max_brv,
            attack: spec.attack,
            // Both damage formulas divide by defense; a zero here would
            // blow up the math, so floor it at 1.
            defense: spec.defense.max(1),
            atb: 0.0,
            speed: rng.uniform_range(SPEED_MIN, SPEED_MAX) as f32,
            is_broken: false,
        }
    }

    /// Advance the turn gauge by one tick, capped at the ceiling
    pub fn update_atb(&mut self) {
        if self.atb < ATB_MAX {
            self.atb = (self.atb + self.speed).min(ATB_MAX);
        }
    }

    /// Ready to act: gauge at the threshold and still standing
    pub fn can_act(&self) -> bool {
        self.atb >= ATB_ACTION_THRESHOLD && self.hp > 0
    }

    /// Spend one action's worth of gauge. Overflow above the threshold is
    /// banked toward the next action, never discarded.
    ///
    /// Only valid immediately after an action gated by `can_act()`.
    pub fn consume_atb(&mut self) {
        debug_assert!(self.atb >= ATB_ACTION_COST);
        self.atb -= ATB_ACTION_COST;
    }

    /// Normal BRV attack: steal Bravery from the target
    pub fn brv_attack(&mut self, target: &mut Combatant, rng: &mut dyn Randomness) -> BrvAttackResult {
        self.brv_attack_with_power(target, crate::battle::constants::BRV_ATTACK_POWER, rng)
    }

    /// BRV attack with an explicit power multiplier (skills hit at 2.5)
    pub fn brv_attack_with_power(
        &mut self,
        target: &mut Combatant,
        power: f64,
        rng: &mut dyn Randomness,
    ) -> BrvAttackResult {
        let variance = rng.uniform_range(VARIANCE_MIN, VARIANCE_MAX);
        let ratio = self.attack as f64 / target.defense as f64;
        let brv_damage = (ratio * power * BRV_DAMAGE_SCALE * variance).floor() as i32;

        target.brv -= brv_damage;
        self.brv = (self.brv + brv_damage).min(self.max_brv);

        let mut break_bonus = 1.0;
        let mut broke = false;
        if target.brv <= 0 {
            target.is_broken = true;
            target.brv = 0;
            break_bonus = BREAK_BONUS;
            broke = true;
        }

        BrvAttackResult {
            brv_damage,
            break_bonus,
            broke,
        }
    }

    /// HP attack: convert banked Bravery into hit point damage
    ///
    /// Resets the attacker's Bravery to the baseline and clears the
    /// target's BREAK whether or not it was set.
    pub fn hp_attack(&mut self, target: &mut Combatant) -> i32 {
        let break_multiplier = if target.is_broken { BREAK_BONUS } else { 1.0 };
        let ratio = self.attack as f64 / (target.defense + 1) as f64;
        let hp_damage =
            (self.brv as f64 * HP_CONVERSION_RATE * ratio * break_multiplier).floor() as i32;

        target.hp = (target.hp - hp_damage).max(0);
        self.brv = BRV_BASELINE;
        target.is_broken = false;

        hp_damage
    }
}
