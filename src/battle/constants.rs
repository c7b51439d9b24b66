//! Battle system constants - all tunable values in one place

// Time
/// Nominal wall-clock interval between ticks. The host drives the cadence;
/// the engine itself never owns a timer.
pub const TICK_INTERVAL_MS: u64 = 100;

// ATB gauge
/// Gauge ceiling. Room for one banked action above the threshold.
pub const ATB_MAX: f32 = 2000.0;
/// Gauge level that grants an action.
pub const ATB_ACTION_THRESHOLD: f32 = 1000.0;
/// Gauge spent per action. Overflow above the threshold is kept, not reset.
pub const ATB_ACTION_COST: f32 = 1000.0;
/// Per-tick fill rate is rolled once per combatant in [SPEED_MIN, SPEED_MAX).
pub const SPEED_MIN: f64 = 50.0;
pub const SPEED_MAX: f64 = 70.0;

// Bravery exchange
/// Base scale of every BRV damage roll.
pub const BRV_DAMAGE_SCALE: f64 = 75.0;
/// Power multiplier of the normal BRV attack.
pub const BRV_ATTACK_POWER: f64 = 2.0;
/// Power multiplier of the skill attack.
pub const SKILL_ATTACK_POWER: f64 = 2.5;
/// Damage rolls swing uniformly in [VARIANCE_MIN, VARIANCE_MAX).
pub const VARIANCE_MIN: f64 = 0.9;
pub const VARIANCE_MAX: f64 = 1.1;
/// Bravery the attacker keeps after cashing in an HP attack.
pub const BRV_BASELINE: i32 = 100;
/// Fraction of banked Bravery converted by an HP attack.
pub const HP_CONVERSION_RATE: f64 = 0.25;
/// HP damage multiplier against a broken target, also reported as the
/// break bonus of the BRV attack that caused the BREAK.
pub const BREAK_BONUS: f64 = 1.5;

// Costs and AI thresholds
/// MP cost of the skill attack.
pub const SKILL_MP_COST: i32 = 15;
/// Below this Bravery the enemy always rebuilds with a BRV attack.
pub const ENEMY_BRV_FLOOR: i32 = 300;
/// Chance the enemy opens with a BRV attack even above the floor.
pub const ENEMY_BRV_ATTACK_CHANCE: f64 = 0.4;
