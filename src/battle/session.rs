//! Battle session - owns the duel and runs the tick loop
//!
//! Each tick: gauge fill -> enemy turn (if ready) -> auto player turn
//! (if enabled and ready). Terminal states are absorbing: once a side
//! wins, the session stops scheduling and every further call is inert.

use serde::{Deserialize, Serialize};

use crate::battle::combatant::Combatant;
use crate::battle::constants::{SKILL_ATTACK_POWER, SKILL_MP_COST};
use crate::battle::log::{BattleEvent, BattleEventLog, LogCategory};
use crate::battle::policy::{self, EnemyAction};
use crate::battle::snapshot::BattleSnapshot;
use crate::core::config::BattleConfig;
use crate::core::error::{DuelError, Result};
use crate::core::rng::Randomness;
use crate::core::types::{Side, Tick};

/// Battle state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    Running,
    PlayerWon,
    EnemyWon,
}

/// One battle between the player and the enemy AI
pub struct BattleSession {
    config: BattleConfig,
    player: Combatant,
    enemy: Combatant,
    phase: BattlePhase,
    tick: Tick,
    auto_mode: bool,
    running: bool,
    log: BattleEventLog,
    rng: Box<dyn Randomness>,
}

impl BattleSession {
    pub fn new(config: BattleConfig, mut rng: Box<dyn Randomness>) -> Result<Self> {
        config.validate()?;
        let player = Combatant::from_spec(&config.player, rng.as_mut());
        let enemy = Combatant::from_spec(&config.enemy, rng.as_mut());
        Ok(Self {
            config,
            player,
            enemy,
            phase: BattlePhase::Running,
            tick: 0,
            auto_mode: false,
            running: false,
            log: BattleEventLog::new(),
            rng,
        })
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase != BattlePhase::Running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn auto_mode(&self) -> bool {
        self.auto_mode
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn log(&self) -> &BattleEventLog {
        &self.log
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot::capture(
            &self.player,
            &self.enemy,
            self.phase,
            self.tick,
            self.auto_mode,
            self.running,
        )
    }

    /// Begin (or resume) scheduling. Idempotent: starting a running
    /// session changes nothing. A finished battle cannot be restarted.
    pub fn start(&mut self) {
        if self.running || self.is_finished() {
            return;
        }
        self.running = true;
        self.emit("Battle started!".into(), LogCategory::Normal);
    }

    /// Pause scheduling. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Flip auto-battle mode, returning the new value
    pub fn toggle_auto(&mut self) -> bool {
        self.auto_mode = !self.auto_mode;
        let message = if self.auto_mode {
            "Auto battle enabled"
        } else {
            "Manual battle mode"
        };
        self.emit(message.into(), LogCategory::Normal);
        self.auto_mode
    }

    /// Rebuild a fresh battle from the same config, rerolling gauge
    /// speeds from the session's own RNG stream
    pub fn reset(&mut self) {
        self.player = Combatant::from_spec(&self.config.player, self.rng.as_mut());
        self.enemy = Combatant::from_spec(&self.config.enemy, self.rng.as_mut());
        self.phase = BattlePhase::Running;
        self.tick = 0;
        self.auto_mode = false;
        self.running = false;
        self.log = BattleEventLog::new();
    }

    /// Advance the battle by one tick and return the events it emitted.
    ///
    /// A stopped or finished session ticks as a no-op.
    pub fn tick(&mut self) -> Vec<BattleEvent> {
        if !self.running || self.is_finished() {
            return Vec::new();
        }

        let cursor = self.log.len();
        self.tick += 1;

        self.player.update_atb();
        self.enemy.update_atb();

        if self.enemy.can_act() && self.phase == BattlePhase::Running {
            self.enemy_turn();
            self.enemy.consume_atb();
        }

        if self.auto_mode && self.player.can_act() && self.phase == BattlePhase::Running {
            // Same single-consumption path as a manual BRV attack.
            self.do_player_brv_attack();
        }

        self.log.since(cursor).to_vec()
    }

    /// Player's basic BRV attack. Rejected without side effects when the
    /// player is not ready or the battle is over.
    pub fn player_brv_attack(&mut self) -> Result<()> {
        self.guard_player_ready()?;
        self.do_player_brv_attack();
        Ok(())
    }

    /// Player's HP attack: cash banked Bravery in for damage
    pub fn player_hp_attack(&mut self) -> Result<()> {
        self.guard_player_ready()?;
        let damage = self.player.hp_attack(&mut self.enemy);
        self.emit(
            format!(
                "{}'s HP attack! {} damage to {}!",
                self.player.name, damage, self.enemy.name
            ),
            LogCategory::Damage,
        );
        self.player.consume_atb();
        self.check_game_over();
        Ok(())
    }

    /// Player's skill attack: harder BRV hit, costs MP
    pub fn player_skill_attack(&mut self) -> Result<()> {
        self.guard_player_ready()?;
        if self.player.mp < SKILL_MP_COST {
            return Err(DuelError::OutOfMana {
                needed: SKILL_MP_COST,
                available: self.player.mp,
            });
        }
        self.player.mp -= SKILL_MP_COST;

        let result =
            self.player
                .brv_attack_with_power(&mut self.enemy, SKILL_ATTACK_POWER, self.rng.as_mut());
        if result.broke {
            self.emit_break(self.enemy.name.clone());
        }
        self.emit(
            format!(
                "{}'s power strike! {}'s BRV -{}!",
                self.player.name, self.enemy.name, result.brv_damage
            ),
            LogCategory::Damage,
        );
        self.player.consume_atb();
        self.check_game_over();
        Ok(())
    }

    /// Check for a terminal state; player defeat wins ties
    pub fn check_game_over(&mut self) -> bool {
        if self.phase != BattlePhase::Running {
            return true;
        }
        if self.player.hp <= 0 {
            self.phase = BattlePhase::EnemyWon;
            self.emit(
                format!("Defeat... {} has fallen.", self.player.name),
                LogCategory::Damage,
            );
            self.running = false;
            return true;
        }
        if self.enemy.hp <= 0 {
            self.phase = BattlePhase::PlayerWon;
            self.emit(
                format!("Victory! {} is defeated!", self.enemy.name),
                LogCategory::Heal,
            );
            self.running = false;
            return true;
        }
        false
    }

    fn guard_player_ready(&self) -> Result<()> {
        if self.is_finished() {
            return Err(DuelError::BattleFinished);
        }
        if !self.player.can_act() {
            return Err(DuelError::NotReady(Side::Player));
        }
        Ok(())
    }

    fn do_player_brv_attack(&mut self) {
        let result = self.player.brv_attack(&mut self.enemy, self.rng.as_mut());
        if result.broke {
            self.emit_break(self.enemy.name.clone());
        }
        self.emit(
            format!(
                "{}'s BRV attack! {}'s BRV -{}, {}'s BRV +{}",
                self.player.name,
                self.enemy.name,
                result.brv_damage,
                self.player.name,
                result.brv_damage
            ),
            LogCategory::Damage,
        );
        self.player.consume_atb();
        self.check_game_over();
    }

    fn enemy_turn(&mut self) {
        match policy::decide(&self.enemy, self.rng.as_mut()) {
            EnemyAction::BrvAttack => {
                let result = self.enemy.brv_attack(&mut self.player, self.rng.as_mut());
                if result.broke {
                    self.emit_break(self.player.name.clone());
                }
                self.emit(
                    format!(
                        "{}'s BRV attack! {}'s BRV -{}",
                        self.enemy.name, self.player.name, result.brv_damage
                    ),
                    LogCategory::Damage,
                );
            }
            EnemyAction::HpAttack => {
                let damage = self.enemy.hp_attack(&mut self.player);
                self.emit(
                    format!(
                        "{}'s HP attack! {} damage to {}!",
                        self.enemy.name, damage, self.player.name
                    ),
                    LogCategory::Damage,
                );
            }
        }
        tracing::debug!(tick = self.tick, enemy_brv = self.enemy.brv, "enemy acted");
        self.check_game_over();
    }

    fn emit_break(&mut self, target_name: String) {
        self.emit(
            format!("BREAK! {} is incapacitated!", target_name),
            LogCategory::Break,
        );
    }

    fn emit(&mut self, message: String, category: LogCategory) {
        self.log.push(self.tick, message, category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{ScriptedRng, SeededRng};

    fn session_with_rolls(rolls: Vec<f64>) -> BattleSession {
        BattleSession::new(BattleConfig::default(), Box::new(ScriptedRng::new(rolls))).unwrap()
    }

    fn ready_player(session: &mut BattleSession) {
        session.player.atb = 2000.0;
    }

    #[test]
    fn test_new_session_is_idle_and_running_phase() {
        let session = session_with_rolls(vec![0.5]);
        assert_eq!(session.phase(), BattlePhase::Running);
        assert!(!session.is_running());
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_tick_is_noop_before_start() {
        let mut session = session_with_rolls(vec![0.5]);
        let events = session.tick();
        assert!(events.is_empty());
        assert_eq!(session.current_tick(), 0);
        assert_eq!(session.player().atb, 0.0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        session.start();
        // Only one "Battle started!" entry.
        assert_eq!(session.log().len(), 1);
        assert!(session.is_running());

        session.stop();
        session.stop();
        assert!(!session.is_running());
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_tick_fills_both_gauges() {
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        session.tick();
        assert!(session.player().atb > 0.0);
        assert!(session.enemy().atb > 0.0);
    }

    #[test]
    fn test_player_action_rejected_when_not_ready() {
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        let before = session.log().len();

        let result = session.player_brv_attack();
        assert!(matches!(result, Err(DuelError::NotReady(Side::Player))));
        // A declined action mutates nothing and logs nothing.
        assert_eq!(session.log().len(), before);
        assert_eq!(session.enemy().brv, 800);
    }

    #[test]
    fn test_player_brv_attack_flows_through() {
        // Speed rolls for both combatants, then variance 0.5 -> 1.0.
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        ready_player(&mut session);

        session.player_brv_attack().unwrap();
        assert_eq!(session.enemy().brv, 500);
        assert_eq!(session.player().brv, 1300);
        assert_eq!(session.player().atb, 1000.0);

        let last = session.log().events().last().unwrap();
        assert_eq!(last.category, LogCategory::Damage);
        assert!(last.message.contains("BRV attack"));
    }

    #[test]
    fn test_skill_attack_costs_mana_and_hits_harder() {
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        ready_player(&mut session);

        session.player_skill_attack().unwrap();
        assert_eq!(session.player().mp, 32 - SKILL_MP_COST);
        // floor((60/30) * 2.5 * 75) = 375 at unity variance.
        assert_eq!(session.enemy().brv, 800 - 375);
    }

    #[test]
    fn test_skill_attack_rejected_without_mana() {
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        ready_player(&mut session);
        session.player.mp = SKILL_MP_COST - 1;
        let before_brv = session.enemy().brv;

        let result = session.player_skill_attack();
        assert!(matches!(result, Err(DuelError::OutOfMana { .. })));
        assert_eq!(session.enemy().brv, before_brv);
        assert_eq!(session.player.mp, SKILL_MP_COST - 1);
        assert_eq!(session.player().atb, 2000.0);
    }

    #[test]
    fn test_break_event_precedes_attack_event() {
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        ready_player(&mut session);
        session.enemy.brv = 100;

        session.player_brv_attack().unwrap();
        let events = session.log().events();
        let break_pos = events
            .iter()
            .position(|e| e.category == LogCategory::Break)
            .unwrap();
        let attack_pos = events
            .iter()
            .position(|e| e.message.contains("BRV attack"))
            .unwrap();
        assert!(break_pos < attack_pos);
        assert!(session.enemy().is_broken);
    }

    #[test]
    fn test_hp_attack_can_win_the_battle() {
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        ready_player(&mut session);
        session.player.brv = 1300;

        session.player_hp_attack().unwrap();
        assert_eq!(session.enemy().hp, 0);
        assert_eq!(session.phase(), BattlePhase::PlayerWon);
        assert!(!session.is_running());

        let last = session.log().events().last().unwrap();
        assert_eq!(last.category, LogCategory::Heal);
        assert!(last.message.contains("Victory"));
    }

    #[test]
    fn test_actions_rejected_after_battle_ends() {
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        ready_player(&mut session);
        session.player.brv = 1300;
        session.player_hp_attack().unwrap();

        ready_player(&mut session);
        let enemy_hp = session.enemy().hp;
        assert!(matches!(
            session.player_brv_attack(),
            Err(DuelError::BattleFinished)
        ));
        assert_eq!(session.enemy().hp, enemy_hp);

        // Ticking a finished battle changes nothing either.
        let tick_before = session.current_tick();
        assert!(session.tick().is_empty());
        assert_eq!(session.current_tick(), tick_before);
    }

    #[test]
    fn test_player_defeat_wins_simultaneous_zero() {
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        session.player.hp = 0;
        session.enemy.hp = 0;
        session.check_game_over();
        assert_eq!(session.phase(), BattlePhase::EnemyWon);
    }

    #[test]
    fn test_enemy_acts_when_gauge_ready() {
        // Rolls: two speed rolls, then policy roll 0.99 with enemy brv 800
        // -> HP attack against the player.
        let mut session = session_with_rolls(vec![0.5, 0.5, 0.99]);
        session.start();
        session.enemy.atb = 1900.0;
        let hp_before = session.player().hp;

        session.tick();
        assert!(session.player().hp < hp_before);
        // Consumed one action, banked the overflow plus this tick's fill.
        let expected = 1900.0 + session.enemy().speed - 1000.0;
        assert!((session.enemy().atb - expected).abs() < 0.001);
    }

    #[test]
    fn test_auto_mode_attacks_once_per_ready_tick() {
        let mut session = session_with_rolls(vec![0.5]);
        session.start();
        session.toggle_auto();
        session.player.atb = 1999.0;
        let enemy_brv_before = session.enemy().brv;

        session.tick();
        // Exactly one attack: one 1000-point consumption, gauge stays legal.
        assert_eq!(session.enemy().brv, enemy_brv_before - 300);
        assert!(session.player().atb >= 0.0);
        let expected = (1999.0 + session.player().speed).min(2000.0) - 1000.0;
        assert!((session.player().atb - expected).abs() < 0.001);
    }

    #[test]
    fn test_toggle_auto_logs_and_flips() {
        let mut session = session_with_rolls(vec![0.5]);
        assert!(session.toggle_auto());
        assert!(!session.toggle_auto());
        let messages: Vec<_> = session
            .log()
            .events()
            .iter()
            .map(|e| e.message.clone())
            .collect();
        assert_eq!(messages, ["Auto battle enabled", "Manual battle mode"]);
    }

    #[test]
    fn test_reset_rebuilds_fresh_battle() {
        let mut session =
            BattleSession::new(BattleConfig::default(), Box::new(SeededRng::seed_from_u64(7)))
                .unwrap();
        session.start();
        ready_player(&mut session);
        session.player.brv = 1300;
        session.player_hp_attack().unwrap();
        assert!(session.is_finished());

        session.reset();
        assert_eq!(session.phase(), BattlePhase::Running);
        assert_eq!(session.player().hp, 210);
        assert_eq!(session.enemy().hp, 150);
        assert!(session.log().is_empty());
        assert!(!session.is_running());
    }

    #[test]
    fn test_played_battle_terminates() {
        // Build Bravery, then cash it in: the canonical winning rhythm.
        let mut session =
            BattleSession::new(BattleConfig::default(), Box::new(SeededRng::seed_from_u64(1234)))
                .unwrap();
        session.start();

        let mut ticks = 0u64;
        while !session.is_finished() {
            session.tick();
            if session.snapshot().player_can_act {
                if session.player().brv >= 600 {
                    let _ = session.player_hp_attack();
                } else {
                    let _ = session.player_brv_attack();
                }
            }
            ticks += 1;
            assert!(ticks < 100_000, "battle never terminated");
        }
        assert_eq!(session.phase(), BattlePhase::PlayerWon);
    }

    #[test]
    fn test_auto_mode_alone_stalls_into_stalemate() {
        // Auto play never cashes Bravery in, and the player's steals pin
        // the enemy below its HP-attack floor, so nobody lands HP damage.
        let mut session =
            BattleSession::new(BattleConfig::default(), Box::new(SeededRng::seed_from_u64(5)))
                .unwrap();
        session.start();
        session.toggle_auto();

        for _ in 0..5_000 {
            session.tick();
        }
        assert_eq!(session.phase(), BattlePhase::Running);
        assert_eq!(session.enemy().hp, 150);
    }
}
