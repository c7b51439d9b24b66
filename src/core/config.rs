//! Battle configuration with documented tunables
//!
//! The default loadouts reproduce the reference balance: a sturdy warrior
//! against a weaker but faster-breaking goblin. Overrides can be loaded
//! from a TOML file for balance experiments.

use serde::{Deserialize, Serialize};

use crate::core::error::{DuelError, Result};

/// Starting block for one combatant
///
/// `hp` and `mp` double as the maximums; current values start full.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSpec {
    /// Display name
    pub name: String,
    /// Starting (and maximum) hit points
    pub hp: i32,
    /// Starting (and maximum) mana
    pub mp: i32,
    /// Starting Bravery pool
    pub brv: i32,
    /// Bravery cap; stolen Bravery above this is lost
    pub max_brv: i32,
    /// Attack stat, numerator of both damage formulas
    pub attack: i32,
    /// Defense stat, denominator of both damage formulas
    ///
    /// Values below 1 are clamped to 1 at combatant creation so the
    /// formulas stay well-defined.
    pub defense: i32,
}

/// Configuration for one battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Player-controlled combatant
    pub player: CombatantSpec,
    /// AI-controlled combatant
    pub enemy: CombatantSpec,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            player: CombatantSpec {
                name: "Warrior".into(),
                hp: 210,
                mp: 32,
                brv: 1000,
                max_brv: 1500,
                attack: 60,
                defense: 60,
            },
            enemy: CombatantSpec {
                name: "Goblin".into(),
                hp: 150,
                mp: 20,
                brv: 800,
                max_brv: 1000,
                attack: 40,
                defense: 30,
            },
        }
    }
}

impl BattleConfig {
    /// Load a config override from a TOML file
    pub fn load_from_path(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: BattleConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject loadouts the formulas cannot make sense of
    pub fn validate(&self) -> Result<()> {
        for spec in [&self.player, &self.enemy] {
            if spec.hp <= 0 {
                return Err(DuelError::InvalidConfig(format!(
                    "{}: hp must be positive",
                    spec.name
                )));
            }
            if spec.attack <= 0 {
                return Err(DuelError::InvalidConfig(format!(
                    "{}: attack must be positive",
                    spec.name
                )));
            }
            if spec.mp < 0 || spec.brv < 0 || spec.max_brv < 0 {
                return Err(DuelError::InvalidConfig(format!(
                    "{}: resource pools must be non-negative",
                    spec.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BattleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_loadouts() {
        let config = BattleConfig::default();
        assert_eq!(config.player.name, "Warrior");
        assert_eq!(config.player.hp, 210);
        assert_eq!(config.enemy.name, "Goblin");
        assert_eq!(config.enemy.defense, 30);
    }

    #[test]
    fn test_non_positive_attack_rejected() {
        let mut config = BattleConfig::default();
        config.enemy.attack = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = BattleConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: BattleConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.player.hp, config.player.hp);
        assert_eq!(back.enemy.max_brv, config.enemy.max_brv);
    }
}
