//! Terminal rendering helpers for the interactive duel
//!
//! Pure string/color mapping; the main loop owns the actual drawing.

use crossterm::style::Color;

use crate::battle::log::LogCategory;
use crate::battle::snapshot::{BattleSnapshot, CombatantSnapshot};
use crate::battle::BattlePhase;

/// Width of every resource bar in characters
const BAR_WIDTH: usize = 24;

/// Render one `[####----]` style bar
pub fn render_bar(ratio: f32, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f32).round() as usize;
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}

/// Render one combatant's stat block
pub fn render_combatant(snap: &CombatantSnapshot) -> Vec<String> {
    let break_tag = if snap.is_broken { "  [BREAK]" } else { "" };
    vec![
        format!("{}{}", snap.name, break_tag),
        format!(
            "  HP  {} {}/{}",
            render_bar(snap.hp_ratio(), BAR_WIDTH),
            snap.hp,
            snap.max_hp
        ),
        format!(
            "  MP  {} {}/{}",
            render_bar(snap.mp_ratio(), BAR_WIDTH),
            snap.mp,
            snap.max_mp
        ),
        format!(
            "  BRV {} {}/{}",
            render_bar(snap.brv_ratio(), BAR_WIDTH),
            snap.brv,
            snap.max_brv
        ),
        format!(
            "  ATB {} {}/2000",
            render_bar(snap.atb_ratio(), BAR_WIDTH),
            snap.atb as i32
        ),
    ]
}

/// Status line summarizing the battle and available controls
pub fn render_status(snap: &BattleSnapshot) -> String {
    let phase = match snap.phase {
        BattlePhase::Running => {
            if snap.running {
                "fighting"
            } else {
                "paused"
            }
        }
        BattlePhase::PlayerWon => "VICTORY",
        BattlePhase::EnemyWon => "DEFEAT",
    };
    let mode = if snap.auto_mode { "auto" } else { "manual" };
    let controls = if snap.player_can_act {
        if snap.player_can_skill {
            "[1] BRV  [2] HP  [3] Skill"
        } else {
            "[1] BRV  [2] HP"
        }
    } else {
        "(charging...)"
    };
    format!(
        "tick {:>5}  {}  mode: {}  {}  [a]uto [s]tart/stop [r]eset [q]uit",
        snap.tick, phase, mode, controls
    )
}

/// Display color for a log category
pub fn category_color(category: LogCategory) -> Color {
    match category {
        LogCategory::Normal => Color::White,
        LogCategory::Damage => Color::Red,
        LogCategory::Break => Color::Yellow,
        LogCategory::Heal => Color::Green,
    }
}
