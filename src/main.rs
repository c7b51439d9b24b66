//! Stellar Duel - interactive entry point
//!
//! Drives the battle session at the nominal 100 ms tick cadence and maps
//! key presses onto action requests. All combat rules live in the engine;
//! this loop only polls keys, ticks, and redraws.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, queue};

use stellar_duel::battle::constants::TICK_INTERVAL_MS;
use stellar_duel::battle::BattleSession;
use stellar_duel::core::config::BattleConfig;
use stellar_duel::core::error::Result;
use stellar_duel::core::rng::SeededRng;
use stellar_duel::ui::terminal::{category_color, render_combatant, render_status};

/// Log lines kept on screen
const LOG_TAIL: usize = 10;

/// Restores the terminal even on early return
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("stellar_duel=info")
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Stellar Duel starting...");

    let mut session = BattleSession::new(
        BattleConfig::default(),
        Box::new(SeededRng::from_entropy()),
    )?;
    session.start();

    let _guard = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    let interval = Duration::from_millis(TICK_INTERVAL_MS);
    let mut last_tick = Instant::now();

    draw(&mut stdout, &session)?;

    loop {
        let timeout = interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        // Rejections are expected when the gauge is not
                        // ready; the status line already shows the gate.
                        KeyCode::Char('1') => {
                            let _ = session.player_brv_attack();
                        }
                        KeyCode::Char('2') => {
                            let _ = session.player_hp_attack();
                        }
                        KeyCode::Char('3') => {
                            let _ = session.player_skill_attack();
                        }
                        KeyCode::Char('a') => {
                            session.toggle_auto();
                        }
                        KeyCode::Char('s') => {
                            if session.is_running() {
                                session.stop();
                            } else {
                                session.start();
                            }
                        }
                        KeyCode::Char('r') => {
                            if session.is_finished() {
                                session.reset();
                                session.start();
                            }
                        }
                        _ => {}
                    }
                    draw(&mut stdout, &session)?;
                }
            }
        }

        if last_tick.elapsed() >= interval {
            last_tick = Instant::now();
            session.tick();
            draw(&mut stdout, &session)?;
        }
    }

    Ok(())
}

fn draw(stdout: &mut io::Stdout, session: &BattleSession) -> Result<()> {
    let snap = session.snapshot();

    queue!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    queue!(stdout, Print("=== STELLAR DUEL ===\r\n\r\n"))?;

    for line in render_combatant(&snap.player) {
        queue!(stdout, Print(line), Print("\r\n"))?;
    }
    queue!(stdout, Print("\r\n"))?;
    for line in render_combatant(&snap.enemy) {
        queue!(stdout, Print(line), Print("\r\n"))?;
    }

    queue!(stdout, Print("\r\n"), Print(render_status(&snap)), Print("\r\n\r\n"))?;

    let events = session.log().events();
    let tail_start = events.len().saturating_sub(LOG_TAIL);
    for event in &events[tail_start..] {
        queue!(
            stdout,
            SetForegroundColor(category_color(event.category)),
            Print(&event.message),
            ResetColor,
            Print("\r\n")
        )?;
    }

    stdout.flush()?;
    Ok(())
}
