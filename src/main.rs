//! Terminal Blockfall runner (default binary).
//!
//! Reads keys through crossterm, advances a [`Session`] every tick and redraws
//! through the framebuffer-style [`TerminalRenderer`].

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use blockfall::config::{parse_args, HostConfig};
use blockfall::core::{GameSnapshot, GameState};
use blockfall::engine::Session;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{GameView, TerminalRenderer};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args).context("blockfall: bad arguments")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let snap = result?;
    println!(
        "score {} | lines {} | level {} | pieces {} | seed {}",
        snap.score, snap.lines, snap.level, snap.piece_id, snap.seed
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: HostConfig) -> Result<GameSnapshot> {
    let state = match config.seed {
        Some(seed) => GameState::new(seed),
        None => GameState::from_entropy(),
    };
    let mut session = Session::from_state(state);
    let view = GameView::new(config.cell_width);

    let mut snap = GameSnapshot::default();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        session.snapshot_into(&mut snap);
        term.draw(view.render(&snap))?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(snap);
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.queue_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session
                .update(elapsed.as_millis().min(u32::MAX as u128) as u32)
                .context("blockfall: engine update failed")?;
        }
    }
}
