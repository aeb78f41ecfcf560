//! Session - gravity cadence, pause/restart and the action queue

use std::collections::VecDeque;

use crate::core::{GameSnapshot, GameState, ScoreError};
use crate::types::GameAction;

/// Owner of the live game.
///
/// All mutation goes through `&mut self`, so transitions are applied strictly
/// one after another.
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    paused: bool,
    /// Milliseconds accumulated toward the next gravity tick
    drop_timer_ms: u32,
    pending: VecDeque<GameAction>,
}

impl Session {
    /// Start a session with a new game from the given seed
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    /// Start a session around an existing game
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            paused: false,
            drop_timer_ms: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    /// Number of queued actions not yet applied
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queue an action for the next [`Session::update`]
    pub fn queue_action(&mut self, action: GameAction) {
        self.pending.push_back(action);
    }

    /// Apply an action immediately.
    ///
    /// Returns whether anything observable changed. Gameplay actions are
    /// ignored while paused or after game over; `Pause` toggles the pause
    /// flag and `Restart` always starts a fresh, unpaused game.
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool, ScoreError> {
        match action {
            GameAction::Pause => {
                self.paused = !self.paused;
                Ok(true)
            }
            GameAction::Restart => {
                self.state = self.state.restarted();
                self.paused = false;
                self.drop_timer_ms = 0;
                Ok(true)
            }
            _ => {
                if self.paused || self.state.game_over() {
                    return Ok(false);
                }
                let next = self.state.apply_action(action)?;
                let changed = next != self.state;
                self.state = next;
                Ok(changed)
            }
        }
    }

    /// Advance the session by `elapsed_ms`.
    ///
    /// Queued actions are applied first, in order. Then, unless paused or over,
    /// gravity time accumulates; once it passes the level's interval one
    /// [`GameState::tick`] is applied and the accumulator restarts from zero.
    pub fn update(&mut self, elapsed_ms: u32) -> Result<bool, ScoreError> {
        let mut changed = false;
        while let Some(action) = self.pending.pop_front() {
            changed |= self.apply_action(action)?;
        }

        if self.paused || self.state.game_over() {
            return Ok(changed);
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms > self.state.drop_interval_ms() {
            self.drop_timer_ms = 0;
            self.state = self.state.tick()?;
            changed = true;
        }

        Ok(changed)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
        out.paused = self.paused;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
