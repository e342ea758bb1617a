/// Frame driver: owns the game state between host callbacks.
///
/// The host calls [`Session::on_frame`] once per scheduled frame and
/// forwards key events in between. Everything runs on the host's thread;
/// a frame always completes before the next one starts.

use rand::Rng;
use tracing::info;

use crate::compute::{init_state, tick};
use crate::config::GameConfig;
use crate::entities::GameState;
use crate::input::{apply_key, Key, KeyAction};
use crate::render::{render_overlay, render_scene, ScoreDisplay, Surface};

/// What the host should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    Continue,
    Stop,
}

pub struct Session<R: Rng> {
    state: GameState,
    rng: R,
    scheduled: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self::from_state(init_state(config), rng)
    }

    pub fn from_state(state: GameState, rng: R) -> Self {
        let scheduled = !state.status.is_terminal();
        Session {
            state,
            rng,
            scheduled,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn key_down(&mut self, key: Key) {
        self.state = apply_key(&self.state, key, KeyAction::Down);
    }

    pub fn key_up(&mut self, key: Key) {
        self.state = apply_key(&self.state, key, KeyAction::Up);
    }

    /// Run one frame at timestamp `now` (milliseconds).
    ///
    /// Draws the current scene, advances the simulation, pushes any score
    /// change to `score`, and on a terminal transition draws the overlay
    /// and cancels scheduling. Once cancelled, later calls do nothing.
    pub fn on_frame<S, D>(&mut self, now: u64, surface: &mut S, score: &mut D) -> Schedule
    where
        S: Surface + ?Sized,
        D: ScoreDisplay + ?Sized,
    {
        if !self.scheduled {
            return Schedule::Stop;
        }

        render_scene(surface, &self.state);
        let next = tick(&self.state, now, &mut self.rng);
        if next.score != self.state.score {
            score.show_score(next.score);
        }
        self.state = next;

        if self.state.status.is_terminal() {
            render_overlay(surface, &self.state);
            self.scheduled = false;
            info!(status = ?self.state.status, "frame scheduling stopped");
            return Schedule::Stop;
        }
        Schedule::Continue
    }
}
