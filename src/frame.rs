//! Fixed-rate frame loop plumbing.
//!
//! One frame is: drain input commands, run one state-machine update, draw.
//! The pacer only computes how long to wait; the binary does the waiting.

use crate::input::Command;
use crate::render;
use crate::services::{AssetProvider, AudioService, Renderer};
use crate::session::Session;
use crate::state_machine::Game;
use std::time::{Duration, Instant};

/// Deadline tracker for a fixed tick rate.
///
/// A frame that runs late re-bases the schedule instead of queueing catch-up
/// frames, so the simulation never bursts to recover lost time.
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame: Duration,
    next: Instant,
}

impl FramePacer {
    pub fn new(tick_rate: u32) -> Self {
        Self::starting_at(tick_rate, Instant::now())
    }

    pub fn starting_at(tick_rate: u32, start: Instant) -> Self {
        let frame = Duration::from_secs_f64(1.0 / f64::from(tick_rate.max(1)));
        Self { frame, next: start }
    }

    /// Time left before the next frame is due.
    pub fn wait_time(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Record that a frame ran at `now` and schedule the next one.
    pub fn advance(&mut self, now: Instant) {
        self.next += self.frame;
        if self.next <= now {
            self.next = now + self.frame;
        }
    }
}

/// Owns the game and session and runs them one frame at a time.
#[derive(Debug)]
pub struct Orchestrator {
    pub game: Game,
    pub session: Session,
    frames: u64,
}

impl Orchestrator {
    /// Wrap a session and push its volume settings to the audio backend.
    pub fn new(session: Session, audio: &mut dyn AudioService) -> Self {
        session.apply_volumes(audio);
        Self {
            game: Game::new(),
            session,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Apply `commands` in order, then run exactly one update.
    ///
    /// Returns false once the game has asked to terminate.
    pub fn frame<I>(&mut self, commands: I, audio: &mut dyn AudioService) -> bool
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.game.handle_command(command, &mut self.session, audio);
            if !self.game.is_running() {
                return false;
            }
        }

        self.game.update(&mut self.session, audio);
        self.frames += 1;
        self.game.is_running()
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, assets: &dyn AssetProvider) {
        render::draw(&self.game, &self.session, renderer, assets);
    }
}
