//! State of one round of play and its per-tick simulation step.

use crate::collision::{self, Crash};
use crate::constants::{BIRD_START_X, BIRD_START_Y};
use crate::countdown::{Countdown, CountdownEvent};
use crate::difficulty::Difficulty;
use crate::effects::Effects;
use crate::entities::{Bird, Obstacle, ParticleSystem, PowerUp, PowerUpKind};
use crate::session::Session;
use crate::spawner::Spawner;

/// Something that happened during a simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    CountdownLabel(&'static str),
    CountdownFinished,
    Scored { points: u32, new_high: bool },
    PowerUpCollected(PowerUpKind),
    EffectExpired(PowerUpKind),
    Crashed(Crash),
}

/// Everything owned by the active round. Dropped on return to the menu.
#[derive(Debug, Clone)]
pub struct Round {
    pub difficulty: Difficulty,
    pub bird: Bird,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<PowerUp>,
    pub particles: ParticleSystem,
    pub effects: Effects,
    pub spawner: Spawner,
    pub countdown: Countdown,
    pub score: u32,
    /// Simulation ticks run since the countdown ended.
    pub ticks: u64,
    pub crashed: bool,
}

impl Round {
    /// Fresh round: bird at the start position, empty lists, zeroed timers,
    /// countdown armed.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            bird: Bird::new(BIRD_START_X, BIRD_START_Y, difficulty.profile()),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            particles: ParticleSystem::new(),
            effects: Effects::default(),
            spawner: Spawner::new(),
            countdown: Countdown::new(),
            score: 0,
            ticks: 0,
            crashed: false,
        }
    }

    pub fn in_countdown(&self) -> bool {
        self.countdown.is_active()
    }

    pub fn jump(&mut self) {
        self.bird.jump();
    }

    /// Run one simulation tick.
    ///
    /// While the countdown runs only the countdown advances; the bird,
    /// spawner, effects and collisions are all frozen. After a crash the
    /// round no longer steps.
    pub fn step(&mut self, session: &mut Session) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        if self.crashed {
            return events;
        }

        if self.countdown.is_active() {
            match self.countdown.tick() {
                Some(CountdownEvent::Label(label)) => events.push(RoundEvent::CountdownLabel(label)),
                Some(CountdownEvent::Finished) => {
                    tracing::debug!(difficulty = self.difficulty.name(), "countdown finished");
                    events.push(RoundEvent::CountdownFinished);
                }
                None => {}
            }
            return events;
        }

        self.ticks += 1;
        self.bird.update();
        self.particles.update(&mut session.rng);

        for kind in self.effects.tick() {
            tracing::debug!(effect = kind.name(), "effect expired");
            events.push(RoundEvent::EffectExpired(kind));
        }

        let profile = self.difficulty.profile();
        let spawned = self.spawner.tick(profile, &mut session.rng);
        if let Some(obstacle) = spawned.obstacle {
            tracing::trace!(
                top_height = obstacle.top_height,
                moving = obstacle.is_moving(),
                "obstacle spawned"
            );
            self.obstacles.push(obstacle);
        }
        if let Some(powerup) = spawned.powerup {
            tracing::trace!(kind = powerup.kind.name(), y = powerup.y, "power-up spawned");
            self.powerups.push(powerup);
        }

        let bird_rect = self.bird.rect();

        if let Some(crash) = collision::resolve_obstacles(self, &bird_rect, session, &mut events) {
            self.crash(crash, session, &mut events);
            return events;
        }

        collision::collect_powerups(self, &bird_rect, session, &mut events);

        if let Some(crash) = collision::check_bounds(self) {
            self.crash(crash, session, &mut events);
        }

        events
    }

    /// Keep the crash burst animating after the round has ended.
    pub fn animate_particles(&mut self, session: &mut Session) {
        self.particles.update(&mut session.rng);
    }

    fn crash(&mut self, crash: Crash, session: &mut Session, events: &mut Vec<RoundEvent>) {
        self.crashed = true;
        collision::crash_burst(self, session);
        tracing::info!(
            score = self.score,
            ?crash,
            ticks = self.ticks,
            difficulty = self.difficulty.name(),
            "round over"
        );
        events.push(RoundEvent::Crashed(crash));
    }
}
