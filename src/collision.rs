//! Per-tick intersection tests, scoring and power-up collection.
//!
//! Discrete evaluation against the bird's box for this tick. There is no
//! sweeping, so a fast enough entity can tunnel through a thin one.

use crate::constants::{BIRD_SIZE, COLLECT_PARTICLES, CRASH_PARTICLES, SCREEN_HEIGHT};
use crate::geometry::Rect;
use crate::round::{Round, RoundEvent};
use crate::services::Color;
use crate::session::Session;

/// What ended the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crash {
    Obstacle,
    Boundary,
}

/// Move every obstacle, test it against the bird, and score the ones the
/// bird has cleared. Stops at the first fatal hit.
///
/// A shielded bird ignores hits entirely. Off-screen obstacles are dropped
/// once the pass completes.
pub fn resolve_obstacles(
    round: &mut Round,
    bird_rect: &Rect,
    session: &mut Session,
    events: &mut Vec<RoundEvent>,
) -> Option<Crash> {
    let slow_motion = round.effects.slow_motion_active();
    let shielded = round.effects.shield_active();
    let increment = round.effects.score_increment();
    let bird_x = round.bird.x;

    for obstacle in &mut round.obstacles {
        obstacle.update(slow_motion);

        if obstacle.collides_with(bird_rect) && !shielded {
            return Some(Crash::Obstacle);
        }

        if !obstacle.scored && obstacle.is_passed(bird_x) {
            obstacle.scored = true;
            round.score += increment;
            let new_high = session.record_score(round.score);
            tracing::debug!(score = round.score, points = increment, "obstacle passed");
            events.push(RoundEvent::Scored {
                points: increment,
                new_high,
            });
        }
    }

    round.obstacles.retain(|o| !o.is_off_screen());
    None
}

/// Move every power-up and collect the ones touching the bird.
pub fn collect_powerups(
    round: &mut Round,
    bird_rect: &Rect,
    session: &mut Session,
    events: &mut Vec<RoundEvent>,
) {
    let slow_motion = round.effects.slow_motion_active();

    for powerup in &mut round.powerups {
        powerup.update(slow_motion);

        if !powerup.collected && bird_rect.intersects(&powerup.rect()) {
            powerup.collected = true;
            round.effects.activate(powerup.kind);
            round.particles.add_explosion(
                powerup.x,
                powerup.y,
                powerup.kind.color(),
                COLLECT_PARTICLES,
                &mut session.rng,
            );
            tracing::debug!(kind = powerup.kind.name(), "power-up collected");
            events.push(RoundEvent::PowerUpCollected(powerup.kind));
        }
    }

    round
        .powerups
        .retain(|p| !p.collected && !p.is_off_screen());
}

/// Ceiling and ground. A shielded bird may leave the screen unharmed.
pub fn check_bounds(round: &Round) -> Option<Crash> {
    let bird = &round.bird;
    let out = bird.y + BIRD_SIZE >= SCREEN_HEIGHT || bird.y <= 0.0;
    if out && !round.effects.shield_active() {
        return Some(Crash::Boundary);
    }
    None
}

/// Red burst at the bird's centre.
pub fn crash_burst(round: &mut Round, session: &mut Session) {
    let (cx, cy) = round.bird.center();
    round
        .particles
        .add_explosion(cx, cy, Color::RED, CRASH_PARTICLES, &mut session.rng);
}
