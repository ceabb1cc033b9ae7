//! Temporary gameplay modifiers with tick-based expiry.

use crate::constants::{DOUBLE_SCORE_TICKS, SHIELD_TICKS, SLOW_MOTION_TICKS};
use crate::entities::PowerUpKind;

/// A single effect's countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectTimer {
    pub active: bool,
    pub remaining_ticks: u32,
}

impl EffectTimer {
    /// Start (or restart) the effect. Re-activation resets to the full
    /// duration; durations never stack.
    pub fn activate(&mut self, duration_ticks: u32) {
        self.active = duration_ticks > 0;
        self.remaining_ticks = duration_ticks;
    }

    /// Count down one tick. Returns true on the tick the effect expires.
    pub fn decrement(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn deactivate(&mut self) {
        *self = Self::default();
    }

    /// Whole seconds left, rounded up the way the HUD shows it.
    pub fn seconds_left(&self, ticks_per_second: u32) -> u32 {
        self.remaining_ticks / ticks_per_second.max(1) + 1
    }
}

/// The three independent effects a round can have running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    pub shield: EffectTimer,
    pub slow_motion: EffectTimer,
    pub double_score: EffectTimer,
}

impl Effects {
    pub fn duration_for(kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Shield => SHIELD_TICKS,
            PowerUpKind::SlowMotion => SLOW_MOTION_TICKS,
            PowerUpKind::DoubleScore => DOUBLE_SCORE_TICKS,
        }
    }

    pub fn timer(&self, kind: PowerUpKind) -> &EffectTimer {
        match kind {
            PowerUpKind::Shield => &self.shield,
            PowerUpKind::SlowMotion => &self.slow_motion,
            PowerUpKind::DoubleScore => &self.double_score,
        }
    }

    fn timer_mut(&mut self, kind: PowerUpKind) -> &mut EffectTimer {
        match kind {
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::SlowMotion => &mut self.slow_motion,
            PowerUpKind::DoubleScore => &mut self.double_score,
        }
    }

    pub fn activate(&mut self, kind: PowerUpKind) {
        self.timer_mut(kind).activate(Self::duration_for(kind));
    }

    /// Count every effect down one tick; returns the kinds that expired.
    pub fn tick(&mut self) -> Vec<PowerUpKind> {
        PowerUpKind::ALL
            .into_iter()
            .filter(|kind| self.timer_mut(*kind).decrement())
            .collect()
    }

    pub fn shield_active(&self) -> bool {
        self.shield.active
    }

    pub fn slow_motion_active(&self) -> bool {
        self.slow_motion.active
    }

    pub fn double_score_active(&self) -> bool {
        self.double_score.active
    }

    /// Points awarded for passing one obstacle.
    pub fn score_increment(&self) -> u32 {
        if self.double_score.active {
            2
        } else {
            1
        }
    }

    /// Active effects in HUD order.
    pub fn active(&self) -> impl Iterator<Item = (PowerUpKind, &EffectTimer)> {
        PowerUpKind::ALL
            .into_iter()
            .map(|kind| (kind, self.timer(kind)))
            .filter(|(_, timer)| timer.active)
    }
}
