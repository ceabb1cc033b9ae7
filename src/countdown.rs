//! Pre-round "3, 2, 1, Go!" countdown.

use crate::constants::{COUNTDOWN_GO_AT, COUNTDOWN_ONE_AT, COUNTDOWN_TICKS, COUNTDOWN_TWO_AT};

/// A label change or the end of the countdown, reported by [`Countdown::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Label(&'static str),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    label: &'static str,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub const GO: &'static str = "Go!";

    pub fn new() -> Self {
        Self {
            remaining: COUNTDOWN_TICKS,
            label: "3",
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Count down one tick.
    pub fn tick(&mut self) -> Option<CountdownEvent> {
        if !self.is_active() {
            return None;
        }
        self.remaining -= 1;

        let label = match self.remaining {
            0 => return Some(CountdownEvent::Finished),
            COUNTDOWN_GO_AT => Self::GO,
            COUNTDOWN_ONE_AT => "1",
            COUNTDOWN_TWO_AT => "2",
            _ => return None,
        };
        self.label = label;
        Some(CountdownEvent::Label(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_sequence() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.label(), "3");

        let events: Vec<(u32, CountdownEvent)> = (1..=COUNTDOWN_TICKS)
            .filter_map(|tick| countdown.tick().map(|e| (tick, e)))
            .collect();

        assert_eq!(
            events,
            vec![
                (60, CountdownEvent::Label("2")),
                (120, CountdownEvent::Label("1")),
                (180, CountdownEvent::Label(Countdown::GO)),
                (240, CountdownEvent::Finished),
            ]
        );
        assert!(!countdown.is_active());
    }

    #[test]
    fn test_finished_countdown_stays_finished() {
        let mut countdown = Countdown::new();
        for _ in 0..COUNTDOWN_TICKS {
            countdown.tick();
        }
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.remaining(), 0);
    }
}
