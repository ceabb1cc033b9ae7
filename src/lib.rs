//! Skybird - terminal Flappy Bird.
//!
//! The simulation and screen state machine are plain library code driven
//! one tick at a time; the terminal front end lives in `ui` and the binary.

pub mod collision;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod difficulty;
pub mod effects;
pub mod entities;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod menu;
pub mod render;
pub mod round;
pub mod services;
pub mod session;
pub mod spawner;
pub mod state_machine;
pub mod ui;
