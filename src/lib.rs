//! Nightswarm simulation library crate.
//!
//! The headless core of a top-down wave-survival game: the per-tick update
//! loop, enemy spawning, combat resolution, progression and the wave state
//! machine. Rendering, audio and persistence live outside the crate; they
//! drive the core through [`session::Session`] commands and consume its
//! snapshots and events.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod pool;
pub mod session;
pub mod store;
pub mod systems;
