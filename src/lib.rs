//! Arena Duel - match simulation core for a split-screen two-player arena shooter
//!
//! The crate owns the round state machine, movement and collision, the
//! weapon model and hit resolution. Rendering, audio and task mini-games
//! sit outside and talk to it through [`world::World`],
//! [`game::events::EventSink`] and the task callbacks on [`game::GameMatch`].

pub mod config;
pub mod game;
pub mod harness;
pub mod util;
pub mod world;
