//! Engine module - cooperative task scheduling for the quiz loop.
//!
//! Everything in the quiz runs on one thread. Deferred work (animation frames,
//! the reveal auto-advance, the celebration timeout) is expressed as tasks on a
//! [`Scheduler`] that the owner advances with elapsed time, in the same fixed
//! timestep style the game loop already uses for input polling.

pub mod scheduler;

pub use scheduler::{Scheduler, TaskId};
