//! Time subsystem.
//!
//! - `FrameClock`: clamped wall-clock deltas, one per render loop
//! - `FixedStep`: fixed-rate ticks for game updates

mod fixed_step;
mod frame_clock;

pub use fixed_step::FixedStep;
pub use frame_clock::{FrameClock, FrameTime};
