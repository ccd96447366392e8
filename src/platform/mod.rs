//! Platform abstraction layer
//!
//! Everything the game loop needs from the outside world:
//! - Time (monotonic clock, sleeping, frame pacing)
//! - Input (one `TickInput` per tick)

pub mod input;
pub mod time;

pub use input::{Autopilot, Idle, InputSource, ScriptedInput};
pub use time::{Clock, FrameLimiter, ManualClock, SystemClock};
