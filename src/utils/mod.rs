//! Utility Module
//!
//! - [`FrameClock`]: produces `(time, delta)` frame ticks for hosts without
//!   their own animation clock, in wall-clock or manual mode

pub mod time;

pub use time::{FrameClock, FrameTick};
