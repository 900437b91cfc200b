//! Platform abstraction layer
//!
//! Handles the parts that touch the outside world:
//! - Monotonic time
//! - The one-second countdown ticker

pub mod ticker;
pub mod time;

pub use ticker::Ticker;
pub use time::{Clock, ManualClock, SystemClock};
