//! Foundation module - Shared domain primitives.
//!
//! Contains the time source abstraction shared by the webhook pipeline.

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};
