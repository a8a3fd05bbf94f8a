//! Foundation utilities shared by every engine module
//!
//! Math aliases, frame timing, and logging setup. Nothing in here knows
//! about GameObjects or subsystems.

pub mod logging;
pub mod math;
pub mod time;

pub use math::{Aabb, Vec2, Vec3};
pub use time::{Stopwatch, Timer};
