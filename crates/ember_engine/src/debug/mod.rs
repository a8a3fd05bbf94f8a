//! Debug and diagnostics utilities

pub mod profiler;

pub use profiler::{FrameProfiler, SystemSample};
