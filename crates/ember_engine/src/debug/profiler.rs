//! Per-frame subsystem timing
//!
//! The engine reports every subsystem's update time here once per frame;
//! `finish_frame` turns the raw samples into totals and percentage shares
//! for the frame that just ended.

/// Wall time one subsystem spent in its update this frame
#[derive(Debug, Clone)]
pub struct SystemSample {
    /// Subsystem name
    pub name: &'static str,

    /// Seconds spent in the primary update
    pub seconds: f32,

    /// Share of the frame's total subsystem time, 0..=100
    pub share: f32,
}

/// Collects subsystem timings for the current frame
#[derive(Default)]
pub struct FrameProfiler {
    pending: Vec<SystemSample>,
    report: Vec<SystemSample>,
    frame_total: f32,
    frames: u64,
}

impl FrameProfiler {
    /// Create an empty profiler
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all samples and frame history
    pub fn reset(&mut self) {
        self.pending.clear();
        self.report.clear();
        self.frame_total = 0.0;
        self.frames = 0;
    }

    /// Report one subsystem's update time for the current frame
    pub fn record(&mut self, name: &'static str, seconds: f32) {
        self.pending.push(SystemSample {
            name,
            seconds,
            share: 0.0,
        });
    }

    /// Close the current frame: compute totals and percentage shares
    pub fn finish_frame(&mut self) {
        self.frame_total = self.pending.iter().map(|s| s.seconds).sum();
        if self.frame_total > 0.0 {
            for sample in &mut self.pending {
                sample.share = sample.seconds / self.frame_total * 100.0;
            }
        }
        self.frames += 1;

        self.report = std::mem::take(&mut self.pending);
        if log::log_enabled!(log::Level::Trace) {
            for sample in &self.report {
                log::trace!(
                    "frame {}: {} {:.3}ms ({:.1}%)",
                    self.frames,
                    sample.name,
                    sample.seconds * 1000.0,
                    sample.share
                );
            }
        }
    }

    /// Samples of the most recently finished frame
    pub fn report(&self) -> &[SystemSample] {
        &self.report
    }

    /// Total subsystem seconds of the most recently finished frame
    pub fn frame_total(&self) -> f32 {
        self.frame_total
    }

    /// Number of frames finished since the last reset
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
