//! Presentation components consumed by the renderer subsystem
//!
//! The engine core never draws; these components only carry the data a
//! renderer needs, plus the visibility and bounds the query engine reads.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Static sprite attached to a GameObject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteRenderer {
    /// Asset key of the sprite image
    pub sprite: String,

    /// On-screen quad size before transform scale
    pub size: Vec2,

    /// RGBA tint multiplier
    pub tint: [f32; 4],

    /// Hidden sprites are skipped by rendering and by location queries
    pub visible: bool,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            sprite: String::new(),
            size: Vec2::new(1.0, 1.0),
            tint: [1.0, 1.0, 1.0, 1.0],
            visible: true,
        }
    }
}

impl SpriteRenderer {
    /// Create a sprite renderer for the given asset key
    pub fn new(sprite: impl Into<String>, size: Vec2) -> Self {
        Self {
            sprite: sprite.into(),
            size,
            ..Default::default()
        }
    }
}

/// Flipbook animation attached to a GameObject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    /// Asset key of the sprite sheet
    pub sheet: String,

    /// Name of the clip currently playing
    pub clip: String,

    /// Frames in the current clip
    pub frame_count: u32,

    /// Seconds per frame
    pub frame_time: f32,

    /// Frame currently displayed
    pub current_frame: u32,

    /// Time accumulated toward the next frame
    pub elapsed: f32,

    /// Whether the clip advances
    pub playing: bool,

    /// Whether the clip wraps at the last frame
    pub looping: bool,

    /// Hidden animators are skipped by rendering and by location queries
    pub visible: bool,

    /// On-screen quad size before transform scale
    pub size: Vec2,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            sheet: String::new(),
            clip: String::new(),
            frame_count: 1,
            frame_time: 0.1,
            current_frame: 0,
            elapsed: 0.0,
            playing: true,
            looping: true,
            visible: true,
            size: Vec2::new(1.0, 1.0),
        }
    }
}

impl Animator {
    /// Advance the clip by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if !self.playing || self.frame_count <= 1 || self.frame_time <= 0.0 {
            return;
        }

        self.elapsed += dt;
        while self.elapsed >= self.frame_time {
            self.elapsed -= self.frame_time;
            self.current_frame += 1;
            if self.current_frame >= self.frame_count {
                if self.looping {
                    self.current_frame = 0;
                } else {
                    self.current_frame = self.frame_count - 1;
                    self.playing = false;
                    break;
                }
            }
        }
    }
}

/// Point light attached to a GameObject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// RGB color
    pub color: [f32; 3],

    /// Brightness multiplier
    pub intensity: f32,

    /// Falloff radius in world units
    pub radius: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            radius: 5.0,
        }
    }
}
