//! UI widget component

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Screen corner or center a widget hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UiAnchor {
    /// Top-left corner
    #[default]
    TopLeft,
    /// Top-right corner
    TopRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-right corner
    BottomRight,
    /// Screen center
    Center,
}

/// HUD widget data for a Ui-layer GameObject
///
/// Ui-layer objects keep their Transform in camera-relative screen
/// coordinates; the anchor and offset here position the widget within the
/// screen rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameUi {
    /// Anchor point
    pub anchor: UiAnchor,

    /// Pixel offset from the anchor
    pub offset: Vec2,

    /// Widget text, empty for pure-image widgets
    pub text: String,
}

impl GameUi {
    /// Create a text widget at the given anchor
    pub fn text_widget(anchor: UiAnchor, text: impl Into<String>) -> Self {
        Self {
            anchor,
            offset: Vec2::zeros(),
            text: text.into(),
        }
    }
}
