//! Scene model
//!
//! A [`Level`] owns every [`GameObject`] in the loaded scene through a
//! generational arena, so references held by scripts and subsystems are
//! keys that fail lookup after destruction instead of dangling.

pub mod game_object;
pub mod level;
pub mod query;

pub use game_object::{GameObject, Layer};
pub use level::Level;
pub use query::ObjectQuery;

use slotmap::new_key_type;
use thiserror::Error;

use crate::components::ComponentKind;

new_key_type! {
    /// Generation-checked handle to a GameObject inside its Level
    pub struct GameObjectKey;
}

/// Scene structure errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// A GameObject already owns a component of this kind
    #[error("object {id} already owns a {kind:?} component")]
    DuplicateComponent {
        /// Id of the offending GameObject
        id: u32,
        /// Kind that was added twice
        kind: ComponentKind,
    },
}
