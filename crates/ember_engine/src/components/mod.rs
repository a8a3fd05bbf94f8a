//! Component model
//!
//! Components are data-only capabilities owned exclusively by one
//! GameObject. The set is closed: every component is one variant of
//! [`Component`], tagged by [`ComponentKind`], so lookups are checked at
//! compile time instead of through runtime downcasts. Every variant
//! serializes to and from RON text and can copy its state from another
//! component of the same kind.

pub mod gameplay;
pub mod logic;
pub mod physics;
pub mod render;
pub mod transform;
pub mod ui;

pub use gameplay::{Controller, EnemyCombat, Inventory, ItemStack, PlayerCombat};
pub use logic::{LogicComponent, ScriptSlot};
pub use physics::{Collider, RigidBody};
pub use render::{Animator, Light, SpriteRenderer};
pub use transform::Transform;
pub use ui::{GameUi, UiAnchor};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discriminant of the closed component set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Spatial placement
    Transform,
    /// Motion state
    RigidBody,
    /// AABB collider
    Collision,
    /// Static sprite
    Renderer,
    /// Flipbook animation
    Animate,
    /// HUD widget
    GameUi,
    /// Item storage
    Inventory,
    /// Player combat state
    PlayerCombat,
    /// Enemy combat state
    EnemyCombat,
    /// Script attachment
    Logic,
    /// Movement intent
    Controller,
    /// Point light
    Lighting,
}

impl ComponentKind {
    /// Every kind, in mask-bit order
    pub const ALL: [ComponentKind; 12] = [
        ComponentKind::Transform,
        ComponentKind::RigidBody,
        ComponentKind::Collision,
        ComponentKind::Renderer,
        ComponentKind::Animate,
        ComponentKind::GameUi,
        ComponentKind::Inventory,
        ComponentKind::PlayerCombat,
        ComponentKind::EnemyCombat,
        ComponentKind::Logic,
        ComponentKind::Controller,
        ComponentKind::Lighting,
    ];

    /// Single-bit mask for this kind
    pub fn mask(self) -> ComponentMask {
        match self {
            ComponentKind::Transform => ComponentMask::TRANSFORM,
            ComponentKind::RigidBody => ComponentMask::RIGID_BODY,
            ComponentKind::Collision => ComponentMask::COLLISION,
            ComponentKind::Renderer => ComponentMask::RENDERER,
            ComponentKind::Animate => ComponentMask::ANIMATE,
            ComponentKind::GameUi => ComponentMask::GAME_UI,
            ComponentKind::Inventory => ComponentMask::INVENTORY,
            ComponentKind::PlayerCombat => ComponentMask::PLAYER_COMBAT,
            ComponentKind::EnemyCombat => ComponentMask::ENEMY_COMBAT,
            ComponentKind::Logic => ComponentMask::LOGIC,
            ComponentKind::Controller => ComponentMask::CONTROLLER,
            ComponentKind::Lighting => ComponentMask::LIGHTING,
        }
    }

    /// Display name used in logs and errors
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Transform => "Transform",
            ComponentKind::RigidBody => "RigidBody",
            ComponentKind::Collision => "Collision",
            ComponentKind::Renderer => "Renderer",
            ComponentKind::Animate => "Animate",
            ComponentKind::GameUi => "GameUi",
            ComponentKind::Inventory => "Inventory",
            ComponentKind::PlayerCombat => "PlayerCombat",
            ComponentKind::EnemyCombat => "EnemyCombat",
            ComponentKind::Logic => "Logic",
            ComponentKind::Controller => "Controller",
            ComponentKind::Lighting => "Lighting",
        }
    }
}

bitflags! {
    /// Presence bits mirroring a GameObject's owned component kinds
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ComponentMask: u16 {
        /// Transform present
        const TRANSFORM = 1 << 0;
        /// RigidBody present
        const RIGID_BODY = 1 << 1;
        /// Collision present
        const COLLISION = 1 << 2;
        /// Renderer present
        const RENDERER = 1 << 3;
        /// Animate present
        const ANIMATE = 1 << 4;
        /// GameUi present
        const GAME_UI = 1 << 5;
        /// Inventory present
        const INVENTORY = 1 << 6;
        /// PlayerCombat present
        const PLAYER_COMBAT = 1 << 7;
        /// EnemyCombat present
        const ENEMY_COMBAT = 1 << 8;
        /// Logic present
        const LOGIC = 1 << 9;
        /// Controller present
        const CONTROLLER = 1 << 10;
        /// Lighting present
        const LIGHTING = 1 << 11;
    }
}

/// A component instance: one variant per [`ComponentKind`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Component {
    /// Spatial placement
    Transform(Transform),
    /// Motion state
    RigidBody(RigidBody),
    /// AABB collider
    Collision(Collider),
    /// Static sprite
    Renderer(SpriteRenderer),
    /// Flipbook animation
    Animate(Animator),
    /// HUD widget
    GameUi(GameUi),
    /// Item storage
    Inventory(Inventory),
    /// Player combat state
    PlayerCombat(PlayerCombat),
    /// Enemy combat state
    EnemyCombat(EnemyCombat),
    /// Script attachment
    Logic(LogicComponent),
    /// Movement intent
    Controller(Controller),
    /// Point light
    Lighting(Light),
}

impl Component {
    /// Discriminant of this instance
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Transform(_) => ComponentKind::Transform,
            Component::RigidBody(_) => ComponentKind::RigidBody,
            Component::Collision(_) => ComponentKind::Collision,
            Component::Renderer(_) => ComponentKind::Renderer,
            Component::Animate(_) => ComponentKind::Animate,
            Component::GameUi(_) => ComponentKind::GameUi,
            Component::Inventory(_) => ComponentKind::Inventory,
            Component::PlayerCombat(_) => ComponentKind::PlayerCombat,
            Component::EnemyCombat(_) => ComponentKind::EnemyCombat,
            Component::Logic(_) => ComponentKind::Logic,
            Component::Controller(_) => ComponentKind::Controller,
            Component::Lighting(_) => ComponentKind::Lighting,
        }
    }

    /// Default-constructed instance of the given kind
    pub fn new_default(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Transform => Component::Transform(Transform::default()),
            ComponentKind::RigidBody => Component::RigidBody(RigidBody::default()),
            ComponentKind::Collision => Component::Collision(Collider::default()),
            ComponentKind::Renderer => Component::Renderer(SpriteRenderer::default()),
            ComponentKind::Animate => Component::Animate(Animator::default()),
            ComponentKind::GameUi => Component::GameUi(GameUi::default()),
            ComponentKind::Inventory => Component::Inventory(Inventory::default()),
            ComponentKind::PlayerCombat => Component::PlayerCombat(PlayerCombat::default()),
            ComponentKind::EnemyCombat => Component::EnemyCombat(EnemyCombat::default()),
            ComponentKind::Logic => Component::Logic(LogicComponent::default()),
            ComponentKind::Controller => Component::Controller(Controller::default()),
            ComponentKind::Lighting => Component::Lighting(Light::default()),
        }
    }

    /// Copy state from another component of the same kind
    ///
    /// Returns false (and leaves `self` untouched) on a kind mismatch.
    pub fn copy_from(&mut self, other: &Component) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        self.clone_from(other);
        true
    }

    /// Serialize to RON text
    pub fn to_text(&self) -> Result<String, ComponentError> {
        ron::ser::to_string_pretty(self, Default::default())
            .map_err(|e| ComponentError::Serialize(e.to_string()))
    }

    /// Deserialize from RON text produced by [`Component::to_text`]
    pub fn from_text(text: &str) -> Result<Self, ComponentError> {
        ron::from_str(text).map_err(|e| ComponentError::Parse(e.to_string()))
    }
}

/// Component text serialization errors
#[derive(Error, Debug)]
pub enum ComponentError {
    /// Serialization error
    #[error("component serialization failed: {0}")]
    Serialize(String),

    /// Parse error
    #[error("component text is malformed: {0}")]
    Parse(String),
}
