//! Query engine: stateless read-only search over a Level's GameObjects
//!
//! Every search is a [`ObjectQuery`] variant dispatched through [`find`],
//! plus the gather operations [`all_by_prefix`] and [`all_at_location`].
//! All variants accept an optional component-kind filter: an object is
//! eligible only if it is active and (no filter, or it owns a component of
//! the filtered kind). Misses are `None`/empty, never errors.

use super::{GameObject, GameObjectKey, Layer, Level};
use crate::components::ComponentKind;
use crate::foundation::math::{Aabb, Vec2, Vec3};

/// One search pattern, carrying only the fields that pattern needs
#[derive(Debug, Clone, Copy)]
pub enum ObjectQuery<'a> {
    /// Exact id match
    ById(u32),
    /// Exact name match
    ByName(&'a str),
    /// Name starts with the prefix
    ByPrefix(&'a str),
    /// Name ends with the suffix
    BySuffix(&'a str),
    /// Name starts with the prefix and ends with the suffix
    ByPrefixAndSuffix(&'a str, &'a str),
    /// Smallest squared distance from the point to `Transform.position`
    ClosestTo(Vec3),
    /// Smallest squared distance to the given object, excluding itself
    ClosestToObject(GameObjectKey),
    /// First prefix match within `radius` of the point
    InProximityByPrefix {
        /// Search origin
        point: Vec3,
        /// Name prefix
        prefix: &'a str,
        /// Maximum distance (inclusive); negative never matches
        radius: f32,
    },
}

/// First eligible object matching `query`, in collection order
pub fn find(
    level: &Level,
    query: ObjectQuery<'_>,
    filter: Option<ComponentKind>,
) -> Option<GameObjectKey> {
    match query {
        ObjectQuery::ById(id) => first_match(level, filter, |go| go.id() == id),
        ObjectQuery::ByName(name) => first_match(level, filter, |go| go.name == name),
        ObjectQuery::ByPrefix(prefix) => {
            first_match(level, filter, |go| go.name.starts_with(prefix))
        }
        ObjectQuery::BySuffix(suffix) => {
            first_match(level, filter, |go| go.name.ends_with(suffix))
        }
        ObjectQuery::ByPrefixAndSuffix(prefix, suffix) => first_match(level, filter, |go| {
            go.name.starts_with(prefix) && go.name.ends_with(suffix)
        }),
        ObjectQuery::ClosestTo(point) => closest(level, filter, point, None),
        ObjectQuery::ClosestToObject(key) => {
            let point = level.get(key)?.transform()?.position;
            closest(level, filter, point, Some(key))
        }
        ObjectQuery::InProximityByPrefix {
            point,
            prefix,
            radius,
        } => {
            if radius < 0.0 {
                return None;
            }
            let radius_sq = radius * radius;
            level
                .iter()
                .find(|&(_, go)| {
                    eligible(go, filter)
                        && go.name.starts_with(prefix)
                        && go
                            .transform()
                            .is_some_and(|t| (t.position - point).norm_squared() <= radius_sq)
                })
                .map(|(key, _)| key)
        }
    }
}

/// Every eligible object whose name starts with `prefix`, collection order
pub fn all_by_prefix(
    level: &Level,
    prefix: &str,
    filter: Option<ComponentKind>,
) -> Vec<GameObjectKey> {
    level
        .iter()
        .filter(|&(_, go)| eligible(go, filter) && go.name.starts_with(prefix))
        .map(|(key, _)| key)
        .collect()
}

/// Every eligible, visible object whose bounds contain `point`
///
/// Visibility requires a visible Renderer or Animate component. Ui-layer
/// objects are tested in camera-relative screen space (their transforms
/// already live there, and screen sizes ignore world scale); world-layer
/// objects are tested in absolute world space with transform scale
/// applied. Callers must pass a point in the matching space.
pub fn all_at_location(
    level: &Level,
    point: Vec2,
    filter: Option<ComponentKind>,
) -> Vec<GameObjectKey> {
    level
        .iter()
        .filter(|&(_, go)| {
            eligible(go, filter) && visible_bounds(go).is_some_and(|b| b.contains(point))
        })
        .map(|(key, _)| key)
        .collect()
}

fn eligible(go: &GameObject, filter: Option<ComponentKind>) -> bool {
    go.active && filter.map_or(true, |kind| go.has_component(kind))
}

fn first_match(
    level: &Level,
    filter: Option<ComponentKind>,
    pred: impl Fn(&GameObject) -> bool,
) -> Option<GameObjectKey> {
    level
        .iter()
        .find(|&(_, go)| eligible(go, filter) && pred(go))
        .map(|(key, _)| key)
}

fn closest(
    level: &Level,
    filter: Option<ComponentKind>,
    point: Vec3,
    exclude: Option<GameObjectKey>,
) -> Option<GameObjectKey> {
    let mut best: Option<(GameObjectKey, f32)> = None;
    for (key, go) in level.iter() {
        if Some(key) == exclude || !eligible(go, filter) {
            continue;
        }
        let Some(transform) = go.transform() else {
            continue;
        };
        let distance_sq = (transform.position - point).norm_squared();
        // Strict comparison keeps the earliest-encountered candidate on ties.
        if best.map_or(true, |(_, b)| distance_sq < b) {
            best = Some((key, distance_sq));
        }
    }
    best.map(|(key, _)| key)
}

fn visible_bounds(go: &GameObject) -> Option<Aabb> {
    let transform = go.transform()?;
    let size = go
        .sprite()
        .filter(|s| s.visible)
        .map(|s| s.size)
        .or_else(|| go.animator().filter(|a| a.visible).map(|a| a.size))?;
    let size = if go.layer == Layer::Ui {
        size
    } else {
        size.component_mul(&transform.scale)
    };
    Some(Aabb::from_center_size(transform.planar_position(), size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Component, Inventory, SpriteRenderer, Transform};

    fn spawn_at(level: &mut Level, name: &str, position: Vec3) -> GameObjectKey {
        let key = level.spawn(name);
        level
            .get_mut(key)
            .unwrap()
            .add_component(Component::Transform(Transform::from_position(position)))
            .unwrap();
        key
    }

    #[test]
    fn test_by_name_and_id() {
        let mut level = Level::new("test");
        let hero = level.spawn("hero");
        level.spawn("door");
        let hero_id = level.get(hero).unwrap().id();

        assert_eq!(find(&level, ObjectQuery::ByName("hero"), None), Some(hero));
        assert_eq!(find(&level, ObjectQuery::ById(hero_id), None), Some(hero));
        assert_eq!(find(&level, ObjectQuery::ByName("ghost"), None), None);
    }

    #[test]
    fn test_inactive_objects_are_invisible() {
        let mut level = Level::new("test");
        let hero = level.spawn("hero");
        level.get_mut(hero).unwrap().active = false;
        assert_eq!(find(&level, ObjectQuery::ByName("hero"), None), None);
    }

    #[test]
    fn test_component_filter_gates_matches() {
        let mut level = Level::new("test");
        let chest = level.spawn("chest");
        level
            .get_mut(chest)
            .unwrap()
            .add_component(Component::Inventory(Inventory::default()))
            .unwrap();
        level.spawn("chest");

        assert_eq!(
            find(
                &level,
                ObjectQuery::ByName("chest"),
                Some(ComponentKind::Inventory)
            ),
            Some(chest)
        );
        assert_eq!(
            find(
                &level,
                ObjectQuery::ByName("chest"),
                Some(ComponentKind::Lighting)
            ),
            None
        );
    }

    #[test]
    fn test_prefix_suffix_matching() {
        let mut level = Level::new("test");
        let a = level.spawn("enemy_bat");
        level.spawn("friend_bat");

        assert_eq!(find(&level, ObjectQuery::ByPrefix("enemy"), None), Some(a));
        assert!(find(&level, ObjectQuery::BySuffix("bat"), None).is_some());
        assert_eq!(
            find(&level, ObjectQuery::ByPrefixAndSuffix("enemy", "bat"), None),
            Some(a)
        );
        assert_eq!(
            find(&level, ObjectQuery::ByPrefixAndSuffix("enemy", "rat"), None),
            None
        );
    }

    #[test]
    fn test_closest_on_empty_level_is_none() {
        let level = Level::new("test");
        assert_eq!(
            find(&level, ObjectQuery::ClosestTo(Vec3::zeros()), None),
            None
        );
    }

    #[test]
    fn test_closest_single_candidate_wins_at_any_distance() {
        let mut level = Level::new("test");
        let far = spawn_at(&mut level, "far", Vec3::new(1000.0, 0.0, 0.0));
        assert_eq!(
            find(&level, ObjectQuery::ClosestTo(Vec3::zeros()), None),
            Some(far)
        );
    }

    #[test]
    fn test_closest_ties_keep_the_earliest_deterministically() {
        let mut level = Level::new("test");
        let first = spawn_at(&mut level, "first", Vec3::new(1.0, 0.0, 0.0));
        spawn_at(&mut level, "second", Vec3::new(-1.0, 0.0, 0.0));

        for _ in 0..8 {
            assert_eq!(
                find(&level, ObjectQuery::ClosestTo(Vec3::zeros()), None),
                Some(first)
            );
        }
    }

    #[test]
    fn test_closest_to_object_excludes_itself() {
        let mut level = Level::new("test");
        let hero = spawn_at(&mut level, "hero", Vec3::zeros());
        let rat = spawn_at(&mut level, "rat", Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(
            find(&level, ObjectQuery::ClosestToObject(hero), None),
            Some(rat)
        );
    }

    #[test]
    fn test_proximity_radius_is_inclusive() {
        let mut level = Level::new("test");
        let door = spawn_at(&mut level, "door", Vec3::new(3.0, 4.0, 0.0));

        let hit = ObjectQuery::InProximityByPrefix {
            point: Vec3::zeros(),
            prefix: "door",
            radius: 5.0,
        };
        let miss = ObjectQuery::InProximityByPrefix {
            point: Vec3::zeros(),
            prefix: "door",
            radius: 4.9,
        };
        assert_eq!(find(&level, hit, None), Some(door));
        assert_eq!(find(&level, miss, None), None);
    }

    #[test]
    fn test_all_by_prefix_keeps_collection_order() {
        let mut level = Level::new("test");
        let a = level.spawn("coin_a");
        level.spawn("door");
        let b = level.spawn("coin_b");

        assert_eq!(all_by_prefix(&level, "coin", None), [a, b]);
    }

    #[test]
    fn test_all_at_location_requires_visibility() {
        let mut level = Level::new("test");
        let visible = spawn_at(&mut level, "sign", Vec3::zeros());
        level
            .get_mut(visible)
            .unwrap()
            .add_component(Component::Renderer(SpriteRenderer::new(
                "sign",
                Vec2::new(2.0, 2.0),
            )))
            .unwrap();

        let hidden = spawn_at(&mut level, "ghost", Vec3::zeros());
        let mut sprite = SpriteRenderer::new("ghost", Vec2::new(2.0, 2.0));
        sprite.visible = false;
        level
            .get_mut(hidden)
            .unwrap()
            .add_component(Component::Renderer(sprite))
            .unwrap();

        let bare = spawn_at(&mut level, "marker", Vec3::zeros());

        let hits = all_at_location(&level, Vec2::zeros(), None);
        assert!(hits.contains(&visible));
        assert!(!hits.contains(&hidden));
        assert!(!hits.contains(&bare));
    }

    #[test]
    fn test_all_at_location_scales_world_bounds_but_not_ui() {
        let mut level = Level::new("test");

        let world = spawn_at(&mut level, "rug", Vec3::zeros());
        {
            let go = level.get_mut(world).unwrap();
            go.transform_mut().unwrap().scale = Vec2::new(4.0, 4.0);
            go.add_component(Component::Renderer(SpriteRenderer::new(
                "rug",
                Vec2::new(1.0, 1.0),
            )))
            .unwrap();
        }

        let ui = spawn_at(&mut level, "hud", Vec3::zeros());
        {
            let go = level.get_mut(ui).unwrap();
            go.layer = Layer::Ui;
            go.transform_mut().unwrap().scale = Vec2::new(4.0, 4.0);
            go.add_component(Component::Renderer(SpriteRenderer::new(
                "hud",
                Vec2::new(1.0, 1.0),
            )))
            .unwrap();
        }

        // (1.5, 0) sits inside the scaled 4x4 world quad but outside the
        // unscaled 1x1 screen quad.
        let hits = all_at_location(&level, Vec2::new(1.5, 0.0), None);
        assert!(hits.contains(&world));
        assert!(!hits.contains(&ui));
    }
}
