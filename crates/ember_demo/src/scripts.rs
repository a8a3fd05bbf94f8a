//! Gameplay scripts for the arena demo
//!
//! Each script is a stateless (init, update, end) triple; everything it
//! remembers between frames lives on the owner's components.

use ember_engine::prelude::*;
use rand::Rng;

/// Register every demo script under its key
pub fn register_all(scripts: &mut ScriptRegistry) {
    scripts.register(
        "player_move",
        Script::new(player_init, player_update, player_end),
    );
    scripts.register("slime_chase", Script::new(noop, slime_update, noop));
    scripts.register("coin_spin", Script::new(noop, coin_update, noop));
}

fn noop(_ctx: &mut ScriptContext<'_>, _dt: f32) {}

fn player_init(ctx: &mut ScriptContext<'_>, _dt: f32) {
    if let Some(go) = ctx.object() {
        log::info!("player '{}' entered the arena", go.name);
    }
}

/// Autopilot: sweep the arena in a slow circle and feed the controller
/// axis into the rigid body, the same path real input would take.
fn player_update(ctx: &mut ScriptContext<'_>, _dt: f32) {
    let t = ctx.app_time as f32 * 0.8;
    let Some(go) = ctx.object_mut() else {
        return;
    };

    let desired = {
        let Some(controller) = go.controller_mut() else {
            return;
        };
        controller.axis = Vec2::new(t.cos(), t.sin());
        controller.desired_velocity()
    };
    if let Some(body) = go.rigid_body_mut() {
        body.velocity = Vec3::new(desired.x, desired.y, 0.0);
    }
}

fn player_end(ctx: &mut ScriptContext<'_>, _dt: f32) {
    let coins = ctx
        .object()
        .and_then(|go| go.inventory())
        .map_or(0, |inv| inv.count_of("coin"));
    log::info!("player left the arena with {} coins", coins);
}

/// Chase the player inside the aggro radius, bite when in range, wander
/// otherwise.
fn slime_update(ctx: &mut ScriptContext<'_>, _dt: f32) {
    let Some(player_key) = query::find(
        ctx.level,
        ObjectQuery::ByName("player"),
        Some(ComponentKind::PlayerCombat),
    ) else {
        return;
    };
    let Some(player_pos) = ctx
        .level
        .get(player_key)
        .and_then(|go| go.transform())
        .map(|t| t.position)
    else {
        return;
    };
    let Some(my_pos) = ctx.object().and_then(|go| go.transform()).map(|t| t.position) else {
        return;
    };

    let (aggro_radius, attack_range, attack_damage, ready) = {
        let Some(combat) = ctx.object().and_then(|go| go.enemy_combat()) else {
            return;
        };
        (
            combat.aggro_radius,
            combat.attack_range,
            combat.attack_damage,
            combat.cooldown_remaining <= 0.0,
        )
    };

    let offset = player_pos - my_pos;
    let distance = offset.norm();

    if distance <= aggro_radius && distance > f32::EPSILON {
        let chase = offset / distance * 1.5;
        if let Some(body) = ctx.object_mut().and_then(|go| go.rigid_body_mut()) {
            body.velocity = chase;
        }

        if distance <= attack_range && ready {
            if let Some(target) = ctx
                .level
                .get_mut(player_key)
                .and_then(|go| go.player_combat_mut())
            {
                if target.take_damage(attack_damage) {
                    log::debug!("slime bit the player for {}", attack_damage);
                }
            }
            if let Some(combat) = ctx.object_mut().and_then(|go| go.enemy_combat_mut()) {
                combat.cooldown_remaining = combat.attack_cooldown;
            }
        }
    } else {
        // Out of aggro: drift in a random direction now and then.
        let mut rng = rand::thread_rng();
        if rng.gen_bool(0.02) {
            let wander = Vec3::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5), 0.0);
            if let Some(body) = ctx.object_mut().and_then(|go| go.rigid_body_mut()) {
                body.velocity = wander;
            }
        }
    }
}

/// Spin in place; when the player passes close enough, hand them a coin
/// and despawn.
fn coin_update(ctx: &mut ScriptContext<'_>, dt: f32) {
    if let Some(transform) = ctx.object_mut().and_then(|go| go.transform_mut()) {
        transform.rotation += 3.0 * dt;
    }

    let Some(my_pos) = ctx.object().and_then(|go| go.transform()).map(|t| t.position) else {
        return;
    };
    let Some(player_key) = query::find(
        ctx.level,
        ObjectQuery::InProximityByPrefix {
            point: my_pos,
            prefix: "player",
            radius: 0.6,
        },
        Some(ComponentKind::Inventory),
    ) else {
        return;
    };

    if let Some(inventory) = ctx
        .level
        .get_mut(player_key)
        .and_then(|go| go.inventory_mut())
    {
        inventory.add("coin", 1);
    }
    let owner = ctx.owner;
    ctx.level.destroy(owner);
}
