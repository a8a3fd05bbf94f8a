//! Arena demo: a player, a few slimes, and scattered coins, simulated
//! headless for a fixed number of frames.

mod scripts;

use ember_engine::prelude::*;

const FRAMES: u64 = 600;

fn main() {
    env_logger::init();

    let mut engine = Engine::new(EngineConfig::default());
    engine.add_system(Box::new(PhysicsSystem::new()));
    engine.add_system(Box::new(LogicSystem::new()));
    scripts::register_all(engine.scripts_mut());

    engine.set_level(build_arena());
    engine.set_play_state(PlayState::Playing);
    engine.init();

    let mut host = HeadlessHost::with_frame_budget(FRAMES);
    while engine.is_running() && !host.close_requested() {
        host.pump_events();
        engine.tick();
    }

    report(&engine);
    engine.shutdown();
}

fn build_arena() -> Level {
    let mut level = Level::new("arena");

    spawn_player(&mut level);
    spawn_slime(&mut level, "slime_a", Vec3::new(6.0, 2.0, 0.0));
    spawn_slime(&mut level, "slime_b", Vec3::new(-5.0, -3.0, 0.0));
    spawn_slime(&mut level, "slime_c", Vec3::new(0.0, 7.0, 0.0));
    for (i, pos) in [
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(-3.0, 1.0, 0.0),
        Vec3::new(0.0, -4.0, 0.0),
        Vec3::new(5.0, 5.0, 0.0),
        Vec3::new(-6.0, 4.0, 0.0),
        Vec3::new(2.0, -6.0, 0.0),
    ]
    .into_iter()
    .enumerate()
    {
        spawn_coin(&mut level, i, pos);
    }
    spawn_hud(&mut level);

    level
}

fn spawn_player(level: &mut Level) {
    let key = level.spawn("player");
    let go = level.get_mut(key).unwrap();
    go.tag = "player".to_string();

    go.add_component(Component::Transform(Transform::default()))
        .unwrap();
    go.add_component(Component::RigidBody(RigidBody {
        linear_damping: 2.0,
        max_speed: 8.0,
        ..Default::default()
    }))
    .unwrap();
    go.add_component(Component::Collision(Collider::with_half_extents(
        Vec2::new(0.4, 0.4),
    )))
    .unwrap();
    go.add_component(Component::Renderer(SpriteRenderer::new(
        "hero",
        Vec2::new(1.0, 1.0),
    )))
    .unwrap();
    go.add_component(Component::Controller(Controller::default()))
        .unwrap();
    go.add_component(Component::PlayerCombat(PlayerCombat::default()))
        .unwrap();
    go.add_component(Component::Inventory(Inventory::with_capacity(8)))
        .unwrap();
    go.add_component(Component::Logic(LogicComponent::with_scripts([
        "player_move",
    ])))
    .unwrap();
}

fn spawn_slime(level: &mut Level, name: &str, position: Vec3) {
    let key = level.spawn(name);
    let go = level.get_mut(key).unwrap();
    go.tag = "enemy".to_string();

    go.add_component(Component::Transform(Transform::from_position(position)))
        .unwrap();
    go.add_component(Component::RigidBody(RigidBody::default()))
        .unwrap();
    go.add_component(Component::Collision(Collider::with_half_extents(
        Vec2::new(0.3, 0.3),
    )))
    .unwrap();
    go.add_component(Component::Animate(Animator {
        sheet: "slime".to_string(),
        clip: "wobble".to_string(),
        frame_count: 4,
        ..Default::default()
    }))
    .unwrap();
    go.add_component(Component::EnemyCombat(EnemyCombat::default()))
        .unwrap();
    go.add_component(Component::Logic(LogicComponent::with_scripts([
        "slime_chase",
    ])))
    .unwrap();
}

fn spawn_coin(level: &mut Level, index: usize, position: Vec3) {
    let key = level.spawn(&format!("coin_{index}"));
    let go = level.get_mut(key).unwrap();
    go.tag = "pickup".to_string();

    go.add_component(Component::Transform(Transform::from_position(position)))
        .unwrap();
    go.add_component(Component::Renderer(SpriteRenderer::new(
        "coin",
        Vec2::new(0.5, 0.5),
    )))
    .unwrap();
    go.add_component(Component::Logic(LogicComponent::with_scripts([
        "coin_spin",
    ])))
    .unwrap();
}

fn spawn_hud(level: &mut Level) {
    let key = level.spawn("hud_coins");
    let go = level.get_mut(key).unwrap();
    go.layer = Layer::Ui;

    go.add_component(Component::Transform(Transform::default()))
        .unwrap();
    go.add_component(Component::GameUi(GameUi::text_widget(
        UiAnchor::TopLeft,
        "coins: 0",
    )))
    .unwrap();
}

fn report(engine: &Engine) {
    let level = engine.level();

    let coins = query::find(level, ObjectQuery::ByName("player"), None)
        .and_then(|key| level.get(key))
        .and_then(|go| go.inventory())
        .map_or(0, |inv| inv.count_of("coin"));
    let coins_left = query::all_by_prefix(level, "coin_", None).len();
    let health = query::find(level, ObjectQuery::ByName("player"), None)
        .and_then(|key| level.get(key))
        .and_then(|go| go.player_combat())
        .map_or(0.0, |combat| combat.health);

    log::info!(
        "simulated {} frames ({:.1}s app time): {} coins collected, {} left, player at {:.0} hp",
        engine.profiler().frame_count(),
        engine.app_time_elapsed(),
        coins,
        coins_left,
        health
    );
    for sample in engine.profiler().report() {
        log::info!(
            "  {:<8} {:>7.3}ms ({:>4.1}%)",
            sample.name,
            sample.seconds * 1000.0,
            sample.share
        );
    }
}
