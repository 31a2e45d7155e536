use std::future;

use bevy::app::App;
use bevy::ecs::entity::Entity;

use super::{Error, Failed, Model, Pending, Ready, Source};

fn app_with_source(source: Source) -> App {
    let mut app = App::new();
    app.add_plugins(super::Plug);
    app.insert_resource(source);
    app
}

fn spawn_agent(app: &mut App, path: &str) -> Entity {
    app.world_mut().spawn((Model(path.into()), Pending)).id()
}

#[test]
fn default_source_resolves_on_first_frame() {
    let mut app = app_with_source(Source::default());
    let agent = spawn_agent(&mut app, "models/car.glb");

    app.update();

    assert!(app.world().get::<Ready>(agent).is_some());
    assert!(app.world().get::<Pending>(agent).is_none());
}

#[test]
fn failed_load_never_becomes_ready() {
    let mut app = app_with_source(Source::new(|path| {
        future::ready(Err(Error::NotFound(path.to_string())))
    }));
    let agent = spawn_agent(&mut app, "models/missing.glb");

    for _ in 0..3 {
        app.update();
    }

    assert!(app.world().get::<Ready>(agent).is_none());
    assert!(app.world().get::<Failed>(agent).is_some());
}

#[test]
fn unresolved_load_stays_pending() {
    let mut app = app_with_source(Source::new(|_| future::pending()));
    let agent = spawn_agent(&mut app, "models/slow.glb");

    for _ in 0..3 {
        app.update();
    }

    assert!(app.world().get::<Pending>(agent).is_some());
    assert!(app.world().get::<Ready>(agent).is_none());
}

#[test]
fn loads_resolve_independently() {
    let mut app = app_with_source(Source::new(|path| {
        let result = if path.contains("missing") {
            Err(Error::NotFound(path.to_string()))
        } else {
            Ok(())
        };
        future::ready(result)
    }));
    let present = spawn_agent(&mut app, "models/car.glb");
    let absent = spawn_agent(&mut app, "models/missing.glb");

    app.update();

    assert!(app.world().get::<Ready>(present).is_some());
    assert!(app.world().get::<Ready>(absent).is_none());
}
