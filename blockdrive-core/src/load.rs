use std::borrow::Cow;

use bevy::app::{App, Plugin};
use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::ecs::query::With;
use bevy::ecs::resource::Resource;
use bevy::ecs::system::Command as BevyCommand;
use bevy::ecs::world::World;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use crate::level::{collision, environ, path, pedestrian, player, session, signal, vehicle};

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) { app.init_resource::<LoadedMap>(); }
}

/// Marks an entity as part of a loaded map,
/// so it should be removed when loading a new map.
#[derive(Component)]
pub struct StoredEntity;

/// Metadata of the currently loaded map.
#[derive(Resource, Default)]
pub struct LoadedMap(pub Option<store::Meta>);


pub enum Source {
    /// An encoded map file.
    Raw(Cow<'static, [u8]>),
    Parsed(Box<store::File>),
}

pub struct Command {
    pub source:   Source,
    /// Seed for choosing the exit among the candidates of the map.
    ///
    /// Uses a random seed if `None`.
    pub seed:     Option<u64>,
    pub on_error: Box<dyn FnOnce(&mut World, Error) + Send>,
}

impl BevyCommand for Command {
    fn apply(self, world: &mut World) {
        if let Err(err) = do_load(world, &self.source, self.seed) {
            (self.on_error)(world, err);
        }
    }
}

fn do_load(world: &mut World, source: &Source, seed: Option<u64>) -> Result<()> {
    let file_owned: store::File;
    let file = match source {
        Source::Raw(bytes) => {
            file_owned = store::decode(bytes.as_ref())?;
            &file_owned
        }
        Source::Parsed(file) => file,
    };
    let level = &file.level;

    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let exit = level.exits.choose(&mut rng).ok_or(Error::NoExit)?;

    world
        .query_filtered::<Entity, With<StoredEntity>>()
        .iter(world)
        .collect::<Vec<_>>()
        .into_iter()
        .for_each(|entity| world.entity_mut(entity).despawn());

    collision::loader::spawn(world, level)?;
    let signals = signal::loader::spawn(world, &level.signals)?;
    let paths = path::loader::spawn(world, &level.paths)?;
    vehicle::loader::spawn(world, &paths, &signals, &level.vehicles)?;
    pedestrian::loader::spawn(world, &paths, &level.pedestrians)?;
    player::loader::spawn(world, &level.player)?;
    collision::loader::spawn_exit(world, exit)?;
    bevy::log::info!("Exit placed at {:?} ({})", exit.label, exit.pose.position);

    world.insert_resource(environ::Lighting { night: level.environment.night });
    world.insert_resource(session::Session::default());
    world.insert_resource(signal::Cycle::default());
    world.insert_resource(LoadedMap(Some(file.meta.clone())));

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Decode map: {0}")]
    Codec(#[from] store::CodecError),
    #[error("No path called {0:?}")]
    UnresolvedPath(String),
    #[error("No signal group called {0:?}")]
    UnresolvedSignal(String),
    #[error("Path {0:?} has no anchors")]
    EmptyPath(String),
    #[error("Path {path:?} has no anchor #{index}")]
    AnchorOutOfRange { path: String, index: usize },
    #[error("Duplicate {kind} name {name:?}")]
    DuplicateName { kind: &'static str, name: String },
    #[error("The map has no exit candidates")]
    NoExit,
    #[error("Non-finite value encountered at {0}")]
    NonFiniteFloat(&'static str),
    #[error("Invalid {0}")]
    InvalidValue(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
