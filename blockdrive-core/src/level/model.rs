//! Presence of agents whose visual model loads asynchronously.
//!
//! An agent with a [`Model`] starts [`Pending`].
//! The [`Source`] resource turns the model path into a future,
//! which is polled once per frame until it resolves.
//! On success the agent becomes [`Ready`] and joins the simulation;
//! on failure the error is logged and the agent stays absent forever.

use std::future::{self, Future};
use std::io;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};

use bevy::app::{self, App, Plugin};
use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::ecs::query::{With, Without};
use bevy::ecs::resource::Resource;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Commands, Query, Res};
use bevy::ecs::world::EntityWorldMut;
use bevy::tasks::{self, IoTaskPool};

#[cfg(test)]
mod tests;

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) {
        app.init_resource::<Source>();
        app.add_systems(app::PreUpdate, (request_system, poll_system).chain());
    }
}

/// Path of the visual model of an agent.
#[derive(Component, Debug, Clone)]
pub struct Model(pub String);

/// The agent is not present yet.
#[derive(Component, Default)]
pub struct Pending;

/// The agent is present and participates in movement and collision.
#[derive(Component, Default)]
pub struct Ready;

/// The model failed to load, so the agent never becomes [`Ready`].
#[derive(Component)]
pub struct Failed;

/// Makes an agent present immediately, or pending on its model if it has one.
pub fn insert_presence(entity: &mut EntityWorldMut, model: Option<&str>) {
    match model {
        Some(path) => entity.insert((Model(path.to_string()), Pending)),
        None => entity.insert(Ready),
    };
}

pub type LoadFuture = Pin<Box<dyn Future<Output = Result<(), Error>> + Send>>;

/// Resolves model paths into load futures.
#[derive(Resource)]
pub struct Source(Box<dyn Fn(&str) -> LoadFuture + Send + Sync>);

impl Source {
    pub fn new<F>(load: impl Fn(&str) -> F + Send + Sync + 'static) -> Self
    where
        F: Future<Output = Result<(), Error>> + Send + 'static,
    {
        Self(Box::new(move |path: &str| -> LoadFuture { Box::pin(load(path)) }))
    }

    /// Runs each load as a task on the [`IoTaskPool`].
    pub fn on_io_pool<F>(load: impl Fn(&str) -> F + Send + Sync + 'static) -> Self
    where
        F: Future<Output = Result<(), Error>> + Send + 'static,
    {
        Self::new(move |path| IoTaskPool::get().spawn(load(path)))
    }

    #[must_use]
    pub fn load(&self, path: &str) -> LoadFuture { (self.0)(path) }
}

impl Default for Source {
    /// Every model is available immediately.
    fn default() -> Self { Self::new(|_| future::ready(Ok(()))) }
}

#[derive(Component)]
struct Loading(Mutex<LoadFuture>);

fn request_system(
    mut commands: Commands,
    source: Res<Source>,
    query: Query<(Entity, &Model), (With<Pending>, Without<Loading>, Without<Failed>)>,
) {
    for (entity, model) in &query {
        commands.entity(entity).insert(Loading(Mutex::new(source.load(&model.0))));
    }
}

fn poll_system(mut commands: Commands, mut query: Query<(Entity, &mut Loading, &Model)>) {
    for (entity, mut loading, model) in &mut query {
        let future = loading.0.get_mut().unwrap_or_else(PoisonError::into_inner);
        let Some(result) = tasks::block_on(tasks::poll_once(future)) else { continue };

        let mut entity_commands = commands.entity(entity);
        entity_commands.remove::<Loading>();
        match result {
            Ok(()) => {
                entity_commands.remove::<Pending>().insert(Ready);
            }
            Err(err) => {
                bevy::log::error!("Agent {entity:?} will stay absent: {err}");
                entity_commands.insert(Failed);
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Model {0:?} does not exist")]
    NotFound(String),
    #[error("Read model {path:?}: {source}")]
    Io {
        path:   String,
        #[source]
        source: io::Error,
    },
}
