//! Gameplay simulation of a city block.
//!
//! All systems run in [`app::Update`], ordered by [`SystemSets`].

use std::marker::PhantomData;

use bevy::app::{self, App, Plugin};
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::prelude::SystemSet;
use bevy_mod_config::{ConfigFieldFor, Manager};
use itertools::Itertools;
use strum::IntoEnumIterator;

pub mod agent;
pub mod collision;
pub mod environ;
pub mod follower;
pub mod gate;
pub mod model;
pub mod path;
pub mod pedestrian;
pub mod player;
pub mod session;
pub mod signal;
pub mod vehicle;

pub struct Plug<M>(PhantomData<M>);

impl<M> Default for Plug<M> {
    fn default() -> Self { Self(PhantomData) }
}

impl<M: Manager + Default> Plugin for Plug<M>
where
    collision::Conf: ConfigFieldFor<M>,
    follower::Conf: ConfigFieldFor<M>,
    pedestrian::Conf: ConfigFieldFor<M>,
    session::Conf: ConfigFieldFor<M>,
    signal::Conf: ConfigFieldFor<M>,
{
    fn build(&self, app: &mut App) {
        for set in SystemSets::iter() {
            app.configure_sets(app::Update, set.in_set(AllSystemSets));
        }

        for (before, after) in SystemSets::iter().tuple_windows() {
            app.configure_sets(app::Update, before.before(after));
        }

        app.add_plugins(model::Plug);
        app.add_plugins(environ::Plug);
        app.add_plugins(session::Plug::<M>::default());
        app.add_plugins(player::Plug);
        app.add_plugins(signal::Plug::<M>::default());
        app.add_plugins(follower::Plug::<M>::default());
        app.add_plugins(pedestrian::Plug::<M>::default());
        app.add_plugins(collision::Plug::<M>::default());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet, strum::EnumIter)]
pub enum SystemSets {
    /// Translation of device input into [`player::Controls`] and session messages.
    Input,
    /// Session transitions and lighting changes.
    Session,
    /// Player movement, validated against the world before commit.
    Player,
    /// Advancing the global traffic signal cycle.
    Signal,
    /// Autonomous vehicles and pedestrians moving along their paths.
    Follow,
    /// Breaking up overlapping autonomous vehicles.
    Resolve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub struct AllSystemSets;
