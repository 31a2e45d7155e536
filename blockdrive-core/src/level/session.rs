//! Session flags and transitions.
//!
//! A session starts on [`StartRequested`].
//! Collisions with dynamic agents are only checked
//! after a grace period following each start,
//! so that agents still being placed cannot hit the player.

use std::marker::PhantomData;
use std::time::Duration;

use bevy::app::{self, App, Plugin};
use bevy::ecs::message::{Message, MessageReader};
use bevy::ecs::query::With;
use bevy::ecs::resource::Resource;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Query, Res, ResMut};
use bevy::time::{self, Time};
use bevy_mod_config::{AppExt, Config, ConfigFieldFor, Manager, ReadConfig};

use super::SystemSets;
use super::agent::Pose;
use super::player::{self, Kinematics, StartPose};


pub struct Plug<M>(PhantomData<M>);

impl<M> Default for Plug<M> {
    fn default() -> Self { Self(PhantomData) }
}

impl<M: Manager + Default> Plugin for Plug<M>
where
    Conf: ConfigFieldFor<M>,
{
    fn build(&self, app: &mut App) {
        app.init_config::<M, Conf>("core:session");
        app.init_resource::<Session>();
        app.add_message::<StartRequested>();
        app.add_message::<Won>();
        app.add_message::<Collided>();
        app.add_systems(
            app::Update,
            (max_delta_system, grace_system, start_system).chain().in_set(SystemSets::Session),
        );
    }
}

#[derive(Config)]
pub struct Conf {
    /// Delay after each session start before dynamic agents can collide with the player.
    #[config(default = Duration::from_secs(3))]
    pub collision_grace: Duration,
    /// Longest frame step applied to the simulation.
    ///
    /// Longer gaps between frames, such as when the window was hidden, are clamped to this.
    #[config(default = Duration::from_millis(100))]
    pub max_frame_delta: Duration,
}

#[derive(Resource, Debug, Default)]
pub struct Session {
    pub started:                  bool,
    pub won:                      bool,
    pub collided:                 bool,
    /// Whether pedestrians and autonomous vehicles take part in player collision checks.
    pub collision_checks_enabled: bool,
    grace_remaining:              Duration,
}

impl Session {
    /// Whether the player is allowed to drive.
    #[must_use]
    pub fn is_driving(&self) -> bool { self.started && !self.won && !self.collided }

    /// Resets the flags of a newly started session.
    pub fn restart(&mut self, grace: Duration) {
        *self = Self {
            started:                  true,
            won:                      false,
            collided:                 false,
            collision_checks_enabled: grace.is_zero(),
            grace_remaining:          grace,
        };
    }

    /// Counts down the grace period.
    pub fn tick_grace(&mut self, dt: Duration) {
        if !self.started || self.collision_checks_enabled {
            return;
        }

        self.grace_remaining = self.grace_remaining.saturating_sub(dt);
        if self.grace_remaining.is_zero() {
            self.collision_checks_enabled = true;
            bevy::log::info!("Collision checks against agents enabled");
        }
    }
}

/// Requests starting or restarting the session.
#[derive(Message)]
pub struct StartRequested;

/// The player reached the exit.
#[derive(Message)]
pub struct Won;

/// The player collided and was moved back to the start.
#[derive(Message)]
pub struct Collided;

fn max_delta_system(conf: ReadConfig<Conf>, mut time: ResMut<Time<time::Virtual>>) {
    let max_delta = conf.read().max_frame_delta;
    if !max_delta.is_zero() && time.max_delta() != max_delta {
        time.set_max_delta(max_delta);
    }
}

fn grace_system(time: Res<Time<time::Virtual>>, mut session: ResMut<Session>) {
    session.tick_grace(time.delta());
}

fn start_system(
    mut reader: MessageReader<StartRequested>,
    conf: ReadConfig<Conf>,
    mut session: ResMut<Session>,
    mut player_query: Query<(&mut Pose, &mut Kinematics, &StartPose), With<player::Player>>,
) {
    if reader.read().count() == 0 {
        return;
    }

    session.restart(conf.read().collision_grace);
    for (mut pose, mut kinematics, start) in &mut player_query {
        *pose = start.0;
        kinematics.speed = 0.;
    }
    bevy::log::info!("Session started");
}
