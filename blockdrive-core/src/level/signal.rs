//! Traffic signal cycle.
//!
//! All signal groups share one global cycle of period `2 * (green + yellow)`.
//! Phase A is green at the start of the cycle, then yellow, then red
//! while phase B runs through the same sequence.
//! A group may shift its view of the cycle with an [offset](Group::offset).

use std::marker::PhantomData;
use std::time::Duration;

use bevy::app::{self, App, Plugin};
use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::ecs::resource::Resource;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Query, Res, ResMut};
use bevy::time::{self, Time};
use bevy_mod_config::{AppExt, Config, ConfigFieldFor, Manager, ReadConfig};

use super::SystemSets;

pub mod loader;


pub struct Plug<M>(PhantomData<M>);

impl<M> Default for Plug<M> {
    fn default() -> Self { Self(PhantomData) }
}

impl<M: Manager + Default> Plugin for Plug<M>
where
    Conf: ConfigFieldFor<M>,
{
    fn build(&self, app: &mut App) {
        app.init_config::<M, Conf>("core:signal");
        app.init_resource::<Cycle>();
        app.add_systems(app::Update, tick_system.in_set(SystemSets::Signal));
    }
}

#[derive(Config)]
pub struct Conf {
    /// Duration of the green light of each phase.
    #[config(default = Duration::from_secs(5))]
    pub green_duration:  Duration,
    /// Duration of the yellow light of each phase.
    #[config(default = Duration::from_secs(2))]
    pub yellow_duration: Duration,
}

/// Elapsed time of the global signal cycle.
#[derive(Resource, Default)]
pub struct Cycle {
    elapsed: Duration,
}

impl Cycle {
    #[must_use]
    pub fn elapsed(&self) -> Duration { self.elapsed }

    pub fn tick(&mut self, dt: Duration) { self.elapsed += dt; }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum Phase {
    A,
    B,
}

impl From<store::Phase> for Phase {
    fn from(value: store::Phase) -> Self {
        match value {
            store::Phase::A => Self::A,
            store::Phase::B => Self::B,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Yellow,
    Green,
}

/// A set of lights that always show the same color.
#[derive(Component, Debug)]
pub struct Group {
    pub phase:  Phase,
    /// Shift of this group relative to the global cycle.
    pub offset: Duration,
    /// The color currently shown, written only by the cycle.
    pub color:  Color,
}

/// A pole carrying the lights of a [`Group`].
#[derive(Component)]
pub struct Pole {
    pub group: Entity,
}

/// Returns the colors of phase A and phase B at `cycle_secs` since the cycle started.
#[must_use]
pub fn colors_at(cycle_secs: f32, green: f32, yellow: f32) -> (Color, Color) {
    let half = green + yellow;
    if half <= 0. {
        return (Color::Red, Color::Red);
    }

    let t = cycle_secs.rem_euclid(half * 2.);
    if t < green {
        (Color::Green, Color::Red)
    } else if t < half {
        (Color::Yellow, Color::Red)
    } else if t < half + green {
        (Color::Red, Color::Green)
    } else {
        (Color::Red, Color::Yellow)
    }
}

/// Returns the color of a group of `phase` at `cycle_secs` since the cycle started.
#[must_use]
pub fn color_of(phase: Phase, cycle_secs: f32, green: f32, yellow: f32) -> Color {
    let (a, b) = colors_at(cycle_secs, green, yellow);
    match phase {
        Phase::A => a,
        Phase::B => b,
    }
}

fn tick_system(
    time: Res<Time<time::Virtual>>,
    conf: ReadConfig<Conf>,
    mut cycle: ResMut<Cycle>,
    mut group_query: Query<&mut Group>,
) {
    let conf = conf.read();
    cycle.tick(time.delta());

    let green = conf.green_duration.as_secs_f32();
    let yellow = conf.yellow_duration.as_secs_f32();
    for mut group in &mut group_query {
        let cycle_secs = (cycle.elapsed + group.offset).as_secs_f32();
        let color = color_of(group.phase, cycle_secs, green, yellow);
        if group.color != color {
            group.color = color;
        }
    }
}
