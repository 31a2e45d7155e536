use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use anyhow::Context;
use bevy::app::{self, App, PluginGroup, ScheduleRunnerPlugin};
use bevy::ecs::schedule::{self, IntoScheduleConfigs, ScheduleBuildSettings, SystemSet};
use bevy::ecs::system::Command as _;
use bevy::ecs::world::World;
use bevy::log::LogPlugin;
use bevy::window::{Window, WindowPlugin};
use bevy::winit::WinitSettings;
use bevy_mod_config::manager;
use blockdrive::level::model;
use blockdrive::{level, load};
use itertools::Itertools;
use strum::IntoEnumIterator;

pub mod input;
pub mod report;

#[cfg(test)]
mod tests;

type ConfigManager = manager::serde::json::Pretty;

#[derive(clap::Parser)]
#[clap(version, about)]
pub struct Options {
    /// Path to a map file. Plays the builtin city if omitted.
    #[clap(long)]
    pub map:        Option<PathBuf>,
    /// Seed for placing the exit.
    #[clap(long)]
    pub seed:       Option<u64>,
    /// Path to the assets directory, where agent models are looked up.
    #[clap(long, default_value = "assets")]
    pub assets_dir: PathBuf,
    /// Run without a window for a fixed number of frames.
    #[clap(long)]
    pub headless:   Option<u32>,
    /// Controls held for the whole run, such as `forward,left`.
    ///
    /// Only used in headless mode.
    #[clap(long, value_delimiter = ',')]
    pub hold:       Vec<input::Hold>,
}

pub fn main_app(options: Options) -> anyhow::Result<App> {
    let source = match &options.map {
        Some(path) => load::Source::Raw(Cow::Owned(
            fs::read(path).with_context(|| format!("read map {}", path.display()))?,
        )),
        None => load::Source::Parsed(Box::new(blockdrive_maps::city::file())),
    };

    let mut app = App::new();
    if let Some(frames) = options.headless {
        app.add_plugins((
            bevy::MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1. / 60.,
            ))),
            LogPlugin::default(),
            input::HeadlessPlug { hold: options.hold.clone() },
            report::ExitAfter(frames),
        ));
    } else {
        app.add_plugins(bevy::DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "blockdrive".into(),
                fit_canvas_to_parent: true,
                ..Default::default()
            }),
            ..Default::default()
        }));
        app.add_plugins(input::Plug);
        app.insert_resource(WinitSettings::game());
    }

    app.add_plugins((level::Plug::<ConfigManager>::default(), load::Plug, report::Plug));
    app.insert_resource(model_source(options.assets_dir));

    app.configure_sets(app::Update, level::AllSystemSets.in_set(UpdateSystemSets::Simulate));
    for (before, after) in UpdateSystemSets::iter().tuple_windows() {
        app.configure_sets(app::Update, before.before(after));
    }

    app.edit_schedule(app::Update, |schedule| {
        schedule.set_build_settings(ScheduleBuildSettings {
            ambiguity_detection: schedule::LogLevel::Warn,
            ..Default::default()
        });
    });

    load::Command {
        source,
        seed: options.seed,
        on_error: Box::new(|_world: &mut World, err| bevy::log::error!("Load error: {err}")),
    }
    .apply(app.world_mut());

    Ok(app)
}

/// Models are available once their file exists under the assets directory.
fn model_source(assets_dir: PathBuf) -> model::Source {
    model::Source::on_io_pool(move |path: &str| {
        let path = path.to_string();
        let full_path = assets_dir.join(&path);
        async move { check_model(&path, &full_path) }
    })
}

fn check_model(path: &str, full_path: &Path) -> Result<(), model::Error> {
    match fs::metadata(full_path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(model::Error::NotFound(path.to_string())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(model::Error::NotFound(path.to_string()))
        }
        Err(source) => Err(model::Error::Io { path: path.to_string(), source }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet, strum::EnumIter)]
pub enum UpdateSystemSets {
    Simulate,
    Report,
}
