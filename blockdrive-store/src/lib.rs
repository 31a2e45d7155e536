//! Schema for map files.
//!
//! Planar coordinates are stored as [`Vec2`](bevy_math::Vec2) values
//! where `y` holds the world Z coordinate.

#![warn(clippy::pedantic)]
#![cfg_attr(feature = "precommit-checks", deny(warnings, clippy::pedantic, clippy::dbg_macro))]
#![allow(clippy::collapsible_else_if)] // this is usually intentional
#![cfg_attr(not(feature = "precommit-checks"), allow(dead_code, unused_variables, unused_imports))]
#![forbid(missing_docs)]

use serde::{Deserialize, Serialize};

mod meta;
pub use meta::*;

mod level;
pub use level::*;

mod geometry;
pub use geometry::*;

mod agent;
pub use agent::*;

mod signal;
pub use signal::*;

mod codec;
pub use codec::{CodecError, decode, encode};

#[cfg(test)]
mod tests;

/// Root structure for a .bdmap file.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct File {
    /// Metadata about the file.
    pub meta:  Meta,
    /// Contents of the city block.
    pub level: Level,
}
