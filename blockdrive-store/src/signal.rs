use serde::{Deserialize, Serialize};

use crate::Obstacle;

/// A set of traffic lights that always show the same color.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct SignalGroup {
    /// Name referenced by control zones.
    pub name:   String,
    /// The half of the signal cycle in which the group is green.
    pub phase:  Phase,
    /// Shift of the group relative to the global cycle, in seconds.
    #[serde(default)]
    pub offset: f32,
    /// Poles carrying the lights of this group.
    #[serde(default)]
    pub poles:  Vec<Obstacle>,
}

/// Phase of a signal group.
///
/// The two phases are never green at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum Phase {
    /// Green at the start of the cycle.
    A,
    /// Green in the second half of the cycle.
    B,
}
