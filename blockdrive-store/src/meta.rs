use serde::{Deserialize, Serialize};

/// Descriptive information of a map.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Meta {
    /// An identifier for this map, to remain consistent over versions.
    pub id:          String,
    /// Title of the map.
    pub title:       String,
    /// Free-form description shown on the start screen.
    pub description: String,
    /// Authors of the map.
    pub authors:     Vec<String>,
}
