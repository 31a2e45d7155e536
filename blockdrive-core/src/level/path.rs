//! Authored waypoint paths shared by vehicles and pedestrians.

use bevy::ecs::component::Component;
use bevy::math::Vec2;
use math::Heading;


pub mod loader;

/// An immutable list of anchors, stored on its own entity
/// and referenced by any number of agents.
#[derive(Component, Debug, Clone)]
pub struct Path {
    pub anchors:        Vec<Anchor>,
    pub topology:       Topology,
    /// Anchor to return to when an agent on this path is reset.
    pub restart_anchor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Position on the ground plane, where `y` is the world Z coordinate.
    pub position: Vec2,
    pub heading:  Option<Heading>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Loop,
    BackAndForth,
}

impl From<store::Topology> for Topology {
    fn from(value: store::Topology) -> Self {
        match value {
            store::Topology::Loop => Self::Loop,
            store::Topology::BackAndForth => Self::BackAndForth,
        }
    }
}

impl Path {
    #[must_use]
    pub fn len(&self) -> usize { self.anchors.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.anchors.is_empty() }

    #[must_use]
    pub fn anchor(&self, index: usize) -> Option<&Anchor> { self.anchors.get(index) }

    /// A cursor placed on `start` and targeting the anchor after it.
    #[must_use]
    pub fn cursor_at(&self, start: usize) -> Cursor {
        Cursor { current: start, target: start, forward: true }.advance(self.len(), self.topology)
    }

    /// The cursor of an agent moved back to [`restart_anchor`](Self::restart_anchor).
    ///
    /// The target is always the second anchor of the path.
    #[must_use]
    pub fn restart_cursor(&self) -> Cursor {
        Cursor {
            current: self.restart_anchor,
            target:  1.min(self.len().saturating_sub(1)),
            forward: true,
        }
    }

    /// The facing of an agent standing on `cursor.current`.
    ///
    /// Uses the authored heading of the anchor if any,
    /// otherwise faces the target anchor.
    #[must_use]
    pub fn facing(&self, cursor: Cursor) -> Heading {
        let Some(current) = self.anchor(cursor.current) else { return Heading::default() };
        if let Some(heading) = current.heading {
            return heading;
        }

        match self.anchor(cursor.target) {
            Some(target) if target.position != current.position => {
                Heading::from_planar(target.position - current.position)
            }
            _ => Heading::default(),
        }
    }
}

/// Progress of an agent along a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// The anchor most recently reached.
    pub current: usize,
    /// The anchor the agent is heading to.
    pub target:  usize,
    /// Traversal direction, only meaningful for [`Topology::BackAndForth`].
    pub forward: bool,
}

impl Cursor {
    /// Marks the target as reached and picks the next target.
    ///
    /// Paths with a single anchor keep targeting it.
    #[must_use]
    pub fn advance(self, len: usize, topology: Topology) -> Self {
        if len == 0 {
            return self;
        }

        let current = self.target;
        match topology {
            Topology::Loop => Self { current, target: (current + 1) % len, forward: true },
            Topology::BackAndForth => {
                let mut forward = self.forward;
                if forward && current + 1 >= len {
                    forward = false;
                } else if !forward && current == 0 {
                    forward = true;
                }

                let target = if forward {
                    (current + 1).min(len - 1)
                } else {
                    current.saturating_sub(1)
                };
                Self { current, target, forward }
            }
        }
    }
}
