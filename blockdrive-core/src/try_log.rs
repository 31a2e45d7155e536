//! Lookups that are expected to succeed.
//!
//! A failed lookup indicates a broken entity reference,
//! which is logged as an error and skipped instead of panicking the frame.

use std::any::type_name;
use std::fmt;

use bevy::ecs::entity::Entity;
use bevy::ecs::query::{QueryData, QueryFilter};
use bevy::ecs::system::Query;

/// Unwraps an `Option` or `Result`, logging and running `$never` on failure.
///
/// ```ignore
/// let pose = try_log!(pose_query.get(entity), expect "{entity:?} has no pose" or continue);
/// ```
#[macro_export]
macro_rules! try_log {
    (
        $expr:expr,
        expect $must:literal $(
            (
                $($must_args:expr),* $(,)?
            )
        )?
        or $never:expr
    ) => {
        {
            #[allow(clippy::question_mark)]
            if let Some(value) = $crate::TryLog::convert_or_log(
                $expr,
                format_args!($must, $($($must_args),*)?),
            ) {
                value
            } else {
                $never
            }
        }
    }
}

pub use try_log;

pub trait QueryExtSuper {
    type Read<'a>;
}

pub trait QueryExt: QueryExtSuper {
    /// Gets the query item of `entity`, logging an error if it does not match.
    fn log_get(&self, entity: Entity) -> Option<Self::Read<'_>>;
}

impl<'s, D, F> QueryExtSuper for Query<'_, 's, D, F>
where
    D: QueryData,
    F: QueryFilter,
{
    type Read<'a> = <D::ReadOnly as QueryData>::Item<'a, 's>;
}

impl<'s, D, F> QueryExt for Query<'_, 's, D, F>
where
    D: QueryData,
    F: QueryFilter,
{
    fn log_get(&self, entity: Entity) -> Option<<D::ReadOnly as QueryData>::Item<'_, 's>> {
        match self.get(entity) {
            Ok(value) => Some(value),
            Err(err) => {
                bevy::log::error!("Expected {entity:?} to match query {}: {err}", type_name::<D>());
                None
            }
        }
    }
}

/// An expression that can be used for `$expr` in [`try_log!`](crate::try_log!).
pub trait TryLog<T> {
    /// Returns the successful result as `Some`, or logs the error with `must`.
    fn convert_or_log(this: Self, must: impl fmt::Display) -> Option<T>;
}

impl<T> TryLog<T> for Option<T> {
    fn convert_or_log(this: Self, must: impl fmt::Display) -> Option<T> {
        if let Some(value) = this {
            Some(value)
        } else {
            bevy::log::error!("{must}");
            None
        }
    }
}

impl<T, E: fmt::Display> TryLog<T> for Result<T, E> {
    fn convert_or_log(this: Self, must: impl fmt::Display) -> Option<T> {
        match this {
            Ok(value) => Some(value),
            Err(err) => {
                bevy::log::error!("{must}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::component::Component;
    use bevy::ecs::system::{Query, SystemState};
    use bevy::ecs::world::World;

    use super::QueryExt;

    #[derive(Component)]
    struct Marker(u32);

    #[test]
    fn log_get_matches_query() {
        let mut world = World::new();
        let present = world.spawn(Marker(3)).id();
        let absent = world.spawn_empty().id();

        let mut state = SystemState::<Query<&Marker>>::new(&mut world);
        let query = state.get(&world);
        assert_eq!(query.log_get(present).map(|marker| marker.0), Some(3));
        assert!(query.log_get(absent).is_none());
    }

    #[test]
    fn try_log_runs_fallback() {
        let values = [Some(1), None, Some(2)];
        let mut kept = Vec::new();
        for value in values {
            kept.push(try_log!(value, expect "value is present" or continue));
        }
        assert_eq!(kept, [1, 2]);

        let parsed: Result<u32, _> = "x".parse::<u32>();
        let fallback = try_log!(parsed, expect "parse {}" ("x") or 0);
        assert_eq!(fallback, 0);
    }
}
