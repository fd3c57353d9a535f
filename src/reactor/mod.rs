//! The Distance Reactor subsystem.
//!
//! The reactor is the read-reduce-write reaction at the heart of the crate:
//! a change notification for any location record under a session causes a
//! re-derivation of that session's distance. The pure reduction lives in
//! [`compute`]; [`invoke`] adds the store glue for one stateless invocation;
//! [`worker`] is the embedded-first delivery mechanism that stands in for a
//! managed platform's trigger binding.

/// Pure reduction from a location snapshot to a distance.
pub mod compute;
/// Change-notification and update event types.
pub mod events;
/// The single stateless reactor invocation.
pub mod invoke;
/// Subscriber stream handle.
pub mod stream;
/// Event dispatch worker.
pub mod worker;

pub use compute::{derive_distance, resolve_pair};
pub use events::{DistanceUpdate, LocationWrite, SubscriptionId, WriteKind};
pub use invoke::{DistanceReactor, Reaction};
pub use stream::UpdateStream;
pub use worker::{ReactorConfig, ReactorRuntime};
