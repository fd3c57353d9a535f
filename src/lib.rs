//! # distshare - Reactive pair-distance tracking
//!
//! distshare keeps the great-circle distance between the two participants of a
//! location-sharing session up to date. Whenever a location record under a
//! session is created, updated, or deleted, the Distance Reactor re-reads the
//! full set of sibling locations, resolves one authoritative position per role
//! (`A` and `B`), computes their haversine separation, and merge-writes the
//! result back onto the session record.
//!
//! ## Core Concepts
//!
//! - **Session**: a pairing of two participants whose separation is tracked;
//!   holds the derived `distance_meters` and `updated_at` fields
//! - **LocationRecord**: a client-written child document carrying a role and a
//!   (possibly malformed) latitude/longitude pair
//! - **Distance Reactor**: the stateless read-reduce-write reaction that turns
//!   a change notification into a fresh derived distance
//!
//! ## Usage
//!
//! ```rust,ignore
//! use distshare::{LocationId, LocationRecord, Role, SessionId, SessionTracker};
//!
//! let tracker = SessionTracker::in_memory();
//! let session = SessionId::new();
//!
//! tracker.record_location(session, LocationId::new(), LocationRecord::new(Role::A, 0.0, 0.0))?;
//! tracker.record_location(session, LocationId::new(), LocationRecord::new(Role::B, 0.0, 1.0))?;
//!
//! // The reactor runs on its worker thread; subscribers observe the result.
//! let stream = tracker.subscribe()?;
//! let update = stream.recv_timeout(std::time::Duration::from_secs(1))?;
//! assert!((update.distance_meters - 111_194.9).abs() < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod error;
pub mod geo;
pub mod location;
pub mod session;

// Storage abstraction and reactive glue
pub mod reactor;
pub mod storage;
pub mod tracker;

// Re-export primary types at crate root for convenience
pub use error::{DistShareError, DistShareResult, ValidationError};
pub use geo::{haversine_meters, Coordinates, EARTH_RADIUS_METERS};
pub use location::{LocationId, LocationRecord, Role};
pub use reactor::{
    DistanceReactor, DistanceUpdate, LocationWrite, Reaction, ReactorConfig, ReactorRuntime,
    SubscriptionId, UpdateStream, WriteKind,
};
pub use session::{Session, SessionId};
pub use storage::{
    InMemoryLocationStore, InMemorySessionStore, InMemoryStores, LocationStore, SessionStore,
    StorageError,
};
pub use tracker::SessionTracker;
