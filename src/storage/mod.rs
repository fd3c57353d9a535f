//! Storage abstraction for distshare.
//!
//! These traits define the contract the reactor needs from the backing
//! document store. The in-memory backend serves embedded use and tests; a
//! managed document database can implement the same traits.

mod memory;
mod traits;

pub use memory::{InMemoryLocationStore, InMemorySessionStore, InMemoryStores};
pub use traits::{LocationStore, SessionStore, StorageError};
