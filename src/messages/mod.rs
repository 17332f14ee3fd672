//! Message types flowing between collaborators and the store.
//!
//! Mutations go in, snapshots come out, and UI events are what the viewer
//! turns key presses into.

pub mod mutation;
pub mod snapshot;
pub mod ui_events;

pub use mutation::{Mutation, MutationError};
pub use snapshot::StateSnapshot;
pub use ui_events::UiEvent;
