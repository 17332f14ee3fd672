//! App layer - market state, mutation handling and the observable store
//!
//! Collaborators send mutations (directly to a [`Store`] or through the
//! [`StoreActor`]), the store commits them and notifies listeners, and
//! readers get snapshots with the role views already computed.

pub mod state;
pub mod commands;
pub mod views;
pub mod store;
pub mod actor;

pub use state::AppState;
pub use store::{Store, Subscription};
pub use actor::{StoreActor, StoreCommand, StoreHandle};
