//! # Scry Market State
//!
//! Typed, observable client state for a data marketplace.
//!
//! ## Contents
//! - Listings keyed by publish id
//! - One transaction store with sell / buy / verifier / arbitrator views
//!   computed for the active account
//! - Known accounts, the active account and its nickname
//! - A fixed pair of balances (primary currency, platform token)
//!
//! ## Architecture
//! - [`app::Store`] holds the state; mutations are the only way in and
//!   listeners run after each commit
//! - [`app::StoreActor`] owns a store on a Tokio task for async collaborators
//! - [`seed`] replays mutation files, the viewer binary renders snapshots

pub mod models;
pub mod messages;
pub mod app;
pub mod seed;
pub mod config;
pub mod constants;
pub mod ui;

// Re-export commonly used types
pub use models::{Account, Balance, BalancePair, BalanceSlot, Listing, Role, Transaction};
pub use messages::{Mutation, MutationError, StateSnapshot};
pub use app::{AppState, Store, StoreActor, StoreHandle, Subscription};
pub use config::Config;
