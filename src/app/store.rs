//! Store - the single source of truth readers observe and collaborators
//! mutate.
//!
//! A `Store` is constructed once and handed out by reference (or owned by a
//! [`StoreActor`](crate::app::StoreActor)); there is no global instance.
//! Mutations are applied synchronously and run to completion before any
//! listener is called, so a listener always sees the committed state.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::app::AppState;
use crate::messages::{Mutation, MutationError, StateSnapshot};

type Listener = Box<dyn FnMut(&Mutation, &AppState) + Send>;

struct ListenerEntry {
    id: u64,
    callback: Arc<Mutex<Listener>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<ListenerEntry>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking listener must not take the whole store down with it
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle returned by [`Store::subscribe`]
#[must_use = "keep the handle to be able to unsubscribe"]
pub struct Subscription {
    id: u64,
    registry: std::sync::Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the listener. Safe to call from inside a listener.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).entries.retain(|e| e.id != self.id);
            tracing::info!(id = self.id, "Listener unsubscribed");
        }
    }
}

/// Observable container for [`AppState`]
pub struct Store {
    state: AppState,
    version: u64,
    registry: Arc<Mutex<Registry>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::new())
    }
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Store {
            state,
            version: 0,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    /// Current committed state
    pub fn get_state(&self) -> &AppState {
        &self.state
    }

    /// Owned copy of the current state, role views included
    pub fn snapshot(&self) -> StateSnapshot {
        let mut snapshot = self.state.snapshot();
        snapshot.version = self.version;
        snapshot
    }

    /// Number of mutations committed so far
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Commit a mutation, then notify listeners in registration order
    pub fn apply(&mut self, mutation: Mutation) {
        self.state.apply(mutation.clone());
        self.version += 1;
        tracing::debug!(mutation = mutation.name(), version = self.version, "Mutation committed");
        self.notify(&mutation);
    }

    /// Decode and commit a mutation given by name.
    ///
    /// Nothing is committed and no listener runs when decoding fails.
    pub fn apply_named(&mut self, name: &str, payload: Value) -> Result<(), MutationError> {
        match Mutation::from_named(name, payload) {
            Ok(mutation) => {
                self.apply(mutation);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(mutation = name, error = %e, "Mutation rejected");
                Err(e)
            }
        }
    }

    /// Apply mutations in order
    pub fn replay<I>(&mut self, mutations: I)
    where
        I: IntoIterator<Item = Mutation>,
    {
        for mutation in mutations {
            self.apply(mutation);
        }
    }

    /// Register a listener called after every committed mutation
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Mutation, &AppState) + Send + 'static,
    {
        let mut registry = lock(&self.registry);
        registry.next_id += 1;
        let id = registry.next_id;
        registry.entries.push(ListenerEntry {
            id,
            callback: Arc::new(Mutex::new(Box::new(listener))),
        });
        tracing::info!(id, "Listener subscribed");

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.registry).entries.len()
    }

    fn notify(&self, mutation: &Mutation) {
        // Work from a copy so listeners can unsubscribe while we iterate
        let pending: Vec<(u64, Arc<Mutex<Listener>>)> = lock(&self.registry)
            .entries
            .iter()
            .map(|e| (e.id, Arc::clone(&e.callback)))
            .collect();

        for (id, callback) in pending {
            let still_registered = lock(&self.registry).entries.iter().any(|e| e.id == id);
            if still_registered {
                let mut callback = lock(&callback);
                (*callback)(mutation, &self.state);
            }
        }
    }
}
