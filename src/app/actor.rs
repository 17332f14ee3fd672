//! Store actor - message loop applying mutations from collaborators

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::app::store::Store;
use crate::messages::{Mutation, MutationError, StateSnapshot};

/// Commands sent to the store actor
#[derive(Debug)]
pub enum StoreCommand {
    /// Commit an already typed mutation
    Apply(Mutation),
    /// Decode and commit a mutation given by name, reporting the outcome
    ApplyNamed {
        name: String,
        payload: Value,
        reply: oneshot::Sender<Result<(), MutationError>>,
    },
    /// Read the current state
    Snapshot(oneshot::Sender<StateSnapshot>),
    /// Stop the actor
    Shutdown,
}

/// Cloneable sender collaborators use to reach the store actor
#[derive(Clone, Debug)]
pub struct StoreHandle {
    tx: mpsc::UnboundedSender<StoreCommand>,
}

impl StoreHandle {
    /// Queue a mutation. Returns false once the actor has stopped.
    pub fn apply(&self, mutation: Mutation) -> bool {
        self.tx.send(StoreCommand::Apply(mutation)).is_ok()
    }

    pub async fn apply_named(&self, name: &str, payload: Value) -> anyhow::Result<()> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::ApplyNamed { name: name.to_string(), payload, reply })
            .map_err(|_| anyhow::anyhow!("store actor stopped"))?;
        rx.await?.map_err(anyhow::Error::from)
    }

    pub async fn snapshot(&self) -> anyhow::Result<StateSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Snapshot(reply))
            .map_err(|_| anyhow::anyhow!("store actor stopped"))?;
        Ok(rx.await?)
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(StoreCommand::Shutdown);
    }
}

/// Owns a [`Store`] and applies commands one at a time
pub struct StoreActor {
    store: Store,
    render_tx: mpsc::UnboundedSender<StateSnapshot>,
}

impl StoreActor {
    pub fn new(store: Store, render_tx: mpsc::UnboundedSender<StateSnapshot>) -> Self {
        StoreActor { store, render_tx }
    }

    /// Create the command channel for this actor
    pub fn channel() -> (StoreHandle, mpsc::UnboundedReceiver<StoreCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (StoreHandle { tx }, rx)
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<StoreCommand>) -> Store {
        // Send initial snapshot
        let _ = self.render_tx.send(self.store.snapshot());

        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                StoreCommand::Apply(mutation) => {
                    self.store.apply(mutation);
                    let _ = self.render_tx.send(self.store.snapshot());
                }
                StoreCommand::ApplyNamed { name, payload, reply } => {
                    let result = self.store.apply_named(&name, payload);
                    if result.is_ok() {
                        let _ = self.render_tx.send(self.store.snapshot());
                    }
                    let _ = reply.send(result);
                }
                StoreCommand::Snapshot(reply) => {
                    let _ = reply.send(self.store.snapshot());
                }
                StoreCommand::Shutdown => break,
            }
        }

        tracing::info!(version = self.store.version(), "Store actor stopped");
        self.store
    }
}
