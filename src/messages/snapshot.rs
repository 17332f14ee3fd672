//! State snapshot - owned copy of the public state handed to readers

use serde::Serialize;

use crate::models::{Account, BalancePair, Listing, Role, Transaction};

/// Everything a reader sees, in the shape the web client exposes.
///
/// The four transaction sequences are role views over one backing store,
/// computed for `account` at the time the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub datalist: Vec<Listing>,
    pub transactionsell: Vec<Transaction>,
    pub transactionbuy: Vec<Transaction>,
    pub transactionverifier: Vec<Transaction>,
    pub transactionarbitrator: Vec<Transaction>,
    pub accounts: Vec<Account>,
    pub account: String,
    pub nickname: String,
    pub balance: BalancePair,
    /// Number of mutations committed before this snapshot
    pub version: u64,
}

impl StateSnapshot {
    /// The view for one role
    pub fn view(&self, role: Role) -> &[Transaction] {
        match role {
            Role::Seller => &self.transactionsell,
            Role::Buyer => &self.transactionbuy,
            Role::Verifier => &self.transactionverifier,
            Role::Arbitrator => &self.transactionarbitrator,
        }
    }
}

impl Default for StateSnapshot {
    fn default() -> Self {
        crate::app::AppState::new().snapshot()
    }
}
