//! Mutations - the only sanctioned way to change market state

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::{Account, Balance, BalanceSlot, Listing, Transaction};

/// A named, payload-carrying request to change state.
///
/// On the wire a mutation is `{"mutation": <name>, "payload": <value>}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mutation", content = "payload", rename_all = "snake_case", deny_unknown_fields)]
pub enum Mutation {
    /// Replace every listing
    SetDatalist(Vec<Listing>),
    /// Insert a listing or replace the one with the same pID
    UpsertListing(Listing),
    RemoveListing { pid: String },

    /// Replace the transaction backing store
    SetTransactions(Vec<Transaction>),
    /// Insert a transaction or replace the one with the same tID
    UpsertTransaction(Transaction),
    RemoveTransaction { tid: String },

    /// Replace every known account
    SetAccounts(Vec<Account>),
    UpsertAccount(Account),
    RemoveAccount { address: String },

    /// Select the current user's address
    SetActiveAccount(String),
    SetNickname(String),

    /// Replace one balance slot wholesale
    SetBalance { slot: BalanceSlot, balance: Balance },

    /// Back to the start-up defaults
    Reset,
}

impl Mutation {
    /// Every mutation name accepted by [`Mutation::from_named`]
    pub const NAMES: [&'static str; 13] = [
        "set_datalist",
        "upsert_listing",
        "remove_listing",
        "set_transactions",
        "upsert_transaction",
        "remove_transaction",
        "set_accounts",
        "upsert_account",
        "remove_account",
        "set_active_account",
        "set_nickname",
        "set_balance",
        "reset",
    ];

    /// Mutations that carry no payload
    pub const UNIT_NAMES: [&'static str; 1] = ["reset"];

    /// Wire name of this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetDatalist(_) => "set_datalist",
            Mutation::UpsertListing(_) => "upsert_listing",
            Mutation::RemoveListing { .. } => "remove_listing",
            Mutation::SetTransactions(_) => "set_transactions",
            Mutation::UpsertTransaction(_) => "upsert_transaction",
            Mutation::RemoveTransaction { .. } => "remove_transaction",
            Mutation::SetAccounts(_) => "set_accounts",
            Mutation::UpsertAccount(_) => "upsert_account",
            Mutation::RemoveAccount { .. } => "remove_account",
            Mutation::SetActiveAccount(_) => "set_active_account",
            Mutation::SetNickname(_) => "set_nickname",
            Mutation::SetBalance { .. } => "set_balance",
            Mutation::Reset => "reset",
        }
    }

    /// Decode a mutation from its name and an untyped payload.
    ///
    /// `reset` takes no payload; `null`, `{}` and `[]` are all accepted
    /// as "nothing" for it.
    pub fn from_named(name: &str, payload: Value) -> Result<Mutation, MutationError> {
        if !Self::NAMES.contains(&name) {
            return Err(MutationError::UnknownMutation(name.to_string()));
        }

        let empty = match &payload {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        };
        let envelope = if payload.is_null() || (empty && Self::UNIT_NAMES.contains(&name)) {
            json!({ "mutation": name })
        } else {
            json!({ "mutation": name, "payload": payload })
        };

        serde_json::from_value(envelope).map_err(|e| MutationError::InvalidPayload {
            mutation: name.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Why a named mutation could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// No mutation with this name exists
    UnknownMutation(String),
    /// The payload does not have the shape the mutation expects
    InvalidPayload { mutation: String, reason: String },
}

impl Display for MutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationError::UnknownMutation(name) => write!(f, "Unknown mutation: {name}"),
            MutationError::InvalidPayload { mutation, reason } => {
                write!(f, "Invalid payload for {mutation}: {reason}")
            }
        }
    }
}

impl std::error::Error for MutationError {}
