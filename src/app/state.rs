//! Market state - pure data structure with no I/O logic

use crate::app::views::view_owned;
use crate::constants::NICKNAME_PLACEHOLDER;
use crate::messages::StateSnapshot;
use crate::models::{Account, BalancePair, Listing, Role, Transaction};

/// Main market state - pure data, no I/O
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    // Listings, primary key pID
    pub datalist: Vec<Listing>,

    // Single backing store for every transaction view, primary key tID
    pub transactions: Vec<Transaction>,

    // Known wallets, primary key address
    pub accounts: Vec<Account>,

    // Current user
    pub account: String,
    pub nickname: String,

    // [primary currency, platform token]
    pub balance: BalancePair,

    // Placeholder restored by a reset
    pub(crate) nickname_placeholder: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_placeholder(NICKNAME_PLACEHOLDER)
    }

    /// Start-up state using a custom nickname placeholder
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        AppState {
            datalist: Vec::new(),
            transactions: Vec::new(),
            accounts: Vec::new(),
            account: String::new(),
            nickname: placeholder.clone(),
            balance: BalancePair::default(),
            nickname_placeholder: placeholder,
        }
    }

    pub fn listing(&self, pid: &str) -> Option<&Listing> {
        self.datalist.iter().find(|l| l.pid == pid)
    }

    pub fn transaction(&self, tid: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.tid == tid)
    }

    pub fn account_entry(&self, address: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.address == address)
    }

    /// The [`Account`] record of the selected address, if known
    pub fn active_account_entry(&self) -> Option<&Account> {
        self.account_entry(&self.account)
    }

    /// Transactions the active account takes part in as `role`
    pub fn view(&self, role: Role) -> Vec<Transaction> {
        view_owned(&self.transactions, role, &self.account)
    }

    /// Convert state to an owned snapshot for readers
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            datalist: self.datalist.clone(),
            transactionsell: self.view(Role::Seller),
            transactionbuy: self.view(Role::Buyer),
            transactionverifier: self.view(Role::Verifier),
            transactionarbitrator: self.view(Role::Arbitrator),
            accounts: self.accounts.clone(),
            account: self.account.clone(),
            nickname: self.nickname.clone(),
            balance: self.balance.clone(),
            version: 0,
        }
    }
}
