//! Mutation handlers - how each mutation changes the state
//!
//! Nothing here validates payload content. Keyed collections stay unique
//! by their primary key: set-style mutations collapse duplicate keys to the
//! last occurrence, upserts replace in place or append.

use crate::app::AppState;
use crate::messages::Mutation;
use crate::models::{Account, Balance, BalanceSlot, Listing, Transaction};

impl AppState {
    /// Apply one mutation. Runs to completion; never fails.
    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            // Listings
            Mutation::SetDatalist(listings) => self.set_datalist(listings),
            Mutation::UpsertListing(listing) => self.upsert_listing(listing),
            Mutation::RemoveListing { pid } => self.remove_listing(&pid),

            // Transactions
            Mutation::SetTransactions(txs) => self.set_transactions(txs),
            Mutation::UpsertTransaction(tx) => self.upsert_transaction(tx),
            Mutation::RemoveTransaction { tid } => self.remove_transaction(&tid),

            // Accounts
            Mutation::SetAccounts(accounts) => self.set_accounts(accounts),
            Mutation::UpsertAccount(account) => self.upsert_account(account),
            Mutation::RemoveAccount { address } => self.remove_account(&address),

            // Current user
            Mutation::SetActiveAccount(address) => self.account = address,
            Mutation::SetNickname(nickname) => self.nickname = nickname,

            // Balances
            Mutation::SetBalance { slot, balance } => self.set_balance(slot, balance),

            Mutation::Reset => self.reset(),
        }
    }

    // ========================
    // Listings
    // ========================

    pub fn set_datalist(&mut self, listings: Vec<Listing>) {
        self.datalist = dedup_by_key(listings, |l| l.pid.clone());
    }

    pub fn upsert_listing(&mut self, listing: Listing) {
        upsert_by_key(&mut self.datalist, listing, |l| &l.pid);
    }

    pub fn remove_listing(&mut self, pid: &str) {
        self.datalist.retain(|l| l.pid != pid);
    }

    // ========================
    // Transactions
    // ========================

    pub fn set_transactions(&mut self, txs: Vec<Transaction>) {
        self.transactions = dedup_by_key(txs, |t| t.tid.clone());
    }

    pub fn upsert_transaction(&mut self, tx: Transaction) {
        upsert_by_key(&mut self.transactions, tx, |t| &t.tid);
    }

    pub fn remove_transaction(&mut self, tid: &str) {
        self.transactions.retain(|t| t.tid != tid);
    }

    // ========================
    // Accounts
    // ========================

    pub fn set_accounts(&mut self, accounts: Vec<Account>) {
        self.accounts = dedup_by_key(accounts, |a| a.address.clone());
    }

    pub fn upsert_account(&mut self, account: Account) {
        upsert_by_key(&mut self.accounts, account, |a| &a.address);
    }

    pub fn remove_account(&mut self, address: &str) {
        self.accounts.retain(|a| a.address != address);
    }

    // ========================
    // Balances
    // ========================

    pub fn set_balance(&mut self, slot: BalanceSlot, balance: Balance) {
        self.balance.set(slot, balance);
    }

    pub fn reset(&mut self) {
        *self = AppState::with_placeholder(self.nickname_placeholder.clone());
    }
}

/// Replace the item with the same key in place, or append it
fn upsert_by_key<T, F>(items: &mut Vec<T>, item: T, key: F)
where
    F: Fn(&T) -> &String,
{
    match items.iter().position(|existing| key(existing) == key(&item)) {
        Some(i) => items[i] = item,
        None => items.push(item),
    }
}

/// Collapse duplicate keys: the last occurrence wins, at the first position
fn dedup_by_key<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let k = key(&item);
        match out.iter().position(|existing| key(existing) == k) {
            Some(i) => out[i] = item,
            None => out.push(item),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NICKNAME_PLACEHOLDER;

    fn listing(pid: &str, title: &str) -> Listing {
        Listing::new(pid, title, "0xA")
    }

    #[test]
    fn test_set_datalist_collapses_duplicates() {
        let mut state = AppState::new();
        state.apply(Mutation::SetDatalist(vec![
            listing("p1", "first"),
            listing("p2", "second"),
            listing("p1", "replaced"),
        ]));

        assert_eq!(state.datalist.len(), 2);
        assert_eq!(state.datalist[0].title, "replaced");
        assert_eq!(state.datalist[1].pid, "p2");
    }

    #[test]
    fn test_upsert_listing_replaces_in_place() {
        let mut state = AppState::new();
        state.apply(Mutation::UpsertListing(listing("p1", "a")));
        state.apply(Mutation::UpsertListing(listing("p2", "b")));
        state.apply(Mutation::UpsertListing(listing("p1", "c")));

        let titles: Vec<&str> = state.datalist.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut state = AppState::new();
        state.apply(Mutation::UpsertListing(listing("p1", "a")));
        let before = state.clone();
        state.apply(Mutation::RemoveListing { pid: "nope".into() });
        assert_eq!(state, before);

        state.apply(Mutation::RemoveListing { pid: "p1".into() });
        assert!(state.datalist.is_empty());
    }

    #[test]
    fn test_set_accounts_idempotent() {
        let accounts = vec![Account::new("0xA", "alice"), Account::new("0xB", "bob")];

        let mut once = AppState::new();
        once.apply(Mutation::SetAccounts(accounts.clone()));

        let mut twice = AppState::new();
        twice.apply(Mutation::SetAccounts(accounts.clone()));
        twice.apply(Mutation::SetAccounts(accounts));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_transactions_keyed_by_tid() {
        let base = listing("p1", "a");
        let mut state = AppState::new();
        state.apply(Mutation::UpsertTransaction(Transaction::for_listing("t1", &base, "0xB")));

        let mut updated = Transaction::for_listing("t1", &base, "0xB");
        updated.state = "Closed".into();
        state.apply(Mutation::UpsertTransaction(updated));

        assert_eq!(state.transactions.len(), 1);
        assert_eq!(state.transaction("t1").map(|t| t.state.as_str()), Some("Closed"));

        state.apply(Mutation::RemoveTransaction { tid: "t1".into() });
        assert!(state.transaction("t1").is_none());
    }

    #[test]
    fn test_set_transactions_collapses_duplicate_tids() {
        let base = listing("p1", "a");
        let mut closed = Transaction::for_listing("t1", &base, "0xB");
        closed.state = "Closed".into();

        let mut state = AppState::new();
        state.apply(Mutation::SetTransactions(vec![
            Transaction::for_listing("t1", &base, "0xB"),
            Transaction::for_listing("t2", &base, "0xC"),
            closed,
        ]));

        let tids: Vec<&str> = state.transactions.iter().map(|t| t.tid.as_str()).collect();
        assert_eq!(tids, vec!["t1", "t2"]);
        assert_eq!(state.transactions[0].state, "Closed");
    }

    #[test]
    fn test_set_accounts_collapses_duplicate_addresses() {
        let mut state = AppState::new();
        state.apply(Mutation::SetAccounts(vec![
            Account::new("0xA", "alice"),
            Account::new("0xB", "bob"),
            Account::new("0xA", "alice2"),
        ]));

        assert_eq!(state.accounts.len(), 2);
        assert_eq!(state.accounts[0].nickname, "alice2");
    }

    #[test]
    fn test_upsert_and_remove_account() {
        let mut state = AppState::new();
        state.apply(Mutation::UpsertAccount(Account::new("0xA", "alice")));
        state.apply(Mutation::UpsertAccount(Account::new("0xB", "bob")));

        let mut verifier = Account::new("0xA", "alice");
        verifier.is_verifier = true;
        state.apply(Mutation::UpsertAccount(verifier));

        assert_eq!(state.accounts.len(), 2);
        assert_eq!(state.accounts[0].address, "0xA");
        assert!(state.accounts[0].is_verifier);

        state.apply(Mutation::RemoveAccount { address: "0xA".into() });
        assert!(state.account_entry("0xA").is_none());
        assert_eq!(state.accounts.len(), 1);
    }

    #[test]
    fn test_set_balance_replaces_one_slot() {
        let mut state = AppState::new();
        let loaded = Balance { balance: "1.5".into(), time: "12:00".into() };
        state.apply(Mutation::SetBalance { slot: BalanceSlot::Primary, balance: loaded.clone() });

        assert_eq!(state.balance[0], loaded);
        assert_eq!(state.balance[1], Balance::default());
    }

    #[test]
    fn test_reset_keeps_custom_placeholder() {
        let mut state = AppState::with_placeholder("loading...");
        state.apply(Mutation::SetNickname("alice".into()));
        state.apply(Mutation::SetActiveAccount("0xA".into()));
        state.apply(Mutation::Reset);

        assert_eq!(state.nickname, "loading...");
        assert_eq!(state.account, "");
        assert_eq!(AppState::new().nickname, NICKNAME_PLACEHOLDER);
    }
}
