//! Records held by the market state.
//!
//! Field names on the wire follow the marketplace backend exactly
//! (`Title`, `pID`, `fromBlock`, ...). Every record rejects unknown fields
//! so a drifting payload fails to decode instead of silently widening the
//! state; missing fields fall back to their empty defaults.

use std::ops::{Index, IndexMut};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{BALANCE_PLACEHOLDER, BALANCE_TIME_FORMAT};

/// Publish id, primary key of a [`Listing`]
pub type PublishId = String;

/// Transaction id, primary key of a [`Transaction`]
pub type TransactionId = String;

/// An item offered for sale
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct Listing {
    pub title: String,
    /// Price in platform token units
    pub price: u64,
    pub keys: String,
    pub description: String,
    pub seller: String,
    pub support_verify: bool,
    #[serde(rename = "pID")]
    pub pid: PublishId,
    pub meta_data_extension: String,
    pub proof_data_extensions: Vec<String>,
}

impl Listing {
    pub fn new(pid: impl Into<String>, title: impl Into<String>, seller: impl Into<String>) -> Self {
        Listing {
            pid: pid.into(),
            title: title.into(),
            seller: seller.into(),
            ..Default::default()
        }
    }
}

/// A trade between a buyer and a seller, optionally mediated by verifiers
/// and an arbitrator.
///
/// The first nine fields repeat the [`Listing`] shape; the rest describe the
/// trade itself. `Verifiers` and `Arbitrator` name the mediators and are what
/// the verifier and arbitrator views filter on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct Transaction {
    // Listing shape
    pub title: String,
    pub price: u64,
    pub keys: String,
    pub description: String,
    pub seller: String,
    pub support_verify: bool,
    #[serde(rename = "pID")]
    pub pid: PublishId,
    pub meta_data_extension: String,
    pub proof_data_extensions: Vec<String>,

    // Trade
    pub buyer: String,
    pub state: String,
    pub start_verify: bool,
    #[serde(rename = "MetaDataIDEncWithSeller")]
    pub meta_data_id_enc_with_seller: String,
    #[serde(rename = "MetaDataIDEncWithBuyer")]
    pub meta_data_id_enc_with_buyer: String,
    #[serde(rename = "MetaDataIDEncWithArbitrator")]
    pub meta_data_id_enc_with_arbitrator: String,
    pub verifier1_response: String,
    pub verifier2_response: String,
    pub arbitrate_result: String,
    #[serde(rename = "tID")]
    pub tid: TransactionId,

    // Mediators
    pub verifiers: Vec<String>,
    pub arbitrator: String,
}

impl Transaction {
    /// Start a trade for `listing` with `buyer`
    pub fn for_listing(tid: impl Into<String>, listing: &Listing, buyer: impl Into<String>) -> Self {
        Transaction {
            title: listing.title.clone(),
            price: listing.price,
            keys: listing.keys.clone(),
            description: listing.description.clone(),
            seller: listing.seller.clone(),
            support_verify: listing.support_verify,
            pid: listing.pid.clone(),
            meta_data_extension: listing.meta_data_extension.clone(),
            proof_data_extensions: listing.proof_data_extensions.clone(),
            buyer: buyer.into(),
            tid: tid.into(),
            ..Default::default()
        }
    }

    /// The listing this trade was opened on
    pub fn listing(&self) -> Listing {
        Listing {
            title: self.title.clone(),
            price: self.price,
            keys: self.keys.clone(),
            description: self.description.clone(),
            seller: self.seller.clone(),
            support_verify: self.support_verify,
            pid: self.pid.clone(),
            meta_data_extension: self.meta_data_extension.clone(),
            proof_data_extensions: self.proof_data_extensions.clone(),
        }
    }

    /// Whether `who` takes part in this trade in the given role
    pub fn has_participant(&self, role: Role, who: &str) -> bool {
        if who.is_empty() {
            return false;
        }
        match role {
            Role::Seller => self.seller == who,
            Role::Buyer => self.buyer == who,
            Role::Verifier => self.verifiers.iter().any(|v| v == who),
            Role::Arbitrator => self.arbitrator == who,
        }
    }
}

/// The part a viewer plays in a trade
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Seller,
    Buyer,
    Verifier,
    Arbitrator,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Seller, Role::Buyer, Role::Verifier, Role::Arbitrator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => "seller",
            Role::Buyer => "buyer",
            Role::Verifier => "verifier",
            Role::Arbitrator => "arbitrator",
        }
    }
}

/// A known wallet / participant
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Account {
    pub address: String,
    pub nickname: String,
    /// Block height the account's history is scanned from
    pub from_block: u64,
    pub is_verifier: bool,
}

impl Account {
    pub fn new(address: impl Into<String>, nickname: impl Into<String>) -> Self {
        Account {
            address: address.into(),
            nickname: nickname.into(),
            from_block: 0,
            is_verifier: false,
        }
    }
}

/// One balance snapshot. Both fields read "-" until loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Balance {
    pub balance: String,
    pub time: String,
}

impl Default for Balance {
    fn default() -> Self {
        Balance {
            balance: String::from(BALANCE_PLACEHOLDER),
            time: String::from(BALANCE_PLACEHOLDER),
        }
    }
}

impl Balance {
    /// A balance read at `at`
    pub fn loaded(amount: impl Into<String>, at: DateTime<Utc>) -> Self {
        Balance {
            balance: amount.into(),
            time: at.format(BALANCE_TIME_FORMAT).to_string(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.balance != BALANCE_PLACEHOLDER
    }
}

/// Position inside a [`BalancePair`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSlot {
    /// Primary chain currency (ETH)
    Primary,
    /// Platform token
    Token,
}

impl BalanceSlot {
    pub fn index(&self) -> usize {
        match self {
            BalanceSlot::Primary => 0,
            BalanceSlot::Token => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BalanceSlot::Primary => "ETH",
            BalanceSlot::Token => "Token",
        }
    }
}

/// Fixed pair of balances: index 0 is the primary currency, index 1 the
/// platform token. Serialized as a two-element array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalancePair([Balance; 2]);

impl BalancePair {
    pub fn get(&self, slot: BalanceSlot) -> &Balance {
        &self.0[slot.index()]
    }

    /// Replace one slot wholesale
    pub fn set(&mut self, slot: BalanceSlot, balance: Balance) {
        self.0[slot.index()] = balance;
    }
}

impl Index<usize> for BalancePair {
    type Output = Balance;

    fn index(&self, index: usize) -> &Balance {
        &self.0[index]
    }
}

impl Index<BalanceSlot> for BalancePair {
    type Output = Balance;

    fn index(&self, slot: BalanceSlot) -> &Balance {
        self.get(slot)
    }
}

impl IndexMut<BalanceSlot> for BalancePair {
    fn index_mut(&mut self, slot: BalanceSlot) -> &mut Balance {
        &mut self.0[slot.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_listing_wire_names() {
        let json = r#"{"Title":"Weather","Price":12,"Seller":"0xA","SupportVerify":true,"pID":"p1","ProofDataExtensions":["x"]}"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.pid, "p1");
        assert_eq!(listing.price, 12);
        assert!(listing.support_verify);
        assert_eq!(listing.keys, "");

        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["pID"], "p1");
        assert_eq!(value["MetaDataExtension"], "");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{"pID":"p1","Colour":"red"}"#;
        assert!(serde_json::from_str::<Listing>(json).is_err());
    }

    #[test]
    fn test_transaction_wire_names() {
        let json = r#"{"tID":"t1","pID":"p1","Buyer":"0xB","MetaDataIDEncWithBuyer":"enc","Verifier1Response":"ok","Verifiers":["0xV"]}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.tid, "t1");
        assert_eq!(tx.meta_data_id_enc_with_buyer, "enc");
        assert_eq!(tx.verifier1_response, "ok");
        assert!(tx.has_participant(Role::Verifier, "0xV"));
        assert!(!tx.has_participant(Role::Arbitrator, ""));
    }

    #[test]
    fn test_transaction_listing_projection() {
        let mut listing = Listing::new("p1", "Weather", "0xA");
        listing.price = 40;
        let tx = Transaction::for_listing("t1", &listing, "0xB");
        assert_eq!(tx.listing(), listing);
        assert_eq!(tx.buyer, "0xB");
    }

    #[test]
    fn test_account_wire_names() {
        let json = r#"{"address":"0xA","nickname":"alice","fromBlock":18446744073709551615,"isVerifier":true}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.from_block, u64::MAX);
        assert!(account.is_verifier);
    }

    #[test]
    fn test_balance_pair_defaults_and_set() {
        let mut pair = BalancePair::default();
        assert_eq!(pair[0], Balance { balance: "-".into(), time: "-".into() });
        assert!(!pair[BalanceSlot::Token].is_loaded());

        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        pair.set(BalanceSlot::Token, Balance::loaded("100", at));
        assert_eq!(pair[1].time, "2024-05-01 12:30:00");
        assert_eq!(pair[BalanceSlot::Primary], Balance::default());

        let value = serde_json::to_value(&pair).unwrap();
        assert_eq!(value[1]["Balance"], "100");
    }
}
