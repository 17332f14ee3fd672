//! Role views over the transaction backing store

use crate::models::{Role, Transaction};

/// Transactions in which `viewer` plays `role`, in backing-store order.
///
/// An empty viewer sees nothing.
pub fn view<'a>(transactions: &'a [Transaction], role: Role, viewer: &str) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.has_participant(role, viewer))
        .collect()
}

/// Owned copy of [`view`], as stored in snapshots
pub fn view_owned(transactions: &[Transaction], role: Role, viewer: &str) -> Vec<Transaction> {
    view(transactions, role, viewer).into_iter().cloned().collect()
}

/// Roles `viewer` holds in a single transaction
pub fn roles_of(tx: &Transaction, viewer: &str) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| tx.has_participant(*role, viewer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;

    fn trade(tid: &str, seller: &str, buyer: &str) -> Transaction {
        Transaction::for_listing(tid, &Listing::new("p1", "Data", seller), buyer)
    }

    #[test]
    fn test_sell_and_buy_views() {
        let store = vec![trade("t1", "A", "B")];

        assert_eq!(view(&store, Role::Seller, "A").len(), 1);
        assert!(view(&store, Role::Buyer, "A").is_empty());
        assert_eq!(view(&store, Role::Buyer, "B").len(), 1);
        assert!(view(&store, Role::Seller, "B").is_empty());
    }

    #[test]
    fn test_mediator_views() {
        let mut tx = trade("t1", "A", "B");
        tx.verifiers = vec!["V1".into(), "V2".into()];
        tx.arbitrator = "R".into();
        let store = vec![tx, trade("t2", "A", "C")];

        let verifier = view(&store, Role::Verifier, "V2");
        assert_eq!(verifier.len(), 1);
        assert_eq!(verifier[0].tid, "t1");
        assert_eq!(view(&store, Role::Arbitrator, "R").len(), 1);
        assert!(view(&store, Role::Arbitrator, "").is_empty());
    }

    #[test]
    fn test_view_keeps_store_order() {
        let store = vec![trade("t3", "A", "B"), trade("t1", "A", "C"), trade("t2", "A", "D")];
        let tids: Vec<&str> = view(&store, Role::Seller, "A").iter().map(|t| t.tid.as_str()).collect();
        assert_eq!(tids, vec!["t3", "t1", "t2"]);
    }

    #[test]
    fn test_self_trade_roles() {
        let tx = trade("t1", "A", "A");
        assert_eq!(roles_of(&tx, "A"), vec![Role::Seller, Role::Buyer]);
    }
}
