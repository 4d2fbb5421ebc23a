//! Customer balances and the sign convention behind them
//!
//! A GIVE entry adds its amount to what the customer owes; a GET entry
//! subtracts it. A positive total is receivable (the customer owes the
//! shop), a negative total is payable (the shop holds an advance).

use bigdecimal::{BigDecimal, Signed, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::*;

/// Net position of one customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Balance {
    /// The customer owes the shop this (positive) amount
    Receivable(BigDecimal),
    /// The shop owes the customer this (positive) amount
    Payable(BigDecimal),
    /// Nothing owed either way
    #[default]
    Settled,
}

impl Balance {
    /// Classify a signed total
    pub fn from_signed(amount: BigDecimal) -> Self {
        if amount.is_positive() {
            Balance::Receivable(amount)
        } else if amount.is_negative() {
            Balance::Payable(amount.abs())
        } else {
            Balance::Settled
        }
    }

    /// Signed total: positive when receivable, negative when payable
    pub fn signed_amount(&self) -> BigDecimal {
        match self {
            Balance::Receivable(amount) => amount.clone(),
            Balance::Payable(amount) => -amount.clone(),
            Balance::Settled => BigDecimal::zero(),
        }
    }

    /// Absolute amount owed in either direction
    pub fn magnitude(&self) -> BigDecimal {
        match self {
            Balance::Receivable(amount) | Balance::Payable(amount) => amount.clone(),
            Balance::Settled => BigDecimal::zero(),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Balance::Settled)
    }

    /// Short label from the shopkeeper's point of view
    pub fn label(&self) -> &'static str {
        match self {
            Balance::Receivable(_) => "You will get",
            Balance::Payable(_) => "You will give",
            Balance::Settled => "Settled",
        }
    }

    /// Label used in the outstanding report
    pub fn status_label(&self) -> &'static str {
        match self {
            Balance::Receivable(_) => "To Receive",
            Balance::Payable(_) => "To Pay",
            Balance::Settled => "Settled",
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Balance::Settled => f.write_str("Settled"),
            other => write!(f, "{} {}", other.label(), other.magnitude()),
        }
    }
}

/// Fold a customer's transactions into a balance
///
/// Order of the input does not matter. Amounts are taken as stored; callers
/// are expected to have rejected non-positive amounts at entry.
pub fn compute_balance<'a, I>(transactions: I) -> Balance
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let total = transactions
        .into_iter()
        .fold(BigDecimal::zero(), |acc, txn| match txn.transaction_type {
            TransactionType::Give => acc + &txn.amount,
            TransactionType::Get => acc - &txn.amount,
        });

    Balance::from_signed(total)
}

/// Transactions belonging to one customer, in input order
pub fn filter_by_customer<'a>(
    transactions: &'a [Transaction],
    customer_id: &str,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| txn.customer_id == customer_id)
        .collect()
}

/// Balance of one customer computed from the full transaction list
pub fn customer_balance(transactions: &[Transaction], customer_id: &str) -> Balance {
    compute_balance(
        transactions
            .iter()
            .filter(|txn| txn.customer_id == customer_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn txn(id: &str, customer: &str, kind: TransactionType, amount: i64) -> Transaction {
        Transaction::new(
            id.to_string(),
            customer.to_string(),
            kind,
            BigDecimal::from(amount),
            0,
        )
    }

    #[test]
    fn empty_list_is_settled() {
        let balance = compute_balance(&Vec::<Transaction>::new());
        assert_eq!(balance, Balance::Settled);
        assert_eq!(balance.signed_amount(), BigDecimal::zero());
    }

    #[test]
    fn give_and_get_signs() {
        let give = [txn("1", "c", TransactionType::Give, 100)];
        let get = [txn("1", "c", TransactionType::Get, 100)];
        let both = [
            txn("1", "c", TransactionType::Give, 100),
            txn("2", "c", TransactionType::Get, 40),
        ];

        assert_eq!(compute_balance(&give).signed_amount(), BigDecimal::from(100));
        assert_eq!(compute_balance(&get).signed_amount(), BigDecimal::from(-100));
        assert_eq!(compute_balance(&both).signed_amount(), BigDecimal::from(60));
        assert_eq!(
            compute_balance(&get),
            Balance::Payable(BigDecimal::from(100))
        );
    }

    #[test]
    fn removing_an_entry_shifts_the_balance_by_its_amount() {
        let mut txns = vec![
            txn("1", "c", TransactionType::Give, 500),
            txn("2", "c", TransactionType::Get, 120),
            txn("3", "c", TransactionType::Give, 80),
        ];
        let before = compute_balance(&txns).signed_amount();

        txns.retain(|t| t.id != "2");
        let after = compute_balance(&txns).signed_amount();
        assert_eq!(after - before, BigDecimal::from(120));

        txns.retain(|t| t.id != "3");
        assert_eq!(compute_balance(&txns).signed_amount(), BigDecimal::from(500));
    }

    #[test]
    fn filter_by_customer_matches_exactly() {
        let txns = vec![
            txn("1", "c1", TransactionType::Give, 10),
            txn("2", "c10", TransactionType::Give, 20),
            txn("3", "c1", TransactionType::Get, 5),
        ];

        let ids: Vec<&str> = filter_by_customer(&txns, "c1")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(filter_by_customer(&txns, "nobody").is_empty());
        assert_eq!(customer_balance(&txns, "c1").signed_amount(), BigDecimal::from(5));
    }

    #[test]
    fn labels_follow_the_sign() {
        assert_eq!(Balance::from_signed(BigDecimal::from(5)).status_label(), "To Receive");
        assert_eq!(Balance::from_signed(BigDecimal::from(-5)).status_label(), "To Pay");
        assert_eq!(Balance::from_signed(BigDecimal::zero()).label(), "Settled");
    }

    fn to_transactions(entries: &[(bool, i64)]) -> Vec<Transaction> {
        entries
            .iter()
            .enumerate()
            .map(|(i, (give, amount))| {
                let kind = if *give { TransactionType::Give } else { TransactionType::Get };
                txn(&i.to_string(), "c", kind, *amount)
            })
            .collect()
    }

    /// A list of entries together with an arbitrary permutation of it
    fn entries_and_permutation() -> impl Strategy<Value = (Vec<(bool, i64)>, Vec<(bool, i64)>)> {
        prop::collection::vec((any::<bool>(), 1i64..1_000_000), 0..40)
            .prop_flat_map(|entries| (Just(entries.clone()), Just(entries).prop_shuffle()))
    }

    proptest! {
        #[test]
        fn balance_is_the_same_for_any_permutation(
            (entries, permuted) in entries_and_permutation()
        ) {
            let expected = compute_balance(&to_transactions(&entries));
            prop_assert_eq!(compute_balance(&to_transactions(&permuted)), expected);
        }

        #[test]
        fn balance_is_order_independent(
            entries in prop::collection::vec((any::<bool>(), 1i64..1_000_000), 0..40),
            seed in any::<u64>()
        ) {
            let txns: Vec<Transaction> = entries
                .iter()
                .enumerate()
                .map(|(i, (give, amount))| {
                    let kind = if *give { TransactionType::Give } else { TransactionType::Get };
                    txn(&i.to_string(), "c", kind, *amount)
                })
                .collect();

            let mut reversed = txns.clone();
            reversed.reverse();

            let mut rotated = txns.clone();
            if !rotated.is_empty() {
                let len = rotated.len();
                rotated.rotate_left((seed as usize) % len);
            }

            let expected = compute_balance(&txns);
            prop_assert_eq!(&compute_balance(&reversed), &expected);
            prop_assert_eq!(&compute_balance(&rotated), &expected);
        }
    }
}
