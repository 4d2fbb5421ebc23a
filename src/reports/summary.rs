//! Dashboard and outstanding aggregates

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ledger::balance::{compute_balance, Balance};
use crate::reports::window::{sort_by_date_descending, start_of_day};
use crate::types::*;

/// Headline figures for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of all positive customer balances ("you will get")
    pub total_receivable: BigDecimal,
    /// Sum of the magnitudes of all negative customer balances ("you will give")
    pub total_payable: BigDecimal,
    /// Receivable minus payable
    pub net_balance: BigDecimal,
    /// Payments received since local midnight
    pub today_collection: BigDecimal,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            total_receivable: BigDecimal::zero(),
            total_payable: BigDecimal::zero(),
            net_balance: BigDecimal::zero(),
            today_collection: BigDecimal::zero(),
        }
    }
}

/// A customer together with their current balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerBalance {
    pub customer: Customer,
    pub balance: Balance,
}

/// Group transactions by customer id
fn transactions_by_customer(transactions: &[Transaction]) -> HashMap<&str, Vec<&Transaction>> {
    let mut grouped: HashMap<&str, Vec<&Transaction>> = HashMap::new();
    for txn in transactions {
        grouped.entry(txn.customer_id.as_str()).or_default().push(txn);
    }
    grouped
}

/// Balance of every customer, in customer order
pub fn customer_balances(
    customers: &[Customer],
    transactions: &[Transaction],
) -> Vec<CustomerBalance> {
    let grouped = transactions_by_customer(transactions);
    customers
        .iter()
        .map(|customer| {
            let balance = grouped
                .get(customer.id.as_str())
                .map(|txns| compute_balance(txns.iter().copied()))
                .unwrap_or_default();
            CustomerBalance {
                customer: customer.clone(),
                balance,
            }
        })
        .collect()
}

/// Compute dashboard totals as of `now`
///
/// Only customers in `customers` count towards receivable/payable;
/// transactions whose customer is gone still count towards today's
/// collection since the cash was received.
pub fn aggregate_dashboard<Tz: TimeZone>(
    customers: &[Customer],
    transactions: &[Transaction],
    now: &DateTime<Tz>,
) -> DashboardStats {
    let mut stats = DashboardStats::default();

    for entry in customer_balances(customers, transactions) {
        match entry.balance {
            Balance::Receivable(amount) => stats.total_receivable += amount,
            Balance::Payable(amount) => stats.total_payable += amount,
            Balance::Settled => {}
        }
    }
    stats.net_balance = &stats.total_receivable - &stats.total_payable;

    let today = start_of_day(now);
    stats.today_collection = transactions
        .iter()
        .filter(|txn| txn.transaction_type == TransactionType::Get && txn.date >= today)
        .map(|txn| &txn.amount)
        .sum();

    stats
}

/// Customers with a non-zero balance, largest exposure first
///
/// Ties keep customer order.
pub fn outstanding_list(
    customers: &[Customer],
    transactions: &[Transaction],
) -> Vec<CustomerBalance> {
    let mut outstanding: Vec<CustomerBalance> = customer_balances(customers, transactions)
        .into_iter()
        .filter(|entry| !entry.balance.is_settled())
        .collect();

    outstanding.sort_by(|a, b| b.balance.magnitude().cmp(&a.balance.magnitude()));
    outstanding
}

/// A transaction shown in the dashboard's recent activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub transaction: Transaction,
    pub customer_name: String,
}

/// Name shown for transactions whose customer no longer exists
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Lookup of customer names by id
pub(crate) fn customer_names(customers: &[Customer]) -> HashMap<&str, &str> {
    customers
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect()
}

/// The `limit` most recent transactions by date, with customer names attached
pub fn recent_transactions(
    customers: &[Customer],
    transactions: &[Transaction],
    limit: usize,
) -> Vec<RecentTransaction> {
    let names = customer_names(customers);
    let mut sorted = transactions.to_vec();
    sort_by_date_descending(&mut sorted);

    sorted
        .into_iter()
        .take(limit)
        .map(|transaction| {
            let customer_name = names
                .get(transaction.customer_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_CUSTOMER)
                .to_string();
            RecentTransaction {
                transaction,
                customer_name,
            }
        })
        .collect()
}

/// Spend in one expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: BigDecimal,
}

/// Per-category totals in display order; categories with no spend are dropped
pub fn expense_breakdown<'a, I>(expenses: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals: HashMap<ExpenseCategory, BigDecimal> = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_insert_with(BigDecimal::zero) += &expense.amount;
    }

    ExpenseCategory::ALL
        .iter()
        .filter_map(|category| {
            totals
                .remove(category)
                .filter(|total| *total > BigDecimal::zero())
                .map(|total| CategoryTotal {
                    category: *category,
                    total,
                })
        })
        .collect()
}

/// Sum of expense amounts
pub fn total_expenses<'a, I>(expenses: I) -> BigDecimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses.into_iter().map(|e| &e.amount).sum()
}
