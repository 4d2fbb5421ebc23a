//! Report rows handed to the export layer
//!
//! Rows carry raw timestamps and amounts; [`TabularRow::cells`] renders them
//! into the text cells a PDF or CSV writer expects.

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::reports::summary::{customer_names, CustomerBalance, UNKNOWN_CUSTOMER};
use crate::reports::window::{filter_by_time_window, sort_by_date_descending, TimeWindow};
use crate::types::*;
use crate::utils::format::format_date;

const NO_NOTE: &str = "-";

/// A row that can be laid out as a table
pub trait TabularRow {
    /// Column headers, in cell order
    fn headers() -> &'static [&'static str];

    /// Cell text for this row
    fn cells(&self) -> Vec<String>;
}

/// One line of the day book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBookRow {
    pub date: Timestamp,
    pub customer_name: String,
    pub type_label: String,
    pub amount: BigDecimal,
    pub note: String,
}

impl TabularRow for DayBookRow {
    fn headers() -> &'static [&'static str] {
        &["Date", "Customer", "Type", "Amount", "Note"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_date(self.date),
            self.customer_name.clone(),
            self.type_label.clone(),
            self.amount.to_string(),
            self.note.clone(),
        ]
    }
}

/// One customer in the outstanding report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingRow {
    pub customer_name: String,
    pub phone: String,
    pub status_label: String,
    /// Absolute amount owed in the direction given by the status
    pub amount: BigDecimal,
}

impl TabularRow for OutstandingRow {
    fn headers() -> &'static [&'static str] {
        &["Customer", "Phone", "Status", "Amount"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_name.clone(),
            self.phone.clone(),
            self.status_label.clone(),
            self.amount.to_string(),
        ]
    }
}

/// One line of the expense report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    pub date: Timestamp,
    pub category: String,
    pub amount: BigDecimal,
    pub note: String,
}

impl TabularRow for ExpenseRow {
    fn headers() -> &'static [&'static str] {
        &["Date", "Category", "Amount", "Note"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_date(self.date),
            self.category.clone(),
            self.amount.to_string(),
            self.note.clone(),
        ]
    }
}

fn note_or_dash(notes: &Option<String>) -> String {
    match notes.as_deref().map(str::trim) {
        Some(note) if !note.is_empty() => note.to_string(),
        _ => NO_NOTE.to_string(),
    }
}

/// Chronological (newest first) transaction listing for a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBook {
    pub window: TimeWindow,
    pub rows: Vec<DayBookRow>,
    /// Money in minus money out: GET entries add, GIVE entries subtract
    pub net_total: BigDecimal,
}

/// Outstanding balances, largest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingReport {
    pub rows: Vec<OutstandingRow>,
    /// Signed sum of the listed balances (positive means net receivable)
    pub net_total: BigDecimal,
}

/// Expenses for a window, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    pub window: TimeWindow,
    pub rows: Vec<ExpenseRow>,
    pub total: BigDecimal,
}

/// Build the day book for `window` as of `now`
pub fn day_book<Tz: TimeZone>(
    customers: &[Customer],
    transactions: &[Transaction],
    window: TimeWindow,
    now: &DateTime<Tz>,
) -> DayBook {
    let names = customer_names(customers);
    let mut selected: Vec<Transaction> = filter_by_time_window(transactions, window, now)
        .into_iter()
        .cloned()
        .collect();
    sort_by_date_descending(&mut selected);

    let net_total = selected
        .iter()
        .fold(BigDecimal::zero(), |acc, txn| match txn.transaction_type {
            TransactionType::Get => acc + &txn.amount,
            TransactionType::Give => acc - &txn.amount,
        });

    let rows = selected
        .iter()
        .map(|txn| DayBookRow {
            date: txn.date,
            customer_name: names
                .get(txn.customer_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_CUSTOMER)
                .to_string(),
            type_label: txn.transaction_type.report_label().to_string(),
            amount: txn.amount.clone(),
            note: note_or_dash(&txn.notes),
        })
        .collect();

    DayBook {
        window,
        rows,
        net_total,
    }
}

/// Build the outstanding report from an already ordered outstanding list
pub fn outstanding_report(outstanding: &[CustomerBalance]) -> OutstandingReport {
    let rows = outstanding
        .iter()
        .map(|entry| OutstandingRow {
            customer_name: entry.customer.name.clone(),
            phone: entry.customer.phone.clone(),
            status_label: entry.balance.status_label().to_string(),
            amount: entry.balance.magnitude(),
        })
        .collect();

    let net_total = outstanding
        .iter()
        .map(|entry| entry.balance.signed_amount())
        .sum();

    OutstandingReport { rows, net_total }
}

/// Build the expense report for `window` as of `now`
pub fn expense_report<Tz: TimeZone>(
    expenses: &[Expense],
    window: TimeWindow,
    now: &DateTime<Tz>,
) -> ExpenseReport {
    let mut selected: Vec<Expense> = filter_by_time_window(expenses, window, now)
        .into_iter()
        .cloned()
        .collect();
    sort_by_date_descending(&mut selected);

    let total = selected.iter().map(|e| &e.amount).sum();
    let rows = selected
        .into_iter()
        .map(|expense| ExpenseRow {
            date: expense.date,
            category: expense.category.label().to_string(),
            note: note_or_dash(&expense.notes),
            amount: expense.amount,
        })
        .collect();

    ExpenseReport {
        window,
        rows,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::balance::Balance;
    use chrono::Utc;

    #[test]
    fn day_book_labels_and_net_total() {
        let customers = vec![Customer::new("c1".into(), "Meena".into(), "98".into())];
        let mut give = Transaction::new(
            "t1".into(),
            "c1".into(),
            TransactionType::Give,
            BigDecimal::from(300),
            1_000,
        );
        give.notes = Some("rice".into());
        let get = Transaction::new(
            "t2".into(),
            "ghost".into(),
            TransactionType::Get,
            BigDecimal::from(100),
            2_000,
        );

        let book = day_book(&customers, &[give, get], TimeWindow::All, &Utc::now());
        assert_eq!(book.rows.len(), 2);
        assert_eq!(book.rows[0].customer_name, "Unknown");
        assert_eq!(book.rows[0].type_label, "Got (Cr)");
        assert_eq!(book.rows[0].note, "-");
        assert_eq!(book.rows[1].type_label, "Given (Dr)");
        assert_eq!(book.rows[1].note, "rice");
        assert_eq!(book.net_total, BigDecimal::from(-200));
    }

    #[test]
    fn outstanding_rows_show_absolute_amounts() {
        let entries = vec![
            CustomerBalance {
                customer: Customer::new("a".into(), "Anil".into(), "111".into()),
                balance: Balance::Payable(BigDecimal::from(100)),
            },
            CustomerBalance {
                customer: Customer::new("b".into(), "Bina".into(), "222".into()),
                balance: Balance::Receivable(BigDecimal::from(40)),
            },
        ];

        let report = outstanding_report(&entries);
        assert_eq!(report.rows[0].status_label, "To Pay");
        assert_eq!(report.rows[0].amount, BigDecimal::from(100));
        assert_eq!(report.rows[1].status_label, "To Receive");
        assert_eq!(report.net_total, BigDecimal::from(-60));
        assert_eq!(
            report.rows[1].cells(),
            vec!["Bina", "222", "To Receive", "40"]
        );
    }

    #[test]
    fn expense_report_sorts_and_totals() {
        let expenses = vec![
            Expense::new("e1".into(), ExpenseCategory::Inventory, BigDecimal::from(500), 10, None),
            Expense::new(
                "e2".into(),
                ExpenseCategory::RentAndBills,
                BigDecimal::from(1500),
                20,
                Some("March rent".into()),
            ),
        ];

        let report = expense_report(&expenses, TimeWindow::All, &Utc::now());
        assert_eq!(report.total, BigDecimal::from(2000));
        assert_eq!(report.rows[0].category, "Rent & Bills");
        assert_eq!(report.rows[0].note, "March rent");
        assert_eq!(report.rows[1].note, "-");
        assert_eq!(ExpenseRow::headers().len(), report.rows[0].cells().len());
    }
}
