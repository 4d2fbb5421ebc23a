//! Shop expense book

use bigdecimal::BigDecimal;
use tracing::info;

use crate::reports::window::sort_by_date_descending;
use crate::traits::*;
use crate::types::*;
use crate::utils::collection::contains_id;
use crate::utils::id::generate_id;
use crate::utils::validation::{validate_notes, validate_positive_amount};

/// Expense manager; expenses are append-only
pub struct ExpenseManager<S: KhataStorage> {
    storage: S,
}

impl<S: KhataStorage> ExpenseManager<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Record a new expense with a generated id
    pub async fn add_expense(
        &mut self,
        category: ExpenseCategory,
        amount: BigDecimal,
        notes: Option<String>,
        date: Timestamp,
    ) -> KhataResult<Expense> {
        let notes = notes.filter(|n| !n.trim().is_empty());
        let expense = Expense::new(generate_id(), category, amount, date, notes);
        self.record_expense(expense).await
    }

    /// Append an expense; its id must not already be in use
    pub async fn record_expense(&mut self, expense: Expense) -> KhataResult<Expense> {
        validate_positive_amount(&expense.amount)?;
        if let Some(notes) = &expense.notes {
            validate_notes(notes)?;
        }

        let mut expenses = self.storage.load_expenses().await?;
        if contains_id(&expenses, &expense.id) {
            return Err(KhataError::DuplicateId(expense.id));
        }

        expenses.push(expense.clone());
        self.storage.store_expenses(&expenses).await?;

        info!(
            expense_id = %expense.id,
            category = %expense.category,
            amount = %expense.amount,
            "expense recorded"
        );
        Ok(expense)
    }

    /// All expenses, newest first
    pub async fn list_expenses(&self) -> KhataResult<Vec<Expense>> {
        let mut expenses = self.storage.load_expenses().await?;
        sort_by_date_descending(&mut expenses);
        Ok(expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    #[tokio::test]
    async fn expenses_list_newest_first() {
        let mut manager = ExpenseManager::new(MemoryStorage::new());
        manager
            .add_expense(ExpenseCategory::Transport, BigDecimal::from(80), None, 100)
            .await
            .unwrap();
        manager
            .add_expense(
                ExpenseCategory::StaffAndFood,
                BigDecimal::from(120),
                Some("tea".to_string()),
                200,
            )
            .await
            .unwrap();

        let listed = manager.list_expenses().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].category, ExpenseCategory::StaffAndFood);
        assert_eq!(listed[0].notes.as_deref(), Some("tea"));
    }

    #[tokio::test]
    async fn zero_amounts_are_rejected() {
        let mut manager = ExpenseManager::new(MemoryStorage::new());
        let result = manager
            .add_expense(ExpenseCategory::Other, BigDecimal::from(0), None, 0)
            .await;
        assert!(result.is_err());
        assert!(manager.list_expenses().await.unwrap().is_empty());
    }
}
