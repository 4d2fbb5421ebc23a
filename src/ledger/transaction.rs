//! Transaction processing and management

use bigdecimal::BigDecimal;
use tracing::{info, warn};

use crate::ledger::balance::{customer_balance, Balance};
use crate::reports::window::sort_by_date_descending;
use crate::traits::*;
use crate::types::*;
use crate::utils::collection::{contains_id, remove_by_id, upsert, Upsert};
use crate::utils::id::generate_id;

/// Transaction manager for handling ledger entries
pub struct TransactionManager<S: KhataStorage> {
    storage: S,
    validator: Box<dyn TransactionValidator>,
}

impl<S: KhataStorage> TransactionManager<S> {
    /// Create a new transaction manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultTransactionValidator),
        }
    }

    /// Create a new transaction manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn TransactionValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record a new transaction
    ///
    /// The customer must exist at this point and the id must be fresh.
    pub async fn record_transaction(
        &mut self,
        transaction: Transaction,
    ) -> KhataResult<Transaction> {
        self.validator.validate_transaction(&transaction)?;

        let customers = self.storage.load_customers().await?;
        if !contains_id(&customers, &transaction.customer_id) {
            return Err(KhataError::CustomerNotFound(transaction.customer_id.clone()));
        }

        let mut transactions = self.storage.load_transactions().await?;
        if contains_id(&transactions, &transaction.id) {
            return Err(KhataError::DuplicateId(transaction.id));
        }

        transactions.push(transaction.clone());
        self.storage.store_transactions(&transactions).await?;

        info!(
            transaction_id = %transaction.id,
            customer_id = %transaction.customer_id,
            kind = %transaction.transaction_type,
            amount = %transaction.amount,
            "transaction recorded"
        );
        Ok(transaction)
    }

    /// Insert or replace a transaction by id, without the customer check
    pub async fn save_transaction(&mut self, transaction: &Transaction) -> KhataResult<Upsert> {
        self.validator.validate_transaction(transaction)?;

        let mut transactions = self.storage.load_transactions().await?;
        let outcome = upsert(&mut transactions, transaction.clone());
        self.storage.store_transactions(&transactions).await?;
        Ok(outcome)
    }

    /// Get a transaction by ID
    pub async fn get_transaction(&self, transaction_id: &str) -> KhataResult<Option<Transaction>> {
        Ok(self
            .storage
            .load_transactions()
            .await?
            .into_iter()
            .find(|t| t.id == transaction_id))
    }

    /// Get a transaction by ID, returning an error if not found
    pub async fn get_transaction_required(
        &self,
        transaction_id: &str,
    ) -> KhataResult<Transaction> {
        self.get_transaction(transaction_id)
            .await?
            .ok_or_else(|| KhataError::TransactionNotFound(transaction_id.to_string()))
    }

    /// All transactions in stored order
    pub async fn list_transactions(&self) -> KhataResult<Vec<Transaction>> {
        self.storage.load_transactions().await
    }

    /// Transactions of one customer, newest first
    pub async fn customer_transactions(&self, customer_id: &str) -> KhataResult<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .storage
            .load_transactions()
            .await?
            .into_iter()
            .filter(|t| t.customer_id == customer_id)
            .collect();
        sort_by_date_descending(&mut transactions);
        Ok(transactions)
    }

    /// Current balance of one customer
    pub async fn customer_balance(&self, customer_id: &str) -> KhataResult<Balance> {
        let transactions = self.storage.load_transactions().await?;
        Ok(customer_balance(&transactions, customer_id))
    }

    /// Delete a transaction; deleting an unknown id is a no-op
    pub async fn delete_transaction(&mut self, transaction_id: &str) -> KhataResult<bool> {
        let mut transactions = self.storage.load_transactions().await?;
        if !remove_by_id(&mut transactions, transaction_id) {
            warn!(transaction_id, "delete requested for unknown transaction");
            return Ok(false);
        }

        self.storage.store_transactions(&transactions).await?;
        info!(transaction_id, "transaction deleted");
        Ok(true)
    }
}

/// Transaction builder for ledger entries
#[derive(Debug)]
pub struct TransactionBuilder {
    transaction: Transaction,
}

impl TransactionBuilder {
    /// Start an entry with a generated id, dated now
    pub fn new(customer_id: String, transaction_type: TransactionType, amount: BigDecimal) -> Self {
        Self {
            transaction: Transaction::new(
                generate_id(),
                customer_id,
                transaction_type,
                amount,
                now_millis(),
            ),
        }
    }

    /// Credit extended to the customer
    pub fn give(customer_id: String, amount: BigDecimal) -> Self {
        Self::new(customer_id, TransactionType::Give, amount)
    }

    /// Payment received from the customer
    pub fn get(customer_id: String, amount: BigDecimal) -> Self {
        Self::new(customer_id, TransactionType::Get, amount)
    }

    /// Use a caller supplied id
    pub fn id(mut self, id: String) -> Self {
        self.transaction.id = id;
        self
    }

    /// Set the entry date
    pub fn date(mut self, date: Timestamp) -> Self {
        self.transaction.date = date;
        self
    }

    /// Attach a note; blank notes are dropped
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.transaction.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Attach a bill photo reference
    pub fn image_url(mut self, image_url: String) -> Self {
        self.transaction.image_url = Some(image_url);
        self
    }

    /// Build the transaction
    pub fn build(self) -> KhataResult<Transaction> {
        self.transaction.validate()?;
        Ok(self.transaction)
    }
}

/// Common transaction patterns
pub mod patterns {
    use super::*;

    /// Goods or cash given on credit
    pub fn credit_given(
        customer_id: String,
        amount: BigDecimal,
        date: Timestamp,
        notes: Option<String>,
    ) -> KhataResult<Transaction> {
        TransactionBuilder::give(customer_id, amount)
            .date(date)
            .notes(notes.unwrap_or_default())
            .build()
    }

    /// Payment received against the customer's dues
    pub fn payment_received(
        customer_id: String,
        amount: BigDecimal,
        date: Timestamp,
        notes: Option<String>,
    ) -> KhataResult<Transaction> {
        TransactionBuilder::get(customer_id, amount)
            .date(date)
            .notes(notes.unwrap_or_default())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    async fn seeded() -> (MemoryStorage, Customer) {
        let mut storage = MemoryStorage::new();
        let customer = Customer::new("c1".to_string(), "Kavya".to_string(), String::new());
        storage.store_customers(&[customer.clone()]).await.unwrap();
        (storage, customer)
    }

    #[tokio::test]
    async fn recording_requires_an_existing_customer() {
        let (storage, _) = seeded().await;
        let mut manager = TransactionManager::new(storage);

        let orphan = TransactionBuilder::give("missing".to_string(), BigDecimal::from(10))
            .build()
            .unwrap();
        assert!(matches!(
            manager.record_transaction(orphan).await,
            Err(KhataError::CustomerNotFound(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_ids_are_reported() {
        let (storage, customer) = seeded().await;
        let mut manager = TransactionManager::new(storage);

        let first = TransactionBuilder::give(customer.id.clone(), BigDecimal::from(10))
            .id("fixed".to_string())
            .build()
            .unwrap();
        manager.record_transaction(first.clone()).await.unwrap();

        assert!(matches!(
            manager.record_transaction(first).await,
            Err(KhataError::DuplicateId(_))
        ));
    }

    #[tokio::test]
    async fn delete_reverses_the_entry_in_the_balance() {
        let (storage, customer) = seeded().await;
        let mut manager = TransactionManager::new(storage);

        manager
            .record_transaction(
                patterns::credit_given(customer.id.clone(), BigDecimal::from(100), 1, None)
                    .unwrap(),
            )
            .await
            .unwrap();
        let payment = manager
            .record_transaction(
                patterns::payment_received(customer.id.clone(), BigDecimal::from(40), 2, None)
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            manager.customer_balance(&customer.id).await.unwrap().signed_amount(),
            BigDecimal::from(60)
        );

        assert!(manager.delete_transaction(&payment.id).await.unwrap());
        assert_eq!(
            manager.customer_balance(&customer.id).await.unwrap().signed_amount(),
            BigDecimal::from(100)
        );
        assert!(!manager.delete_transaction(&payment.id).await.unwrap());
    }

    #[tokio::test]
    async fn save_replaces_in_place() {
        let (storage, customer) = seeded().await;
        let mut manager = TransactionManager::new(storage);

        let original = TransactionBuilder::give(customer.id.clone(), BigDecimal::from(10))
            .build()
            .unwrap();
        assert_eq!(manager.save_transaction(&original).await.unwrap(), Upsert::Inserted);

        let mut edited = original.clone();
        edited.amount = BigDecimal::from(15);
        assert_eq!(manager.save_transaction(&edited).await.unwrap(), Upsert::Replaced);

        let all = manager.list_transactions().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount, BigDecimal::from(15));
    }

    #[tokio::test]
    async fn required_lookup_reports_missing_transactions() {
        let (storage, customer) = seeded().await;
        let mut manager = TransactionManager::new(storage);

        let recorded = manager
            .record_transaction(
                TransactionBuilder::get(customer.id.clone(), BigDecimal::from(25))
                    .image_url("bills/receipt-1.jpg".to_string())
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();

        let found = manager.get_transaction_required(&recorded.id).await.unwrap();
        assert_eq!(found.image_url.as_deref(), Some("bills/receipt-1.jpg"));
        assert!(matches!(
            manager.get_transaction_required("missing").await,
            Err(KhataError::TransactionNotFound(_))
        ));
    }

    #[test]
    fn builder_rejects_non_positive_amounts() {
        assert!(TransactionBuilder::get("c1".to_string(), BigDecimal::from(-5))
            .build()
            .is_err());
    }

    #[test]
    fn blank_notes_are_dropped() {
        let txn = TransactionBuilder::give("c1".to_string(), BigDecimal::from(5))
            .notes("   ")
            .build()
            .unwrap();
        assert_eq!(txn.notes, None);
    }
}
