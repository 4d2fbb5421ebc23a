//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use std::fmt;

use crate::types::*;
use crate::utils::validation::{validate_customer_name, validate_phone};

/// Named collections held by a khata store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    ShopProfile,
    AppSettings,
    Customers,
    Transactions,
    Expenses,
}

impl Collection {
    /// Storage key of the collection (without any backend prefix)
    pub fn key(&self) -> &'static str {
        match self {
            Collection::ShopProfile => "shop_profile",
            Collection::AppSettings => "app_settings",
            Collection::Customers => "customers",
            Collection::Transactions => "transactions",
            Collection::Expenses => "expenses",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Storage abstraction for the khata system
///
/// Each collection is read and written as a whole. Missing collections read
/// as empty (or `None` for the singletons). Implementations should leave the
/// previous state untouched when a write fails.
#[async_trait]
pub trait KhataStorage: Send + Sync {
    /// Load the shop profile, if the shop has been set up
    async fn load_shop_profile(&self) -> KhataResult<Option<ShopProfile>>;

    /// Persist the shop profile
    async fn store_shop_profile(&mut self, profile: &ShopProfile) -> KhataResult<()>;

    /// Load application settings, if any were saved
    async fn load_settings(&self) -> KhataResult<Option<AppSettings>>;

    /// Persist application settings
    async fn store_settings(&mut self, settings: &AppSettings) -> KhataResult<()>;

    /// Load all customers in stored order
    async fn load_customers(&self) -> KhataResult<Vec<Customer>>;

    /// Replace the customer collection
    async fn store_customers(&mut self, customers: &[Customer]) -> KhataResult<()>;

    /// Load all transactions in stored order
    async fn load_transactions(&self) -> KhataResult<Vec<Transaction>>;

    /// Replace the transaction collection
    async fn store_transactions(&mut self, transactions: &[Transaction]) -> KhataResult<()>;

    /// Load all expenses in stored order
    async fn load_expenses(&self) -> KhataResult<Vec<Expense>>;

    /// Replace the expense collection
    async fn store_expenses(&mut self, expenses: &[Expense]) -> KhataResult<()>;
}

/// A record addressable by a unique id
pub trait Record {
    fn id(&self) -> &str;
}

impl Record for Customer {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A record carrying a timestamp that reports filter and sort on
pub trait Dated {
    fn date(&self) -> Timestamp;
}

impl Dated for Transaction {
    fn date(&self) -> Timestamp {
        self.date
    }
}

impl Dated for Expense {
    fn date(&self) -> Timestamp {
        self.date
    }
}

/// Trait for implementing custom customer validation rules
pub trait CustomerValidator: Send + Sync {
    /// Validate a customer before saving
    fn validate_customer(&self, customer: &Customer) -> KhataResult<()>;
}

/// Trait for implementing custom transaction validation rules
pub trait TransactionValidator: Send + Sync {
    /// Validate a transaction before saving
    fn validate_transaction(&self, transaction: &Transaction) -> KhataResult<()>;
}

/// Default customer validator: a non-blank name is all the shop needs
pub struct DefaultCustomerValidator;

impl CustomerValidator for DefaultCustomerValidator {
    fn validate_customer(&self, customer: &Customer) -> KhataResult<()> {
        if customer.id.trim().is_empty() {
            return Err(KhataError::Validation(
                "Customer ID cannot be empty".to_string(),
            ));
        }

        validate_customer_name(&customer.name)
    }
}

/// Stricter customer validator that also checks the phone number format
pub struct StrictCustomerValidator;

impl CustomerValidator for StrictCustomerValidator {
    fn validate_customer(&self, customer: &Customer) -> KhataResult<()> {
        DefaultCustomerValidator.validate_customer(customer)?;
        validate_phone(&customer.phone)
    }
}

/// Default transaction validator
pub struct DefaultTransactionValidator;

impl TransactionValidator for DefaultTransactionValidator {
    fn validate_transaction(&self, transaction: &Transaction) -> KhataResult<()> {
        transaction.validate()
    }
}
