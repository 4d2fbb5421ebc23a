//! Core types and data structures for the khata system

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

/// Current wall-clock time as a [`Timestamp`]
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Interface language of the shop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

/// Shop profile, created once during setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopProfile {
    /// Shop name shown on statements
    pub name: String,
    /// Name of the owner
    pub owner_name: String,
    /// Contact phone number
    pub phone: String,
    /// Optional UPI number that customers can pay to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_pe_number: Option<String>,
    /// Postal address
    pub address: String,
    /// ISO currency code (e.g. "INR")
    pub currency: String,
    /// Interface language
    pub language: Language,
}

impl ShopProfile {
    /// Create a new shop profile with INR as currency and English as language
    pub fn new(name: String, owner_name: String, phone: String, address: String) -> Self {
        Self {
            name,
            owner_name,
            phone,
            phone_pe_number: None,
            address,
            currency: "INR".to_string(),
            language: Language::En,
        }
    }
}

/// A customer with a running credit account at the shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier for the customer
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact phone number (may be empty)
    pub phone: String,
    /// Optional postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Optional credit limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<BigDecimal>,
    /// Optional photo reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// When the customer was created
    pub created_at: Timestamp,
    /// When the customer was last updated
    pub updated_at: Timestamp,
}

impl Customer {
    /// Create a new customer
    pub fn new(id: String, name: String, phone: String) -> Self {
        let now = now_millis();
        Self {
            id,
            name,
            phone,
            address: None,
            credit_limit: None,
            photo_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the customer as modified
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// The shop extended credit or goods ("you gave"), increasing what the customer owes
    Give,
    /// The shop received a payment ("you got"), decreasing what the customer owes
    Get,
}

impl TransactionType {
    /// Label used in day book reports
    pub fn report_label(&self) -> &'static str {
        match self {
            TransactionType::Give => "Given (Dr)",
            TransactionType::Get => "Got (Cr)",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Give => f.write_str("GIVE"),
            TransactionType::Get => f.write_str("GET"),
        }
    }
}

/// A single credit or payment entry against a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: String,
    /// Customer this entry belongs to
    pub customer_id: String,
    /// GIVE or GET
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount of the entry, always positive
    pub amount: BigDecimal,
    /// When the entry happened (user editable, not tied to creation order)
    pub date: Timestamp,
    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Optional bill photo reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        id: String,
        customer_id: String,
        transaction_type: TransactionType,
        amount: BigDecimal,
        date: Timestamp,
    ) -> Self {
        Self {
            id,
            customer_id,
            transaction_type,
            amount,
            date,
            notes: None,
            image_url: None,
        }
    }

    /// Amount with the balance sign applied: GIVE is positive, GET is negative
    pub fn signed_amount(&self) -> BigDecimal {
        match self.transaction_type {
            TransactionType::Give => self.amount.clone(),
            TransactionType::Get => -self.amount.clone(),
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), KhataError> {
        if self.customer_id.trim().is_empty() {
            return Err(KhataError::InvalidTransaction(
                "Transaction must reference a customer".to_string(),
            ));
        }

        if self.amount <= BigDecimal::from(0) {
            return Err(KhataError::InvalidTransaction(
                "Transaction amount must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Fixed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Inventory,
    #[serde(rename = "Rent & Bills")]
    RentAndBills,
    Transport,
    #[serde(rename = "Staff & Food")]
    StaffAndFood,
    Other,
}

impl ExpenseCategory {
    /// All categories in display order
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Inventory,
        ExpenseCategory::RentAndBills,
        ExpenseCategory::Transport,
        ExpenseCategory::StaffAndFood,
        ExpenseCategory::Other,
    ];

    /// Human readable category name
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Inventory => "Inventory",
            ExpenseCategory::RentAndBills => "Rent & Bills",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::StaffAndFood => "Staff & Food",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A shop expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier for the expense
    pub id: String,
    /// Expense category
    pub category: ExpenseCategory,
    /// Amount spent, always positive
    pub amount: BigDecimal,
    /// When the expense was recorded
    pub date: Timestamp,
    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        id: String,
        category: ExpenseCategory,
        amount: BigDecimal,
        date: Timestamp,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            category,
            amount,
            date,
            notes,
        }
    }
}

/// Colour theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Application preferences persisted next to the books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub theme: Theme,
    pub sound_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            sound_enabled: true,
        }
    }
}

/// Errors that can occur in the khata system
#[derive(Debug, thiserror::Error)]
pub enum KhataError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),
    #[error("Shop profile has not been set up")]
    ShopNotInitialized,
}

/// Result type for khata operations
pub type KhataResult<T> = Result<T, KhataError>;
