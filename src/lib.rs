//! # Khata Core
//!
//! A bookkeeping library for small shops keeping a digital khata: credit
//! given to customers, payments received back, shop expenses, and the
//! summaries and report rows built from them.
//!
//! ## Features
//!
//! - **Customer ledgers**: GIVE/GET entries with a signed running balance per customer
//! - **Dashboard**: Total receivable, payable, net position and today's collection
//! - **Reports**: Day book, outstanding balances and expenses over All/Today/This month windows
//! - **Expenses**: Categorised shop spending with per-category breakdown
//! - **Reminders**: Plain-text payment reminders ready to share
//! - **Storage abstraction**: Trait-based store with in-memory and JSON file backends
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use khata_core::utils::MemoryStorage;
//! use khata_core::{Khata, ShopProfile};
//! use bigdecimal::BigDecimal;
//!
//! # async fn demo() -> khata_core::KhataResult<()> {
//! let mut khata = Khata::new(MemoryStorage::new());
//! khata
//!     .setup_shop(ShopProfile::new(
//!         "Sharma Kirana".to_string(),
//!         "Ravi Sharma".to_string(),
//!         "9876543210".to_string(),
//!         "MG Road".to_string(),
//!     ))
//!     .await?;
//!
//! let customer = khata.add_customer("Asha".to_string(), String::new()).await?;
//! khata.record_give(&customer.id, BigDecimal::from(500), None, None).await?;
//!
//! let stats = khata.dashboard().await?;
//! assert_eq!(stats.total_receivable, BigDecimal::from(500));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ledger;
pub mod reports;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use crate::config::KhataConfig;
pub use ledger::*;
pub use reports::*;
pub use traits::*;
pub use types::*;

// Re-export transaction patterns for convenience
pub use ledger::transaction::patterns;
