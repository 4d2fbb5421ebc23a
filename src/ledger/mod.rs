//! Ledger module containing customer management, entries, expenses and balances

pub mod balance;
pub mod customer;
pub mod expense;
pub mod khata;
pub mod reminder;
pub mod transaction;

pub use balance::*;
pub use customer::*;
pub use expense::*;
pub use khata::*;
pub use reminder::*;
pub use transaction::*;
