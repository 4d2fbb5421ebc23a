//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

#[derive(Debug, Default)]
struct Books {
    shop_profile: Option<ShopProfile>,
    settings: Option<AppSettings>,
    customers: Vec<Customer>,
    transactions: Vec<Transaction>,
    expenses: Vec<Expense>,
}

/// In-memory storage implementation for testing and development
///
/// Clones share the same underlying data, so several managers can hold a
/// handle to one store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    books: Arc<RwLock<Books>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> KhataResult<()> {
        *self.write()? = Books::default();
        Ok(())
    }

    fn read(&self) -> KhataResult<RwLockReadGuard<'_, Books>> {
        self.books
            .read()
            .map_err(|_| KhataError::Storage("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> KhataResult<RwLockWriteGuard<'_, Books>> {
        self.books
            .write()
            .map_err(|_| KhataError::Storage("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KhataStorage for MemoryStorage {
    async fn load_shop_profile(&self) -> KhataResult<Option<ShopProfile>> {
        Ok(self.read()?.shop_profile.clone())
    }

    async fn store_shop_profile(&mut self, profile: &ShopProfile) -> KhataResult<()> {
        self.write()?.shop_profile = Some(profile.clone());
        Ok(())
    }

    async fn load_settings(&self) -> KhataResult<Option<AppSettings>> {
        Ok(self.read()?.settings.clone())
    }

    async fn store_settings(&mut self, settings: &AppSettings) -> KhataResult<()> {
        self.write()?.settings = Some(settings.clone());
        Ok(())
    }

    async fn load_customers(&self) -> KhataResult<Vec<Customer>> {
        Ok(self.read()?.customers.clone())
    }

    async fn store_customers(&mut self, customers: &[Customer]) -> KhataResult<()> {
        self.write()?.customers = customers.to_vec();
        Ok(())
    }

    async fn load_transactions(&self) -> KhataResult<Vec<Transaction>> {
        Ok(self.read()?.transactions.clone())
    }

    async fn store_transactions(&mut self, transactions: &[Transaction]) -> KhataResult<()> {
        self.write()?.transactions = transactions.to_vec();
        Ok(())
    }

    async fn load_expenses(&self) -> KhataResult<Vec<Expense>> {
        Ok(self.read()?.expenses.clone())
    }

    async fn store_expenses(&mut self, expenses: &[Expense]) -> KhataResult<()> {
        self.write()?.expenses = expenses.to_vec();
        Ok(())
    }
}
