//! Customer management functionality

use tracing::{debug, info, warn};

use crate::traits::*;
use crate::types::*;
use crate::utils::collection::{contains_id, remove_by_id, upsert, Upsert};
use crate::utils::id::generate_id;

/// Customer manager for handling the customer book
pub struct CustomerManager<S: KhataStorage> {
    pub(crate) storage: S,
    validator: Box<dyn CustomerValidator>,
}

impl<S: KhataStorage> CustomerManager<S> {
    /// Create a new customer manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultCustomerValidator),
        }
    }

    /// Create a new customer manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn CustomerValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new customer with a generated id
    pub async fn add_customer(&mut self, name: String, phone: String) -> KhataResult<Customer> {
        let customer = Customer::new(
            generate_id(),
            name.trim().to_string(),
            phone.trim().to_string(),
        );
        self.validator.validate_customer(&customer)?;

        let mut customers = self.storage.load_customers().await?;
        if contains_id(&customers, &customer.id) {
            return Err(KhataError::DuplicateId(customer.id));
        }

        customers.push(customer.clone());
        self.storage.store_customers(&customers).await?;

        info!(customer_id = %customer.id, name = %customer.name, "customer added");
        Ok(customer)
    }

    /// Insert or replace a customer by id
    pub async fn save_customer(&mut self, customer: &Customer) -> KhataResult<Upsert> {
        self.validator.validate_customer(customer)?;

        let mut customers = self.storage.load_customers().await?;
        let outcome = upsert(&mut customers, customer.clone());
        self.storage.store_customers(&customers).await?;

        debug!(customer_id = %customer.id, ?outcome, "customer saved");
        Ok(outcome)
    }

    /// Update an existing customer, refreshing its `updated_at`
    pub async fn update_customer(&mut self, customer: &Customer) -> KhataResult<Customer> {
        self.validator.validate_customer(customer)?;

        let mut customers = self.storage.load_customers().await?;
        if !contains_id(&customers, &customer.id) {
            return Err(KhataError::CustomerNotFound(customer.id.clone()));
        }

        let mut updated = customer.clone();
        updated.touch();
        upsert(&mut customers, updated.clone());
        self.storage.store_customers(&customers).await?;

        info!(customer_id = %updated.id, "customer updated");
        Ok(updated)
    }

    /// Get a customer by ID
    pub async fn get_customer(&self, customer_id: &str) -> KhataResult<Option<Customer>> {
        Ok(self
            .storage
            .load_customers()
            .await?
            .into_iter()
            .find(|c| c.id == customer_id))
    }

    /// Get a customer by ID, returning an error if not found
    pub async fn get_customer_required(&self, customer_id: &str) -> KhataResult<Customer> {
        self.get_customer(customer_id)
            .await?
            .ok_or_else(|| KhataError::CustomerNotFound(customer_id.to_string()))
    }

    /// List all customers in stored order
    pub async fn list_customers(&self) -> KhataResult<Vec<Customer>> {
        self.storage.load_customers().await
    }

    /// Customers whose name contains `term` (case-insensitive) or whose phone contains it
    pub async fn search_customers(&self, term: &str) -> KhataResult<Vec<Customer>> {
        let customers = self.storage.load_customers().await?;
        Ok(filter_customers(customers, term))
    }

    /// Delete a customer; returns whether one was removed
    ///
    /// Transactions of the customer are left in place.
    pub async fn delete_customer(&mut self, customer_id: &str) -> KhataResult<bool> {
        let mut customers = self.storage.load_customers().await?;
        if !remove_by_id(&mut customers, customer_id) {
            warn!(customer_id, "delete requested for unknown customer");
            return Ok(false);
        }

        self.storage.store_customers(&customers).await?;
        info!(customer_id, "customer deleted");
        Ok(true)
    }
}

/// Search filter shared by the manager and the facade
pub fn filter_customers(customers: Vec<Customer>, term: &str) -> Vec<Customer> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return customers;
    }

    customers
        .into_iter()
        .filter(|c| c.name.to_lowercase().contains(&needle) || c.phone.contains(term.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    #[tokio::test]
    async fn add_update_delete_round() {
        let mut manager = CustomerManager::new(MemoryStorage::new());

        let customer = manager
            .add_customer("  Ramesh ".to_string(), "9876543210".to_string())
            .await
            .unwrap();
        assert_eq!(customer.name, "Ramesh");

        let mut edited = customer.clone();
        edited.address = Some("Ward 4".to_string());
        let updated = manager.update_customer(&edited).await.unwrap();
        assert_eq!(updated.address.as_deref(), Some("Ward 4"));
        assert!(updated.updated_at >= customer.updated_at);
        assert_eq!(manager.list_customers().await.unwrap().len(), 1);

        assert!(manager.delete_customer(&customer.id).await.unwrap());
        assert!(!manager.delete_customer(&customer.id).await.unwrap());
        assert!(manager.get_customer(&customer.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let mut manager = CustomerManager::new(MemoryStorage::new());
        let result = manager.add_customer("   ".to_string(), String::new()).await;
        assert!(matches!(result, Err(KhataError::Validation(_))));
    }

    #[tokio::test]
    async fn strict_validator_checks_phone() {
        let mut manager = CustomerManager::with_validator(
            MemoryStorage::new(),
            Box::new(StrictCustomerValidator),
        );
        assert!(manager
            .add_customer("Lata".to_string(), "12".to_string())
            .await
            .is_err());
        assert!(manager
            .add_customer("Lata".to_string(), "9812345678".to_string())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn update_of_unknown_customer_fails() {
        let mut manager = CustomerManager::new(MemoryStorage::new());
        let stranger = Customer::new("nope".to_string(), "Nobody".to_string(), String::new());
        assert!(matches!(
            manager.update_customer(&stranger).await,
            Err(KhataError::CustomerNotFound(_))
        ));
    }

    #[tokio::test]
    async fn required_lookup_reports_missing_customers() {
        let mut manager = CustomerManager::new(MemoryStorage::new());
        let customer = manager
            .add_customer("Hema".to_string(), String::new())
            .await
            .unwrap();

        let found = manager.get_customer_required(&customer.id).await.unwrap();
        assert_eq!(found.name, "Hema");
        assert!(matches!(
            manager.get_customer_required("missing").await,
            Err(KhataError::CustomerNotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn search_matches_name_or_phone() {
        let customers = vec![
            Customer::new("1".into(), "Sunita Devi".into(), "9000011111".into()),
            Customer::new("2".into(), "Arjun".into(), "9822200000".into()),
        ];

        let by_name = filter_customers(customers.clone(), "sunita");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "1");

        let by_phone = filter_customers(customers.clone(), "98222");
        assert_eq!(by_phone[0].id, "2");

        assert_eq!(filter_customers(customers, "").len(), 2);
    }
}
