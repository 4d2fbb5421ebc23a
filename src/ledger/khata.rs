//! Main khata orchestrator that coordinates the shop, customers, entries and expenses

use bigdecimal::BigDecimal;
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::KhataConfig;
use crate::ledger::balance::Balance;
use crate::ledger::customer::filter_customers;
use crate::ledger::reminder::compose_reminder;
use crate::ledger::{CustomerManager, ExpenseManager, TransactionBuilder, TransactionManager};
use crate::reports::*;
use crate::traits::*;
use crate::types::*;
use crate::utils::json_storage::JsonFileStorage;
use crate::utils::validation::{parse_amount, validate_notes, validate_shop_profile};

/// One customer's page in the khata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerLedger {
    pub customer: Customer,
    /// Entries of the customer, newest first
    pub transactions: Vec<Transaction>,
    pub balance: Balance,
}

/// Main khata system that orchestrates all bookkeeping operations
///
/// Nothing is cached: every view is recomputed from the store on read.
pub struct Khata<S: KhataStorage> {
    storage: S,
    config: KhataConfig,
    customer_manager: CustomerManager<S>,
    transaction_manager: TransactionManager<S>,
    expense_manager: ExpenseManager<S>,
}

impl Khata<JsonFileStorage> {
    /// Open the JSON store described by `config`
    pub fn open(config: KhataConfig) -> Self {
        let storage = JsonFileStorage::from_config(&config);
        info!(data_dir = %storage.dir().display(), "opening khata");
        Self::with_config(storage, config)
    }
}

impl<S: KhataStorage + Clone> Khata<S> {
    /// Create a new khata with the given storage backend
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, KhataConfig::default())
    }

    /// Create a new khata with explicit configuration
    pub fn with_config(storage: S, config: KhataConfig) -> Self {
        Self {
            customer_manager: CustomerManager::new(storage.clone()),
            transaction_manager: TransactionManager::new(storage.clone()),
            expense_manager: ExpenseManager::new(storage.clone()),
            storage,
            config,
        }
    }

    /// Create a new khata with custom validators
    pub fn with_validators(
        storage: S,
        customer_validator: Box<dyn CustomerValidator>,
        transaction_validator: Box<dyn TransactionValidator>,
    ) -> Self {
        Self {
            customer_manager: CustomerManager::with_validator(storage.clone(), customer_validator),
            transaction_manager: TransactionManager::with_validator(
                storage.clone(),
                transaction_validator,
            ),
            expense_manager: ExpenseManager::new(storage.clone()),
            storage,
            config: KhataConfig::default(),
        }
    }

    pub fn config(&self) -> &KhataConfig {
        &self.config
    }

    // Shop operations
    /// Initialise the shop; fails if a profile already exists
    pub async fn setup_shop(&mut self, profile: ShopProfile) -> KhataResult<ShopProfile> {
        validate_shop_profile(&profile)?;
        if self.storage.load_shop_profile().await?.is_some() {
            return Err(KhataError::Validation(
                "Shop is already set up".to_string(),
            ));
        }

        self.storage.store_shop_profile(&profile).await?;
        info!(shop = %profile.name, owner = %profile.owner_name, "shop set up");
        Ok(profile)
    }

    /// Edit the shop profile from settings
    pub async fn update_shop_profile(&mut self, profile: ShopProfile) -> KhataResult<ShopProfile> {
        validate_shop_profile(&profile)?;
        if self.storage.load_shop_profile().await?.is_none() {
            return Err(KhataError::ShopNotInitialized);
        }

        self.storage.store_shop_profile(&profile).await?;
        info!(shop = %profile.name, "shop profile updated");
        Ok(profile)
    }

    pub async fn shop_profile(&self) -> KhataResult<Option<ShopProfile>> {
        self.storage.load_shop_profile().await
    }

    /// Whether the shop profile exists
    pub async fn is_setup(&self) -> KhataResult<bool> {
        Ok(self.storage.load_shop_profile().await?.is_some())
    }

    /// Currency of the shop, or the configured default before setup
    pub async fn currency(&self) -> KhataResult<String> {
        Ok(self
            .storage
            .load_shop_profile()
            .await?
            .map(|p| p.currency)
            .unwrap_or_else(|| self.config.default_currency.clone()))
    }

    // Settings operations
    /// Saved settings, or the defaults (light theme, sound on)
    pub async fn settings(&self) -> KhataResult<AppSettings> {
        Ok(self.storage.load_settings().await?.unwrap_or_default())
    }

    pub async fn save_settings(&mut self, settings: &AppSettings) -> KhataResult<()> {
        self.storage.store_settings(settings).await
    }

    /// Switch between light and dark theme
    pub async fn toggle_theme(&mut self) -> KhataResult<AppSettings> {
        let mut settings = self.settings().await?;
        settings.theme = match settings.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.save_settings(&settings).await?;
        Ok(settings)
    }

    /// Turn sound effects on or off
    pub async fn toggle_sound(&mut self) -> KhataResult<AppSettings> {
        let mut settings = self.settings().await?;
        settings.sound_enabled = !settings.sound_enabled;
        self.save_settings(&settings).await?;
        Ok(settings)
    }

    // Customer operations
    /// Add a new customer
    pub async fn add_customer(&mut self, name: String, phone: String) -> KhataResult<Customer> {
        self.customer_manager.add_customer(name, phone).await
    }

    /// Update a customer
    pub async fn update_customer(&mut self, customer: &Customer) -> KhataResult<Customer> {
        self.customer_manager.update_customer(customer).await
    }

    /// Delete a customer; their entries stay and show as "Unknown" in reports
    pub async fn delete_customer(&mut self, customer_id: &str) -> KhataResult<bool> {
        self.customer_manager.delete_customer(customer_id).await
    }

    /// Get a customer by ID
    pub async fn get_customer(&self, customer_id: &str) -> KhataResult<Option<Customer>> {
        self.customer_manager.get_customer(customer_id).await
    }

    /// List all customers
    pub async fn list_customers(&self) -> KhataResult<Vec<Customer>> {
        self.customer_manager.list_customers().await
    }

    /// Search customers by name or phone
    pub async fn search_customers(&self, term: &str) -> KhataResult<Vec<Customer>> {
        self.customer_manager.search_customers(term).await
    }

    /// Customers matching `term` (all when empty) with their balances
    pub async fn customers_with_balances(&self, term: &str) -> KhataResult<Vec<CustomerBalance>> {
        let customers = filter_customers(self.customer_manager.list_customers().await?, term);
        let transactions = self.transaction_manager.list_transactions().await?;
        Ok(customer_balances(&customers, &transactions))
    }

    /// The ledger page of one customer
    ///
    /// An unknown id yields `None`, letting the caller fall back to the
    /// customer list.
    pub async fn customer_ledger(&self, customer_id: &str) -> KhataResult<Option<CustomerLedger>> {
        let Some(customer) = self.customer_manager.get_customer(customer_id).await? else {
            debug!(customer_id, "ledger requested for unknown customer");
            return Ok(None);
        };

        let transactions = self
            .transaction_manager
            .customer_transactions(customer_id)
            .await?;
        let balance = crate::ledger::balance::compute_balance(&transactions);

        Ok(Some(CustomerLedger {
            customer,
            transactions,
            balance,
        }))
    }

    // Transaction operations
    /// Record a new transaction
    pub async fn record_transaction(
        &mut self,
        transaction: Transaction,
    ) -> KhataResult<Transaction> {
        self.transaction_manager.record_transaction(transaction).await
    }

    /// Record credit given to a customer
    pub async fn record_give(
        &mut self,
        customer_id: &str,
        amount: BigDecimal,
        date: Option<Timestamp>,
        notes: Option<String>,
    ) -> KhataResult<Transaction> {
        self.record_entry(customer_id, TransactionType::Give, amount, date, notes)
            .await
    }

    /// Record a payment received from a customer
    pub async fn record_get(
        &mut self,
        customer_id: &str,
        amount: BigDecimal,
        date: Option<Timestamp>,
        notes: Option<String>,
    ) -> KhataResult<Transaction> {
        self.record_entry(customer_id, TransactionType::Get, amount, date, notes)
            .await
    }

    /// Record an entry from raw form input; the amount text is parsed and must be positive
    pub async fn record_entry_input(
        &mut self,
        customer_id: &str,
        transaction_type: TransactionType,
        amount_input: &str,
        date: Option<Timestamp>,
        notes: Option<String>,
    ) -> KhataResult<Transaction> {
        let amount = parse_amount(amount_input)?;
        self.record_entry(customer_id, transaction_type, amount, date, notes)
            .await
    }

    async fn record_entry(
        &mut self,
        customer_id: &str,
        transaction_type: TransactionType,
        amount: BigDecimal,
        date: Option<Timestamp>,
        notes: Option<String>,
    ) -> KhataResult<Transaction> {
        let notes = notes.unwrap_or_default();
        validate_notes(&notes)?;

        let transaction =
            TransactionBuilder::new(customer_id.to_string(), transaction_type, amount)
                .date(date.unwrap_or_else(now_millis))
                .notes(notes)
                .build()?;

        self.transaction_manager
            .record_transaction(transaction)
            .await
    }

    /// Get a transaction by ID
    pub async fn get_transaction(&self, transaction_id: &str) -> KhataResult<Option<Transaction>> {
        self.transaction_manager
            .get_transaction(transaction_id)
            .await
    }

    /// Delete a transaction; unknown ids are ignored
    pub async fn delete_transaction(&mut self, transaction_id: &str) -> KhataResult<bool> {
        self.transaction_manager
            .delete_transaction(transaction_id)
            .await
    }

    /// Current balance of a customer
    pub async fn customer_balance(&self, customer_id: &str) -> KhataResult<Balance> {
        self.transaction_manager.customer_balance(customer_id).await
    }

    // Expense operations
    /// Record a shop expense dated now
    pub async fn add_expense(
        &mut self,
        category: ExpenseCategory,
        amount: BigDecimal,
        notes: Option<String>,
    ) -> KhataResult<Expense> {
        self.expense_manager
            .add_expense(category, amount, notes, now_millis())
            .await
    }

    /// Record a shop expense from raw form input
    pub async fn add_expense_input(
        &mut self,
        category: ExpenseCategory,
        amount_input: &str,
        notes: Option<String>,
    ) -> KhataResult<Expense> {
        let amount = parse_amount(amount_input)?;
        self.add_expense(category, amount, notes).await
    }

    /// Record an expense with an explicit date
    pub async fn record_expense(&mut self, expense: Expense) -> KhataResult<Expense> {
        self.expense_manager.record_expense(expense).await
    }

    /// All expenses, newest first
    pub async fn list_expenses(&self) -> KhataResult<Vec<Expense>> {
        self.expense_manager.list_expenses().await
    }

    /// Spend per category within a window
    pub async fn expense_breakdown(&self, window: TimeWindow) -> KhataResult<Vec<CategoryTotal>> {
        let expenses = self.expense_manager.list_expenses().await?;
        Ok(expense_breakdown(filter_by_time_window(
            &expenses,
            window,
            &Local::now(),
        )))
    }

    /// Total spend within a window
    pub async fn total_expenses(&self, window: TimeWindow) -> KhataResult<BigDecimal> {
        let expenses = self.expense_manager.list_expenses().await?;
        Ok(total_expenses(filter_by_time_window(
            &expenses,
            window,
            &Local::now(),
        )))
    }

    // Dashboard and reporting operations
    /// Dashboard totals as of now
    pub async fn dashboard(&self) -> KhataResult<DashboardStats> {
        self.dashboard_at(&Local::now()).await
    }

    /// Dashboard totals as of `now`
    pub async fn dashboard_at<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> KhataResult<DashboardStats> {
        let customers = self.customer_manager.list_customers().await?;
        let transactions = self.transaction_manager.list_transactions().await?;

        let stats = aggregate_dashboard(&customers, &transactions, now);
        debug!(
            receivable = %stats.total_receivable,
            payable = %stats.total_payable,
            today = %stats.today_collection,
            "dashboard computed"
        );
        Ok(stats)
    }

    /// Most recent entries for the dashboard, `limit` defaulting to the configured size
    pub async fn recent_transactions(
        &self,
        limit: Option<usize>,
    ) -> KhataResult<Vec<RecentTransaction>> {
        let customers = self.customer_manager.list_customers().await?;
        let transactions = self.transaction_manager.list_transactions().await?;
        Ok(recent_transactions(
            &customers,
            &transactions,
            limit.unwrap_or(self.config.recent_limit),
        ))
    }

    /// Customers with non-zero balances, largest first
    pub async fn outstanding(&self) -> KhataResult<Vec<CustomerBalance>> {
        let customers = self.customer_manager.list_customers().await?;
        let transactions = self.transaction_manager.list_transactions().await?;
        Ok(outstanding_list(&customers, &transactions))
    }

    /// Day book for a window as of now
    pub async fn day_book(&self, window: TimeWindow) -> KhataResult<DayBook> {
        self.day_book_at(window, &Local::now()).await
    }

    /// Day book for a window as of `now`
    pub async fn day_book_at<Tz: TimeZone>(
        &self,
        window: TimeWindow,
        now: &DateTime<Tz>,
    ) -> KhataResult<DayBook> {
        let customers = self.customer_manager.list_customers().await?;
        let transactions = self.transaction_manager.list_transactions().await?;
        Ok(day_book(&customers, &transactions, window, now))
    }

    /// Outstanding balances report
    pub async fn outstanding_report(&self) -> KhataResult<OutstandingReport> {
        Ok(outstanding_report(&self.outstanding().await?))
    }

    /// Expense report for a window as of now
    pub async fn expense_report(&self, window: TimeWindow) -> KhataResult<ExpenseReport> {
        self.expense_report_at(window, &Local::now()).await
    }

    /// Expense report for a window as of `now`
    pub async fn expense_report_at<Tz: TimeZone>(
        &self,
        window: TimeWindow,
        now: &DateTime<Tz>,
    ) -> KhataResult<ExpenseReport> {
        let expenses = self.expense_manager.list_expenses().await?;
        Ok(expense_report(&expenses, window, now))
    }

    /// Payment reminder text for a customer; `None` if the customer is unknown
    pub async fn reminder_message(&self, customer_id: &str) -> KhataResult<Option<String>> {
        let shop = self
            .storage
            .load_shop_profile()
            .await?
            .ok_or(KhataError::ShopNotInitialized)?;

        let Some(ledger) = self.customer_ledger(customer_id).await? else {
            return Ok(None);
        };

        Ok(Some(compose_reminder(
            &shop,
            &ledger.customer,
            &ledger.balance,
            &Local::now(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    fn profile() -> ShopProfile {
        ShopProfile::new(
            "Verma Traders".to_string(),
            "Sanjay Verma".to_string(),
            "9999900000".to_string(),
            "Main Bazaar".to_string(),
        )
    }

    #[tokio::test]
    async fn test_khata_basic_operations() {
        let mut khata = Khata::new(MemoryStorage::new());
        assert!(!khata.is_setup().await.unwrap());

        khata.setup_shop(profile()).await.unwrap();
        assert!(khata.is_setup().await.unwrap());
        assert!(khata.setup_shop(profile()).await.is_err());

        let customer = khata
            .add_customer("Deepak".to_string(), "9876500000".to_string())
            .await
            .unwrap();

        khata
            .record_give(
                &customer.id,
                BigDecimal::from(1000),
                Some(1_000),
                Some("flour".to_string()),
            )
            .await
            .unwrap();
        khata
            .record_entry_input(&customer.id, TransactionType::Get, "250", Some(2_000), None)
            .await
            .unwrap();

        let ledger = khata.customer_ledger(&customer.id).await.unwrap().unwrap();
        assert_eq!(ledger.balance, Balance::Receivable(BigDecimal::from(750)));
        assert_eq!(ledger.transactions[0].transaction_type, TransactionType::Get);

        let stats = khata.dashboard().await.unwrap();
        assert_eq!(stats.total_receivable, BigDecimal::from(750));
        assert_eq!(stats.net_balance, BigDecimal::from(750));
    }

    #[tokio::test]
    async fn unknown_customer_ledger_is_none() {
        let khata = Khata::new(MemoryStorage::new());
        assert!(khata.customer_ledger("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_amount_input_never_reaches_the_store() {
        let mut khata = Khata::new(MemoryStorage::new());
        let customer = khata
            .add_customer("Farah".to_string(), String::new())
            .await
            .unwrap();

        for bad in ["", "abc", "0", "-5"] {
            assert!(khata
                .record_entry_input(&customer.id, TransactionType::Give, bad, None, None)
                .await
                .is_err());
        }
        assert!(khata.day_book(TimeWindow::All).await.unwrap().rows.is_empty());
    }

    #[tokio::test]
    async fn settings_toggle_and_persist() {
        let mut khata = Khata::new(MemoryStorage::new());
        assert_eq!(khata.settings().await.unwrap(), AppSettings::default());

        let settings = khata.toggle_theme().await.unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        let settings = khata.toggle_sound().await.unwrap();
        assert!(!settings.sound_enabled);

        let reloaded = khata.settings().await.unwrap();
        assert_eq!(reloaded.theme, Theme::Dark);
        assert!(!reloaded.sound_enabled);
    }

    #[tokio::test]
    async fn reminder_requires_shop_and_customer() {
        let mut khata = Khata::new(MemoryStorage::new());
        let customer = khata
            .add_customer("Nisha".to_string(), String::new())
            .await
            .unwrap();
        assert!(matches!(
            khata.reminder_message(&customer.id).await,
            Err(KhataError::ShopNotInitialized)
        ));

        khata.setup_shop(profile()).await.unwrap();
        khata
            .record_give(&customer.id, BigDecimal::from(300), None, None)
            .await
            .unwrap();

        let text = khata.reminder_message(&customer.id).await.unwrap().unwrap();
        assert!(text.contains("Namaste Nisha"));
        assert!(text.contains("₹300"));
        assert!(khata.reminder_message("ghost").await.unwrap().is_none());
    }
}
