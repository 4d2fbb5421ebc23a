//! File-backed storage: one JSON document per collection

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

use crate::config::KhataConfig;
use crate::traits::*;
use crate::types::*;

/// Storage backend that keeps each collection in `<dir>/<prefix><key>.json`
///
/// Reads never fail: a missing, unreadable or corrupt file yields the empty
/// collection. Writes go to a temporary file that is renamed over the old
/// one, so a failed write leaves the previous contents in place.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
    prefix: String,
}

impl JsonFileStorage {
    /// Create a store rooted at `dir`, with every file name prefixed by `prefix`
    pub fn new(dir: impl AsRef<Path>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
        }
    }

    /// Create a store from loaded configuration
    pub fn from_config(config: &KhataConfig) -> Self {
        Self::new(&config.data_dir, config.storage_prefix.clone())
    }

    /// Directory holding the collection files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a collection
    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir
            .join(format!("{}{}.json", self.prefix, collection.key()))
    }

    fn read_value<T: DeserializeOwned>(&self, collection: Collection) -> Option<T> {
        let path = self.path_for(collection);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(%collection, "collection file absent, using empty default");
                return None;
            }
            Err(e) => {
                warn!(
                    %collection,
                    path = %path.display(),
                    error = %e,
                    "failed to read collection, using empty default"
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    %collection,
                    path = %path.display(),
                    error = %e,
                    "corrupt collection file, using empty default"
                );
                None
            }
        }
    }

    fn write_value<T: Serialize + ?Sized>(
        &self,
        collection: Collection,
        value: &T,
    ) -> KhataResult<()> {
        let path = self.path_for(collection);
        let result = self.replace_file(&path, value);
        if let Err(ref e) = result {
            error!(%collection, path = %path.display(), error = %e, "failed to write collection");
        }
        result
    }

    fn replace_file<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> KhataResult<()> {
        fs::create_dir_all(&self.dir)?;
        let bytes = serde_json::to_vec_pretty(value)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait]
impl KhataStorage for JsonFileStorage {
    async fn load_shop_profile(&self) -> KhataResult<Option<ShopProfile>> {
        Ok(self.read_value(Collection::ShopProfile))
    }

    async fn store_shop_profile(&mut self, profile: &ShopProfile) -> KhataResult<()> {
        self.write_value(Collection::ShopProfile, profile)
    }

    async fn load_settings(&self) -> KhataResult<Option<AppSettings>> {
        Ok(self.read_value(Collection::AppSettings))
    }

    async fn store_settings(&mut self, settings: &AppSettings) -> KhataResult<()> {
        self.write_value(Collection::AppSettings, settings)
    }

    async fn load_customers(&self) -> KhataResult<Vec<Customer>> {
        Ok(self.read_value(Collection::Customers).unwrap_or_default())
    }

    async fn store_customers(&mut self, customers: &[Customer]) -> KhataResult<()> {
        self.write_value(Collection::Customers, customers)
    }

    async fn load_transactions(&self) -> KhataResult<Vec<Transaction>> {
        Ok(self.read_value(Collection::Transactions).unwrap_or_default())
    }

    async fn store_transactions(&mut self, transactions: &[Transaction]) -> KhataResult<()> {
        self.write_value(Collection::Transactions, transactions)
    }

    async fn load_expenses(&self) -> KhataResult<Vec<Expense>> {
        Ok(self.read_value(Collection::Expenses).unwrap_or_default())
    }

    async fn store_expenses(&mut self, expenses: &[Expense]) -> KhataResult<()> {
        self.write_value(Collection::Expenses, expenses)
    }
}
