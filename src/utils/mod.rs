//! Utility modules

pub mod collection;
pub mod format;
pub mod id;
pub mod json_storage;
pub mod memory_storage;
pub mod validation;

pub use collection::*;
pub use format::*;
pub use id::*;
pub use json_storage::*;
pub use memory_storage::*;
pub use validation::*;
