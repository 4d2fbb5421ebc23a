//! Dashboard aggregates, time windows and report rows

pub mod rows;
pub mod summary;
pub mod window;

pub use rows::*;
pub use summary::*;
pub use window::*;
