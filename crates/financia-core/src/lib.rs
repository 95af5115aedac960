//! financia-core
//!
//! Business logic for Financia: the transaction store, aggregation engine,
//! category lookups and draft resolution.
//! Depends on financia-domain. No CLI, no terminal I/O, no network access.

pub mod category_service;
pub mod draft_service;
pub mod error;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod transaction_service;

pub use category_service::*;
pub use draft_service::*;
pub use error::CoreError;
pub use storage::{MemoryStorage, TransactionStorage};
pub use summary_service::*;
pub use time::{Clock, FixedClock};
pub use transaction_service::*;

#[cfg(test)]
mod tests;
