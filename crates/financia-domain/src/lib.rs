//! financia-domain
//!
//! Pure domain models (Transaction, Category, summaries, insights).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod insight;
pub mod seed;
pub mod summary;
pub mod transaction;

pub use category::*;
pub use common::*;
pub use insight::*;
pub use seed::*;
pub use summary::*;
pub use transaction::*;
