//! outlay-core
//!
//! Aggregation, validation and store logic for Outlay.
//! Depends on outlay-domain. No HTTP, no terminal I/O, no file access.

pub mod aggregation;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod time;
pub mod validation;


pub use aggregation::*;
pub use auth::{hash_password, verify_password, AuthService};
pub use dashboard::{Dashboard, StatusView};
pub use error::CoreError;
pub use format::CurrencyFormat;
pub use snapshot::{Command, Snapshot};
pub use storage::{ExpenseStorage, MemoryStorage, StorageBackend, UserStorage};
pub use store::ExpenseStore;
pub use time::{Clock, FixedClock, SystemClock};
pub use validation::*;
