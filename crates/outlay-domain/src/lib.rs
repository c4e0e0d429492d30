//! outlay-domain
//!
//! Pure domain models (Category, Expense, Budget, User, DateWindow).
//! No I/O, no storage. Only data types and core enums.

pub mod budget;
pub mod category;
pub mod common;
pub mod expense;
pub mod user;

pub use budget::*;
pub use category::*;
pub use common::*;
pub use expense::*;
pub use user::*;
