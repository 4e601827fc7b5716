//! Data access for expenses.
//!
//! [`Engine`] wraps the shared database connection and exposes one method per
//! operation. Each method runs exactly one statement and classifies the
//! outcome into an [`Expense`] or an [`EngineError`].

pub use error::EngineError;
pub use expenses::{ExpenseFields, Model as Expense};
pub use ops::{Engine, EngineBuilder};

mod error;
pub mod expenses;
mod ops;

type ResultEngine<T> = Result<T, EngineError>;
