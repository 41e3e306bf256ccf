//! Expense records, their validation, and the query/persistence layer.

pub use error::EngineError;
pub use expenses::Expense;
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use validation::{ExpenseDraft, ExpenseFields, Field, FieldViolation, ValidationError};

mod error;
mod expenses;
mod money;
mod ops;
pub mod validation;

type ResultEngine<T> = Result<T, EngineError>;
