//! Borrower entries, input merging and validation

mod data;
pub mod loader;
mod validation;

pub use data::{BorrowerProfile, CalculatorInputs};
pub use loader::{load_borrowers, load_borrowers_from_reader, DEFAULT_BORROWERS_PATH};
pub use validation::{validate_inputs, ValidationError};
