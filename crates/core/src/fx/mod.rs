//! FX rates and functional-currency conversion.

pub mod table;
pub mod types;
pub mod validation;

pub use table::{convert_amount, convert_to_functional, LineConversion};
pub use types::FxRate;
pub use validation::FxValidationError;
