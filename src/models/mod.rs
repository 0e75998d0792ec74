pub mod enums;
pub mod prescription;
pub mod print_doc;

pub use enums::*;
pub use prescription::*;
pub use print_doc::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid {field} value: '{value}'")]
    InvalidEnum { field: String, value: String },
}
