//! lib error definitions.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OptionsError>;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("unknown option '{}'", .0)]
    UnknownOption(String),

    #[error("option '{}' can not be changed after the column family is opened", .0)]
    ImmutableOption(String),

    #[error("option '{name}' expects a {expected} value")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("value {value} is out of range for option '{name}'")]
    OutOfRange { name: String, value: String },
}
