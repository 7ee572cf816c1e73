#![deny(unsafe_code)]

pub mod checks;
mod validator;

pub use validator::{MappingValidator, validate_batch};
