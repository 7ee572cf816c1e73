//! CLI library components for the sleep CDE mapper.

#![deny(unsafe_code)]

pub mod document;
pub mod input;
pub mod logging;
