//! Independent validation checks.
//!
//! No check aborts another; each returns its own findings.

pub mod modifiers;
pub mod name_components;
pub mod slot_count;
pub mod survey;
