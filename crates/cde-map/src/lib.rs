#![deny(unsafe_code)]

//! Variable mapping engine: compositional tag parsing, the ordered strategy
//! chain and batch resolution.

pub mod error;
pub mod parser;
pub mod resolver;
pub mod strategy;

pub use error::ResolveError;
pub use parser::{ParseReport, ParsedTag, TagParser};
pub use resolver::{BatchOptions, BatchOutcome, Resolution, Resolver};
pub use strategy::{Candidate, Strategy};
