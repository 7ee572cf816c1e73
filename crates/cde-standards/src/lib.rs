#![deny(unsafe_code)]

pub mod annotations;
pub mod config;
mod definitions;
pub mod error;
pub mod harmonized;
pub mod hash;
pub mod instruments;
pub mod paths;
pub mod registry;
pub mod tags;
pub mod text;

use cde_model::SchemaError;

pub use crate::annotations::LabelAnnotations;
pub use crate::config::EngineConfig;
pub use crate::error::StandardsError;
pub use crate::harmonized::HarmonizedTable;
pub use crate::instruments::{Instrument, InstrumentCatalog};
pub use crate::paths::{ConceptPathTable, PathMatch};
pub use crate::registry::{SchemaRegistry, SlotDefinition, UndefinedCombination};
pub use crate::tags::ConceptTagTable;

/// The registry together with every lookup table derived from it.
///
/// Immutable once built. A schema change means building a new value, never
/// mutating this one.
#[derive(Debug, Clone)]
pub struct Standards {
    pub registry: SchemaRegistry,
    pub harmonized: HarmonizedTable,
    pub tags: ConceptTagTable,
    pub instruments: InstrumentCatalog,
    pub paths: ConceptPathTable,
    pub annotations: LabelAnnotations,
}

impl Standards {
    /// Builds the built-in registry and checks every table against it.
    pub fn load() -> Result<Self, SchemaError> {
        let registry = SchemaRegistry::standard()?;
        let harmonized = HarmonizedTable::standard(&registry)?;
        let tags = ConceptTagTable::standard(&registry)?;
        let instruments = InstrumentCatalog::standard()?;
        let paths = ConceptPathTable::standard()?;
        let annotations = LabelAnnotations::standard()?;
        tracing::debug!(
            harmonized = harmonized.len(),
            tags = tags.len(),
            path_prefixes = paths.prefixes().len(),
            class_keywords = annotations.class_keywords(),
            curie_keywords = annotations.curie_keywords(),
            "lookup tables validated"
        );
        Ok(Self {
            registry,
            harmonized,
            tags,
            instruments,
            paths,
            annotations,
        })
    }

    pub fn fingerprint(&self) -> &str {
        self.registry.fingerprint()
    }
}
