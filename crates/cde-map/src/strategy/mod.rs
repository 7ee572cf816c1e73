//! Matching strategies, one per priority tier.

mod compositional;
mod concept_tag;
mod fallback;
mod harmonized;
mod instrument;
mod similarity;

use std::collections::BTreeSet;

use cde_model::{MappingTarget, ModifierAxis, SchemaError, SourceVariable, StrategyName};

pub use compositional::CompositionalParse;
pub use concept_tag::ConceptTag;
pub use fallback::DatasetLocalFallback;
pub use harmonized::HarmonizedPrefix;
pub use instrument::InstrumentItem;
pub use similarity::{PathLabelSimilarity, SimilarityScore};

/// A strategy's proposed target for one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub target: MappingTarget,
    /// Human-readable account of what matched.
    pub note: String,
    /// Axes the matched name itself determines; a suffix may not change them.
    pub fixed: BTreeSet<ModifierAxis>,
}

impl Candidate {
    pub fn new(target: MappingTarget, note: impl Into<String>) -> Self {
        Self {
            target,
            note: note.into(),
            fixed: BTreeSet::new(),
        }
    }

    pub fn pinning(mut self, axes: impl IntoIterator<Item = ModifierAxis>) -> Self {
        self.fixed.extend(axes);
        self
    }
}

/// One tier of the resolution chain.
///
/// `Ok(None)` means the strategy declines and the next one is tried. An
/// `Err` is a schema inconsistency and aborts the batch.
pub trait Strategy: Send + Sync {
    fn name(&self) -> StrategyName;

    fn attempt(&self, variable: &SourceVariable) -> Result<Option<Candidate>, SchemaError>;

    /// Whether the resolver retries a declined name with its stage and
    /// position suffixes peeled off, matching on the name alone.
    fn matches_suffixed_names(&self) -> bool {
        false
    }
}
