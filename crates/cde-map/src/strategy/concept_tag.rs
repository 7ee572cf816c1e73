use std::sync::Arc;

use cde_model::{MappingTarget, ModifierSet, SchemaError, SourceVariable, StrategyName};
use cde_standards::Standards;

use super::{Candidate, Strategy};

/// Exact normalized lookup of the variable's tags, then its name, then its
/// label, in the concept-tag table.
#[derive(Debug, Clone)]
pub struct ConceptTag {
    standards: Arc<Standards>,
}

impl ConceptTag {
    pub fn new(standards: Arc<Standards>) -> Self {
        Self { standards }
    }
}

impl Strategy for ConceptTag {
    fn name(&self) -> StrategyName {
        StrategyName::ConceptTag
    }

    fn attempt(&self, variable: &SourceVariable) -> Result<Option<Candidate>, SchemaError> {
        let candidates = variable
            .tags
            .iter()
            .map(|tag| ("tag", tag.as_str()))
            .chain(std::iter::once(("name", variable.name.as_str())))
            .chain(variable.label_text().map(|label| ("label", label)));

        for (source, text) in candidates {
            if let Some(slot) = self.standards.tags.lookup(text) {
                return Ok(Some(Candidate::new(
                    MappingTarget::slot(slot, ModifierSet::new()),
                    format!("{source} '{}' is a concept tag for {slot}", text.trim()),
                )));
            }
        }
        Ok(None)
    }

    fn matches_suffixed_names(&self) -> bool {
        true
    }
}
