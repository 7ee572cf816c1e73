use cde_model::{MappingTarget, SchemaError, SourceVariable, StrategyName};

use super::{Candidate, Strategy};

/// Terminal tier: keeps the variable as dataset-local with its metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetLocalFallback;

impl DatasetLocalFallback {
    /// Never declines.
    pub fn candidate(&self, variable: &SourceVariable) -> Candidate {
        let copy = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Candidate::new(
            MappingTarget::DatasetLocal {
                label: copy(variable.label.as_deref()),
                units: copy(variable.units.as_deref()),
                concept_path: copy(variable.concept_path.as_deref()),
            },
            "no canonical equivalent",
        )
    }
}

impl Strategy for DatasetLocalFallback {
    fn name(&self) -> StrategyName {
        StrategyName::DatasetLocalFallback
    }

    fn attempt(&self, variable: &SourceVariable) -> Result<Option<Candidate>, SchemaError> {
        Ok(Some(self.candidate(variable)))
    }
}
