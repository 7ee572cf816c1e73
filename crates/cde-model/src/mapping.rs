use serde::{Deserialize, Serialize};

use crate::enums::{BdchmClass, ConfidenceLevel, StrategyName};
use crate::modifiers::ModifierSet;
use crate::slots::CanonicalSlot;

/// What a source variable was mapped to.
///
/// Serialized with a `target_class` discriminator; the class names are part
/// of the output contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target_class")]
pub enum MappingTarget {
    #[serde(rename = "CanonicalSlot")]
    CanonicalSlot {
        slot_id: CanonicalSlot,
        #[serde(default)]
        modifiers: ModifierSet,
    },
    #[serde(rename = "SurveyItemResponse")]
    SurveyItemResponse {
        instrument_id: String,
        item_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        item_keyword: Option<String>,
    },
    /// No canonical equivalent; source metadata is kept for manual curation.
    #[serde(rename = "dataset_local")]
    DatasetLocal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        units: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        concept_path: Option<String>,
    },
}

impl MappingTarget {
    pub fn slot(slot_id: CanonicalSlot, modifiers: ModifierSet) -> Self {
        Self::CanonicalSlot { slot_id, modifiers }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Self::CanonicalSlot { .. } => "CanonicalSlot",
            Self::SurveyItemResponse { .. } => "SurveyItemResponse",
            Self::DatasetLocal { .. } => "dataset_local",
        }
    }
}

/// The single mapping record emitted for one source variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableMapping {
    pub source_dataset: String,
    pub source_variable: String,
    #[serde(flatten)]
    pub target: MappingTarget,
    pub confidence: ConfidenceLevel,
    pub strategy: StrategyName,
    /// Strategies tried, in order, before `strategy` produced a candidate.
    #[serde(default)]
    pub declined: Vec<StrategyName>,
    /// Harmonized-model element suggested by the source label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bdchm_class: Option<BdchmClass>,
    /// Ontology term (OBA or OMOP) suggested by the source label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curie: Option<String>,
}

impl VariableMapping {
    pub fn slot_id(&self) -> Option<CanonicalSlot> {
        match &self.target {
            MappingTarget::CanonicalSlot { slot_id, .. } => Some(*slot_id),
            _ => None,
        }
    }

    pub fn modifiers(&self) -> Option<&ModifierSet> {
        match &self.target {
            MappingTarget::CanonicalSlot { modifiers, .. } => Some(modifiers),
            _ => None,
        }
    }

    pub fn is_dataset_local(&self) -> bool {
        matches!(self.target, MappingTarget::DatasetLocal { .. })
    }

    pub fn reference(&self) -> MappingRef {
        MappingRef {
            dataset: self.source_dataset.clone(),
            variable: self.source_variable.clone(),
        }
    }
}

/// Identifies the source variable behind a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingRef {
    pub dataset: String,
    pub variable: String,
}

impl std::fmt::Display for MappingRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.dataset, self.variable)
    }
}
