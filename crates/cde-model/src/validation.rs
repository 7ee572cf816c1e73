use serde::{Deserialize, Serialize};

use crate::mapping::MappingRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Batch-level checks run after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    SlotCeiling,
    SlotCountBand,
    SlotNameComponents,
    SurveyItemMissing,
    ModifierOutOfRange,
    ModifierCombination,
    PartialBatch,
}

impl ValidationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SlotCeiling => "slot_ceiling",
            Self::SlotCountBand => "slot_count_band",
            Self::SlotNameComponents => "slot_name_components",
            Self::SurveyItemMissing => "survey_item_missing",
            Self::ModifierOutOfRange => "modifier_out_of_range",
            Self::ModifierCombination => "modifier_combination",
            Self::PartialBatch => "partial_batch",
        }
    }
}

impl std::fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured finding. Never fatal on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: ValidationRule,
    pub severity: Severity,
    /// Offending mapping; absent for batch- or registry-level findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<MappingRef>,
    pub message: String,
}

/// Aggregate validation result for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// False when the validated batch was cancelled part-way.
    pub complete: bool,
    /// Distinct canonical slots referenced by the batch.
    pub distinct_slots: usize,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|violation| violation.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|violation| violation.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn by_rule(&self, rule: ValidationRule) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |violation| violation.rule == rule)
    }
}

/// Whether every record of a batch was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchCompleteness {
    Complete,
    /// Cancelled part-way: `resolved` of `total` records were processed.
    Partial { resolved: usize, total: usize },
}

impl BatchCompleteness {
    pub fn from_counts(resolved: usize, total: usize) -> Self {
        if resolved >= total {
            Self::Complete
        } else {
            Self::Partial { resolved, total }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}
