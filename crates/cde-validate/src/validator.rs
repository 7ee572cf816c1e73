//! Streaming mapping validator.
//!
//! Mappings are observed one at a time in any order; `finish` adds the
//! batch-level and registry-level findings. The validator never fails: every
//! finding becomes a [`Violation`] and the caller decides what to do with the
//! aggregate report.

use std::collections::BTreeSet;

use cde_model::{
    BatchCompleteness, CanonicalSlot, Severity, ValidationReport, ValidationRule, VariableMapping,
    Violation,
};
use cde_standards::SchemaRegistry;
use cde_standards::config::ValidationConfig;

use crate::checks;

#[derive(Debug)]
pub struct MappingValidator<'a> {
    registry: &'a SchemaRegistry,
    config: ValidationConfig,
    slots: BTreeSet<CanonicalSlot>,
    violations: Vec<Violation>,
    observed: usize,
}

impl<'a> MappingValidator<'a> {
    pub fn new(registry: &'a SchemaRegistry, config: &ValidationConfig) -> Self {
        Self {
            registry,
            config: config.clone(),
            slots: BTreeSet::new(),
            violations: Vec::new(),
            observed: 0,
        }
    }

    pub fn observe(&mut self, mapping: &VariableMapping) {
        self.observed += 1;
        if let Some(slot) = mapping.slot_id() {
            self.slots.insert(slot);
        }
        self.violations.extend(checks::survey::check(mapping));
        self.violations
            .extend(checks::modifiers::check(self.registry, mapping));
    }

    pub fn observed(&self) -> usize {
        self.observed
    }

    pub fn finish(self, completeness: BatchCompleteness) -> ValidationReport {
        let mut violations = self.violations;
        let distinct_slots = self.slots.len();

        violations.extend(checks::slot_count::check(distinct_slots, &self.config));
        violations.extend(checks::name_components::check(
            self.registry,
            self.config.max_name_components,
        ));
        if let BatchCompleteness::Partial { resolved, total } = completeness {
            violations.push(Violation {
                rule: ValidationRule::PartialBatch,
                severity: Severity::Warning,
                mapping: None,
                message: format!(
                    "batch was cancelled after {resolved} of {total} records; findings cover a partial batch"
                ),
            });
        }

        for violation in &violations {
            match &violation.mapping {
                Some(mapping) => tracing::warn!(
                    rule = %violation.rule,
                    mapping = %mapping,
                    "{}",
                    violation.message
                ),
                None => tracing::warn!(rule = %violation.rule, "{}", violation.message),
            }
        }
        tracing::info!(
            observed = self.observed,
            distinct_slots,
            violations = violations.len(),
            "validation finished"
        );

        ValidationReport {
            complete: completeness.is_complete(),
            distinct_slots,
            violations,
        }
    }
}

/// Runs the validator over a collected batch.
pub fn validate_batch(
    registry: &SchemaRegistry,
    config: &ValidationConfig,
    mappings: &[VariableMapping],
    completeness: BatchCompleteness,
) -> ValidationReport {
    let mut validator = MappingValidator::new(registry, config);
    for mapping in mappings {
        validator.observe(mapping);
    }
    validator.finish(completeness)
}
