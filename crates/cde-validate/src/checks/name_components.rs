//! Registry-level limit on slot identifier components.

use cde_model::{Severity, ValidationRule, Violation};
use cde_standards::SchemaRegistry;

/// One violation per slot identifier with more than `max` `_`-separated
/// components. Depends only on the registry, so a batch runs it once.
pub fn check(registry: &SchemaRegistry, max: usize) -> Vec<Violation> {
    registry
        .slots()
        .filter(|definition| definition.slot.name_components() > max)
        .map(|definition| Violation {
            rule: ValidationRule::SlotNameComponents,
            severity: Severity::Error,
            mapping: None,
            message: format!(
                "slot identifier {} has {} name components (limit {max})",
                definition.slot,
                definition.slot.name_components()
            ),
        })
        .collect()
}
