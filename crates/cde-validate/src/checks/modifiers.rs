//! Re-check of every emitted modifier against the registry.

use cde_model::{Severity, ValidationRule, VariableMapping, Violation};
use cde_standards::SchemaRegistry;

/// Modifier axes outside the slot's definition and clinically undefined
/// combinations. Values are closed per axis by the modifier type itself.
pub fn check(registry: &SchemaRegistry, mapping: &VariableMapping) -> Vec<Violation> {
    let (Some(slot), Some(modifiers)) = (mapping.slot_id(), mapping.modifiers()) else {
        return Vec::new();
    };
    let violation = |rule, message| Violation {
        rule,
        severity: Severity::Error,
        mapping: Some(mapping.reference()),
        message,
    };

    let definition = match registry.definition(slot) {
        Ok(definition) => definition,
        Err(error) => {
            return vec![violation(
                ValidationRule::ModifierOutOfRange,
                error.to_string(),
            )];
        }
    };

    let mut out = Vec::new();
    for modifier in modifiers.iter() {
        if !definition.accepts(modifier.axis()) {
            out.push(violation(
                ValidationRule::ModifierOutOfRange,
                format!("slot {slot} does not accept {modifier}"),
            ));
        }
    }
    if !out.is_empty() {
        return out;
    }

    if let Ok(Err(reason)) = registry.check_combination(slot, modifiers) {
        out.push(violation(
            ValidationRule::ModifierCombination,
            format!("{slot} with {modifiers}: {reason}"),
        ));
    }
    out
}
