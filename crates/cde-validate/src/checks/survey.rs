use cde_model::{MappingTarget, Severity, ValidationRule, VariableMapping, Violation};

/// A survey item response must name its instrument and its item.
pub fn check(mapping: &VariableMapping) -> Option<Violation> {
    let MappingTarget::SurveyItemResponse {
        instrument_id,
        item_id,
        ..
    } = &mapping.target
    else {
        return None;
    };
    let message = if instrument_id.trim().is_empty() {
        format!("survey response for item '{}' has no instrument_id", item_id.trim())
    } else if item_id.trim().is_empty() {
        format!("{instrument_id} survey response has no item_id")
    } else {
        return None;
    };
    Some(Violation {
        rule: ValidationRule::SurveyItemMissing,
        severity: Severity::Error,
        mapping: Some(mapping.reference()),
        message,
    })
}
