//! Distinct-slot ceiling and target band.

use cde_model::{Severity, ValidationRule, Violation};
use cde_standards::config::ValidationConfig;

pub fn check(distinct_slots: usize, config: &ValidationConfig) -> Option<Violation> {
    let [lower, upper] = config.target_band;
    if distinct_slots > config.slot_ceiling {
        return Some(Violation {
            rule: ValidationRule::SlotCeiling,
            severity: Severity::Error,
            mapping: None,
            message: format!(
                "{distinct_slots} distinct canonical slots exceed the ceiling of {}",
                config.slot_ceiling
            ),
        });
    }
    if !(lower..=upper).contains(&distinct_slots) {
        return Some(Violation {
            rule: ValidationRule::SlotCountBand,
            severity: Severity::Warning,
            mapping: None,
            message: format!(
                "{distinct_slots} distinct canonical slots is outside the target band {lower}-{upper}"
            ),
        });
    }
    None
}
