use std::sync::Arc;

use cde_model::{MappingTarget, Modifier, ModifierAxis, SchemaError, SourceVariable, StrategyName};
use cde_standards::Standards;

use super::{Candidate, Strategy};

/// Custodian-harmonized names: a configured prefix plus a remainder found
/// in the harmonized table. No parsing is attempted.
#[derive(Debug, Clone)]
pub struct HarmonizedPrefix {
    standards: Arc<Standards>,
    prefixes: Vec<String>,
}

impl HarmonizedPrefix {
    /// `prefixes` must already be lower-cased.
    pub fn new(standards: Arc<Standards>, prefixes: Vec<String>) -> Self {
        Self {
            standards,
            prefixes,
        }
    }
}

impl Strategy for HarmonizedPrefix {
    fn name(&self) -> StrategyName {
        StrategyName::HarmonizedPrefix
    }

    fn attempt(&self, variable: &SourceVariable) -> Result<Option<Candidate>, SchemaError> {
        let name = variable.name.trim().to_ascii_lowercase();
        for prefix in &self.prefixes {
            let Some(remainder) = name.strip_prefix(prefix.as_str()) else {
                continue;
            };
            if remainder.is_empty() {
                continue;
            }
            if let Some((slot, modifiers)) = self.standards.harmonized.get(remainder) {
                // Whole-night defaults stay open to a suffix; everything
                // else the harmonized name spells out is pinned.
                let pinned: Vec<ModifierAxis> = modifiers
                    .iter()
                    .filter(|modifier| !modifier.is_default_scope())
                    .map(Modifier::axis)
                    .collect();
                return Ok(Some(
                    Candidate::new(
                        MappingTarget::slot(slot, modifiers.clone()),
                        format!("harmonized name '{remainder}' under prefix '{prefix}'"),
                    )
                    .pinning(pinned),
                ));
            }
        }
        Ok(None)
    }

    fn matches_suffixed_names(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cde_model::CanonicalSlot;

    fn strategy(prefixes: &[&str]) -> HarmonizedPrefix {
        let standards = Arc::new(Standards::load().unwrap());
        HarmonizedPrefix::new(
            standards,
            prefixes.iter().map(|prefix| prefix.to_string()).collect(),
        )
    }

    #[test]
    fn test_prefix_and_table_hit() {
        let strategy = strategy(&["nsrr_"]);
        let candidate = strategy
            .attempt(&SourceVariable::new("shhs1", "NSRR_AHI_HP3U"))
            .unwrap()
            .unwrap();
        assert!(matches!(
            candidate.target,
            MappingTarget::CanonicalSlot {
                slot_id: CanonicalSlot::Ahi,
                ..
            }
        ));
    }

    #[test]
    fn test_declines_without_prefix_or_entry() {
        let strategy = strategy(&["nsrr_"]);
        for name in ["ahi_hp3u", "nsrr_", "nsrr_unknown_thing", "xnsrr_age"] {
            assert_eq!(
                strategy.attempt(&SourceVariable::new("shhs1", name)).unwrap(),
                None,
                "{name}"
            );
        }
    }

    #[test]
    fn test_named_axes_are_pinned() {
        let strategy = strategy(&["nsrr_"]);
        let staged = strategy
            .attempt(&SourceVariable::new("shhs1", "nsrr_pctdursp_s2"))
            .unwrap()
            .unwrap();
        assert!(staged.fixed.contains(&ModifierAxis::SleepStage));

        // all_sleep is a default scope, so a stage suffix may narrow it.
        let oximetry = strategy
            .attempt(&SourceVariable::new("shhs1", "nsrr_avglvlsa"))
            .unwrap()
            .unwrap();
        assert!(oximetry.fixed.is_empty());
    }

    #[test]
    fn test_configured_prefixes() {
        let strategy = strategy(&["h_", "harm_"]);
        assert!(
            strategy
                .attempt(&SourceVariable::new("cfs", "harm_bmi"))
                .unwrap()
                .is_some()
        );
        assert_eq!(
            strategy.attempt(&SourceVariable::new("cfs", "nsrr_bmi")).unwrap(),
            None
        );
    }
}
