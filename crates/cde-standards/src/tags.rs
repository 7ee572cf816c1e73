//! Concept-tag table.
//!
//! Only concepts that are meaningful without modifier axes appear here; an
//! apnea-hypopnea index needs a scoring rule, so `ahi` is deliberately
//! absent.

use std::collections::BTreeMap;

use cde_model::{CanonicalSlot as S, ModifierSet, SchemaError};

use crate::registry::SchemaRegistry;
use crate::text::normalize_key;

const ENTRIES: &[(&str, S)] = &[
    ("age", S::Age),
    ("age at visit", S::Age),
    ("sex", S::Sex),
    ("gender", S::Sex),
    ("race", S::Race),
    ("ethnicity", S::Ethnicity),
    ("hispanic or latino", S::Ethnicity),
    ("education", S::EducationLevel),
    ("marital status", S::MaritalStatus),
    ("bmi", S::Bmi),
    ("body mass index", S::Bmi),
    ("height", S::HeightCm),
    ("weight", S::WeightKg),
    ("waist circumference", S::WaistCircumferenceCm),
    ("neck circumference", S::NeckCircumferenceCm),
    ("hip circumference", S::HipCircumferenceCm),
    ("systolic blood pressure", S::SystolicBpMmhg),
    ("diastolic blood pressure", S::DiastolicBpMmhg),
    ("total sleep time", S::TotalSleepTimeMin),
    ("sleep efficiency", S::SleepEfficiencyPct),
    ("sleep latency", S::SleepLatencyMin),
    ("sleep onset latency", S::SleepLatencyMin),
    ("rem latency", S::RemLatencyMin),
    ("waso", S::WasoMin),
    ("wake after sleep onset", S::WasoMin),
    ("time in bed", S::TimeInBedMin),
    ("arousal index", S::ArousalIndex),
    ("plm index", S::PlmIndex),
    ("periodic limb movement index", S::PlmIndex),
    ("epworth sleepiness scale total", S::EssTotal),
    ("ess total", S::EssTotal),
    ("psqi global score", S::PsqiGlobal),
    ("insomnia severity index", S::IsiTotal),
    ("isi total", S::IsiTotal),
    ("stop bang score", S::StopbangTotal),
    ("phq 9 total", S::Phq9Total),
    ("gad 7 total", S::Gad7Total),
    ("cesd total", S::CesdTotal),
    ("hypertension", S::HypertensionDx),
    ("diabetes", S::DiabetesDx),
    ("stroke", S::StrokeHx),
    ("heart failure", S::HeartFailureDx),
    ("copd", S::CopdDx),
    ("asthma", S::AsthmaDx),
    ("narcolepsy", S::NarcolepsyDx),
    ("restless legs syndrome", S::RlsDx),
    ("pack years", S::PackYears),
    ("fasting glucose", S::GlucoseFastingMgdl),
    ("hba1c", S::Hba1cPct),
    ("hemoglobin a1c", S::Hba1cPct),
    ("total cholesterol", S::CholesterolTotalMgdl),
    ("hdl cholesterol", S::HdlCholesterolMgdl),
    ("ldl cholesterol", S::LdlCholesterolMgdl),
    ("triglycerides", S::TriglyceridesMgdl),
    ("crp", S::CrpMgl),
    ("c reactive protein", S::CrpMgl),
    ("creatinine", S::CreatinineMgdl),
    ("fev1", S::Fev1L),
    ("fvc", S::FvcL),
    ("fev1 fvc ratio", S::Fev1FvcRatio),
    ("visit number", S::VisitNumber),
    ("randomization date", S::RandomizationDate),
    ("study date", S::PsgStudyDate),
];

/// Normalized tag to slot. Every entry carries an empty modifier set.
#[derive(Debug, Clone)]
pub struct ConceptTagTable {
    entries: BTreeMap<String, S>,
}

impl ConceptTagTable {
    pub fn standard(registry: &SchemaRegistry) -> Result<Self, SchemaError> {
        Self::from_entries(registry, ENTRIES)
    }

    pub fn from_entries(
        registry: &SchemaRegistry,
        entries: &[(&str, S)],
    ) -> Result<Self, SchemaError> {
        let empty = ModifierSet::new();
        let mut map = BTreeMap::new();
        for (tag, slot) in entries {
            if let Err(reason) = registry.check_combination(*slot, &empty)? {
                return Err(SchemaError::UndefinedCombination {
                    table: "concept_tag".to_string(),
                    entry: (*tag).to_string(),
                    reason: reason.to_string(),
                });
            }
            let key = normalize_key(tag);
            if map.insert(key.clone(), *slot).is_some() {
                return Err(SchemaError::DuplicateDefinition(format!("concept tag {key}")));
            }
        }
        Ok(Self { entries: map })
    }

    /// Exact lookup after normalization.
    pub fn lookup(&self, raw: &str) -> Option<S> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return None;
        }
        self.entries.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ConceptTagTable {
        let registry = SchemaRegistry::standard().unwrap();
        ConceptTagTable::standard(&registry).unwrap()
    }

    #[test]
    fn test_lookup_normalizes() {
        let tags = table();
        assert_eq!(tags.lookup("Body Mass Index"), Some(S::Bmi));
        assert_eq!(tags.lookup("  BODY_MASS-index "), Some(S::Bmi));
        assert_eq!(tags.lookup("body mass"), None);
        assert_eq!(tags.lookup("---"), None);
    }

    #[test]
    fn test_modifier_dependent_concepts_are_absent() {
        let tags = table();
        assert_eq!(tags.lookup("ahi"), None);
        assert_eq!(tags.lookup("apnea hypopnea index"), None);
    }

    #[test]
    fn test_duplicate_after_normalization_is_rejected() {
        let registry = SchemaRegistry::standard().unwrap();
        let err = ConceptTagTable::from_entries(&registry, &[("BMI", S::Bmi), ("bmi", S::Bmi)])
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateDefinition(_)));
    }
}
