//! Type-safe enumerations for mapping metadata.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// How directly a mapping was derived.
///
/// Declaration order is strength order: `Exact` is the strongest and
/// `DatasetLocal` the weakest, so `Ord` sorts strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Curated harmonized name or instrument item convention.
    Exact,
    /// Exact concept tag or a full, unambiguous grammar decoding.
    High,
    /// Concept path plus label keyword overlap.
    Medium,
    /// Reserved for heuristic matches that need manual review; no built-in
    /// strategy emits it.
    Low,
    /// No canonical equivalent; kept with its source metadata.
    DatasetLocal,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::DatasetLocal => "dataset_local",
        }
    }

    /// Returns a human-readable description of the confidence level.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Exact => "exact - curated name or instrument convention",
            Self::High => "high - tag or full grammar match",
            Self::Medium => "medium - concept path and label keywords",
            Self::Low => "low - needs verification",
            Self::DatasetLocal => "dataset local - no canonical equivalent",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matching strategies, in the order the resolver tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    /// Custodian prefix plus a harmonized-name table hit.
    HarmonizedPrefix,
    /// Questionnaire item by name convention or label.
    InstrumentItem,
    /// Exact normalized tag, name or label in the concept-tag table.
    ConceptTag,
    /// Pattern-family decoding of a structured name.
    CompositionalParse,
    /// Concept-path group plus label keyword scoring.
    PathLabelSimilarity,
    /// Terminal tier; never declines.
    DatasetLocalFallback,
}

impl StrategyName {
    pub const ALL: &'static [StrategyName] = &[
        StrategyName::HarmonizedPrefix,
        StrategyName::InstrumentItem,
        StrategyName::ConceptTag,
        StrategyName::CompositionalParse,
        StrategyName::PathLabelSimilarity,
        StrategyName::DatasetLocalFallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HarmonizedPrefix => "harmonized_prefix",
            Self::InstrumentItem => "instrument_item",
            Self::ConceptTag => "concept_tag",
            Self::CompositionalParse => "compositional_parse",
            Self::PathLabelSimilarity => "path_label_similarity",
            Self::DatasetLocalFallback => "dataset_local_fallback",
        }
    }

    /// Confidence attached to every mapping this strategy produces.
    pub fn confidence(&self) -> ConfidenceLevel {
        match self {
            Self::HarmonizedPrefix | Self::InstrumentItem => ConfidenceLevel::Exact,
            Self::ConceptTag | Self::CompositionalParse => ConfidenceLevel::High,
            Self::PathLabelSimilarity => ConfidenceLevel::Medium,
            Self::DatasetLocalFallback => ConfidenceLevel::DatasetLocal,
        }
    }
}

impl std::fmt::Display for StrategyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected value kind of a canonical slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Continuous or count value, usually with units.
    Numeric,
    /// Coded categorical value.
    Enumerated,
    /// Yes/no flag.
    Boolean,
    /// Date or date-time.
    Timestamp,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Enumerated => "enumerated",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
        }
    }
}

closed_enum! {
    /// Concept group a canonical slot belongs to.
    pub enum ConceptGroup {
        Demographics => "demographics",
        Anthropometry => "anthropometry",
        VitalSigns => "vital_signs",
        SleepArchitecture => "sleep_architecture",
        RespiratoryEvents => "respiratory_events",
        OxygenSaturation => "oxygen_saturation",
        /// EEG arousal counts and indices.
        Arousals => "arousals",
        /// Periodic limb movements in sleep.
        LimbMovements => "limb_movements",
        HeartRate => "heart_rate",
        HeartRateVariability => "heart_rate_variability",
        SleepQuestionnaires => "sleep_questionnaires",
        MoodQuestionnaires => "mood_questionnaires",
        QualityOfLife => "quality_of_life",
        Cognition => "cognition",
        MedicalHistory => "medical_history",
        Medications => "medications",
        /// Positive airway pressure use and settings.
        PapTherapy => "pap_therapy",
        Lifestyle => "lifestyle",
        Laboratory => "laboratory",
        PulmonaryFunction => "pulmonary_function",
        Actigraphy => "actigraphy",
        /// Self-reported schedules, naps and sleep duration.
        SleepHabits => "sleep_habits",
        /// Visit, arm and enrolment bookkeeping.
        StudyDesign => "study_design",
        /// Recording metadata: study date, montage quality, scorer.
        PsgRecording => "psg_recording",
    }
}

closed_enum! {
    /// Element of the BioData Catalyst Harmonized Model a variable describes.
    ///
    /// Assigned from label keywords; orthogonal to the mapping target.
    pub enum BdchmClass {
        /// Basic person record.
        Person => "Person",
        /// Age, sex, race, ethnicity, education and similar.
        Demography => "Demography",
        /// Participant identifiers.
        Participant => "Participant",
        /// Study-level metadata: site, cohort, arm, consent.
        ResearchStudy => "ResearchStudy",
        /// Visits and timepoints.
        Visit => "Visit",
        /// A survey instrument as a whole.
        Questionnaire => "Questionnaire",
        /// Answers to a survey instrument.
        QuestionnaireResponse => "QuestionnaireResponse",
        /// Diagnoses and medical history.
        Condition => "Condition",
        /// Surgical and diagnostic procedures.
        Procedure => "Procedure",
        /// Medications.
        DrugExposure => "DrugExposure",
        /// Devices such as CPAP or oral appliances.
        DeviceExposure => "DeviceExposure",
        /// Labs, vitals, anthropometry and sleep study metrics.
        MeasurementObservation => "MeasurementObservation",
        /// Social determinants of health.
        SdohObservation => "SdohObservation",
        /// Behavioral and environmental exposures.
        Exposure => "Exposure",
        /// Biological specimens.
        Specimen => "Specimen",
        /// Mortality.
        CauseOfDeath => "CauseOfDeath",
    }
}

impl FromStr for ConceptGroup {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SchemaError::UnknownGroup(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_fixed_by_strategy() {
        assert_eq!(
            StrategyName::HarmonizedPrefix.confidence(),
            ConfidenceLevel::Exact
        );
        assert_eq!(
            StrategyName::InstrumentItem.confidence(),
            ConfidenceLevel::Exact
        );
        assert_eq!(StrategyName::ConceptTag.confidence(), ConfidenceLevel::High);
        assert_eq!(
            StrategyName::CompositionalParse.confidence(),
            ConfidenceLevel::High
        );
        assert_eq!(
            StrategyName::PathLabelSimilarity.confidence(),
            ConfidenceLevel::Medium
        );
        assert_eq!(
            StrategyName::DatasetLocalFallback.confidence(),
            ConfidenceLevel::DatasetLocal
        );
    }

    #[test]
    fn test_confidence_order() {
        assert!(ConfidenceLevel::Exact < ConfidenceLevel::High);
        assert!(ConfidenceLevel::Medium < ConfidenceLevel::DatasetLocal);
    }

    #[test]
    fn test_bdchm_class_identifiers() {
        assert_eq!(BdchmClass::ALL.len(), 16);
        assert_eq!(
            BdchmClass::parse("measurementobservation"),
            Some(BdchmClass::MeasurementObservation)
        );
        assert_eq!(
            BdchmClass::QuestionnaireResponse.to_string(),
            "QuestionnaireResponse"
        );
    }

    #[test]
    fn test_group_count_and_lookup() {
        assert_eq!(ConceptGroup::ALL.len(), 24);
        assert_eq!(
            "Respiratory_Events".parse::<ConceptGroup>().unwrap(),
            ConceptGroup::RespiratoryEvents
        );
        assert!("sleep".parse::<ConceptGroup>().is_err());
    }
}
