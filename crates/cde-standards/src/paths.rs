//! Concept-path prefixes and the concept group each one implies.

use serde::Serialize;

use cde_model::{ConceptGroup as G, SchemaError};

use crate::text::normalize_key;

const ENTRIES: &[(&str, G)] = &[
    ("Demographics", G::Demographics),
    ("Anthropometry", G::Anthropometry),
    ("Clinical Data/Anthropometry", G::Anthropometry),
    ("Clinical Data/Vital Signs", G::VitalSigns),
    ("Clinical Data/Laboratory Tests", G::Laboratory),
    ("Clinical Data/Medical History", G::MedicalHistory),
    ("Clinical Data/Medications", G::Medications),
    ("Clinical Data/Pulmonary Function", G::PulmonaryFunction),
    ("Sleep Monitoring/Polysomnography", G::SleepArchitecture),
    (
        "Sleep Monitoring/Polysomnography/Sleep Architecture",
        G::SleepArchitecture,
    ),
    (
        "Sleep Monitoring/Polysomnography/Respiratory Events",
        G::RespiratoryEvents,
    ),
    (
        "Sleep Monitoring/Polysomnography/Oxygen Saturation",
        G::OxygenSaturation,
    ),
    ("Sleep Monitoring/Polysomnography/Arousals", G::Arousals),
    (
        "Sleep Monitoring/Polysomnography/Limb Movements",
        G::LimbMovements,
    ),
    ("Sleep Monitoring/Polysomnography/Heart Rate", G::HeartRate),
    (
        "Sleep Monitoring/Polysomnography/Signal Quality",
        G::PsgRecording,
    ),
    ("Sleep Monitoring/Heart Rate Variability", G::HeartRateVariability),
    ("Sleep Monitoring/Actigraphy", G::Actigraphy),
    ("Sleep Monitoring/PAP Therapy", G::PapTherapy),
    ("Sleep Questionnaires", G::SleepQuestionnaires),
    ("Sleep Questionnaires/Sleep Habits", G::SleepHabits),
    ("Mental Health", G::MoodQuestionnaires),
    ("Quality of Life", G::QualityOfLife),
    ("Neurocognitive", G::Cognition),
    ("Lifestyle and Behavioral Health", G::Lifestyle),
    ("Administrative", G::StudyDesign),
];

/// One path prefix, stored as normalized segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathPrefix {
    pub segments: Vec<String>,
    pub group: G,
}

impl PathPrefix {
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

/// A prefix that matched a concept path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathMatch {
    pub group: G,
    pub depth: usize,
}

#[derive(Debug, Clone)]
pub struct ConceptPathTable {
    prefixes: Vec<PathPrefix>,
}

impl ConceptPathTable {
    pub fn standard() -> Result<Self, SchemaError> {
        Self::from_entries(ENTRIES)
    }

    pub fn from_entries(entries: &[(&str, G)]) -> Result<Self, SchemaError> {
        let mut prefixes: Vec<PathPrefix> = Vec::with_capacity(entries.len());
        for (path, group) in entries {
            let segments = split_path(path);
            if segments.is_empty() {
                return Err(SchemaError::InvalidPattern {
                    family: "concept_path".to_string(),
                    message: format!("empty path prefix '{path}'"),
                });
            }
            if prefixes.iter().any(|existing| existing.segments == segments) {
                return Err(SchemaError::DuplicateDefinition(format!(
                    "concept path {path}"
                )));
            }
            prefixes.push(PathPrefix {
                segments,
                group: *group,
            });
        }
        Ok(Self { prefixes })
    }

    /// Every prefix matching `path` segment-wise, deepest first.
    pub fn matches(&self, path: &str) -> Vec<PathMatch> {
        let segments = split_path(path);
        let mut found: Vec<PathMatch> = self
            .prefixes
            .iter()
            .filter(|prefix| segments.starts_with(&prefix.segments))
            .map(|prefix| PathMatch {
                group: prefix.group,
                depth: prefix.depth(),
            })
            .collect();
        found.sort_by(|a, b| b.depth.cmp(&a.depth).then(a.group.cmp(&b.group)));
        found
    }

    pub fn prefixes(&self) -> &[PathPrefix] {
        &self.prefixes
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split(['/', '\\', '>'])
        .map(normalize_key)
        .filter(|segment| !segment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_are_segment_wise() {
        let table = ConceptPathTable::standard().unwrap();
        let found = table.matches("Sleep Monitoring/Polysomnography/Respiratory Events/AHI");
        assert_eq!(
            found,
            vec![
                PathMatch {
                    group: G::RespiratoryEvents,
                    depth: 3
                },
                PathMatch {
                    group: G::SleepArchitecture,
                    depth: 2
                },
            ]
        );
        // "Sleep Monitoring/Poly" is not a prefix match of the polysomnography folder.
        assert!(table.matches("Sleep Monitoring/Poly").is_empty());
    }

    #[test]
    fn test_matching_ignores_case_and_punctuation() {
        let table = ConceptPathTable::standard().unwrap();
        let found = table.matches("clinical data / LABORATORY TESTS");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].group, G::Laboratory);
        assert!(table.matches("").is_empty());
        assert!(table.matches("Unknown Folder").is_empty());
    }
}
