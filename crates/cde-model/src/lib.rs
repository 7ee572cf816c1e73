#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod enums;
pub mod error;
pub mod mapping;
pub mod modifiers;
pub mod slots;
pub mod source;
pub mod validation;

pub use enums::{BdchmClass, ConceptGroup, ConfidenceLevel, StrategyName, ValueKind};
pub use error::{MalformedInputError, SchemaError};
pub use mapping::{MappingRef, MappingTarget, VariableMapping};
pub use modifiers::{
    ApneaType, ArousalRequirement, BodyPosition, DesaturationThreshold, HypopneaDefinition,
    Modifier, ModifierAxis, ModifierSet, PsgType, SleepStage, SummaryStatistic, TimeFrame,
};
pub use slots::CanonicalSlot;
pub use source::SourceVariable;
pub use validation::{BatchCompleteness, Severity, ValidationReport, ValidationRule, Violation};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_report_counts() {
        let report = ValidationReport {
            complete: true,
            distinct_slots: 12,
            violations: vec![
                Violation {
                    rule: ValidationRule::SlotCountBand,
                    severity: Severity::Warning,
                    mapping: None,
                    message: "12 distinct slots is below the target band".to_string(),
                },
                Violation {
                    rule: ValidationRule::SurveyItemMissing,
                    severity: Severity::Error,
                    mapping: Some(MappingRef {
                        dataset: "shhs".to_string(),
                        variable: "ess_x".to_string(),
                    }),
                    message: "survey item has no item_id".to_string(),
                },
            ],
        };
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
        assert_eq!(report.by_rule(ValidationRule::SlotCountBand).count(), 1);
    }

    #[test]
    fn batch_completeness_from_counts() {
        assert_eq!(BatchCompleteness::from_counts(4, 4), BatchCompleteness::Complete);
        let partial = BatchCompleteness::from_counts(1, 4);
        assert!(!partial.is_complete());
        assert_eq!(
            serde_json::to_value(partial).expect("serialize completeness"),
            serde_json::json!({"status": "partial", "resolved": 1, "total": 4})
        );
    }

    #[test]
    fn malformed_error_serializes() {
        let err = MalformedInputError {
            index: 3,
            dataset: "mesa".to_string(),
            name: String::new(),
            reason: "variable name is blank".to_string(),
        };
        let json = serde_json::to_string(&err).expect("serialize error");
        let round: MalformedInputError = serde_json::from_str(&json).expect("deserialize error");
        assert_eq!(round, err);
        assert!(err.to_string().contains("#3"));
    }
}
