use std::sync::Arc;

use cde_map::{BatchOptions, Resolver};
use cde_model::{
    BatchCompleteness, CanonicalSlot, ConfidenceLevel, DesaturationThreshold, HypopneaDefinition,
    MappingTarget, Modifier, Severity, SleepStage, SourceVariable, StrategyName,
    ValidationRule, VariableMapping,
};
use cde_standards::config::ValidationConfig;
use cde_standards::{EngineConfig, SchemaRegistry, Standards};
use cde_validate::{MappingValidator, validate_batch};

fn mapping(variable: &str, target: MappingTarget) -> VariableMapping {
    VariableMapping {
        source_dataset: "shhs1".to_string(),
        source_variable: variable.to_string(),
        target,
        confidence: ConfidenceLevel::High,
        strategy: StrategyName::CompositionalParse,
        declined: Vec::new(),
        bdchm_class: None,
        curie: None,
    }
}

fn small_band() -> ValidationConfig {
    ValidationConfig {
        target_band: [1, 10],
        ..ValidationConfig::default()
    }
}

#[test]
fn resolved_batch_is_clean() {
    let standards = Arc::new(Standards::load().unwrap());
    let resolver = Resolver::new(Arc::clone(&standards), &EngineConfig::default()).unwrap();
    let variables: Vec<SourceVariable> = [
        "nsrr_ahi_hp3u",
        "ahi_ap0uhp3x3r_f1t1",
        "ess_01sit",
        "bmi",
        "pctdursp_s2",
        "active_ghrelin",
    ]
    .iter()
    .map(|name| SourceVariable::new("shhs1", *name))
    .collect();
    let outcome = resolver
        .resolve_batch(&variables, &BatchOptions::with_workers(2))
        .unwrap();

    let report = validate_batch(
        &standards.registry,
        &small_band(),
        &outcome.mappings,
        outcome.completeness,
    );
    assert!(report.complete);
    assert_eq!(report.distinct_slots, 3);
    assert!(report.violations.is_empty(), "{:?}", report.violations);
}

#[test]
fn every_check_reports_independently() {
    let registry = SchemaRegistry::standard().unwrap();
    let config = ValidationConfig {
        max_name_components: 4,
        ..small_band()
    };
    let mut validator = MappingValidator::new(&registry, &config);

    validator.observe(&mapping(
        "ess_x",
        MappingTarget::SurveyItemResponse {
            instrument_id: "ESS".to_string(),
            item_id: " ".to_string(),
            item_keyword: None,
        },
    ));
    validator.observe(&mapping(
        "bmi_rem",
        MappingTarget::slot(
            CanonicalSlot::Bmi,
            [Modifier::SleepStage(SleepStage::Rem)].into_iter().collect(),
        ),
    ));
    validator.observe(&mapping(
        "ahi_bad",
        MappingTarget::slot(
            CanonicalSlot::Ahi,
            [
                Modifier::HypopneaDefinition(HypopneaDefinition::Aasm2015Rule1b),
                Modifier::DesaturationThreshold(DesaturationThreshold::Desat3Pct),
            ]
            .into_iter()
            .collect(),
        ),
    ));
    assert_eq!(validator.observed(), 3);

    let report = validator.finish(BatchCompleteness::Partial {
        resolved: 3,
        total: 9,
    });
    assert!(!report.complete);
    assert_eq!(report.distinct_slots, 2);

    let rules: Vec<ValidationRule> = report
        .violations
        .iter()
        .map(|violation| violation.rule)
        .filter(|rule| *rule != ValidationRule::SlotNameComponents)
        .collect();
    assert_eq!(
        rules,
        vec![
            ValidationRule::SurveyItemMissing,
            ValidationRule::ModifierOutOfRange,
            ValidationRule::ModifierCombination,
            ValidationRule::PartialBatch,
        ]
    );
    assert!(report.by_rule(ValidationRule::SlotNameComponents).count() > 0);
    assert_eq!(
        report
            .by_rule(ValidationRule::PartialBatch)
            .map(|violation| violation.severity)
            .collect::<Vec<_>>(),
        vec![Severity::Warning]
    );
    assert_eq!(report.warning_count(), 1);
    assert!(report.has_errors());
}

#[test]
fn violation_serializes_with_mapping_reference() {
    let registry = SchemaRegistry::standard().unwrap();
    let report = validate_batch(
        &registry,
        &small_band(),
        &[mapping(
            "bmi_rem",
            MappingTarget::slot(
                CanonicalSlot::Bmi,
                [Modifier::SleepStage(SleepStage::Rem)].into_iter().collect(),
            ),
        )],
        BatchCompleteness::Complete,
    );

    insta::assert_json_snapshot!(report, @r#"
    {
      "complete": true,
      "distinct_slots": 1,
      "violations": [
        {
          "rule": "modifier_out_of_range",
          "severity": "error",
          "mapping": {
            "dataset": "shhs1",
            "variable": "bmi_rem"
          },
          "message": "slot bmi does not accept sleep_stage=rem"
        }
      ]
    }
    "#);
}

#[test]
fn survey_response_without_instrument_is_flagged() {
    let registry = SchemaRegistry::standard().unwrap();
    let report = validate_batch(
        &registry,
        &small_band(),
        &[mapping(
            "x_01",
            MappingTarget::SurveyItemResponse {
                instrument_id: "  ".to_string(),
                item_id: "01".to_string(),
                item_keyword: None,
            },
        )],
        BatchCompleteness::Complete,
    );
    let missing: Vec<&str> = report
        .by_rule(ValidationRule::SurveyItemMissing)
        .map(|violation| violation.message.as_str())
        .collect();
    assert_eq!(
        missing,
        vec!["survey response for item '01' has no instrument_id"]
    );
    assert!(report.has_errors());
}

#[test]
fn empty_batch_only_warns_about_the_band() {
    let registry = SchemaRegistry::standard().unwrap();
    let report = validate_batch(
        &registry,
        &ValidationConfig::default(),
        &[],
        BatchCompleteness::Complete,
    );
    assert_eq!(report.distinct_slots, 0);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].rule, ValidationRule::SlotCountBand);
    assert!(!report.has_errors());
}
