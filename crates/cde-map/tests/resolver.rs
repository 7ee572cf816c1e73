use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use proptest::prelude::*;

use cde_map::{BatchOptions, ResolveError, Resolver};
use cde_model::{
    ArousalRequirement, BatchCompleteness, BdchmClass, BodyPosition, CanonicalSlot,
    ConfidenceLevel, DesaturationThreshold, HypopneaDefinition, MappingTarget, Modifier,
    ModifierAxis, ModifierSet, PsgType, SourceVariable, StrategyName,
};
use cde_standards::{EngineConfig, Standards};
use serde_json::json;

fn resolver() -> Resolver {
    let standards = Arc::new(Standards::load().expect("standards load"));
    Resolver::new(standards, &EngineConfig::default()).expect("resolver builds")
}

#[test]
fn harmonized_prefix_wins_with_exact_confidence() {
    let variable =
        SourceVariable::new("shhs1", "nsrr_ahi_hp3u").with_label("Apnea-Hypopnea Index");
    let mapping = resolver().resolve(&variable).unwrap();

    assert_eq!(mapping.slot_id(), Some(CanonicalSlot::Ahi));
    assert_eq!(mapping.strategy, StrategyName::HarmonizedPrefix);
    assert_eq!(mapping.confidence, ConfidenceLevel::Exact);
    assert!(mapping.declined.is_empty());
}

#[test]
fn compositional_name_decodes_every_axis() {
    let mapping = resolver()
        .resolve(&SourceVariable::new("shhs1", "ahi_ap0uhp3x3r_f1t1"))
        .unwrap();

    let expected: ModifierSet = [
        Modifier::HypopneaDefinition(HypopneaDefinition::Aasm2015Rule1a),
        Modifier::DesaturationThreshold(DesaturationThreshold::Desat3Pct),
        Modifier::ArousalRequirement(ArousalRequirement::OrArousal),
        Modifier::PsgType(PsgType::TypeI),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        mapping.target,
        MappingTarget::slot(CanonicalSlot::Ahi, expected)
    );
    assert_eq!(mapping.strategy, StrategyName::CompositionalParse);
    assert_eq!(mapping.confidence, ConfidenceLevel::High);
    assert_eq!(
        mapping.declined,
        vec![
            StrategyName::HarmonizedPrefix,
            StrategyName::InstrumentItem,
            StrategyName::ConceptTag,
        ]
    );
}

#[test]
fn position_suffix_extends_harmonized_name() {
    let resolution = resolver()
        .explain(&SourceVariable::new("shhs1", "nsrr_ahi_hp3u_sup"))
        .unwrap();
    let mapping = resolution.mapping;

    let expected: ModifierSet = [
        Modifier::DesaturationThreshold(DesaturationThreshold::Desat3Pct),
        Modifier::ArousalRequirement(ArousalRequirement::WithOrWithout),
        Modifier::BodyPosition(BodyPosition::Supine),
    ]
    .into_iter()
    .collect();
    assert_eq!(mapping.target, MappingTarget::slot(CanonicalSlot::Ahi, expected));
    assert_eq!(mapping.strategy, StrategyName::HarmonizedPrefix);
    assert_eq!(mapping.confidence, ConfidenceLevel::Exact);
    assert!(mapping.declined.is_empty());
    assert!(
        resolution.note.ends_with("with suffix body_position=supine"),
        "{}",
        resolution.note
    );
}

#[test]
fn suffix_conflicting_with_harmonized_stage_is_rejected() {
    let resolution = resolver()
        .explain(&SourceVariable::new("shhs1", "nsrr_pctdursp_s2_rem"))
        .unwrap();

    assert!(resolution.mapping.is_dataset_local());
    assert_eq!(resolution.mapping.strategy, StrategyName::DatasetLocalFallback);
    assert!(resolution.note.contains("conflicts"), "{}", resolution.note);
    assert!(resolution.note.contains("harmonized_prefix"), "{}", resolution.note);
}

#[test]
fn suffix_on_a_slot_without_that_axis_is_rejected() {
    let resolution = resolver()
        .explain(&SourceVariable::new("mesa", "nsrr_bmi_rem"))
        .unwrap();

    assert!(resolution.mapping.is_dataset_local());
    assert!(
        resolution.note.contains("does not accept modifier axis sleep_stage"),
        "{}",
        resolution.note
    );
}

#[test]
fn prefixed_compositional_name_is_decoded() {
    let resolution = resolver()
        .explain(&SourceVariable::new("shhs1", "nsrr_ahi_ap0uhp3x3r_f1t1"))
        .unwrap();
    let mapping = resolution.mapping;

    assert_eq!(mapping.slot_id(), Some(CanonicalSlot::Ahi));
    assert_eq!(mapping.modifiers().map(ModifierSet::len), Some(4));
    assert_eq!(mapping.strategy, StrategyName::CompositionalParse);
    assert_eq!(mapping.confidence, ConfidenceLevel::High);
    assert_eq!(
        mapping.declined,
        vec![
            StrategyName::HarmonizedPrefix,
            StrategyName::InstrumentItem,
            StrategyName::ConceptTag,
        ]
    );
    assert!(resolution.note.ends_with("after prefix 'nsrr_'"), "{}", resolution.note);
}

#[test]
fn label_annotations_are_attached() {
    let variable =
        SourceVariable::new("shhs1", "nsrr_ahi_hp3u").with_label("Apnea-Hypopnea Index");
    let mapping = resolver().resolve(&variable).unwrap();
    assert_eq!(mapping.bdchm_class, Some(BdchmClass::MeasurementObservation));
    assert_eq!(mapping.curie.as_deref(), Some("OMOP:4196413"));

    let value = serde_json::to_value(&mapping).unwrap();
    assert_eq!(value["bdchm_class"], json!("MeasurementObservation"));
    assert_eq!(value["curie"], json!("OMOP:4196413"));

    let unlabelled = resolver()
        .resolve(&SourceVariable::new("shhs1", "nsrr_ahi_hp3u"))
        .unwrap();
    let value = serde_json::to_value(&unlabelled).unwrap();
    assert!(value.get("bdchm_class").is_none());
    assert!(value.get("curie").is_none());
}

#[test]
fn annotations_can_be_switched_off() {
    let mut config = EngineConfig::default();
    config.annotations.curie = false;
    let resolver = Resolver::new(Arc::new(Standards::load().unwrap()), &config).unwrap();
    let mapping = resolver
        .resolve(&SourceVariable::new("mesa", "bmi").with_label("Body mass index"))
        .unwrap();
    assert_eq!(mapping.bdchm_class, Some(BdchmClass::MeasurementObservation));
    assert_eq!(mapping.curie, None);
}

#[test]
fn instrument_item_becomes_survey_response() {
    let mapping = resolver()
        .resolve(&SourceVariable::new("shhs1", "ess_01sit"))
        .unwrap();

    assert_eq!(
        mapping.target,
        MappingTarget::SurveyItemResponse {
            instrument_id: "ESS".to_string(),
            item_id: "01".to_string(),
            item_keyword: Some("sit".to_string()),
        }
    );
    assert_eq!(mapping.confidence, ConfidenceLevel::Exact);
    assert_eq!(mapping.slot_id(), None);
}

#[test]
fn unmatched_lab_variable_is_dataset_local() {
    let variable = SourceVariable::new("mesa", "active_ghrelin")
        .with_concept_path("Clinical Data/Laboratory Tests")
        .with_units("pg/mL");
    let mapping = resolver().resolve(&variable).unwrap();

    assert_eq!(
        mapping.target,
        MappingTarget::DatasetLocal {
            label: None,
            units: Some("pg/mL".to_string()),
            concept_path: Some("Clinical Data/Laboratory Tests".to_string()),
        }
    );
    assert_eq!(mapping.confidence, ConfidenceLevel::DatasetLocal);
    assert_eq!(mapping.strategy, StrategyName::DatasetLocalFallback);
}

#[test]
fn rejected_family_falls_through_to_similarity() {
    // Hypopnea rule digit 9 is not a registered code.
    let variable = SourceVariable::new("shhs1", "ahi_ap0uhp9x3r_f1t1")
        .with_label("Apnea hypopnea index")
        .with_concept_path("Sleep Monitoring/Polysomnography/Respiratory Events");
    let mapping = resolver().resolve(&variable).unwrap();

    assert_eq!(mapping.strategy, StrategyName::PathLabelSimilarity);
    assert_eq!(mapping.confidence, ConfidenceLevel::Medium);
    assert_eq!(
        mapping.target,
        MappingTarget::slot(CanonicalSlot::Ahi, ModifierSet::new())
    );

    let bare = resolver()
        .resolve(&SourceVariable::new("shhs1", "ahi_ap0uhp9x3r_f1t1"))
        .unwrap();
    assert!(bare.is_dataset_local());
}

#[test]
fn harmonized_prefix_outranks_compositional_parse() {
    // `avglvlsa` parses on its own, but under the prefix it is a harmonized name.
    let resolver = resolver();
    let plain = resolver
        .resolve(&SourceVariable::new("shhs1", "avglvlsa"))
        .unwrap();
    assert_eq!(plain.strategy, StrategyName::CompositionalParse);

    let prefixed = resolver
        .resolve(&SourceVariable::new("shhs1", "nsrr_avglvlsa"))
        .unwrap();
    assert_eq!(prefixed.strategy, StrategyName::HarmonizedPrefix);
    assert_eq!(prefixed.confidence, ConfidenceLevel::Exact);
    assert_eq!(prefixed.slot_id(), plain.slot_id());
}

#[test]
fn explain_reports_the_winning_match() {
    let resolution = resolver()
        .explain(&SourceVariable::new("shhs1", "pctdursp_s2"))
        .unwrap();
    assert_eq!(resolution.mapping.slot_id(), Some(CanonicalSlot::StagePctTst));
    assert_eq!(resolution.note, "decoded by pattern family stage_summary");
}

#[test]
fn malformed_record_does_not_stop_the_batch() {
    let variables = vec![
        SourceVariable::new("mesa", "bmi"),
        SourceVariable::new("mesa", ""),
        SourceVariable::new("mesa", "zz_local"),
    ];
    let outcome = resolver()
        .resolve_batch(&variables, &BatchOptions::with_workers(2))
        .unwrap();

    assert_eq!(outcome.mappings.len(), 2);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].index, 1);
    assert_eq!(outcome.completeness, BatchCompleteness::Complete);
    assert!(matches!(
        resolver().resolve(&variables[1]),
        Err(ResolveError::Malformed(_))
    ));
}

fn sample_batch() -> Vec<SourceVariable> {
    let names = [
        "nsrr_age",
        "ess_03",
        "bmi",
        "ahi_a0h4",
        "odi3",
        "pctdurpos_sup",
        "maxhrsl_f1t2",
        "zz_private",
        "psqi_10",
        "nsrr_pctdursp_sr",
        "oai_ap0u",
        "minlvlwk",
    ];
    (0..60)
        .map(|n| SourceVariable::new(format!("study{}", n % 5), names[n % names.len()]))
        .collect()
}

#[test]
fn batch_order_does_not_depend_on_worker_count() {
    let resolver = resolver();
    let variables = sample_batch();
    let sequential = resolver
        .resolve_batch(&variables, &BatchOptions::default())
        .unwrap();
    for workers in [2, 3, 7, 64] {
        let parallel = resolver
            .resolve_batch(&variables, &BatchOptions::with_workers(workers))
            .unwrap();
        assert_eq!(parallel, sequential, "workers = {workers}");
    }
    let names: Vec<&str> = sequential
        .mappings
        .iter()
        .map(|mapping| mapping.source_variable.as_str())
        .collect();
    let expected: Vec<&str> = variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, expected);
}

#[test]
fn cancelled_batch_is_partial() {
    let cancel = AtomicBool::new(true);
    let variables = sample_batch();
    let outcome = resolver()
        .resolve_batch(&variables, &BatchOptions::with_workers(3).cancel_on(&cancel))
        .unwrap();

    assert!(outcome.mappings.is_empty());
    assert_eq!(
        outcome.completeness,
        BatchCompleteness::Partial {
            resolved: 0,
            total: variables.len()
        }
    );
}

fn closed_values(mapping: &cde_model::VariableMapping) -> bool {
    mapping.modifiers().is_none_or(|modifiers| {
        modifiers
            .iter()
            .all(|modifier| Modifier::parse(modifier.axis(), modifier.value()).is_ok())
    })
}

proptest! {
    #[test]
    fn every_well_formed_variable_resolves_once(
        dataset in "[a-z]{1,8}",
        name in "[A-Za-z0-9_]{1,24}",
        label in proptest::option::of("[A-Za-z ]{0,40}"),
    ) {
        let resolver = resolver();
        let mut variable = SourceVariable::new(dataset, name);
        variable.label = label;

        let first = resolver.resolve(&variable).unwrap();
        let second = resolver.resolve(&variable).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(closed_values(&first));
        prop_assert_eq!(first.confidence, first.strategy.confidence());
        prop_assert!(!first.declined.contains(&first.strategy));
    }

    #[test]
    fn unrecognized_names_fall_back(suffix in "[a-z]{3,12}") {
        let variable = SourceVariable::new("mesa", format!("zq{suffix}"))
            .with_concept_path("Unfiled/Miscellaneous");
        let mapping = resolver().resolve(&variable).unwrap();
        prop_assert!(mapping.is_dataset_local());
        prop_assert_eq!(mapping.confidence, ConfidenceLevel::DatasetLocal);
    }
}

#[test]
fn modifier_axes_stay_within_slot_definition() {
    let resolver = resolver();
    for variable in sample_batch() {
        let mapping = resolver.resolve(&variable).unwrap();
        let (Some(slot), Some(modifiers)) = (mapping.slot_id(), mapping.modifiers()) else {
            continue;
        };
        let definition = resolver.standards().registry.definition(slot).unwrap();
        let axes: Vec<ModifierAxis> = modifiers.axes().collect();
        assert!(
            axes.iter().all(|axis| definition.accepts(*axis)),
            "{} carries {axes:?}",
            variable.name
        );
    }
}
