use cde_model::{
    BdchmClass, CanonicalSlot, ConfidenceLevel, DesaturationThreshold, HypopneaDefinition, MappingTarget,
    Modifier, ModifierSet, PsgType, SourceVariable, StrategyName, VariableMapping,
};
use serde_json::json;

fn ahi_mapping() -> VariableMapping {
    let modifiers: ModifierSet = [
        Modifier::HypopneaDefinition(HypopneaDefinition::Aasm2015Rule1a),
        Modifier::DesaturationThreshold(DesaturationThreshold::Desat3Pct),
        Modifier::PsgType(PsgType::TypeI),
    ]
    .into_iter()
    .collect();
    VariableMapping {
        source_dataset: "shhs".to_string(),
        source_variable: "ahi_ap0uhp3x3r_f1t1".to_string(),
        target: MappingTarget::slot(CanonicalSlot::Ahi, modifiers),
        confidence: ConfidenceLevel::High,
        strategy: StrategyName::CompositionalParse,
        declined: vec![
            StrategyName::HarmonizedPrefix,
            StrategyName::InstrumentItem,
            StrategyName::ConceptTag,
        ],
        bdchm_class: Some(BdchmClass::MeasurementObservation),
        curie: Some("OMOP:4196413".to_string()),
    }
}

#[test]
fn canonical_slot_mapping_output_contract() {
    insta::assert_json_snapshot!(ahi_mapping(), @r#"
    {
      "source_dataset": "shhs",
      "source_variable": "ahi_ap0uhp3x3r_f1t1",
      "target_class": "CanonicalSlot",
      "slot_id": "ahi",
      "modifiers": {
        "psg_type": "type_i",
        "hypopnea_definition": "aasm_2015_1a",
        "desaturation_threshold": "desat_3pct"
      },
      "confidence": "high",
      "strategy": "compositional_parse",
      "declined": [
        "harmonized_prefix",
        "instrument_item",
        "concept_tag"
      ],
      "bdchm_class": "MeasurementObservation",
      "curie": "OMOP:4196413"
    }
    "#);
}

#[test]
fn survey_item_mapping_serializes_without_slot() {
    let mapping = VariableMapping {
        source_dataset: "shhs".to_string(),
        source_variable: "ess_01sit".to_string(),
        target: MappingTarget::SurveyItemResponse {
            instrument_id: "ESS".to_string(),
            item_id: "01".to_string(),
            item_keyword: Some("sit".to_string()),
        },
        confidence: ConfidenceLevel::Exact,
        strategy: StrategyName::InstrumentItem,
        declined: vec![StrategyName::HarmonizedPrefix],
        bdchm_class: Some(BdchmClass::QuestionnaireResponse),
        curie: None,
    };
    let value = serde_json::to_value(&mapping).unwrap();
    assert_eq!(value["target_class"], json!("SurveyItemResponse"));
    assert_eq!(value["instrument_id"], json!("ESS"));
    assert_eq!(value["item_id"], json!("01"));
    assert!(value.get("slot_id").is_none());
    assert!(value.get("modifiers").is_none());
    assert_eq!(value["bdchm_class"], json!("QuestionnaireResponse"));
    assert!(value.get("curie").is_none());
}

#[test]
fn dataset_local_mapping_keeps_only_metadata() {
    let mapping = VariableMapping {
        source_dataset: "mesa".to_string(),
        source_variable: "active_ghrelin".to_string(),
        target: MappingTarget::DatasetLocal {
            label: Some("Active ghrelin".to_string()),
            units: None,
            concept_path: Some("Clinical Data/Laboratory Tests".to_string()),
        },
        confidence: ConfidenceLevel::DatasetLocal,
        strategy: StrategyName::DatasetLocalFallback,
        declined: Vec::new(),
        bdchm_class: None,
        curie: None,
    };
    let value = serde_json::to_value(&mapping).unwrap();
    assert_eq!(value["target_class"], json!("dataset_local"));
    assert_eq!(value["confidence"], json!("dataset_local"));
    assert!(value.get("slot_id").is_none());
    assert!(value.get("instrument_id").is_none());
    assert!(value.get("units").is_none());
    assert!(mapping.is_dataset_local());
    assert_eq!(mapping.slot_id(), None);
}

#[test]
fn mapping_round_trips_through_json() {
    let mapping = ahi_mapping();
    let json = serde_json::to_string(&mapping).unwrap();
    let round: VariableMapping = serde_json::from_str(&json).unwrap();
    assert_eq!(round, mapping);
}

#[test]
fn mapping_rejects_out_of_range_modifier() {
    let raw = json!({
        "source_dataset": "shhs",
        "source_variable": "ahi_x",
        "target_class": "CanonicalSlot",
        "slot_id": "ahi",
        "modifiers": {"psg_type": "type_v"},
        "confidence": "high",
        "strategy": "compositional_parse",
        "declined": []
    });
    assert!(serde_json::from_value::<VariableMapping>(raw).is_err());
}

#[test]
fn source_variable_reads_minimal_record() {
    let variable: SourceVariable =
        serde_json::from_value(json!({"dataset": "cfs", "name": "bmi"})).unwrap();
    assert_eq!(variable, SourceVariable::new("cfs", "bmi"));
    assert_eq!(variable.label_text(), None);

    let blank = SourceVariable::new("cfs", "bmi").with_label("   ");
    assert_eq!(blank.label_text(), None);
}
