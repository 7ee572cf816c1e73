use cde_model::{CanonicalSlot, ConceptGroup, ModifierAxis, SchemaError};
use cde_standards::Standards;

fn standards() -> Standards {
    Standards::load().expect("built-in standards")
}

#[test]
fn lookup_by_slot_identifier() {
    let standards = standards();
    let ahi = standards.registry.slot("ahi").unwrap();
    assert_eq!(ahi.group, ConceptGroup::RespiratoryEvents);
    assert!(ahi.accepts(ModifierAxis::HypopneaDefinition));
    assert!(!ahi.accepts(ModifierAxis::ApneaType));
}

#[test]
fn unknown_identifiers_surface_schema_errors() {
    let standards = standards();
    assert_eq!(
        standards.registry.slot("active_ghrelin").unwrap_err(),
        SchemaError::UnknownSlot("active_ghrelin".to_string())
    );
    assert_eq!(
        standards.registry.axis_values("posture").unwrap_err(),
        SchemaError::UnknownAxis("posture".to_string())
    );
    assert_eq!(
        standards.registry.group_members("sleepiness").unwrap_err(),
        SchemaError::UnknownGroup("sleepiness".to_string())
    );
}

#[test]
fn axis_values_are_closed() {
    let standards = standards();
    let values: Vec<&str> = standards
        .registry
        .axis_values("psg_type")
        .unwrap()
        .iter()
        .map(cde_model::Modifier::value)
        .collect();
    assert_eq!(values, ["type_i", "type_ii", "type_iii", "type_iv"]);
}

#[test]
fn every_group_has_members() {
    let standards = standards();
    for group in ConceptGroup::ALL {
        assert!(
            !standards.registry.members_of(*group).is_empty(),
            "group {group} has no slots"
        );
    }
    let members = standards.registry.group_members("oxygen_saturation").unwrap();
    assert!(members.contains(&CanonicalSlot::Odi));
    assert!(!members.contains(&CanonicalSlot::Ahi));
}

#[test]
fn slot_identifiers_respect_component_limit() {
    let standards = standards();
    for definition in standards.registry.slots() {
        assert!(
            definition.slot.name_components() <= 5,
            "{} has too many components",
            definition.slot
        );
    }
}

#[test]
fn slot_vocabulary_size() {
    let standards = standards();
    assert!(standards.registry.len() >= 115);
    assert_eq!(standards.registry.len(), CanonicalSlot::ALL.len());
}

#[test]
fn slot_definition_serializes_with_closed_identifiers() {
    let standards = standards();
    let bmi = standards.registry.definition(CanonicalSlot::Bmi).unwrap();
    insta::assert_json_snapshot!(bmi, @r#"
    {
      "slot": "bmi",
      "group": "anthropometry",
      "kind": "numeric",
      "title": "Body mass index",
      "axes": [
        "time_frame"
      ],
      "keywords": [
        "body",
        "mass",
        "index"
      ]
    }
    "#);

    let study_arm = serde_json::to_value(
        standards
            .registry
            .definition(CanonicalSlot::StudyArm)
            .unwrap(),
    )
    .unwrap();
    assert_eq!(study_arm["kind"], "enumerated");
    assert_eq!(study_arm["axes"], serde_json::json!([]));
}
