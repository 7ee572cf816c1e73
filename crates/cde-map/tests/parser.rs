use cde_map::TagParser;
use cde_map::parser::RejectReason;
use cde_model::{CanonicalSlot, Modifier, SleepStage, SummaryStatistic};
use cde_standards::SchemaRegistry;

fn setup() -> (TagParser, SchemaRegistry) {
    (
        TagParser::standard().expect("built-in families compile"),
        SchemaRegistry::standard().expect("registry loads"),
    )
}

#[test]
fn apnea_index_with_position_suffix() {
    let (parser, registry) = setup();
    let parsed = parser
        .parse(&registry, "oai_ap3a_f1t3_sup")
        .unwrap()
        .expect("decodes");

    insta::assert_json_snapshot!(parsed, @r#"
    {
      "family": "apnea_index",
      "slot": "apnea_index",
      "modifiers": {
        "body_position": "supine",
        "psg_type": "type_iii",
        "apnea_type": "obstructive",
        "desaturation_threshold": "desat_3pct",
        "arousal_requirement": "arousal_required"
      }
    }
    "#);
}

#[test]
fn families_are_tried_in_declared_order() {
    let (parser, _) = setup();
    let names: Vec<&str> = parser.family_names().collect();
    assert_eq!(
        names,
        vec![
            "respiratory_index",
            "legacy_respiratory_index",
            "apnea_index",
            "oxygen_desaturation_index",
            "spo2_level",
            "stage_summary",
            "position_summary",
            "heart_rate_summary",
        ]
    );
}

#[test]
fn heart_rate_statistic_comes_from_the_measure_slice() {
    let (parser, registry) = setup();
    let parsed = parser.parse(&registry, "MINHRSL").unwrap().expect("decodes");
    assert_eq!(parsed.slot, CanonicalSlot::HeartRateSleepBpm);
    assert!(
        parsed
            .modifiers
            .contains(&Modifier::SummaryStatistic(SummaryStatistic::Minimum))
    );
}

#[test]
fn fixed_wake_scope_conflicts_with_stage_suffix() {
    let (parser, registry) = setup();
    let report = parser.parse_report(&registry, "avglvlwk_n2").unwrap();
    assert_eq!(report.parsed, None);
    assert!(
        report
            .rejections
            .iter()
            .any(|rejection| rejection.family == "spo2_level"
                && matches!(rejection.reason, RejectReason::SuffixConflict { .. }))
    );

    let unfixed = parser.parse(&registry, "avglvlsa_n2").unwrap().expect("decodes");
    assert_eq!(
        unfixed.modifiers.get(cde_model::ModifierAxis::SleepStage),
        Some(Modifier::SleepStage(SleepStage::N2))
    );
}

#[test]
fn unknown_sub_tokens_never_produce_partial_mappings() {
    let (parser, registry) = setup();
    for token in [
        "ahi_ap0uhp3x3r_f2t1",
        "ahi_ap0uhp3x3r_f1t9",
        "ahi_ap0zhp3x3r_f1t1",
        "xai_ap0u",
        "odi5",
        "pctdursp_s4",
        "pctdurpos_back",
        "medhrsl",
    ] {
        let report = parser.parse_report(&registry, token).unwrap();
        assert_eq!(report.parsed, None, "{token}");
        assert!(
            report
                .rejections
                .iter()
                .any(|rejection| matches!(rejection.reason, RejectReason::UnknownCode { .. })),
            "{token} was not rejected by a family"
        );
    }
}
