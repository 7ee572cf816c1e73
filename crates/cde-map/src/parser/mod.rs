//! Compositional tag parser.
//!
//! Tries each pattern family against the whole lower-cased token, in
//! declared order. When none matches, recognized stage and position suffixes
//! are peeled one at a time and the remaining base is tried again; peeled
//! suffixes are applied on top of the base decoding afterwards.
//!
//! A family that matches the token's shape but contains an unknown code, a
//! suffix conflict or an undefined combination is rejected as a whole and
//! the next family is tried. Rejections are kept for the caller.

pub mod families;
pub mod family;
pub mod suffix;

use serde::Serialize;

use cde_model::{CanonicalSlot, Modifier, ModifierSet, SchemaError};
use cde_standards::SchemaRegistry;

pub use family::{CompiledFamily, PatternFamily, RejectReason};

/// A full, unambiguous decoding of one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTag {
    pub family: &'static str,
    pub slot: CanonicalSlot,
    pub modifiers: ModifierSet,
}

/// One family that matched the shape of a (possibly suffix-stripped) token
/// and was then rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub family: &'static str,
    pub token: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub parsed: Option<ParsedTag>,
    pub rejections: Vec<Rejection>,
}

#[derive(Debug, Clone)]
pub struct TagParser {
    families: Vec<CompiledFamily>,
}

impl TagParser {
    /// Compiles the built-in families.
    pub fn standard() -> Result<Self, SchemaError> {
        Self::with_families(families::FAMILIES)
    }

    pub fn with_families(families: &[PatternFamily]) -> Result<Self, SchemaError> {
        let mut compiled = Vec::with_capacity(families.len());
        for family in families {
            if compiled
                .iter()
                .any(|existing: &CompiledFamily| existing.name() == family.name)
            {
                return Err(SchemaError::DuplicateDefinition(format!(
                    "pattern family {}",
                    family.name
                )));
            }
            compiled.push(CompiledFamily::compile(*family)?);
        }
        Ok(Self { families: compiled })
    }

    pub fn family_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.families.iter().map(CompiledFamily::name)
    }

    /// Parses `token`, tracing every rejected family.
    pub fn parse(
        &self,
        registry: &SchemaRegistry,
        token: &str,
    ) -> Result<Option<ParsedTag>, SchemaError> {
        let report = self.parse_report(registry, token)?;
        for rejection in &report.rejections {
            tracing::trace!(
                family = rejection.family,
                token = %rejection.token,
                reason = %rejection.reason,
                "pattern family rejected"
            );
        }
        Ok(report.parsed)
    }

    pub fn parse_report(
        &self,
        registry: &SchemaRegistry,
        token: &str,
    ) -> Result<ParseReport, SchemaError> {
        let token = token.trim().to_ascii_lowercase();
        let mut report = ParseReport::default();
        if token.is_empty() {
            return Ok(report);
        }

        let bases = std::iter::once((token.as_str(), Vec::new())).chain(suffix::peelings(&token));
        for (base, suffixes) in bases {
            if let Some(parsed) = self.parse_base(registry, base, &suffixes, &mut report)? {
                report.parsed = Some(parsed);
                break;
            }
        }
        Ok(report)
    }

    fn parse_base(
        &self,
        registry: &SchemaRegistry,
        base: &str,
        suffixes: &[Modifier],
        report: &mut ParseReport,
    ) -> Result<Option<ParsedTag>, SchemaError> {
        for family in &self.families {
            let Some(decoded) = family.decode(base) else {
                continue;
            };
            let outcome = decoded.and_then(|decoded| {
                let mut modifiers = decoded.modifiers;
                suffix::apply(&mut modifiers, &decoded.fixed, suffixes)?;
                Ok((decoded.slot, modifiers))
            });
            let (slot, modifiers) = match outcome {
                Ok(found) => found,
                Err(reason) => {
                    report.rejections.push(Rejection {
                        family: family.name(),
                        token: base.to_string(),
                        reason,
                    });
                    continue;
                }
            };
            if let Err(reason) = registry.check_combination(slot, &modifiers)? {
                report.rejections.push(Rejection {
                    family: family.name(),
                    token: base.to_string(),
                    reason: RejectReason::Undefined(reason.to_string()),
                });
                continue;
            }
            return Ok(Some(ParsedTag {
                family: family.name(),
                slot,
                modifiers,
            }));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cde_model::{
        ArousalRequirement as Ar, BodyPosition as Bp, DesaturationThreshold as Ds,
        HypopneaDefinition as Hd, ModifierAxis, PsgType as Pt, SleepStage as St,
    };

    fn setup() -> (TagParser, SchemaRegistry) {
        (
            TagParser::standard().expect("families compile"),
            SchemaRegistry::standard().expect("registry"),
        )
    }

    fn mods(values: &[Modifier]) -> ModifierSet {
        values.iter().collect()
    }

    #[test]
    fn test_respiratory_index_later_slice_refines() {
        let (parser, registry) = setup();
        let parsed = parser
            .parse(&registry, "ahi_ap0uhp3x3r_f1t1")
            .unwrap()
            .unwrap();
        assert_eq!(parsed.family, "respiratory_index");
        assert_eq!(parsed.slot, CanonicalSlot::Ahi);
        assert_eq!(
            parsed.modifiers,
            mods(&[
                Modifier::HypopneaDefinition(Hd::Aasm2015Rule1a),
                Modifier::DesaturationThreshold(Ds::Desat3Pct),
                Modifier::ArousalRequirement(Ar::OrArousal),
                Modifier::PsgType(Pt::TypeI),
            ])
        );
    }

    #[test]
    fn test_unknown_code_rejects_whole_family() {
        let (parser, registry) = setup();
        let report = parser
            .parse_report(&registry, "ahi_ap0uhp9x3r_f1t1")
            .unwrap();
        assert_eq!(report.parsed, None);
        assert_eq!(report.rejections[0].family, "respiratory_index");
        assert_eq!(
            report.rejections[0].reason,
            RejectReason::UnknownCode {
                part: "hp_rule",
                token: "9".to_string()
            }
        );
    }

    #[test]
    fn test_undefined_combination_is_no_parse() {
        let (parser, registry) = setup();
        // The 4% rule scored at 3% desaturation does not exist.
        let report = parser
            .parse_report(&registry, "ahi_ap0uhp4x3r_f1t1")
            .unwrap();
        assert_eq!(report.parsed, None);
        assert!(matches!(
            report.rejections[0].reason,
            RejectReason::Undefined(_)
        ));
    }

    #[test]
    fn test_legacy_family() {
        let (parser, registry) = setup();
        let parsed = parser.parse(&registry, "ahi_a0h4").unwrap().unwrap();
        assert_eq!(parsed.family, "legacy_respiratory_index");
        assert_eq!(
            parsed.modifiers,
            mods(&[Modifier::DesaturationThreshold(Ds::Desat4Pct)])
        );

        let aroused = parser.parse(&registry, "AHI_A0H3A").unwrap().unwrap();
        assert_eq!(
            aroused.modifiers,
            mods(&[
                Modifier::DesaturationThreshold(Ds::Desat3Pct),
                Modifier::ArousalRequirement(Ar::OrArousal),
            ])
        );
    }

    #[test]
    fn test_unfixed_axis_takes_suffix() {
        let (parser, registry) = setup();
        let parsed = parser.parse(&registry, "avglvlsa_rem").unwrap().unwrap();
        assert_eq!(parsed.slot, CanonicalSlot::Spo2MeanPct);
        assert_eq!(parsed.modifiers, mods(&[Modifier::SleepStage(St::Rem)]));
    }

    #[test]
    fn test_fixed_axis_conflict_rejects() {
        let (parser, registry) = setup();
        let report = parser.parse_report(&registry, "pctdursp_s1_rem").unwrap();
        assert_eq!(report.parsed, None);
        assert!(report.rejections.iter().any(|rejection| matches!(
            rejection.reason,
            RejectReason::SuffixConflict {
                axis: ModifierAxis::SleepStage,
                ..
            }
        )));

        // Same value as the fixed one is not a conflict.
        let same = parser.parse(&registry, "pctdursp_sr_rem").unwrap().unwrap();
        assert_eq!(same.modifiers, mods(&[Modifier::SleepStage(St::Rem)]));
    }

    #[test]
    fn test_suffixes_peel_one_at_a_time() {
        let (parser, registry) = setup();
        let parsed = parser
            .parse(&registry, "pctdurpos_sup_rem")
            .unwrap()
            .unwrap();
        assert_eq!(parsed.slot, CanonicalSlot::PositionTimePct);
        assert_eq!(
            parsed.modifiers,
            mods(&[
                Modifier::SleepStage(St::Rem),
                Modifier::BodyPosition(Bp::Supine),
            ])
        );

        let respiratory = parser
            .parse(&registry, "ahi_ap0uhp3x3r_f1t1_nrem_sup")
            .unwrap()
            .unwrap();
        assert!(respiratory.modifiers.contains(&Modifier::SleepStage(St::Nrem)));
        assert!(respiratory.modifiers.contains(&Modifier::BodyPosition(Bp::Supine)));
    }

    #[test]
    fn test_repeated_suffix_axis_rejects() {
        let (parser, registry) = setup();
        assert_eq!(parser.parse(&registry, "avglvlsa_rem_nrem").unwrap(), None);
        assert_eq!(parser.parse(&registry, "rem").unwrap(), None);
        assert_eq!(parser.parse(&registry, "").unwrap(), None);
    }

    #[test]
    fn test_optional_recording_slice() {
        let (parser, registry) = setup();
        let bare = parser.parse(&registry, "pctdursp_wk").unwrap().unwrap();
        assert_eq!(bare.modifiers, mods(&[Modifier::SleepStage(St::Wake)]));

        let recorded = parser.parse(&registry, "odi4_f1t2").unwrap().unwrap();
        assert_eq!(recorded.slot, CanonicalSlot::Odi);
        assert_eq!(
            recorded.modifiers,
            mods(&[
                Modifier::PsgType(Pt::TypeII),
                Modifier::DesaturationThreshold(Ds::Desat4Pct),
            ])
        );
    }

    #[test]
    fn test_duplicate_family_names_fail() {
        let families = [families::FAMILIES[0], families::FAMILIES[0]];
        assert!(matches!(
            TagParser::with_families(&families),
            Err(SchemaError::DuplicateDefinition(_))
        ));
    }
}
