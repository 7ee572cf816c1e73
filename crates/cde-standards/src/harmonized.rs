//! Harmonized variable names published by the data custodian.
//!
//! Keys are the part of the name after the harmonization prefix
//! (`nsrr_ahi_hp3u` is looked up as `ahi_hp3u`).

use std::collections::BTreeMap;

use cde_model::{
    ArousalRequirement as Ar, CanonicalSlot as S, DesaturationThreshold as Ds,
    HypopneaDefinition as Hd, Modifier as M, ModifierSet, SchemaError, SleepStage as St,
    TimeFrame as Tf,
};

use crate::registry::SchemaRegistry;

pub type HarmonizedEntry = (&'static str, S, &'static [M]);

const ENTRIES: &[HarmonizedEntry] = &[
    ("age", S::Age, &[]),
    ("age_gt89", S::AgeOver89, &[]),
    ("sex", S::Sex, &[]),
    ("race", S::Race, &[]),
    ("ethnicity", S::Ethnicity, &[]),
    ("bmi", S::Bmi, &[]),
    ("bp_systolic", S::SystolicBpMmhg, &[]),
    ("bp_diastolic", S::DiastolicBpMmhg, &[]),
    ("current_smoker", S::SmokingStatus, &[M::TimeFrame(Tf::Current)]),
    ("ever_smoker", S::SmokingStatus, &[M::TimeFrame(Tf::Lifetime)]),
    (
        "ahi_hp3u",
        S::Ahi,
        &[
            M::DesaturationThreshold(Ds::Desat3Pct),
            M::ArousalRequirement(Ar::WithOrWithout),
        ],
    ),
    (
        "ahi_hp3r_aasm15",
        S::Ahi,
        &[
            M::HypopneaDefinition(Hd::Aasm2015Rule1a),
            M::DesaturationThreshold(Ds::Desat3Pct),
            M::ArousalRequirement(Ar::OrArousal),
        ],
    ),
    (
        "ahi_hp4u_aasm15",
        S::Ahi,
        &[
            M::HypopneaDefinition(Hd::Aasm2015Rule1b),
            M::DesaturationThreshold(Ds::Desat4Pct),
            M::ArousalRequirement(Ar::WithOrWithout),
        ],
    ),
    (
        "ahi_hp4r",
        S::Ahi,
        &[
            M::DesaturationThreshold(Ds::Desat4Pct),
            M::ArousalRequirement(Ar::OrArousal),
        ],
    ),
    (
        "ahi_chicago1999",
        S::Ahi,
        &[M::HypopneaDefinition(Hd::Chicago1999)],
    ),
    ("ttldursp_f1", S::TotalSleepTimeMin, &[]),
    ("ttleffsp_f1", S::SleepEfficiencyPct, &[]),
    ("ttllatsp_f1", S::SleepLatencyMin, &[]),
    ("ttlprdsp_s1sr", S::RemLatencyMin, &[]),
    ("ttldurws_f1", S::WasoMin, &[]),
    ("ttlprdbd_f1", S::TimeInBedMin, &[]),
    ("pctdursp_s1", S::StagePctTst, &[M::SleepStage(St::N1)]),
    ("pctdursp_s2", S::StagePctTst, &[M::SleepStage(St::N2)]),
    ("pctdursp_s3", S::StagePctTst, &[M::SleepStage(St::N3)]),
    ("pctdursp_sr", S::StagePctTst, &[M::SleepStage(St::Rem)]),
    ("phrnumar_f1", S::ArousalIndex, &[]),
    ("avglvlsa", S::Spo2MeanPct, &[M::SleepStage(St::AllSleep)]),
    ("minlvlsa", S::Spo2MinPct, &[M::SleepStage(St::AllSleep)]),
];

/// Harmonized-name lookup, validated against the registry at build time.
#[derive(Debug, Clone)]
pub struct HarmonizedTable {
    entries: BTreeMap<&'static str, (S, ModifierSet)>,
}

impl HarmonizedTable {
    pub fn standard(registry: &SchemaRegistry) -> Result<Self, SchemaError> {
        Self::from_entries(registry, ENTRIES)
    }

    pub fn from_entries(
        registry: &SchemaRegistry,
        entries: &[HarmonizedEntry],
    ) -> Result<Self, SchemaError> {
        let mut map = BTreeMap::new();
        for (name, slot, modifiers) in entries {
            let modifiers: ModifierSet = modifiers.iter().collect();
            if let Err(reason) = registry.check_combination(*slot, &modifiers)? {
                return Err(SchemaError::UndefinedCombination {
                    table: "harmonized".to_string(),
                    entry: (*name).to_string(),
                    reason: reason.to_string(),
                });
            }
            if map.insert(*name, (*slot, modifiers)).is_some() {
                return Err(SchemaError::DuplicateDefinition(format!(
                    "harmonized name {name}"
                )));
            }
        }
        Ok(Self { entries: map })
    }

    /// Looks up a lower-cased, prefix-stripped name.
    pub fn get(&self, remainder: &str) -> Option<(S, &ModifierSet)> {
        self.entries
            .get(remainder)
            .map(|(slot, modifiers)| (*slot, modifiers))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
