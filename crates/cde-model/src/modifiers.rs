//! Modifier axes and their closed value sets.
//!
//! A modifier qualifies a canonical slot along one stratification axis
//! (sleep stage, body position, scoring rule, ...). Values are closed enums,
//! so an out-of-range value cannot be constructed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SchemaError;

closed_enum! {
    /// Stratification dimension that qualifies a canonical slot.
    pub enum ModifierAxis {
        /// Sleep stage the measure was restricted to.
        SleepStage => "sleep_stage",
        /// Body position during the scored period.
        BodyPosition => "body_position",
        /// Recording type (AASM study classification).
        PsgType => "psg_type",
        /// Apnea subtype counted by an apnea index.
        ApneaType => "apnea_type",
        /// Hypopnea scoring rule.
        HypopneaDefinition => "hypopnea_definition",
        /// Oxygen desaturation criterion for scoring an event.
        DesaturationThreshold => "desaturation_threshold",
        /// Whether an EEG arousal can stand in for, or is required in
        /// addition to, the desaturation criterion.
        ArousalRequirement => "arousal_requirement",
        /// Aggregate applied to a repeated measure.
        SummaryStatistic => "summary_statistic",
        /// Reference period of a self-reported or repeated value.
        TimeFrame => "time_frame",
    }
}

impl FromStr for ModifierAxis {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SchemaError::UnknownAxis(s.to_string()))
    }
}

closed_enum! {
    /// Sleep stage per AASM scoring.
    ///
    /// Stage-specific measures (time in stage, stage-restricted indices) carry
    /// one of these; `AllSleep` is the whole-night default scope.
    pub enum SleepStage {
        /// Stage N1: light sleep, transition from wake.
        N1 => "n1",
        /// Stage N2: spindles and K-complexes.
        N2 => "n2",
        /// Stage N3: slow-wave sleep (formerly stages 3 and 4).
        N3 => "n3",
        /// Rapid eye movement sleep.
        Rem => "rem",
        /// All non-REM stages together (N1 + N2 + N3).
        Nrem => "nrem",
        /// Wake epochs within the sleep period.
        Wake => "wake",
        /// Every sleep epoch, regardless of stage.
        AllSleep => "all_sleep",
    }
}

closed_enum! {
    /// Body position from the position sensor.
    pub enum BodyPosition {
        /// On the back.
        Supine => "supine",
        /// Any position other than supine.
        NonSupine => "non_supine",
        /// Left or right side.
        Lateral => "lateral",
        /// Face down.
        Prone => "prone",
        /// Sitting or standing.
        Upright => "upright",
    }
}

closed_enum! {
    /// AASM sleep study classification.
    pub enum PsgType {
        /// Type I: attended in-lab polysomnography.
        TypeI => "type_i",
        /// Type II: unattended full polysomnography (home PSG).
        TypeII => "type_ii",
        /// Type III: home sleep apnea test, at least four channels.
        TypeIII => "type_iii",
        /// Type IV: one or two channels, usually oximetry.
        TypeIV => "type_iv",
    }
}

closed_enum! {
    /// Apnea subtype by respiratory effort.
    pub enum ApneaType {
        /// Absent airflow with continued respiratory effort.
        Obstructive => "obstructive",
        /// Absent airflow without respiratory effort.
        Central => "central",
        /// Starts central, ends obstructive.
        Mixed => "mixed",
        /// Every apnea regardless of subtype.
        All => "all",
    }
}

closed_enum! {
    /// Hypopnea scoring rule.
    pub enum HypopneaDefinition {
        /// AASM 2012/2015 recommended rule: >=30% flow drop with >=3% desaturation or arousal.
        Aasm2015Rule1a => "aasm_2015_1a",
        /// AASM acceptable (CMS) rule: >=30% flow drop with >=4% desaturation.
        Aasm2015Rule1b => "aasm_2015_1b",
        /// AASM 2007 alternative rule: >=50% flow drop with >=3% desaturation or arousal.
        Aasm2007Alternative => "aasm_2007_alternative",
        /// Chicago 1999 research criteria: >50% flow drop, or a smaller drop
        /// with >3% desaturation or arousal.
        Chicago1999 => "chicago_1999",
    }
}

closed_enum! {
    /// Minimum oxygen desaturation for an event to count.
    pub enum DesaturationThreshold {
        /// No desaturation criterion.
        None => "none",
        /// At least 3% drop from baseline SpO2.
        Desat3Pct => "desat_3pct",
        /// At least 4% drop from baseline SpO2.
        Desat4Pct => "desat_4pct",
    }
}

closed_enum! {
    /// How EEG arousals enter event scoring.
    pub enum ArousalRequirement {
        /// Arousals are not considered.
        WithOrWithout => "with_or_without",
        /// An arousal may replace the desaturation criterion.
        OrArousal => "or_arousal",
        /// An arousal must accompany the event.
        ArousalRequired => "arousal_required",
    }
}

closed_enum! {
    /// Aggregate over repeated samples (epochs, nights, visits).
    pub enum SummaryStatistic {
        Mean => "mean",
        Median => "median",
        Minimum => "minimum",
        Maximum => "maximum",
        /// Sample standard deviation.
        StdDev => "std_dev",
        /// Number of occurrences.
        Count => "count",
        /// Sum over the scored period.
        Total => "total",
    }
}

closed_enum! {
    /// Reference period of a value.
    pub enum TimeFrame {
        /// At the time of the visit.
        Current => "current",
        /// Ever, over the participant's life.
        Lifetime => "lifetime",
        /// Previous 30 days, as most sleep questionnaires ask.
        PastMonth => "past_month",
        /// Previous 12 months.
        PastYear => "past_year",
        /// Baseline visit of a longitudinal study.
        Baseline => "baseline",
        /// Any visit after baseline.
        FollowUp => "follow_up",
    }
}

/// One value on one modifier axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    SleepStage(SleepStage),
    BodyPosition(BodyPosition),
    PsgType(PsgType),
    ApneaType(ApneaType),
    HypopneaDefinition(HypopneaDefinition),
    DesaturationThreshold(DesaturationThreshold),
    ArousalRequirement(ArousalRequirement),
    SummaryStatistic(SummaryStatistic),
    TimeFrame(TimeFrame),
}

impl Modifier {
    /// The axis this value belongs to.
    pub fn axis(&self) -> ModifierAxis {
        match self {
            Modifier::SleepStage(_) => ModifierAxis::SleepStage,
            Modifier::BodyPosition(_) => ModifierAxis::BodyPosition,
            Modifier::PsgType(_) => ModifierAxis::PsgType,
            Modifier::ApneaType(_) => ModifierAxis::ApneaType,
            Modifier::HypopneaDefinition(_) => ModifierAxis::HypopneaDefinition,
            Modifier::DesaturationThreshold(_) => ModifierAxis::DesaturationThreshold,
            Modifier::ArousalRequirement(_) => ModifierAxis::ArousalRequirement,
            Modifier::SummaryStatistic(_) => ModifierAxis::SummaryStatistic,
            Modifier::TimeFrame(_) => ModifierAxis::TimeFrame,
        }
    }

    /// The value identifier, without the axis.
    pub fn value(&self) -> &'static str {
        match self {
            Modifier::SleepStage(v) => v.as_str(),
            Modifier::BodyPosition(v) => v.as_str(),
            Modifier::PsgType(v) => v.as_str(),
            Modifier::ApneaType(v) => v.as_str(),
            Modifier::HypopneaDefinition(v) => v.as_str(),
            Modifier::DesaturationThreshold(v) => v.as_str(),
            Modifier::ArousalRequirement(v) => v.as_str(),
            Modifier::SummaryStatistic(v) => v.as_str(),
            Modifier::TimeFrame(v) => v.as_str(),
        }
    }

    /// True for whole-night or every-subtype values that a stage or position
    /// suffix may narrow without contradicting the name it qualifies.
    pub fn is_default_scope(&self) -> bool {
        matches!(
            self,
            Modifier::SleepStage(SleepStage::AllSleep) | Modifier::ApneaType(ApneaType::All)
        )
    }

    /// Parses `value` as a member of `axis`'s enumeration.
    pub fn parse(axis: ModifierAxis, value: &str) -> Result<Self, SchemaError> {
        let parsed = match axis {
            ModifierAxis::SleepStage => SleepStage::parse(value).map(Modifier::SleepStage),
            ModifierAxis::BodyPosition => BodyPosition::parse(value).map(Modifier::BodyPosition),
            ModifierAxis::PsgType => PsgType::parse(value).map(Modifier::PsgType),
            ModifierAxis::ApneaType => ApneaType::parse(value).map(Modifier::ApneaType),
            ModifierAxis::HypopneaDefinition => {
                HypopneaDefinition::parse(value).map(Modifier::HypopneaDefinition)
            }
            ModifierAxis::DesaturationThreshold => {
                DesaturationThreshold::parse(value).map(Modifier::DesaturationThreshold)
            }
            ModifierAxis::ArousalRequirement => {
                ArousalRequirement::parse(value).map(Modifier::ArousalRequirement)
            }
            ModifierAxis::SummaryStatistic => {
                SummaryStatistic::parse(value).map(Modifier::SummaryStatistic)
            }
            ModifierAxis::TimeFrame => TimeFrame::parse(value).map(Modifier::TimeFrame),
        };
        parsed.ok_or_else(|| SchemaError::UnknownAxisValue {
            axis: axis.as_str().to_string(),
            value: value.to_string(),
        })
    }
}

impl ModifierAxis {
    /// Every permissible value of this axis.
    pub fn values(self) -> Vec<Modifier> {
        match self {
            ModifierAxis::SleepStage => SleepStage::ALL
                .iter()
                .map(|v| Modifier::SleepStage(*v))
                .collect(),
            ModifierAxis::BodyPosition => BodyPosition::ALL
                .iter()
                .map(|v| Modifier::BodyPosition(*v))
                .collect(),
            ModifierAxis::PsgType => PsgType::ALL.iter().map(|v| Modifier::PsgType(*v)).collect(),
            ModifierAxis::ApneaType => ApneaType::ALL
                .iter()
                .map(|v| Modifier::ApneaType(*v))
                .collect(),
            ModifierAxis::HypopneaDefinition => HypopneaDefinition::ALL
                .iter()
                .map(|v| Modifier::HypopneaDefinition(*v))
                .collect(),
            ModifierAxis::DesaturationThreshold => DesaturationThreshold::ALL
                .iter()
                .map(|v| Modifier::DesaturationThreshold(*v))
                .collect(),
            ModifierAxis::ArousalRequirement => ArousalRequirement::ALL
                .iter()
                .map(|v| Modifier::ArousalRequirement(*v))
                .collect(),
            ModifierAxis::SummaryStatistic => SummaryStatistic::ALL
                .iter()
                .map(|v| Modifier::SummaryStatistic(*v))
                .collect(),
            ModifierAxis::TimeFrame => TimeFrame::ALL
                .iter()
                .map(|v| Modifier::TimeFrame(*v))
                .collect(),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.axis(), self.value())
    }
}

/// Modifier values keyed by axis; holds at most one value per axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(BTreeMap<ModifierAxis, Modifier>);

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for the modifier's axis, returning the value it replaced.
    pub fn insert(&mut self, modifier: Modifier) -> Option<Modifier> {
        self.0.insert(modifier.axis(), modifier)
    }

    pub fn get(&self, axis: ModifierAxis) -> Option<Modifier> {
        self.0.get(&axis).copied()
    }

    pub fn contains(&self, modifier: &Modifier) -> bool {
        self.0.get(&modifier.axis()) == Some(modifier)
    }

    pub fn remove(&mut self, axis: ModifierAxis) -> Option<Modifier> {
        self.0.remove(&axis)
    }

    pub fn axes(&self) -> impl Iterator<Item = ModifierAxis> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Later values win when the iterator repeats an axis.
impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = Self::new();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

impl<'a> FromIterator<&'a Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = &'a Modifier>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join(", "))
    }
}

impl Serialize for ModifierSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(axis, value)| (axis.as_str(), value.value())))
    }
}

impl<'de> Deserialize<'de> for ModifierSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut set = Self::new();
        for (axis, value) in raw {
            let axis: ModifierAxis = axis.parse().map_err(D::Error::custom)?;
            let modifier = Modifier::parse(axis, &value).map_err(D::Error::custom)?;
            set.insert(modifier);
        }
        Ok(set)
    }
}
