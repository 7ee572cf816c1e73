//! Built-in canonical slot table.

use cde_model::{CanonicalSlot as S, ConceptGroup as G, ModifierAxis as A, ValueKind as K};

use crate::registry::SlotDefinition;

const fn def(
    slot: S,
    group: G,
    kind: K,
    title: &'static str,
    axes: &'static [A],
    keywords: &'static [&'static str],
) -> SlotDefinition {
    SlotDefinition {
        slot,
        group,
        kind,
        title,
        axes,
        keywords,
    }
}

const NONE: &[A] = &[];
const TIMED: &[A] = &[A::TimeFrame];
const MEASURED: &[A] = &[A::SummaryStatistic, A::TimeFrame];
const NIGHT: &[A] = &[A::PsgType, A::TimeFrame];
const STAGED: &[A] = &[A::SleepStage, A::PsgType];
const POSITIONED: &[A] = &[A::BodyPosition, A::SleepStage, A::PsgType];
const RESPIRATORY: &[A] = &[
    A::SleepStage,
    A::BodyPosition,
    A::PsgType,
    A::HypopneaDefinition,
    A::DesaturationThreshold,
    A::ArousalRequirement,
    A::TimeFrame,
];
const APNEA: &[A] = &[
    A::SleepStage,
    A::BodyPosition,
    A::PsgType,
    A::ApneaType,
    A::DesaturationThreshold,
    A::ArousalRequirement,
    A::TimeFrame,
];
const OXIMETRY: &[A] = &[A::SleepStage, A::BodyPosition, A::PsgType];
const DESATURATION: &[A] = &[
    A::SleepStage,
    A::BodyPosition,
    A::PsgType,
    A::DesaturationThreshold,
];
const HEART: &[A] = &[A::SleepStage, A::SummaryStatistic, A::PsgType];
const ACTIGRAPHY: &[A] = &[A::SummaryStatistic];

pub(crate) const SLOT_DEFINITIONS: &[SlotDefinition] = &[
    // demographics
    def(S::Age, G::Demographics, K::Numeric, "Age at visit", TIMED, &["age"]),
    def(
        S::AgeOver89,
        G::Demographics,
        K::Boolean,
        "Age above 89 flag",
        NONE,
        &["age", "over", "89"],
    ),
    def(S::Sex, G::Demographics, K::Enumerated, "Sex", NONE, &["sex", "gender"]),
    def(S::Race, G::Demographics, K::Enumerated, "Race", NONE, &["race"]),
    def(
        S::Ethnicity,
        G::Demographics,
        K::Enumerated,
        "Ethnicity",
        NONE,
        &["ethnicity", "hispanic"],
    ),
    def(
        S::EducationLevel,
        G::Demographics,
        K::Enumerated,
        "Highest education level",
        NONE,
        &["education"],
    ),
    def(
        S::MaritalStatus,
        G::Demographics,
        K::Enumerated,
        "Marital status",
        NONE,
        &["marital", "status"],
    ),
    def(
        S::HouseholdIncome,
        G::Demographics,
        K::Enumerated,
        "Household income",
        NONE,
        &["household", "income"],
    ),
    // anthropometry
    def(S::Bmi, G::Anthropometry, K::Numeric, "Body mass index", TIMED, &["body", "mass", "index"]),
    def(S::HeightCm, G::Anthropometry, K::Numeric, "Height (cm)", TIMED, &["height"]),
    def(S::WeightKg, G::Anthropometry, K::Numeric, "Weight (kg)", TIMED, &["weight"]),
    def(
        S::WaistCircumferenceCm,
        G::Anthropometry,
        K::Numeric,
        "Waist circumference (cm)",
        TIMED,
        &["waist", "circumference"],
    ),
    def(
        S::NeckCircumferenceCm,
        G::Anthropometry,
        K::Numeric,
        "Neck circumference (cm)",
        TIMED,
        &["neck", "circumference"],
    ),
    def(
        S::HipCircumferenceCm,
        G::Anthropometry,
        K::Numeric,
        "Hip circumference (cm)",
        TIMED,
        &["hip", "circumference"],
    ),
    // vital signs
    def(
        S::SystolicBpMmhg,
        G::VitalSigns,
        K::Numeric,
        "Systolic blood pressure (mmHg)",
        MEASURED,
        &["systolic", "blood", "pressure"],
    ),
    def(
        S::DiastolicBpMmhg,
        G::VitalSigns,
        K::Numeric,
        "Diastolic blood pressure (mmHg)",
        MEASURED,
        &["diastolic", "blood", "pressure"],
    ),
    def(
        S::PulseRateBpm,
        G::VitalSigns,
        K::Numeric,
        "Resting pulse rate (bpm)",
        MEASURED,
        &["pulse", "rate"],
    ),
    def(
        S::RespiratoryRate,
        G::VitalSigns,
        K::Numeric,
        "Respiratory rate (breaths/min)",
        MEASURED,
        &["respiratory", "rate"],
    ),
    def(
        S::BodyTemperatureC,
        G::VitalSigns,
        K::Numeric,
        "Body temperature (C)",
        MEASURED,
        &["temperature"],
    ),
    // sleep architecture
    def(
        S::TotalSleepTimeMin,
        G::SleepArchitecture,
        K::Numeric,
        "Total sleep time (min)",
        NIGHT,
        &["total", "sleep", "time"],
    ),
    def(
        S::SleepEfficiencyPct,
        G::SleepArchitecture,
        K::Numeric,
        "Sleep efficiency (%)",
        NIGHT,
        &["sleep", "efficiency"],
    ),
    def(
        S::SleepLatencyMin,
        G::SleepArchitecture,
        K::Numeric,
        "Sleep onset latency (min)",
        NIGHT,
        &["sleep", "latency"],
    ),
    def(
        S::RemLatencyMin,
        G::SleepArchitecture,
        K::Numeric,
        "REM latency (min)",
        NIGHT,
        &["rem", "latency"],
    ),
    def(
        S::WasoMin,
        G::SleepArchitecture,
        K::Numeric,
        "Wake after sleep onset (min)",
        NIGHT,
        &["wake", "after", "sleep", "onset"],
    ),
    def(
        S::TimeInBedMin,
        G::SleepArchitecture,
        K::Numeric,
        "Time in bed (min)",
        NIGHT,
        &["time", "in", "bed"],
    ),
    def(
        S::StagePctTst,
        G::SleepArchitecture,
        K::Numeric,
        "Percent of sleep time in stage",
        STAGED,
        &["percent", "stage"],
    ),
    def(
        S::StageDurationMin,
        G::SleepArchitecture,
        K::Numeric,
        "Minutes in stage",
        STAGED,
        &["minutes", "stage"],
    ),
    def(
        S::PositionTimePct,
        G::SleepArchitecture,
        K::Numeric,
        "Percent of sleep time in position",
        POSITIONED,
        &["percent", "position"],
    ),
    def(
        S::PositionDurationMin,
        G::SleepArchitecture,
        K::Numeric,
        "Minutes in position",
        POSITIONED,
        &["minutes", "position"],
    ),
    // respiratory events
    def(
        S::Ahi,
        G::RespiratoryEvents,
        K::Numeric,
        "Apnea-hypopnea index (events/h)",
        RESPIRATORY,
        &["apnea", "hypopnea", "index"],
    ),
    def(
        S::Rdi,
        G::RespiratoryEvents,
        K::Numeric,
        "Respiratory disturbance index (events/h)",
        RESPIRATORY,
        &["respiratory", "disturbance", "index"],
    ),
    def(
        S::ApneaIndex,
        G::RespiratoryEvents,
        K::Numeric,
        "Apnea index (events/h)",
        APNEA,
        &["apnea", "index"],
    ),
    def(
        S::HypopneaIndex,
        G::RespiratoryEvents,
        K::Numeric,
        "Hypopnea index (events/h)",
        RESPIRATORY,
        &["hypopnea", "index"],
    ),
    def(
        S::ApneaCount,
        G::RespiratoryEvents,
        K::Numeric,
        "Number of apneas",
        APNEA,
        &["number", "apneas"],
    ),
    def(
        S::HypopneaCount,
        G::RespiratoryEvents,
        K::Numeric,
        "Number of hypopneas",
        RESPIRATORY,
        &["number", "hypopneas"],
    ),
    def(
        S::ReraIndex,
        G::RespiratoryEvents,
        K::Numeric,
        "Respiratory effort-related arousal index",
        OXIMETRY,
        &["effort", "related", "arousal", "index"],
    ),
    // oxygen saturation
    def(
        S::Spo2MeanPct,
        G::OxygenSaturation,
        K::Numeric,
        "Average SpO2 (%)",
        OXIMETRY,
        &["average", "spo2"],
    ),
    def(
        S::Spo2MinPct,
        G::OxygenSaturation,
        K::Numeric,
        "Minimum SpO2 (%)",
        OXIMETRY,
        &["minimum", "spo2"],
    ),
    def(
        S::Spo2MaxPct,
        G::OxygenSaturation,
        K::Numeric,
        "Maximum SpO2 (%)",
        OXIMETRY,
        &["maximum", "spo2"],
    ),
    def(
        S::Spo2BaselinePct,
        G::OxygenSaturation,
        K::Numeric,
        "Baseline awake SpO2 (%)",
        OXIMETRY,
        &["baseline", "spo2"],
    ),
    def(
        S::Odi,
        G::OxygenSaturation,
        K::Numeric,
        "Oxygen desaturation index (events/h)",
        DESATURATION,
        &["oxygen", "desaturation", "index"],
    ),
    def(
        S::Spo2Below90Pct,
        G::OxygenSaturation,
        K::Numeric,
        "Percent of sleep time with SpO2 below 90%",
        OXIMETRY,
        &["spo2", "below", "90"],
    ),
    // arousals
    def(
        S::ArousalIndex,
        G::Arousals,
        K::Numeric,
        "Arousal index (events/h)",
        OXIMETRY,
        &["arousal", "index"],
    ),
    def(
        S::ArousalCount,
        G::Arousals,
        K::Numeric,
        "Number of arousals",
        OXIMETRY,
        &["number", "arousals"],
    ),
    // limb movements
    def(
        S::PlmIndex,
        G::LimbMovements,
        K::Numeric,
        "Periodic limb movement index (events/h)",
        STAGED,
        &["periodic", "limb", "movement", "index"],
    ),
    def(
        S::PlmArousalIndex,
        G::LimbMovements,
        K::Numeric,
        "Periodic limb movement arousal index",
        STAGED,
        &["limb", "movement", "arousal", "index"],
    ),
    def(
        S::PlmCount,
        G::LimbMovements,
        K::Numeric,
        "Number of periodic limb movements",
        STAGED,
        &["number", "limb", "movements"],
    ),
    // heart rate
    def(
        S::HeartRateSleepBpm,
        G::HeartRate,
        K::Numeric,
        "Heart rate during sleep (bpm)",
        HEART,
        &["heart", "rate", "sleep"],
    ),
    def(
        S::HeartRateWakeBpm,
        G::HeartRate,
        K::Numeric,
        "Heart rate during wake (bpm)",
        &[A::SummaryStatistic, A::PsgType],
        &["heart", "rate", "wake"],
    ),
    def(
        S::AtrialFibrillationPsg,
        G::HeartRate,
        K::Boolean,
        "Atrial fibrillation during recording",
        NIGHT,
        &["atrial", "fibrillation"],
    ),
    def(
        S::EctopicBeatsCount,
        G::HeartRate,
        K::Numeric,
        "Number of ectopic beats",
        NIGHT,
        &["ectopic", "beats"],
    ),
    // heart rate variability
    def(
        S::HrvSdnnMs,
        G::HeartRateVariability,
        K::Numeric,
        "SDNN (ms)",
        STAGED,
        &["sdnn"],
    ),
    def(
        S::HrvRmssdMs,
        G::HeartRateVariability,
        K::Numeric,
        "RMSSD (ms)",
        STAGED,
        &["rmssd"],
    ),
    def(
        S::HrvLfHfRatio,
        G::HeartRateVariability,
        K::Numeric,
        "LF/HF power ratio",
        STAGED,
        &["lf", "hf", "ratio"],
    ),
    // sleep questionnaires
    def(
        S::EssTotal,
        G::SleepQuestionnaires,
        K::Numeric,
        "Epworth Sleepiness Scale total",
        TIMED,
        &["epworth", "sleepiness", "total"],
    ),
    def(
        S::PsqiGlobal,
        G::SleepQuestionnaires,
        K::Numeric,
        "PSQI global score",
        TIMED,
        &["psqi", "global"],
    ),
    def(
        S::IsiTotal,
        G::SleepQuestionnaires,
        K::Numeric,
        "Insomnia Severity Index total",
        TIMED,
        &["insomnia", "severity", "total"],
    ),
    def(
        S::FosqTotal,
        G::SleepQuestionnaires,
        K::Numeric,
        "FOSQ total",
        TIMED,
        &["functional", "outcomes", "sleep", "total"],
    ),
    def(
        S::BerlinHighRisk,
        G::SleepQuestionnaires,
        K::Boolean,
        "Berlin questionnaire high risk",
        TIMED,
        &["berlin", "high", "risk"],
    ),
    def(
        S::StopbangTotal,
        G::SleepQuestionnaires,
        K::Numeric,
        "STOP-Bang total",
        TIMED,
        &["stop", "bang", "total"],
    ),
    def(
        S::MeqTotal,
        G::SleepQuestionnaires,
        K::Numeric,
        "Morningness-Eveningness total",
        TIMED,
        &["morningness", "eveningness", "total"],
    ),
    // mood questionnaires
    def(
        S::Phq9Total,
        G::MoodQuestionnaires,
        K::Numeric,
        "PHQ-9 total",
        TIMED,
        &["phq", "9", "total"],
    ),
    def(
        S::CesdTotal,
        G::MoodQuestionnaires,
        K::Numeric,
        "CES-D total",
        TIMED,
        &["ces", "d", "total"],
    ),
    def(
        S::Gad7Total,
        G::MoodQuestionnaires,
        K::Numeric,
        "GAD-7 total",
        TIMED,
        &["gad", "7", "total"],
    ),
    def(
        S::BdiTotal,
        G::MoodQuestionnaires,
        K::Numeric,
        "Beck Depression Inventory total",
        TIMED,
        &["beck", "depression", "total"],
    ),
    // quality of life
    def(
        S::Sf36Pcs,
        G::QualityOfLife,
        K::Numeric,
        "SF-36 physical component summary",
        TIMED,
        &["physical", "component", "summary"],
    ),
    def(
        S::Sf36Mcs,
        G::QualityOfLife,
        K::Numeric,
        "SF-36 mental component summary",
        TIMED,
        &["mental", "component", "summary"],
    ),
    def(
        S::Eq5dIndex,
        G::QualityOfLife,
        K::Numeric,
        "EQ-5D index",
        TIMED,
        &["eq", "5d", "index"],
    ),
    // cognition
    def(
        S::MmseTotal,
        G::Cognition,
        K::Numeric,
        "Mini-Mental State Examination total",
        TIMED,
        &["mini", "mental", "state"],
    ),
    def(
        S::MocaTotal,
        G::Cognition,
        K::Numeric,
        "Montreal Cognitive Assessment total",
        TIMED,
        &["montreal", "cognitive", "assessment"],
    ),
    def(
        S::TrailsBTimeS,
        G::Cognition,
        K::Numeric,
        "Trail Making Test B time (s)",
        TIMED,
        &["trail", "making", "b"],
    ),
    def(
        S::DigitSymbolScore,
        G::Cognition,
        K::Numeric,
        "Digit symbol substitution score",
        TIMED,
        &["digit", "symbol"],
    ),
    // medical history
    def(S::HypertensionDx, G::MedicalHistory, K::Boolean, "Hypertension", TIMED, &["hypertension"]),
    def(S::DiabetesDx, G::MedicalHistory, K::Boolean, "Diabetes", TIMED, &["diabetes"]),
    def(S::StrokeHx, G::MedicalHistory, K::Boolean, "History of stroke", TIMED, &["stroke"]),
    def(
        S::MyocardialInfarctionHx,
        G::MedicalHistory,
        K::Boolean,
        "History of myocardial infarction",
        TIMED,
        &["myocardial", "infarction"],
    ),
    def(
        S::HeartFailureDx,
        G::MedicalHistory,
        K::Boolean,
        "Heart failure",
        TIMED,
        &["heart", "failure"],
    ),
    def(
        S::CopdDx,
        G::MedicalHistory,
        K::Boolean,
        "Chronic obstructive pulmonary disease",
        TIMED,
        &["copd"],
    ),
    def(S::AsthmaDx, G::MedicalHistory, K::Boolean, "Asthma", TIMED, &["asthma"]),
    def(S::InsomniaDx, G::MedicalHistory, K::Boolean, "Insomnia diagnosis", TIMED, &["insomnia"]),
    def(
        S::OsaDx,
        G::MedicalHistory,
        K::Boolean,
        "Obstructive sleep apnea diagnosis",
        TIMED,
        &["obstructive", "sleep", "apnea"],
    ),
    def(S::NarcolepsyDx, G::MedicalHistory, K::Boolean, "Narcolepsy", TIMED, &["narcolepsy"]),
    def(
        S::RlsDx,
        G::MedicalHistory,
        K::Boolean,
        "Restless legs syndrome",
        TIMED,
        &["restless", "legs"],
    ),
    def(S::DepressionDx, G::MedicalHistory, K::Boolean, "Depression", TIMED, &["depression"]),
    // medications
    def(
        S::AntihypertensiveUse,
        G::Medications,
        K::Boolean,
        "Antihypertensive medication use",
        TIMED,
        &["antihypertensive"],
    ),
    def(
        S::BenzodiazepineUse,
        G::Medications,
        K::Boolean,
        "Benzodiazepine use",
        TIMED,
        &["benzodiazepine"],
    ),
    def(
        S::AntidepressantUse,
        G::Medications,
        K::Boolean,
        "Antidepressant use",
        TIMED,
        &["antidepressant"],
    ),
    def(S::StatinUse, G::Medications, K::Boolean, "Statin use", TIMED, &["statin"]),
    def(
        S::HypnoticUse,
        G::Medications,
        K::Boolean,
        "Hypnotic or sleeping pill use",
        TIMED,
        &["sleeping", "pills"],
    ),
    def(S::StimulantUse, G::Medications, K::Boolean, "Stimulant use", TIMED, &["stimulant"]),
    // pap therapy
    def(
        S::PapUseHoursNight,
        G::PapTherapy,
        K::Numeric,
        "PAP use (hours/night)",
        MEASURED,
        &["pap", "hours"],
    ),
    def(
        S::PapPressureCmh2o,
        G::PapTherapy,
        K::Numeric,
        "PAP pressure (cmH2O)",
        MEASURED,
        &["pap", "pressure"],
    ),
    def(
        S::PapAdherent,
        G::PapTherapy,
        K::Boolean,
        "PAP adherent",
        TIMED,
        &["pap", "adherent"],
    ),
    // lifestyle
    def(
        S::SmokingStatus,
        G::Lifestyle,
        K::Enumerated,
        "Smoking status",
        TIMED,
        &["smoking", "status"],
    ),
    def(S::PackYears, G::Lifestyle, K::Numeric, "Pack-years", TIMED, &["pack", "years"]),
    def(
        S::AlcoholDrinksWeek,
        G::Lifestyle,
        K::Numeric,
        "Alcoholic drinks per week",
        TIMED,
        &["alcohol", "drinks", "week"],
    ),
    def(
        S::CaffeineServingsDay,
        G::Lifestyle,
        K::Numeric,
        "Caffeinated servings per day",
        TIMED,
        &["caffeine", "day"],
    ),
    def(
        S::PhysicalActivityMet,
        G::Lifestyle,
        K::Numeric,
        "Physical activity (MET-min/week)",
        TIMED,
        &["physical", "activity"],
    ),
    // laboratory
    def(
        S::GlucoseFastingMgdl,
        G::Laboratory,
        K::Numeric,
        "Fasting glucose (mg/dL)",
        TIMED,
        &["fasting", "glucose"],
    ),
    def(S::Hba1cPct, G::Laboratory, K::Numeric, "HbA1c (%)", TIMED, &["hba1c"]),
    def(
        S::CholesterolTotalMgdl,
        G::Laboratory,
        K::Numeric,
        "Total cholesterol (mg/dL)",
        TIMED,
        &["total", "cholesterol"],
    ),
    def(
        S::HdlCholesterolMgdl,
        G::Laboratory,
        K::Numeric,
        "HDL cholesterol (mg/dL)",
        TIMED,
        &["hdl", "cholesterol"],
    ),
    def(
        S::LdlCholesterolMgdl,
        G::Laboratory,
        K::Numeric,
        "LDL cholesterol (mg/dL)",
        TIMED,
        &["ldl", "cholesterol"],
    ),
    def(
        S::TriglyceridesMgdl,
        G::Laboratory,
        K::Numeric,
        "Triglycerides (mg/dL)",
        TIMED,
        &["triglycerides"],
    ),
    def(
        S::CrpMgl,
        G::Laboratory,
        K::Numeric,
        "C-reactive protein (mg/L)",
        TIMED,
        &["c", "reactive", "protein"],
    ),
    def(
        S::CreatinineMgdl,
        G::Laboratory,
        K::Numeric,
        "Serum creatinine (mg/dL)",
        TIMED,
        &["creatinine"],
    ),
    // pulmonary function
    def(S::Fev1L, G::PulmonaryFunction, K::Numeric, "FEV1 (L)", TIMED, &["fev1"]),
    def(S::FvcL, G::PulmonaryFunction, K::Numeric, "FVC (L)", TIMED, &["fvc"]),
    def(
        S::Fev1FvcRatio,
        G::PulmonaryFunction,
        K::Numeric,
        "FEV1/FVC ratio",
        TIMED,
        &["fev1", "fvc", "ratio"],
    ),
    // actigraphy
    def(
        S::ActiTotalSleepMin,
        G::Actigraphy,
        K::Numeric,
        "Actigraphy total sleep time (min)",
        ACTIGRAPHY,
        &["total", "sleep", "time"],
    ),
    def(
        S::ActiSleepEfficiencyPct,
        G::Actigraphy,
        K::Numeric,
        "Actigraphy sleep efficiency (%)",
        ACTIGRAPHY,
        &["sleep", "efficiency"],
    ),
    def(
        S::ActiWasoMin,
        G::Actigraphy,
        K::Numeric,
        "Actigraphy wake after sleep onset (min)",
        ACTIGRAPHY,
        &["wake", "after", "sleep", "onset"],
    ),
    def(
        S::ActiSleepOnsetLatencyMin,
        G::Actigraphy,
        K::Numeric,
        "Actigraphy sleep onset latency (min)",
        ACTIGRAPHY,
        &["sleep", "onset", "latency"],
    ),
    // sleep habits
    def(
        S::HabitualBedtime,
        G::SleepHabits,
        K::Timestamp,
        "Usual bedtime",
        NONE,
        &["usual", "bedtime"],
    ),
    def(
        S::HabitualWaketime,
        G::SleepHabits,
        K::Timestamp,
        "Usual wake time",
        NONE,
        &["usual", "wake", "time"],
    ),
    def(
        S::HabitualSleepDurationH,
        G::SleepHabits,
        K::Numeric,
        "Usual sleep duration (h)",
        NONE,
        &["usual", "sleep", "duration"],
    ),
    def(
        S::NapFrequency,
        G::SleepHabits,
        K::Enumerated,
        "Napping frequency",
        NONE,
        &["nap", "frequency"],
    ),
    // study design
    def(S::VisitNumber, G::StudyDesign, K::Numeric, "Visit number", NONE, &["visit", "number"]),
    def(S::StudyArm, G::StudyDesign, K::Enumerated, "Study arm", NONE, &["arm"]),
    def(
        S::RandomizationDate,
        G::StudyDesign,
        K::Timestamp,
        "Randomization date",
        NONE,
        &["randomization", "date"],
    ),
    // psg recording
    def(
        S::PsgStudyDate,
        G::PsgRecording,
        K::Timestamp,
        "Date of sleep study",
        NIGHT,
        &["study", "date"],
    ),
    def(
        S::PsgSignalQuality,
        G::PsgRecording,
        K::Enumerated,
        "Overall signal quality",
        NIGHT,
        &["signal", "quality"],
    ),
    def(
        S::PsgRecordingDurationMin,
        G::PsgRecording,
        K::Numeric,
        "Recording duration (min)",
        NIGHT,
        &["recording", "duration"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize_key;

    #[test]
    fn test_every_slot_defined_once() {
        assert_eq!(SLOT_DEFINITIONS.len(), S::ALL.len());
        for slot in S::ALL {
            let count = SLOT_DEFINITIONS.iter().filter(|d| d.slot == *slot).count();
            assert_eq!(count, 1, "slot {slot}");
        }
    }

    #[test]
    fn test_keywords_are_normalized() {
        for definition in SLOT_DEFINITIONS {
            assert!(!definition.keywords.is_empty(), "{}", definition.slot);
            for keyword in definition.keywords {
                assert_eq!(normalize_key(keyword), *keyword, "{}", definition.slot);
            }
        }
    }
}
