//! Canonical slot identifiers.
//!
//! The vocabulary is frozen at compile time. Definitions (group, value kind,
//! accepted axes, label keywords) live in the schema registry; this enum
//! only names the slots.

use std::str::FromStr;

use crate::error::SchemaError;

closed_enum! {
    /// A canonical measurement concept in the unified vocabulary.
    pub enum CanonicalSlot {
        // demographics
        Age => "age",
        AgeOver89 => "age_over_89",
        Sex => "sex",
        Race => "race",
        Ethnicity => "ethnicity",
        EducationLevel => "education_level",
        MaritalStatus => "marital_status",
        HouseholdIncome => "household_income",
        // anthropometry
        Bmi => "bmi",
        HeightCm => "height_cm",
        WeightKg => "weight_kg",
        WaistCircumferenceCm => "waist_circumference_cm",
        NeckCircumferenceCm => "neck_circumference_cm",
        HipCircumferenceCm => "hip_circumference_cm",
        // vital signs
        SystolicBpMmhg => "systolic_bp_mmhg",
        DiastolicBpMmhg => "diastolic_bp_mmhg",
        PulseRateBpm => "pulse_rate_bpm",
        RespiratoryRate => "respiratory_rate",
        BodyTemperatureC => "body_temperature_c",
        // sleep architecture
        TotalSleepTimeMin => "total_sleep_time_min",
        SleepEfficiencyPct => "sleep_efficiency_pct",
        SleepLatencyMin => "sleep_latency_min",
        RemLatencyMin => "rem_latency_min",
        WasoMin => "waso_min",
        TimeInBedMin => "time_in_bed_min",
        StagePctTst => "stage_pct_tst",
        StageDurationMin => "stage_duration_min",
        PositionTimePct => "position_time_pct",
        PositionDurationMin => "position_duration_min",
        // respiratory events
        Ahi => "ahi",
        Rdi => "rdi",
        ApneaIndex => "apnea_index",
        HypopneaIndex => "hypopnea_index",
        ApneaCount => "apnea_count",
        HypopneaCount => "hypopnea_count",
        ReraIndex => "rera_index",
        // oxygen saturation
        Spo2MeanPct => "spo2_mean_pct",
        Spo2MinPct => "spo2_min_pct",
        Spo2MaxPct => "spo2_max_pct",
        Spo2BaselinePct => "spo2_baseline_pct",
        Odi => "odi",
        Spo2Below90Pct => "spo2_below_90_pct",
        // arousals
        ArousalIndex => "arousal_index",
        ArousalCount => "arousal_count",
        // limb movements
        PlmIndex => "plm_index",
        PlmArousalIndex => "plm_arousal_index",
        PlmCount => "plm_count",
        // heart rate
        HeartRateSleepBpm => "heart_rate_sleep_bpm",
        HeartRateWakeBpm => "heart_rate_wake_bpm",
        AtrialFibrillationPsg => "atrial_fibrillation_psg",
        EctopicBeatsCount => "ectopic_beats_count",
        // heart rate variability
        HrvSdnnMs => "hrv_sdnn_ms",
        HrvRmssdMs => "hrv_rmssd_ms",
        HrvLfHfRatio => "hrv_lf_hf_ratio",
        // sleep questionnaires
        EssTotal => "ess_total",
        PsqiGlobal => "psqi_global",
        IsiTotal => "isi_total",
        FosqTotal => "fosq_total",
        BerlinHighRisk => "berlin_high_risk",
        StopbangTotal => "stopbang_total",
        MeqTotal => "meq_total",
        // mood questionnaires
        Phq9Total => "phq9_total",
        CesdTotal => "cesd_total",
        Gad7Total => "gad7_total",
        BdiTotal => "bdi_total",
        // quality of life
        Sf36Pcs => "sf36_pcs",
        Sf36Mcs => "sf36_mcs",
        Eq5dIndex => "eq5d_index",
        // cognition
        MmseTotal => "mmse_total",
        MocaTotal => "moca_total",
        TrailsBTimeS => "trails_b_time_s",
        DigitSymbolScore => "digit_symbol_score",
        // medical history
        HypertensionDx => "hypertension_dx",
        DiabetesDx => "diabetes_dx",
        StrokeHx => "stroke_hx",
        MyocardialInfarctionHx => "myocardial_infarction_hx",
        HeartFailureDx => "heart_failure_dx",
        CopdDx => "copd_dx",
        AsthmaDx => "asthma_dx",
        InsomniaDx => "insomnia_dx",
        OsaDx => "osa_dx",
        NarcolepsyDx => "narcolepsy_dx",
        RlsDx => "rls_dx",
        DepressionDx => "depression_dx",
        // medications
        AntihypertensiveUse => "antihypertensive_use",
        BenzodiazepineUse => "benzodiazepine_use",
        AntidepressantUse => "antidepressant_use",
        StatinUse => "statin_use",
        HypnoticUse => "hypnotic_use",
        StimulantUse => "stimulant_use",
        // pap therapy
        PapUseHoursNight => "pap_use_hours_night",
        PapPressureCmh2o => "pap_pressure_cmh2o",
        PapAdherent => "pap_adherent",
        // lifestyle
        SmokingStatus => "smoking_status",
        PackYears => "pack_years",
        AlcoholDrinksWeek => "alcohol_drinks_week",
        CaffeineServingsDay => "caffeine_servings_day",
        PhysicalActivityMet => "physical_activity_met",
        // laboratory
        GlucoseFastingMgdl => "glucose_fasting_mgdl",
        Hba1cPct => "hba1c_pct",
        CholesterolTotalMgdl => "cholesterol_total_mgdl",
        HdlCholesterolMgdl => "hdl_cholesterol_mgdl",
        LdlCholesterolMgdl => "ldl_cholesterol_mgdl",
        TriglyceridesMgdl => "triglycerides_mgdl",
        CrpMgl => "crp_mgl",
        CreatinineMgdl => "creatinine_mgdl",
        // pulmonary function
        Fev1L => "fev1_l",
        FvcL => "fvc_l",
        Fev1FvcRatio => "fev1_fvc_ratio",
        // actigraphy
        ActiTotalSleepMin => "acti_total_sleep_min",
        ActiSleepEfficiencyPct => "acti_sleep_efficiency_pct",
        ActiWasoMin => "acti_waso_min",
        ActiSleepOnsetLatencyMin => "acti_sleep_onset_latency_min",
        // sleep habits
        HabitualBedtime => "habitual_bedtime",
        HabitualWaketime => "habitual_waketime",
        HabitualSleepDurationH => "habitual_sleep_duration_h",
        NapFrequency => "nap_frequency",
        // study design
        VisitNumber => "visit_number",
        StudyArm => "study_arm",
        RandomizationDate => "randomization_date",
        // psg recording
        PsgStudyDate => "psg_study_date",
        PsgSignalQuality => "psg_signal_quality",
        PsgRecordingDurationMin => "psg_recording_duration_min",
    }
}

impl CanonicalSlot {
    /// Number of `_`-separated components in the identifier.
    pub fn name_components(&self) -> usize {
        self.as_str().split('_').count()
    }
}

impl FromStr for CanonicalSlot {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SchemaError::UnknownSlot(s.to_string()))
    }
}
