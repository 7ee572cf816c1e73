//! Label annotations: harmonized-model class and ontology CURIE.
//!
//! Both are keyword tables matched as substrings of the lower-cased label.
//! Class keywords are tried in declared order (specific phrases first, the
//! generic measurement words last). CURIE keywords are tried longest first,
//! OBA before OMOP.

use std::collections::BTreeSet;

use cde_model::{BdchmClass as C, SchemaError};

const CLASS_KEYWORDS: &[(&str, C)] = &[
    // demography
    ("age at ", C::Demography),
    ("age of ", C::Demography),
    ("age (", C::Demography),
    ("age in years", C::Demography),
    ("age greater than", C::Demography),
    ("sex", C::Demography),
    ("gender", C::Demography),
    ("race", C::Demography),
    ("ethnicity", C::Demography),
    ("hispanic", C::Demography),
    ("latino", C::Demography),
    ("education", C::Demography),
    ("marital status", C::Demography),
    ("employment", C::Demography),
    ("occupation", C::Demography),
    ("income", C::Demography),
    ("birth", C::Demography),
    ("language", C::Demography),
    // visits
    ("visit", C::Visit),
    ("follow-up", C::Visit),
    ("followup", C::Visit),
    ("baseline", C::Visit),
    ("screening", C::Visit),
    ("timepoint", C::Visit),
    ("exam ", C::Visit),
    ("randomization", C::Visit),
    // questionnaires
    ("epworth sleepiness scale", C::QuestionnaireResponse),
    ("pittsburgh sleep quality", C::QuestionnaireResponse),
    ("insomnia severity index", C::QuestionnaireResponse),
    ("berlin questionnaire", C::QuestionnaireResponse),
    ("stop-bang", C::QuestionnaireResponse),
    ("center for epidemiologic studies depression", C::QuestionnaireResponse),
    ("patient health questionnaire", C::QuestionnaireResponse),
    ("generalized anxiety disorder", C::QuestionnaireResponse),
    ("beck depression", C::QuestionnaireResponse),
    ("sf-36", C::QuestionnaireResponse),
    ("sf36", C::QuestionnaireResponse),
    ("short form 36", C::QuestionnaireResponse),
    ("eq-5d", C::QuestionnaireResponse),
    ("euroqol", C::QuestionnaireResponse),
    ("child health questionnaire", C::QuestionnaireResponse),
    ("osa-18", C::QuestionnaireResponse),
    ("promis sleep", C::QuestionnaireResponse),
    ("fatigue severity scale", C::QuestionnaireResponse),
    ("functional outcomes of sleep", C::QuestionnaireResponse),
    ("fosq", C::QuestionnaireResponse),
    ("morningness-eveningness", C::QuestionnaireResponse),
    ("chronotype", C::QuestionnaireResponse),
    ("pediatric sleep questionnaire", C::QuestionnaireResponse),
    ("quality of life", C::QuestionnaireResponse),
    ("psqi", C::QuestionnaireResponse),
    ("phq-9", C::QuestionnaireResponse),
    ("phq9", C::QuestionnaireResponse),
    ("phq-8", C::QuestionnaireResponse),
    ("gad-7", C::QuestionnaireResponse),
    ("gad7", C::QuestionnaireResponse),
    ("ces-d", C::QuestionnaireResponse),
    ("cesd", C::QuestionnaireResponse),
    ("ess ", C::QuestionnaireResponse),
    ("bdi", C::QuestionnaireResponse),
    ("scale:", C::QuestionnaireResponse),
    ("questionnaire", C::QuestionnaireResponse),
    ("survey", C::QuestionnaireResponse),
    ("self-report", C::QuestionnaireResponse),
    ("self report", C::QuestionnaireResponse),
    // conditions
    ("obstructive sleep apnea", C::Condition),
    ("central sleep apnea", C::Condition),
    ("sleep apnea", C::Condition),
    ("insomnia diagnosis", C::Condition),
    ("narcolepsy", C::Condition),
    ("restless legs syndrome", C::Condition),
    ("restless leg syndrome", C::Condition),
    ("hypertension", C::Condition),
    ("high blood pressure", C::Condition),
    ("diabetes", C::Condition),
    ("heart failure", C::Condition),
    ("atrial fibrillation", C::Condition),
    ("coronary artery disease", C::Condition),
    ("coronary heart disease", C::Condition),
    ("myocardial infarction", C::Condition),
    ("heart attack", C::Condition),
    ("stroke", C::Condition),
    ("cerebrovascular", C::Condition),
    ("copd", C::Condition),
    ("chronic obstructive pulmonary", C::Condition),
    ("emphysema", C::Condition),
    ("asthma", C::Condition),
    ("depression diagnosis", C::Condition),
    ("anxiety disorder", C::Condition),
    ("cancer", C::Condition),
    ("arthritis", C::Condition),
    ("kidney disease", C::Condition),
    ("liver disease", C::Condition),
    ("thyroid", C::Condition),
    ("obesity", C::Condition),
    ("diagnosis", C::Condition),
    ("diagnosed", C::Condition),
    ("history of", C::Condition),
    ("ever had", C::Condition),
    ("comorbid", C::Condition),
    ("disease", C::Condition),
    // medications
    ("medication", C::DrugExposure),
    ("drug", C::DrugExposure),
    ("prescription", C::DrugExposure),
    ("anti-hypertensive", C::DrugExposure),
    ("antihypertensive", C::DrugExposure),
    ("beta-blocker", C::DrugExposure),
    ("beta blocker", C::DrugExposure),
    ("diuretic", C::DrugExposure),
    ("statin", C::DrugExposure),
    ("lipid-lowering", C::DrugExposure),
    ("benzodiazepine", C::DrugExposure),
    ("sedative", C::DrugExposure),
    ("hypnotic", C::DrugExposure),
    ("sleeping pill", C::DrugExposure),
    ("antidepressant", C::DrugExposure),
    ("anti-depressant", C::DrugExposure),
    ("aspirin", C::DrugExposure),
    ("insulin", C::DrugExposure),
    ("metformin", C::DrugExposure),
    ("bronchodilator", C::DrugExposure),
    // devices
    ("cpap", C::DeviceExposure),
    ("bipap", C::DeviceExposure),
    ("apap", C::DeviceExposure),
    ("positive airway pressure", C::DeviceExposure),
    ("pap therapy", C::DeviceExposure),
    ("pap device", C::DeviceExposure),
    ("pap adherence", C::DeviceExposure),
    ("pap compliance", C::DeviceExposure),
    ("oral appliance", C::DeviceExposure),
    ("dental device", C::DeviceExposure),
    ("mask", C::DeviceExposure),
    ("pacemaker", C::DeviceExposure),
    // procedures
    ("surgery", C::Procedure),
    ("surgical", C::Procedure),
    ("procedure", C::Procedure),
    ("adenotonsillectomy", C::Procedure),
    ("tonsillectomy", C::Procedure),
    ("uvulopalatopharyngoplasty", C::Procedure),
    ("uppp", C::Procedure),
    ("bariatric", C::Procedure),
    ("ablation", C::Procedure),
    ("titration", C::Procedure),
    ("split-night", C::Procedure),
    ("polysomnography study", C::Procedure),
    // exposures
    ("smoking", C::Exposure),
    ("cigarette", C::Exposure),
    ("tobacco", C::Exposure),
    ("alcohol", C::Exposure),
    ("caffeine", C::Exposure),
    ("coffee", C::Exposure),
    ("pack-years", C::Exposure),
    ("pack years", C::Exposure),
    ("secondhand smoke", C::Exposure),
    ("environmental", C::Exposure),
    // social determinants
    ("housing", C::SdohObservation),
    ("neighborhood", C::SdohObservation),
    ("food insecurity", C::SdohObservation),
    ("food security", C::SdohObservation),
    ("transportation", C::SdohObservation),
    ("social support", C::SdohObservation),
    ("discrimination", C::SdohObservation),
    ("stress", C::SdohObservation),
    ("socioeconomic", C::SdohObservation),
    // specimens
    ("blood sample", C::Specimen),
    ("urine sample", C::Specimen),
    ("specimen", C::Specimen),
    ("biospecimen", C::Specimen),
    ("sample collection", C::Specimen),
    // mortality
    ("cause of death", C::CauseOfDeath),
    ("mortality", C::CauseOfDeath),
    ("death", C::CauseOfDeath),
    ("deceased", C::CauseOfDeath),
    ("vital status", C::CauseOfDeath),
    // measurements
    ("apnea-hypopnea index", C::MeasurementObservation),
    ("apnea hypopnea index", C::MeasurementObservation),
    ("respiratory disturbance index", C::MeasurementObservation),
    ("oxygen desaturation index", C::MeasurementObservation),
    ("arousal index", C::MeasurementObservation),
    ("periodic limb movement", C::MeasurementObservation),
    ("plm index", C::MeasurementObservation),
    ("sleep efficiency", C::MeasurementObservation),
    ("sleep latency", C::MeasurementObservation),
    ("rem latency", C::MeasurementObservation),
    ("total sleep time", C::MeasurementObservation),
    ("sleep duration", C::MeasurementObservation),
    ("wake after sleep onset", C::MeasurementObservation),
    ("waso", C::MeasurementObservation),
    ("time in bed", C::MeasurementObservation),
    ("sleep stage", C::MeasurementObservation),
    ("stage n1", C::MeasurementObservation),
    ("stage n2", C::MeasurementObservation),
    ("stage n3", C::MeasurementObservation),
    ("rem sleep", C::MeasurementObservation),
    ("nrem sleep", C::MeasurementObservation),
    ("oxygen saturation", C::MeasurementObservation),
    ("spo2", C::MeasurementObservation),
    ("desaturation", C::MeasurementObservation),
    ("hypopnea", C::MeasurementObservation),
    ("apnea", C::MeasurementObservation),
    ("snoring", C::MeasurementObservation),
    ("snore", C::MeasurementObservation),
    ("body mass index", C::MeasurementObservation),
    ("bmi", C::MeasurementObservation),
    ("height", C::MeasurementObservation),
    ("weight", C::MeasurementObservation),
    ("waist circumference", C::MeasurementObservation),
    ("hip circumference", C::MeasurementObservation),
    ("neck circumference", C::MeasurementObservation),
    ("blood pressure", C::MeasurementObservation),
    ("systolic", C::MeasurementObservation),
    ("diastolic", C::MeasurementObservation),
    ("heart rate", C::MeasurementObservation),
    ("pulse", C::MeasurementObservation),
    ("respiratory rate", C::MeasurementObservation),
    ("temperature", C::MeasurementObservation),
    ("glucose", C::MeasurementObservation),
    ("cholesterol", C::MeasurementObservation),
    ("triglyceride", C::MeasurementObservation),
    ("hemoglobin", C::MeasurementObservation),
    ("hba1c", C::MeasurementObservation),
    ("hematocrit", C::MeasurementObservation),
    ("creatinine", C::MeasurementObservation),
    ("albumin", C::MeasurementObservation),
    ("bilirubin", C::MeasurementObservation),
    ("c-reactive protein", C::MeasurementObservation),
    ("crp", C::MeasurementObservation),
    ("ferritin", C::MeasurementObservation),
    ("insulin level", C::MeasurementObservation),
    ("tsh", C::MeasurementObservation),
    ("ldl", C::MeasurementObservation),
    ("hdl", C::MeasurementObservation),
    ("fev1", C::MeasurementObservation),
    ("fev 1", C::MeasurementObservation),
    ("fvc", C::MeasurementObservation),
    ("forced vital capacity", C::MeasurementObservation),
    ("forced expiratory", C::MeasurementObservation),
    ("spirometry", C::MeasurementObservation),
    ("heart rate variability", C::MeasurementObservation),
    ("hrv", C::MeasurementObservation),
    ("sdnn", C::MeasurementObservation),
    ("rmssd", C::MeasurementObservation),
    ("actigraphy", C::MeasurementObservation),
    ("activity count", C::MeasurementObservation),
    ("actogram", C::MeasurementObservation),
    ("polysomnography", C::MeasurementObservation),
    ("psg", C::MeasurementObservation),
    ("eeg", C::MeasurementObservation),
    ("emg", C::MeasurementObservation),
    ("eog", C::MeasurementObservation),
    ("ecg", C::MeasurementObservation),
    ("psychomotor vigilance", C::MeasurementObservation),
    ("pvt", C::MeasurementObservation),
    ("reaction time", C::MeasurementObservation),
    ("cognitive", C::MeasurementObservation),
    ("adiponectin", C::MeasurementObservation),
    ("ghrelin", C::MeasurementObservation),
    ("leptin", C::MeasurementObservation),
    ("fibrinogen", C::MeasurementObservation),
    ("interleukin", C::MeasurementObservation),
    ("il-6", C::MeasurementObservation),
    ("il-1", C::MeasurementObservation),
    ("tnf", C::MeasurementObservation),
    ("tumor necrosis", C::MeasurementObservation),
    ("cortisol", C::MeasurementObservation),
    ("melatonin", C::MeasurementObservation),
    ("epinephrine", C::MeasurementObservation),
    ("norepinephrine", C::MeasurementObservation),
    ("catecholamine", C::MeasurementObservation),
    ("homocysteine", C::MeasurementObservation),
    ("uric acid", C::MeasurementObservation),
    ("potassium", C::MeasurementObservation),
    ("sodium", C::MeasurementObservation),
    ("calcium", C::MeasurementObservation),
    ("magnesium", C::MeasurementObservation),
    ("phosphorus", C::MeasurementObservation),
    ("bicarbonate", C::MeasurementObservation),
    ("chloride", C::MeasurementObservation),
    ("protein", C::MeasurementObservation),
    ("bnp", C::MeasurementObservation),
    ("troponin", C::MeasurementObservation),
    ("procalcitonin", C::MeasurementObservation),
    ("d-dimer", C::MeasurementObservation),
    ("white blood cell", C::MeasurementObservation),
    ("wbc", C::MeasurementObservation),
    ("red blood cell", C::MeasurementObservation),
    ("rbc", C::MeasurementObservation),
    ("platelet", C::MeasurementObservation),
    ("neutrophil", C::MeasurementObservation),
    ("lymphocyte", C::MeasurementObservation),
    ("monocyte", C::MeasurementObservation),
    ("eosinophil", C::MeasurementObservation),
    ("basophil", C::MeasurementObservation),
    ("alt", C::MeasurementObservation),
    ("ast", C::MeasurementObservation),
    ("ggt", C::MeasurementObservation),
    ("alkaline phosphatase", C::MeasurementObservation),
    ("lipase", C::MeasurementObservation),
    ("amylase", C::MeasurementObservation),
    ("homa", C::MeasurementObservation),
    // identifiers
    ("participant id", C::Participant),
    ("subject id", C::Participant),
    ("study id", C::Participant),
    ("patient id", C::Participant),
    ("namecode", C::Participant),
    ("id number", C::Participant),
    ("file id", C::Participant),
    // study
    ("study name", C::ResearchStudy),
    ("study site", C::ResearchStudy),
    ("center", C::ResearchStudy),
    ("cohort", C::ResearchStudy),
    ("treatment arm", C::ResearchStudy),
    ("randomized", C::ResearchStudy),
    ("eligibility", C::ResearchStudy),
    ("consent", C::ResearchStudy),
    ("enrollment", C::ResearchStudy),
    // measurements
    ("index", C::MeasurementObservation),
    ("score", C::MeasurementObservation),
    ("count", C::MeasurementObservation),
    ("duration", C::MeasurementObservation),
    ("percentage", C::MeasurementObservation),
    ("percent", C::MeasurementObservation),
    ("average", C::MeasurementObservation),
    ("mean", C::MeasurementObservation),
    ("median", C::MeasurementObservation),
    ("minimum", C::MeasurementObservation),
    ("maximum", C::MeasurementObservation),
    ("total", C::MeasurementObservation),
    ("number of", C::MeasurementObservation),
    ("ratio", C::MeasurementObservation),
    ("level", C::MeasurementObservation),
    ("concentration", C::MeasurementObservation),
    ("measurement", C::MeasurementObservation),
    ("value", C::MeasurementObservation),
    ("rate", C::MeasurementObservation),
    ("time", C::MeasurementObservation),
];

/// Biological attribute terms.
const OBA_TERMS: &[(&str, &str)] = &[
    ("body mass index", "OBA:VT0001259"),
    ("standing height", "OBA:VT0001253"),
    ("body height", "OBA:VT0001253"),
    ("body weight", "OBA:VT0001259"),
    ("waist circumference", "OBA:VT0001256"),
    ("hip circumference", "OBA:VT0005416"),
    ("neck circumference", "OBA:VT0002230"),
    ("waist-to-hip", "OBA:VT0001257"),
    ("waist to hip", "OBA:VT0001257"),
    ("height", "OBA:VT0001253"),
    ("weight", "OBA:VT0001259"),
    ("systolic blood pressure", "OBA:VT0000183"),
    ("diastolic blood pressure", "OBA:VT0000183"),
    ("blood pressure", "OBA:VT0000183"),
    ("heart rate", "OBA:1001087"),
    ("pulse rate", "OBA:1001087"),
    ("respiratory rate", "OBA:0000562"),
    ("body temperature", "OBA:VT0005089"),
    ("temperature", "OBA:VT0005089"),
    ("total sleep time", "OBA:1000963"),
    ("sleep duration", "OBA:1000963"),
    ("age at ", "OBA:0000052"),
    ("age of ", "OBA:0000052"),
    ("age (", "OBA:0000052"),
    ("total cholesterol", "OBA:VT0000180"),
    ("hdl cholesterol", "OBA:VT0000184"),
    ("ldl cholesterol", "OBA:VT0000185"),
    ("triglyceride", "OBA:VT0000181"),
    ("cholesterol", "OBA:VT0000180"),
    ("fasting glucose", "OBA:VT0000188"),
    ("blood glucose", "OBA:VT0000188"),
    ("hemoglobin a1c", "OBA:VT0005453"),
    ("hba1c", "OBA:VT0005453"),
    ("insulin", "OBA:VT0002644"),
    ("glucose", "OBA:VT0000188"),
    ("hemoglobin", "OBA:VT0003030"),
    ("hematocrit", "OBA:VT0001588"),
    ("white blood cell", "OBA:VT0000217"),
    ("red blood cell", "OBA:VT0000216"),
    ("platelet count", "OBA:VT0000218"),
    ("creatinine", "OBA:VT0005328"),
    ("bun", "OBA:VT0000190"),
    ("blood urea nitrogen", "OBA:VT0000190"),
    ("albumin", "OBA:VT0005082"),
    ("bilirubin", "OBA:VT0000191"),
    ("c-reactive protein", "OBA:VT0000214"),
    ("crp", "OBA:VT0000214"),
    ("uric acid", "OBA:VT0000189"),
    ("ferritin", "OBA:VT0000193"),
    ("thyroid", "OBA:VT0000186"),
    ("tsh", "OBA:VT0000186"),
    ("fat mass", "OBA:VT0010011"),
    ("lean mass", "OBA:VT0010012"),
    ("body fat", "OBA:VT0010011"),
    ("heart rate variability", "OBA:1001087"),
    ("sdnn", "OBA:1001087"),
    ("rmssd", "OBA:1001087"),
    ("forced vital capacity", "OBA:VT0001527"),
    ("fvc", "OBA:VT0001527"),
    ("forced expiratory volume", "OBA:VT0001528"),
    ("fev1", "OBA:VT0001528"),
    ("fev 1", "OBA:VT0001528"),
];

/// Clinical concept terms.
const OMOP_TERMS: &[(&str, &str)] = &[
    ("apnea-hypopnea index", "OMOP:4196413"),
    ("apnea hypopnea index", "OMOP:4196413"),
    ("respiratory disturbance index", "OMOP:4196413"),
    ("central apnea index", "OMOP:4145749"),
    ("obstructive apnea index", "OMOP:313459"),
    ("oxygen desaturation index", "OMOP:40762499"),
    ("arousal index", "OMOP:4214782"),
    ("periodic limb movement index", "OMOP:377317"),
    ("plm index", "OMOP:377317"),
    ("sleep efficiency", "OMOP:4175802"),
    ("sleep onset latency", "OMOP:4175802"),
    ("rem latency", "OMOP:4175802"),
    ("wake after sleep onset", "OMOP:4175802"),
    ("waso", "OMOP:4175802"),
    ("sleep stage", "OMOP:4175802"),
    ("stage n1", "OMOP:4175802"),
    ("stage n2", "OMOP:4175802"),
    ("stage n3", "OMOP:4175802"),
    ("rem sleep", "OMOP:4175802"),
    ("nrem sleep", "OMOP:4175802"),
    ("oxygen saturation", "OMOP:40762499"),
    ("spo2", "OMOP:40762499"),
    ("time below 90%", "OMOP:40762499"),
    ("time below 88%", "OMOP:40762499"),
    ("desaturation", "OMOP:40762499"),
    ("obstructive sleep apnea", "OMOP:313459"),
    ("central sleep apnea", "OMOP:4145749"),
    ("sleep apnea", "OMOP:313459"),
    ("hypopnea", "OMOP:4151085"),
    ("apnea", "OMOP:313459"),
    ("periodic limb movement", "OMOP:377317"),
    ("restless legs syndrome", "OMOP:377091"),
    ("restless leg", "OMOP:377091"),
    ("narcolepsy", "OMOP:435657"),
    ("insomnia", "OMOP:435216"),
    ("snoring", "OMOP:436962"),
    ("snore", "OMOP:436962"),
    ("epworth sleepiness scale", "OMOP:40770360"),
    ("epworth sleepiness", "OMOP:40770360"),
    ("pittsburgh sleep quality index", "OMOP:40770361"),
    ("pittsburgh sleep quality", "OMOP:40770361"),
    ("psqi", "OMOP:40770361"),
    ("insomnia severity index", "OMOP:40771089"),
    ("functional outcomes of sleep questionnaire", "OMOP:40770362"),
    ("fosq", "OMOP:40770362"),
    ("berlin questionnaire", "OMOP:40770363"),
    ("berlin scale", "OMOP:40770363"),
    ("stop-bang", "OMOP:40770364"),
    ("stopbang", "OMOP:40770364"),
    ("center for epidemiologic studies depression", "OMOP:40771087"),
    ("ces-d", "OMOP:40771087"),
    ("cesd", "OMOP:40771087"),
    ("patient health questionnaire-9", "OMOP:40771088"),
    ("patient health questionnaire", "OMOP:40771088"),
    ("phq-9", "OMOP:40771088"),
    ("phq9", "OMOP:40771088"),
    ("phq-8", "OMOP:40771088"),
    ("phq8", "OMOP:40771088"),
    ("generalized anxiety disorder-7", "OMOP:40771086"),
    ("generalized anxiety disorder", "OMOP:40771086"),
    ("gad-7", "OMOP:40771086"),
    ("gad7", "OMOP:40771086"),
    ("beck depression inventory", "OMOP:40771090"),
    ("bdi", "OMOP:40771090"),
    ("medical outcomes study sf-36", "OMOP:40766968"),
    ("sf-36", "OMOP:40766968"),
    ("sf36", "OMOP:40766968"),
    ("short form 36", "OMOP:40766968"),
    ("eq-5d", "OMOP:40766969"),
    ("euroqol", "OMOP:40766969"),
    ("child health questionnaire", "OMOP:40766970"),
    ("chq", "OMOP:40766970"),
    ("osa-18", "OMOP:40770365"),
    ("pediatric sleep questionnaire", "OMOP:40770367"),
    ("promis sleep disturbance", "OMOP:40770366"),
    ("promis sleep-related impairment", "OMOP:40770368"),
    ("promis sleep", "OMOP:40770366"),
    ("fatigue severity scale", "OMOP:40770369"),
    ("fss", "OMOP:40770369"),
    ("morningness-eveningness", "OMOP:40770370"),
    ("meq", "OMOP:40770370"),
    ("chronotype", "OMOP:40770370"),
    ("hypertension", "OMOP:316866"),
    ("high blood pressure", "OMOP:316866"),
    ("diabetes mellitus", "OMOP:201826"),
    ("type 2 diabetes", "OMOP:201826"),
    ("diabetes", "OMOP:201826"),
    ("depression", "OMOP:440383"),
    ("major depressive", "OMOP:440383"),
    ("anxiety disorder", "OMOP:441542"),
    ("anxiety", "OMOP:441542"),
    ("atrial fibrillation", "OMOP:313217"),
    ("heart failure", "OMOP:316139"),
    ("congestive heart failure", "OMOP:316139"),
    ("stroke", "OMOP:381591"),
    ("cerebrovascular", "OMOP:381591"),
    ("myocardial infarction", "OMOP:312327"),
    ("heart attack", "OMOP:312327"),
    ("coronary artery disease", "OMOP:318443"),
    ("coronary heart disease", "OMOP:318443"),
    ("copd", "OMOP:255573"),
    ("chronic obstructive pulmonary", "OMOP:255573"),
    ("emphysema", "OMOP:261325"),
    ("asthma", "OMOP:317009"),
    ("chronic kidney disease", "OMOP:46271022"),
    ("kidney disease", "OMOP:46271022"),
    ("arthritis", "OMOP:80809"),
    ("cancer", "OMOP:443392"),
    ("obesity", "OMOP:433736"),
    ("cpap pressure", "OMOP:4150518"),
    ("cpap usage", "OMOP:4150518"),
    ("cpap adherence", "OMOP:4150518"),
    ("cpap compliance", "OMOP:4150518"),
    ("cpap", "OMOP:4150518"),
    ("actigraphy", "OMOP:4215451"),
    ("activity count", "OMOP:4215451"),
    ("smoking status", "OMOP:4041306"),
    ("cigarette", "OMOP:4041306"),
    ("alcohol", "OMOP:4041307"),
    ("caffeine", "OMOP:4041308"),
];

const CURIE_PREFIXES: &[&str] = &["OBA", "OMOP"];

/// Keyword tables for the optional label annotations on a mapping.
#[derive(Debug, Clone)]
pub struct LabelAnnotations {
    classes: Vec<(&'static str, C)>,
    /// OBA terms longest first, then OMOP terms longest first.
    curies: Vec<(&'static str, &'static str)>,
}

impl LabelAnnotations {
    pub fn standard() -> Result<Self, SchemaError> {
        Self::from_tables(CLASS_KEYWORDS, &[OBA_TERMS, OMOP_TERMS])
    }

    /// `curie_tables` are consulted in order; within a table the longest
    /// keyword wins, ties keep declaration order.
    pub fn from_tables(
        classes: &[(&'static str, C)],
        curie_tables: &[&[(&'static str, &'static str)]],
    ) -> Result<Self, SchemaError> {
        let mut seen = BTreeSet::new();
        for (keyword, _) in classes {
            check_keyword("class", keyword)?;
            if !seen.insert(*keyword) {
                return Err(SchemaError::DuplicateDefinition(format!(
                    "class keyword '{keyword}'"
                )));
            }
        }

        let mut curies = Vec::new();
        for table in curie_tables {
            let mut seen = BTreeSet::new();
            let mut ordered = table.to_vec();
            for (keyword, curie) in &ordered {
                check_keyword("curie", keyword)?;
                check_curie(keyword, curie)?;
                if !seen.insert(*keyword) {
                    return Err(SchemaError::DuplicateDefinition(format!(
                        "curie keyword '{keyword}'"
                    )));
                }
            }
            ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
            curies.extend(ordered);
        }
        Ok(Self {
            classes: classes.to_vec(),
            curies,
        })
    }

    /// First class whose keyword occurs in `label`.
    pub fn bdchm_class(&self, label: &str) -> Option<C> {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return None;
        }
        self.classes
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map(|(_, class)| *class)
    }

    pub fn curie(&self, label: &str) -> Option<&'static str> {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return None;
        }
        self.curies
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map(|(_, curie)| *curie)
    }

    pub fn class_keywords(&self) -> usize {
        self.classes.len()
    }

    pub fn curie_keywords(&self) -> usize {
        self.curies.len()
    }
}

fn check_keyword(table: &str, keyword: &str) -> Result<(), SchemaError> {
    if keyword.trim().is_empty() || keyword.to_lowercase() != keyword {
        return Err(SchemaError::InvalidPattern {
            family: format!("{table} annotations"),
            message: format!("keyword '{keyword}' must be non-blank lower case"),
        });
    }
    Ok(())
}

fn check_curie(keyword: &str, curie: &str) -> Result<(), SchemaError> {
    let valid = curie.split_once(':').is_some_and(|(prefix, local)| {
        CURIE_PREFIXES.contains(&prefix) && !local.is_empty() && !local.contains(char::is_whitespace)
    });
    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidPattern {
            family: "curie annotations".to_string(),
            message: format!("'{curie}' for '{keyword}' is not an OBA or OMOP CURIE"),
        })
    }
}
