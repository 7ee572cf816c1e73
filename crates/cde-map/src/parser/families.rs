//! Built-in pattern families, tried in declaration order.

use cde_model::{
    ApneaType as Ap, ArousalRequirement as Ar, BodyPosition as Bp, CanonicalSlot as S,
    DesaturationThreshold as Ds, HypopneaDefinition as Hd, Modifier as M, PsgType as Pt,
    SleepStage as St, SummaryStatistic as Ss,
};

use super::family::{Code, Part, PatternFamily, Slice, pins, sets, slot};

const DESATURATION: &[Code] = &[
    sets("0", &[M::DesaturationThreshold(Ds::None)]),
    sets("3", &[M::DesaturationThreshold(Ds::Desat3Pct)]),
    sets("4", &[M::DesaturationThreshold(Ds::Desat4Pct)]),
];

const AROUSAL: &[Code] = &[
    sets("u", &[M::ArousalRequirement(Ar::WithOrWithout)]),
    sets("r", &[M::ArousalRequirement(Ar::OrArousal)]),
    sets("a", &[M::ArousalRequirement(Ar::ArousalRequired)]),
];

const LEGACY_AROUSAL: &[Code] = &[sets("a", &[M::ArousalRequirement(Ar::OrArousal)])];

const HYPOPNEA_RULE: &[Code] = &[
    sets("3", &[M::HypopneaDefinition(Hd::Aasm2015Rule1a)]),
    sets("4", &[M::HypopneaDefinition(Hd::Aasm2015Rule1b)]),
    sets("5", &[M::HypopneaDefinition(Hd::Chicago1999)]),
    sets("7", &[M::HypopneaDefinition(Hd::Aasm2007Alternative)]),
];

/// Recording-format marker; recognized but carries no modifier.
const FRAME: &[Code] = &[sets("1", &[])];

const PSG: &[Code] = &[
    sets("1", &[M::PsgType(Pt::TypeI)]),
    sets("2", &[M::PsgType(Pt::TypeII)]),
    sets("3", &[M::PsgType(Pt::TypeIII)]),
    sets("4", &[M::PsgType(Pt::TypeIV)]),
];

const RECORDING_PARTS: &[Part] = &[
    Part {
        name: "frame",
        lead: "_f",
        shape: "[0-9]",
        codes: FRAME,
    },
    Part {
        name: "psg",
        lead: "t",
        shape: "[0-9]",
        codes: PSG,
    },
];

const RECORDING: Slice = Slice {
    name: "recording",
    optional: true,
    parts: RECORDING_PARTS,
};

const RESPIRATORY_INDEX: PatternFamily = PatternFamily {
    name: "respiratory_index",
    slices: &[
        Slice {
            name: "measure",
            optional: false,
            parts: &[Part {
                name: "measure",
                lead: "",
                shape: "[a-z]+",
                codes: &[slot("ahi", S::Ahi), slot("rdi", S::Rdi)],
            }],
        },
        Slice {
            name: "apnea_definition",
            optional: false,
            parts: &[
                Part {
                    name: "ap_desat",
                    lead: "_ap",
                    shape: "[0-9]",
                    codes: DESATURATION,
                },
                Part {
                    name: "ap_arousal",
                    lead: "",
                    shape: "[a-z]",
                    codes: AROUSAL,
                },
            ],
        },
        Slice {
            name: "hypopnea_definition",
            optional: false,
            parts: &[
                Part {
                    name: "hp_rule",
                    lead: "hp",
                    shape: "[0-9]",
                    codes: HYPOPNEA_RULE,
                },
                Part {
                    name: "hp_desat",
                    lead: "x",
                    shape: "[0-9]",
                    codes: DESATURATION,
                },
                Part {
                    name: "hp_arousal",
                    lead: "",
                    shape: "[a-z]",
                    codes: AROUSAL,
                },
            ],
        },
        Slice {
            name: "recording",
            optional: false,
            parts: RECORDING_PARTS,
        },
    ],
};

const LEGACY_RESPIRATORY_INDEX: PatternFamily = PatternFamily {
    name: "legacy_respiratory_index",
    slices: &[
        Slice {
            name: "measure",
            optional: false,
            parts: &[Part {
                name: "measure",
                lead: "",
                shape: "[a-z]+",
                codes: &[slot("ahi", S::Ahi), slot("rdi", S::Rdi)],
            }],
        },
        Slice {
            name: "apnea_definition",
            optional: false,
            parts: &[Part {
                name: "ap_desat",
                lead: "_a",
                shape: "[0-9]",
                codes: DESATURATION,
            }],
        },
        Slice {
            name: "hypopnea_definition",
            optional: false,
            parts: &[Part {
                name: "hp_desat",
                lead: "h",
                shape: "[0-9]",
                codes: DESATURATION,
            }],
        },
        Slice {
            name: "hypopnea_arousal",
            optional: true,
            parts: &[Part {
                name: "hp_arousal",
                lead: "",
                shape: "[a-z]",
                codes: LEGACY_AROUSAL,
            }],
        },
    ],
};

const APNEA_INDEX: PatternFamily = PatternFamily {
    name: "apnea_index",
    slices: &[
        Slice {
            name: "measure",
            optional: false,
            parts: &[
                Part {
                    name: "apnea_type",
                    lead: "",
                    shape: "[a-z]",
                    codes: &[
                        sets("o", &[M::ApneaType(Ap::Obstructive)]),
                        sets("c", &[M::ApneaType(Ap::Central)]),
                        sets("m", &[M::ApneaType(Ap::Mixed)]),
                        sets("a", &[M::ApneaType(Ap::All)]),
                    ],
                },
                Part {
                    name: "measure",
                    lead: "",
                    shape: "ai",
                    codes: &[slot("ai", S::ApneaIndex)],
                },
            ],
        },
        Slice {
            name: "apnea_definition",
            optional: false,
            parts: &[
                Part {
                    name: "ap_desat",
                    lead: "_ap",
                    shape: "[0-9]",
                    codes: DESATURATION,
                },
                Part {
                    name: "ap_arousal",
                    lead: "",
                    shape: "[a-z]",
                    codes: AROUSAL,
                },
            ],
        },
        RECORDING,
    ],
};

const OXYGEN_DESATURATION_INDEX: PatternFamily = PatternFamily {
    name: "oxygen_desaturation_index",
    slices: &[
        Slice {
            name: "measure",
            optional: false,
            parts: &[Part {
                name: "measure",
                lead: "",
                shape: "odi",
                codes: &[slot("odi", S::Odi)],
            }],
        },
        Slice {
            name: "desaturation",
            optional: false,
            parts: &[Part {
                name: "desat",
                lead: "",
                shape: "[0-9]",
                codes: DESATURATION,
            }],
        },
        RECORDING,
    ],
};

const SPO2_LEVEL: PatternFamily = PatternFamily {
    name: "spo2_level",
    slices: &[
        Slice {
            name: "measure",
            optional: false,
            parts: &[Part {
                name: "measure",
                lead: "",
                shape: "[a-z]+",
                codes: &[
                    slot("avg", S::Spo2MeanPct),
                    slot("min", S::Spo2MinPct),
                    slot("max", S::Spo2MaxPct),
                ],
            }],
        },
        Slice {
            name: "scope",
            optional: false,
            parts: &[Part {
                name: "scope",
                lead: "lvl",
                shape: "[a-z]+",
                codes: &[
                    sets("sa", &[M::SleepStage(St::AllSleep)]),
                    pins("wk", &[M::SleepStage(St::Wake)]),
                ],
            }],
        },
        RECORDING,
    ],
};

const STAGE_SUMMARY: PatternFamily = PatternFamily {
    name: "stage_summary",
    slices: &[
        Slice {
            name: "measure",
            optional: false,
            parts: &[Part {
                name: "measure",
                lead: "",
                shape: "[a-z]+",
                codes: &[
                    slot("pctdursp", S::StagePctTst),
                    slot("mindursp", S::StageDurationMin),
                ],
            }],
        },
        Slice {
            name: "stage",
            optional: false,
            parts: &[Part {
                name: "stage",
                lead: "_",
                shape: "[a-z0-9]+",
                codes: &[
                    pins("s1", &[M::SleepStage(St::N1)]),
                    pins("s2", &[M::SleepStage(St::N2)]),
                    pins("s3", &[M::SleepStage(St::N3)]),
                    pins("sr", &[M::SleepStage(St::Rem)]),
                    pins("nr", &[M::SleepStage(St::Nrem)]),
                    pins("wk", &[M::SleepStage(St::Wake)]),
                ],
            }],
        },
        RECORDING,
    ],
};

const POSITION_SUMMARY: PatternFamily = PatternFamily {
    name: "position_summary",
    slices: &[
        Slice {
            name: "measure",
            optional: false,
            parts: &[Part {
                name: "measure",
                lead: "",
                shape: "[a-z]+",
                codes: &[
                    slot("pctdurpos", S::PositionTimePct),
                    slot("mindurpos", S::PositionDurationMin),
                ],
            }],
        },
        Slice {
            name: "position",
            optional: false,
            parts: &[Part {
                name: "position",
                lead: "_",
                shape: "[a-z]+",
                codes: &[
                    pins("sup", &[M::BodyPosition(Bp::Supine)]),
                    pins("nsup", &[M::BodyPosition(Bp::NonSupine)]),
                    pins("lat", &[M::BodyPosition(Bp::Lateral)]),
                    pins("prn", &[M::BodyPosition(Bp::Prone)]),
                    pins("upr", &[M::BodyPosition(Bp::Upright)]),
                ],
            }],
        },
        RECORDING,
    ],
};

const HEART_RATE_SUMMARY: PatternFamily = PatternFamily {
    name: "heart_rate_summary",
    slices: &[
        Slice {
            name: "measure",
            optional: false,
            parts: &[
                Part {
                    name: "statistic",
                    lead: "",
                    shape: "[a-z]+",
                    codes: &[
                        sets("avg", &[M::SummaryStatistic(Ss::Mean)]),
                        sets("min", &[M::SummaryStatistic(Ss::Minimum)]),
                        sets("max", &[M::SummaryStatistic(Ss::Maximum)]),
                    ],
                },
                Part {
                    name: "measure",
                    lead: "hr",
                    shape: "sl",
                    codes: &[slot("sl", S::HeartRateSleepBpm)],
                },
            ],
        },
        RECORDING,
    ],
};

pub const FAMILIES: &[PatternFamily] = &[
    RESPIRATORY_INDEX,
    LEGACY_RESPIRATORY_INDEX,
    APNEA_INDEX,
    OXYGEN_DESATURATION_INDEX,
    SPO2_LEVEL,
    STAGE_SUMMARY,
    POSITION_SUMMARY,
    HEART_RATE_SUMMARY,
];
