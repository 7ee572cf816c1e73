//! Registered questionnaire instruments.

use serde::Serialize;

use cde_model::SchemaError;

use crate::text::normalize_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instrument {
    /// Identifier emitted as `instrument_id`.
    pub id: &'static str,
    pub title: &'static str,
    /// Lower-case codes used as variable-name stems, longest first.
    pub name_codes: &'static [&'static str],
    /// Extra spellings seen in labels (`PHQ-9`, `STOP-Bang`), matched after
    /// normalization like the id and title.
    pub label_codes: &'static [&'static str],
    pub item_count: u8,
}

impl Instrument {
    pub fn contains_item(&self, item: u32) -> bool {
        (1..=u32::from(self.item_count)).contains(&item)
    }

    /// Item number rendered as an item id (`1` -> `"01"`).
    pub fn item_id(item: u32) -> String {
        format!("{item:02}")
    }
}

const INSTRUMENTS: &[Instrument] = &[
    Instrument {
        id: "ESS",
        title: "Epworth Sleepiness Scale",
        name_codes: &["epworth", "ess"],
        label_codes: &["Epworth"],
        item_count: 8,
    },
    Instrument {
        id: "PSQI",
        title: "Pittsburgh Sleep Quality Index",
        name_codes: &["psqi"],
        label_codes: &[],
        item_count: 10,
    },
    Instrument {
        id: "ISI",
        title: "Insomnia Severity Index",
        name_codes: &["isi"],
        label_codes: &[],
        item_count: 7,
    },
    Instrument {
        id: "FOSQ",
        title: "Functional Outcomes of Sleep Questionnaire",
        name_codes: &["fosq"],
        label_codes: &[],
        item_count: 30,
    },
    Instrument {
        id: "BERLIN",
        title: "Berlin Questionnaire",
        name_codes: &["berlin"],
        label_codes: &[],
        item_count: 10,
    },
    Instrument {
        id: "STOPBANG",
        title: "STOP-Bang Questionnaire",
        name_codes: &["stopbang"],
        label_codes: &["STOP-Bang"],
        item_count: 8,
    },
    Instrument {
        id: "PHQ9",
        title: "Patient Health Questionnaire 9",
        name_codes: &["phq9"],
        label_codes: &["PHQ-9"],
        item_count: 9,
    },
    Instrument {
        id: "GAD7",
        title: "Generalized Anxiety Disorder 7",
        name_codes: &["gad7"],
        label_codes: &["GAD-7"],
        item_count: 7,
    },
    Instrument {
        id: "CESD",
        title: "Center for Epidemiologic Studies Depression Scale",
        name_codes: &["cesd"],
        label_codes: &["CES-D"],
        item_count: 20,
    },
    Instrument {
        id: "MEQ",
        title: "Morningness-Eveningness Questionnaire",
        name_codes: &["meq"],
        label_codes: &["MEQ-SA"],
        item_count: 19,
    },
    Instrument {
        id: "SF36",
        title: "Short Form 36 Health Survey",
        name_codes: &["sf36"],
        label_codes: &["SF-36", "SF 36"],
        item_count: 36,
    },
    Instrument {
        id: "OSA18",
        title: "OSA-18 Quality of Life Survey",
        name_codes: &["osa18"],
        label_codes: &["OSA-18"],
        item_count: 18,
    },
];

/// Instrument list plus the label aliases (id and normalized title).
#[derive(Debug, Clone)]
pub struct InstrumentCatalog {
    instruments: Vec<Instrument>,
}

impl InstrumentCatalog {
    pub fn standard() -> Result<Self, SchemaError> {
        Self::from_instruments(INSTRUMENTS)
    }

    pub fn from_instruments(instruments: &[Instrument]) -> Result<Self, SchemaError> {
        let mut seen = std::collections::BTreeSet::new();
        for instrument in instruments {
            if !seen.insert(instrument.id) {
                return Err(SchemaError::DuplicateDefinition(format!(
                    "instrument {}",
                    instrument.id
                )));
            }
            if instrument.item_count == 0 || instrument.name_codes.is_empty() {
                return Err(SchemaError::InvalidPattern {
                    family: format!("instrument {}", instrument.id),
                    message: "instrument needs at least one item and one name code".to_string(),
                });
            }
        }
        Ok(Self {
            instruments: instruments.to_vec(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Instrument> {
        self.instruments
            .iter()
            .find(|instrument| instrument.id.eq_ignore_ascii_case(id))
    }

    /// Normalized label prefixes for an instrument: its id, its title and
    /// its label codes, without duplicates.
    pub fn label_aliases(instrument: &Instrument) -> Vec<String> {
        let mut aliases: Vec<String> = Vec::new();
        let spellings = [instrument.id, instrument.title]
            .into_iter()
            .chain(instrument.label_codes.iter().copied());
        for alias in spellings.map(normalize_key) {
            if !alias.is_empty() && !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = InstrumentCatalog::standard().unwrap();
        assert_eq!(catalog.iter().count(), 12);
        let ess = catalog.get("ess").unwrap();
        assert_eq!(ess.item_count, 8);
        assert!(ess.contains_item(8));
        assert!(!ess.contains_item(9));
        assert!(!ess.contains_item(0));
        assert_eq!(Instrument::item_id(3), "03");
        assert_eq!(Instrument::item_id(12), "12");
    }

    #[test]
    fn test_hyphenated_label_codes_normalize() {
        let catalog = InstrumentCatalog::standard().unwrap();
        let aliases = |id: &str| InstrumentCatalog::label_aliases(catalog.get(id).unwrap());
        assert_eq!(
            aliases("PHQ9"),
            vec!["phq9", "patient health questionnaire 9", "phq 9"]
        );
        assert!(aliases("STOPBANG").contains(&"stop bang".to_string()));
        assert!(aliases("GAD7").contains(&"gad 7".to_string()));
        // "SF 36" normalizes like "SF-36" and is kept once.
        assert_eq!(
            aliases("SF36")
                .iter()
                .filter(|alias| alias.as_str() == "sf 36")
                .count(),
            1
        );
        assert_eq!(aliases("PSQI").len(), 2);
    }

    #[test]
    fn test_name_codes_are_lowercase_and_longest_first() {
        for instrument in INSTRUMENTS {
            for pair in instrument.name_codes.windows(2) {
                assert!(pair[0].len() >= pair[1].len(), "{}", instrument.id);
            }
            for code in instrument.name_codes {
                assert_eq!(*code, code.to_ascii_lowercase());
            }
        }
    }
}
