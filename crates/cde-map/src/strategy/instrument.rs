use std::sync::Arc;

use regex::{Captures, Regex};

use cde_model::{MappingTarget, SchemaError, SourceVariable, StrategyName};
use cde_standards::text::normalize_key;
use cde_standards::{Instrument, InstrumentCatalog, Standards};

use super::{Candidate, Strategy};

/// Name and label rules compiled for one instrument.
#[derive(Debug, Clone)]
struct ItemRule {
    instrument: Instrument,
    /// `{code}[_]{item}[_][keyword]` over the lower-cased name.
    name: Regex,
    /// `{id|title} [item|question|q] {item}` over the normalized label.
    label: Regex,
}

/// Questionnaire item responses such as `ess_01sit` or a label reading
/// "Epworth Sleepiness Scale item 3".
///
/// Produces `SurveyItemResponse` targets only.
#[derive(Debug, Clone)]
pub struct InstrumentItem {
    rules: Vec<ItemRule>,
}

impl InstrumentItem {
    pub fn new(standards: &Arc<Standards>) -> Result<Self, SchemaError> {
        let mut rules = Vec::new();
        for instrument in standards.instruments.iter() {
            let codes: Vec<String> = instrument
                .name_codes
                .iter()
                .map(|code| regex::escape(code))
                .collect();
            let name = compile(
                instrument,
                &format!(
                    r"^(?:{})_?(?P<item>[0-9]{{1,2}})(?:_?(?P<keyword>[a-z][a-z0-9_]*))?$",
                    codes.join("|")
                ),
            )?;
            let aliases: Vec<String> = InstrumentCatalog::label_aliases(instrument)
                .iter()
                .map(|alias| regex::escape(alias))
                .collect();
            let label = compile(
                instrument,
                &format!(
                    r"^(?:{})\s(?:(?:item|question|q)\s?)?(?P<item>[0-9]{{1,2}})(?:\s|$)",
                    aliases.join("|")
                ),
            )?;
            rules.push(ItemRule {
                instrument: *instrument,
                name,
                label,
            });
        }
        Ok(Self { rules })
    }
}

fn compile(instrument: &Instrument, pattern: &str) -> Result<Regex, SchemaError> {
    Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
        family: format!("instrument {}", instrument.id),
        message: e.to_string(),
    })
}

/// Item number within range, or `None`.
fn item_number(instrument: &Instrument, captures: &Captures<'_>) -> Option<u32> {
    let item: u32 = captures.name("item")?.as_str().parse().ok()?;
    instrument.contains_item(item).then_some(item)
}

fn survey_item(instrument: &Instrument, item: u32, keyword: Option<String>) -> MappingTarget {
    MappingTarget::SurveyItemResponse {
        instrument_id: instrument.id.to_string(),
        item_id: Instrument::item_id(item),
        item_keyword: keyword,
    }
}

impl Strategy for InstrumentItem {
    fn name(&self) -> StrategyName {
        StrategyName::InstrumentItem
    }

    fn attempt(&self, variable: &SourceVariable) -> Result<Option<Candidate>, SchemaError> {
        let name = variable.name.trim().to_ascii_lowercase();
        for rule in &self.rules {
            let Some(captures) = rule.name.captures(&name) else {
                continue;
            };
            let Some(item) = item_number(&rule.instrument, &captures) else {
                continue;
            };
            let keyword = captures
                .name("keyword")
                .map(|found| found.as_str().trim_matches('_').to_string())
                .filter(|keyword| !keyword.is_empty());
            return Ok(Some(Candidate::new(
                survey_item(&rule.instrument, item, keyword),
                format!("name matches {} item {item}", rule.instrument.id),
            )));
        }

        let Some(label) = variable.label_text() else {
            return Ok(None);
        };
        let label = normalize_key(label);
        for rule in &self.rules {
            let Some(captures) = rule.label.captures(&label) else {
                continue;
            };
            if let Some(item) = item_number(&rule.instrument, &captures) {
                return Ok(Some(Candidate::new(
                    survey_item(&rule.instrument, item, None),
                    format!("label matches {} item {item}", rule.instrument.id),
                )));
            }
        }
        Ok(None)
    }
}
