use std::sync::Arc;

use cde_model::{MappingTarget, SchemaError, SourceVariable, StrategyName};
use cde_standards::Standards;

use super::{Candidate, Strategy};
use crate::parser::{ParsedTag, TagParser};

/// Structured variable names decoded by the tag parser.
///
/// The name is parsed as given first; when that fails and it starts with a
/// configured harmonization prefix, the remainder is parsed instead.
#[derive(Debug, Clone)]
pub struct CompositionalParse {
    standards: Arc<Standards>,
    parser: TagParser,
    /// Lower-cased harmonization prefixes.
    prefixes: Vec<String>,
}

impl CompositionalParse {
    pub fn new(standards: Arc<Standards>, parser: TagParser, prefixes: Vec<String>) -> Self {
        Self {
            standards,
            parser,
            prefixes,
        }
    }

    fn parse(&self, token: &str) -> Result<Option<ParsedTag>, SchemaError> {
        self.parser.parse(&self.standards.registry, token)
    }
}

fn candidate(parsed: ParsedTag, note: String) -> Candidate {
    Candidate::new(MappingTarget::slot(parsed.slot, parsed.modifiers), note)
}

impl Strategy for CompositionalParse {
    fn name(&self) -> StrategyName {
        StrategyName::CompositionalParse
    }

    fn attempt(&self, variable: &SourceVariable) -> Result<Option<Candidate>, SchemaError> {
        let name = variable.name.trim().to_ascii_lowercase();
        if let Some(parsed) = self.parse(&name)? {
            let note = format!("decoded by pattern family {}", parsed.family);
            return Ok(Some(candidate(parsed, note)));
        }
        for prefix in &self.prefixes {
            let Some(remainder) = name.strip_prefix(prefix.as_str()) else {
                continue;
            };
            if remainder.is_empty() {
                continue;
            }
            if let Some(parsed) = self.parse(remainder)? {
                let note = format!(
                    "decoded by pattern family {} after prefix '{prefix}'",
                    parsed.family
                );
                return Ok(Some(candidate(parsed, note)));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cde_model::CanonicalSlot;

    fn strategy(prefixes: &[&str]) -> CompositionalParse {
        CompositionalParse::new(
            Arc::new(Standards::load().unwrap()),
            TagParser::standard().unwrap(),
            prefixes.iter().map(|prefix| prefix.to_string()).collect(),
        )
    }

    #[test]
    fn test_prefix_is_stripped_before_parsing() {
        let strategy = strategy(&["nsrr_"]);
        let bare = strategy
            .attempt(&SourceVariable::new("shhs1", "ahi_ap0uhp3x3r_f1t1"))
            .unwrap()
            .unwrap();
        let prefixed = strategy
            .attempt(&SourceVariable::new("shhs1", "NSRR_ahi_ap0uhp3x3r_f1t1"))
            .unwrap()
            .unwrap();
        assert_eq!(prefixed.target, bare.target);
        assert!(prefixed.note.ends_with("after prefix 'nsrr_'"), "{}", prefixed.note);
        assert!(matches!(
            prefixed.target,
            MappingTarget::CanonicalSlot {
                slot_id: CanonicalSlot::Ahi,
                ..
            }
        ));
    }

    #[test]
    fn test_unconfigured_prefix_is_not_stripped() {
        let strategy = strategy(&["harm_"]);
        assert_eq!(
            strategy
                .attempt(&SourceVariable::new("shhs1", "nsrr_ahi_ap0uhp3x3r_f1t1"))
                .unwrap(),
            None
        );
        assert_eq!(
            strategy.attempt(&SourceVariable::new("shhs1", "harm_")).unwrap(),
            None
        );
    }
}
