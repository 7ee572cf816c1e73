//! Declarative pattern-family grammar.
//!
//! A family is an ordered list of slices. Each slice contributes a literal
//! lead followed by one or more parts; each part captures a sub-token with a
//! permissive shape and resolves it through a closed code table. The shape is
//! deliberately wider than the table so that an unknown code is seen as a
//! rejection of the family rather than a silent non-match.

use std::collections::BTreeSet;

use regex::{Captures, Regex};

use cde_model::{CanonicalSlot, Modifier, ModifierAxis, ModifierSet, SchemaError};

/// What a recognized code contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Yield {
    Slot(CanonicalSlot),
    /// Zero or more modifier values; an empty list marks a recognized token
    /// that carries no modifier.
    Modifiers(&'static [Modifier]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub token: &'static str,
    pub yields: Yield,
    /// A fixed code pins its axes: a stage or position suffix may not change them.
    pub fixed: bool,
}

pub const fn slot(token: &'static str, slot: CanonicalSlot) -> Code {
    Code {
        token,
        yields: Yield::Slot(slot),
        fixed: false,
    }
}

pub const fn sets(token: &'static str, modifiers: &'static [Modifier]) -> Code {
    Code {
        token,
        yields: Yield::Modifiers(modifiers),
        fixed: false,
    }
}

pub const fn pins(token: &'static str, modifiers: &'static [Modifier]) -> Code {
    Code {
        token,
        yields: Yield::Modifiers(modifiers),
        fixed: true,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Part {
    /// Capture-group name, unique within the family.
    pub name: &'static str,
    /// Literal text preceding the sub-token.
    pub lead: &'static str,
    /// Regex fragment the sub-token must fit.
    pub shape: &'static str,
    pub codes: &'static [Code],
}

#[derive(Debug, Clone, Copy)]
pub struct Slice {
    pub name: &'static str,
    pub optional: bool,
    pub parts: &'static [Part],
}

#[derive(Debug, Clone, Copy)]
pub struct PatternFamily {
    pub name: &'static str,
    pub slices: &'static [Slice],
}

/// Why a family that matched the token's shape was still rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnknownCode { part: &'static str, token: String },
    SuffixConflict { axis: ModifierAxis, fixed: Modifier, suffix: Modifier },
    Undefined(String),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCode { part, token } => {
                write!(f, "unknown {part} code '{token}'")
            }
            Self::SuffixConflict {
                axis,
                fixed,
                suffix,
            } => write!(
                f,
                "suffix {suffix} conflicts with fixed {axis} value {}",
                fixed.value()
            ),
            Self::Undefined(reason) => f.write_str(reason),
        }
    }
}

/// A family's decoding of one token, before the combination check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub family: &'static str,
    pub slot: CanonicalSlot,
    pub modifiers: ModifierSet,
    /// Axes pinned by a fixed code.
    pub fixed: BTreeSet<ModifierAxis>,
}

/// A family compiled to one anchored regex.
#[derive(Debug, Clone)]
pub struct CompiledFamily {
    family: PatternFamily,
    regex: Regex,
}

impl CompiledFamily {
    pub fn compile(family: PatternFamily) -> Result<Self, SchemaError> {
        let invalid = |message: String| SchemaError::InvalidPattern {
            family: family.name.to_string(),
            message,
        };

        let mut names = BTreeSet::new();
        let mut slot_parts = 0usize;
        let mut pattern = String::from("^");
        for slice in family.slices {
            if slice.parts.is_empty() {
                return Err(invalid(format!("slice {} has no parts", slice.name)));
            }
            let mut fragment = String::new();
            for part in slice.parts {
                if !names.insert(part.name) {
                    return Err(invalid(format!("duplicate part name {}", part.name)));
                }
                check_part(part).map_err(&invalid)?;
                if matches!(part.codes.first().map(|code| code.yields), Some(Yield::Slot(_))) {
                    if slice.optional {
                        return Err(invalid(format!(
                            "measure part {} sits in optional slice {}",
                            part.name, slice.name
                        )));
                    }
                    slot_parts += 1;
                }
                fragment.push_str(&regex::escape(part.lead));
                fragment.push_str(&format!("(?P<{}>{})", part.name, part.shape));
            }
            if slice.optional {
                pattern.push_str(&format!("(?:{fragment})?"));
            } else {
                pattern.push_str(&fragment);
            }
        }
        pattern.push('$');

        if slot_parts != 1 {
            return Err(invalid(format!(
                "expected exactly one measure part, found {slot_parts}"
            )));
        }

        let regex = Regex::new(&pattern).map_err(|e| invalid(e.to_string()))?;
        Ok(Self { family, regex })
    }

    pub fn name(&self) -> &'static str {
        self.family.name
    }

    /// `None` when the token does not fit the family's shape at all.
    pub fn decode(&self, token: &str) -> Option<Result<Decoded, RejectReason>> {
        let captures = self.regex.captures(token)?;
        Some(self.decode_captures(&captures))
    }

    fn decode_captures(&self, captures: &Captures<'_>) -> Result<Decoded, RejectReason> {
        let mut slot = None;
        let mut modifiers = ModifierSet::new();
        let mut fixed = BTreeSet::new();
        for slice in self.family.slices {
            for part in slice.parts {
                let Some(found) = captures.name(part.name) else {
                    continue;
                };
                let token = found.as_str();
                let code = part
                    .codes
                    .iter()
                    .find(|code| code.token == token)
                    .ok_or_else(|| RejectReason::UnknownCode {
                        part: part.name,
                        token: token.to_string(),
                    })?;
                match code.yields {
                    Yield::Slot(value) => slot = Some(value),
                    Yield::Modifiers(values) => {
                        for value in values {
                            modifiers.insert(*value);
                            if code.fixed {
                                fixed.insert(value.axis());
                            }
                        }
                    }
                }
            }
        }
        // The compile-time check guarantees a required measure part.
        let slot = slot.ok_or_else(|| RejectReason::UnknownCode {
            part: "measure",
            token: String::new(),
        })?;
        Ok(Decoded {
            family: self.family.name,
            slot,
            modifiers,
            fixed,
        })
    }
}

fn check_part(part: &Part) -> Result<(), String> {
    let Some(first) = part.codes.first() else {
        return Err(format!("part {} has an empty code table", part.name));
    };
    let is_slot = matches!(first.yields, Yield::Slot(_));
    let shape = Regex::new(&format!("^(?:{})$", part.shape))
        .map_err(|e| format!("part {} has an invalid shape: {e}", part.name))?;
    let mut tokens = BTreeSet::new();
    for code in part.codes {
        if matches!(code.yields, Yield::Slot(_)) != is_slot {
            return Err(format!("part {} mixes measure and modifier codes", part.name));
        }
        if !tokens.insert(code.token) {
            return Err(format!("part {} repeats code '{}'", part.name, code.token));
        }
        if !shape.is_match(code.token) {
            return Err(format!(
                "code '{}' does not fit the shape of part {}",
                code.token, part.name
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cde_model::SleepStage;

    const MEASURE: &[Code] = &[slot("tst", CanonicalSlot::TotalSleepTimeMin)];
    const STAGE: &[Code] = &[pins("r", &[Modifier::SleepStage(SleepStage::Rem)])];

    #[test]
    fn test_rejects_family_without_measure() {
        const FAMILY: PatternFamily = PatternFamily {
            name: "no_measure",
            slices: &[Slice {
                name: "stage",
                optional: false,
                parts: &[Part {
                    name: "stage",
                    lead: "",
                    shape: "[a-z]",
                    codes: STAGE,
                }],
            }],
        };
        assert!(matches!(
            CompiledFamily::compile(FAMILY),
            Err(SchemaError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_rejects_code_outside_shape() {
        const FAMILY: PatternFamily = PatternFamily {
            name: "bad_shape",
            slices: &[Slice {
                name: "measure",
                optional: false,
                parts: &[Part {
                    name: "measure",
                    lead: "",
                    shape: "[0-9]+",
                    codes: MEASURE,
                }],
            }],
        };
        assert!(CompiledFamily::compile(FAMILY).is_err());
    }

    #[test]
    fn test_decode_and_reject() {
        const FAMILY: PatternFamily = PatternFamily {
            name: "toy",
            slices: &[
                Slice {
                    name: "measure",
                    optional: false,
                    parts: &[Part {
                        name: "measure",
                        lead: "",
                        shape: "[a-z]+",
                        codes: MEASURE,
                    }],
                },
                Slice {
                    name: "stage",
                    optional: true,
                    parts: &[Part {
                        name: "stage",
                        lead: "_",
                        shape: "[a-z]",
                        codes: STAGE,
                    }],
                },
            ],
        };
        let family = CompiledFamily::compile(FAMILY).unwrap();

        let decoded = family.decode("tst_r").unwrap().unwrap();
        assert_eq!(decoded.slot, CanonicalSlot::TotalSleepTimeMin);
        assert!(decoded.fixed.contains(&ModifierAxis::SleepStage));

        let bare = family.decode("tst").unwrap().unwrap();
        assert!(bare.modifiers.is_empty());

        assert_eq!(
            family.decode("tst_x").unwrap(),
            Err(RejectReason::UnknownCode {
                part: "stage",
                token: "x".to_string()
            })
        );
        assert!(family.decode("tst_rr").is_none());
    }
}
