//! Trailing stage and position suffixes.
//!
//! Shared by the tag parser and the resolver's suffixed-name retry: peel
//! recognized `_suffix` segments off a name, resolve the base, then apply
//! the suffixes on top of the base decoding.

use std::collections::BTreeSet;

use cde_model::{BodyPosition, Modifier, ModifierAxis, ModifierSet, SleepStage};

use super::family::RejectReason;

const SUFFIXES: &[(&str, Modifier)] = &[
    ("rem", Modifier::SleepStage(SleepStage::Rem)),
    ("nrem", Modifier::SleepStage(SleepStage::Nrem)),
    ("n1", Modifier::SleepStage(SleepStage::N1)),
    ("n2", Modifier::SleepStage(SleepStage::N2)),
    ("n3", Modifier::SleepStage(SleepStage::N3)),
    ("sup", Modifier::BodyPosition(BodyPosition::Supine)),
    ("nsup", Modifier::BodyPosition(BodyPosition::NonSupine)),
    ("lat", Modifier::BodyPosition(BodyPosition::Lateral)),
    ("prn", Modifier::BodyPosition(BodyPosition::Prone)),
    ("upr", Modifier::BodyPosition(BodyPosition::Upright)),
];

/// Splits one recognized `_suffix` off the end of `token`.
///
/// Returns the remaining base and the suffix's modifier. The base is never
/// empty.
pub fn peel(token: &str) -> Option<(&str, Modifier)> {
    let (base, tail) = token.rsplit_once('_')?;
    if base.is_empty() {
        return None;
    }
    SUFFIXES
        .iter()
        .find(|(code, _)| *code == tail)
        .map(|(_, modifier)| (base, *modifier))
}

/// Every base reachable by peeling suffixes one at a time, shortest peel
/// first, each with the suffixes removed so far (outermost first).
///
/// Stops before a second suffix on the same axis; such a token has no
/// valid reading.
pub fn peelings(token: &str) -> Vec<(&str, Vec<Modifier>)> {
    let mut out = Vec::new();
    let mut base = token;
    let mut suffixes: Vec<Modifier> = Vec::new();
    while let Some((rest, modifier)) = peel(base) {
        if suffixes.iter().any(|seen| seen.axis() == modifier.axis()) {
            break;
        }
        suffixes.push(modifier);
        base = rest;
        out.push((base, suffixes.clone()));
    }
    out
}

/// Applies `suffixes` to a base decoding. A suffix replaces the base value
/// on its axis unless the base pinned that axis to a different value.
pub fn apply(
    modifiers: &mut ModifierSet,
    fixed: &BTreeSet<ModifierAxis>,
    suffixes: &[Modifier],
) -> Result<(), RejectReason> {
    for suffix in suffixes {
        let axis = suffix.axis();
        if fixed.contains(&axis)
            && let Some(current) = modifiers.get(axis)
            && current != *suffix
        {
            return Err(RejectReason::SuffixConflict {
                axis,
                fixed: current,
                suffix: *suffix,
            });
        }
        modifiers.insert(*suffix);
    }
    Ok(())
}
