#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use cde_model::{
    ArousalRequirement, CanonicalSlot, ConceptGroup, DesaturationThreshold, HypopneaDefinition,
    Modifier, ModifierAxis, ModifierSet, SchemaError, SleepStage, ValueKind,
};

use crate::definitions::SLOT_DEFINITIONS;
use crate::hash::sha256_hex;

/// Static description of one canonical slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotDefinition {
    pub slot: CanonicalSlot,
    pub group: ConceptGroup,
    pub kind: ValueKind,
    pub title: &'static str,
    /// Modifier axes that may qualify this slot.
    pub axes: &'static [ModifierAxis],
    /// Characteristic label words, already normalized.
    pub keywords: &'static [&'static str],
}

impl SlotDefinition {
    pub fn accepts(&self, axis: ModifierAxis) -> bool {
        self.axes.contains(&axis)
    }
}

/// Why a `(slot, modifiers)` pair is not clinically defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndefinedCombination {
    AxisNotAccepted {
        slot: CanonicalSlot,
        axis: ModifierAxis,
    },
    /// The 4% rule never uses a 3% (or zero) desaturation criterion.
    Rule1bDesaturation(DesaturationThreshold),
    /// The 4% rule does not accept arousal as an alternative criterion.
    Rule1bArousal,
    Rule1aDesaturation(DesaturationThreshold),
    WakeStage {
        slot: CanonicalSlot,
        group: ConceptGroup,
    },
}

impl fmt::Display for UndefinedCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AxisNotAccepted { slot, axis } => {
                write!(f, "slot {slot} does not accept modifier axis {axis}")
            }
            Self::Rule1bDesaturation(threshold) => write!(
                f,
                "hypopnea rule aasm_2015_1b requires desat_4pct, got {threshold}"
            ),
            Self::Rule1bArousal => write!(
                f,
                "hypopnea rule aasm_2015_1b cannot be scored with or_arousal"
            ),
            Self::Rule1aDesaturation(threshold) => write!(
                f,
                "hypopnea rule aasm_2015_1a requires desat_3pct, got {threshold}"
            ),
            Self::WakeStage { slot, group } => write!(
                f,
                "slot {slot} ({group}) is only scored during sleep, not wake"
            ),
        }
    }
}

/// Frozen, read-only schema: slot definitions, axis enumerations and
/// concept-group membership.
///
/// Built once per process (or per test) and shared by reference; nothing
/// mutates it after construction.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    definitions: BTreeMap<CanonicalSlot, SlotDefinition>,
    groups: BTreeMap<ConceptGroup, Vec<CanonicalSlot>>,
    fingerprint: String,
}

impl SchemaRegistry {
    /// Loads the built-in slot table.
    pub fn standard() -> Result<Self, SchemaError> {
        Self::from_definitions(SLOT_DEFINITIONS)
    }

    /// Builds a registry from an explicit table. Every canonical slot must
    /// be defined exactly once.
    pub fn from_definitions(definitions: &[SlotDefinition]) -> Result<Self, SchemaError> {
        let mut by_slot = BTreeMap::new();
        for definition in definitions {
            if by_slot.insert(definition.slot, *definition).is_some() {
                return Err(SchemaError::DuplicateDefinition(
                    definition.slot.as_str().to_string(),
                ));
            }
        }
        if let Some(missing) = CanonicalSlot::ALL
            .iter()
            .find(|slot| !by_slot.contains_key(*slot))
        {
            return Err(SchemaError::MissingDefinition(missing.as_str().to_string()));
        }

        let mut groups: BTreeMap<ConceptGroup, Vec<CanonicalSlot>> = BTreeMap::new();
        for definition in by_slot.values() {
            groups.entry(definition.group).or_default().push(definition.slot);
        }

        let fingerprint = sha256_hex(render_canonical(&by_slot).as_bytes());
        tracing::debug!(
            slots = by_slot.len(),
            groups = groups.len(),
            fingerprint = %fingerprint,
            "schema registry initialized"
        );

        Ok(Self {
            definitions: by_slot,
            groups,
            fingerprint,
        })
    }

    /// Looks up a slot by identifier.
    pub fn slot(&self, id: &str) -> Result<&SlotDefinition, SchemaError> {
        let slot: CanonicalSlot = id.parse()?;
        self.definition(slot)
    }

    pub fn definition(&self, slot: CanonicalSlot) -> Result<&SlotDefinition, SchemaError> {
        self.definitions
            .get(&slot)
            .ok_or_else(|| SchemaError::MissingDefinition(slot.as_str().to_string()))
    }

    /// Permitted values of the named axis.
    pub fn axis_values(&self, axis: &str) -> Result<Vec<Modifier>, SchemaError> {
        let axis: ModifierAxis = axis.parse()?;
        Ok(axis.values())
    }

    /// Member slots of the named concept group, in declaration order.
    pub fn group_members(&self, group: &str) -> Result<&[CanonicalSlot], SchemaError> {
        let group: ConceptGroup = group.parse()?;
        Ok(self.members_of(group))
    }

    pub fn members_of(&self, group: ConceptGroup) -> &[CanonicalSlot] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every definition, in slot declaration order.
    pub fn slots(&self) -> impl Iterator<Item = &SlotDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// SHA-256 (hex) over the canonical rendering of every definition.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Checks that `(slot, modifiers)` is a clinically defined combination.
    pub fn check_combination(
        &self,
        slot: CanonicalSlot,
        modifiers: &ModifierSet,
    ) -> Result<Result<(), UndefinedCombination>, SchemaError> {
        let definition = self.definition(slot)?;
        Ok(check_definition(definition, modifiers))
    }

    pub fn is_defined(&self, slot: CanonicalSlot, modifiers: &ModifierSet) -> bool {
        matches!(self.check_combination(slot, modifiers), Ok(Ok(())))
    }
}

fn check_definition(
    definition: &SlotDefinition,
    modifiers: &ModifierSet,
) -> Result<(), UndefinedCombination> {
    if let Some(axis) = modifiers.axes().find(|axis| !definition.accepts(*axis)) {
        return Err(UndefinedCombination::AxisNotAccepted {
            slot: definition.slot,
            axis,
        });
    }

    let desaturation = match modifiers.get(ModifierAxis::DesaturationThreshold) {
        Some(Modifier::DesaturationThreshold(value)) => Some(value),
        _ => None,
    };
    match modifiers.get(ModifierAxis::HypopneaDefinition) {
        Some(Modifier::HypopneaDefinition(HypopneaDefinition::Aasm2015Rule1b)) => {
            if let Some(value) = desaturation
                && value != DesaturationThreshold::Desat4Pct
            {
                return Err(UndefinedCombination::Rule1bDesaturation(value));
            }
            if modifiers.contains(&Modifier::ArousalRequirement(ArousalRequirement::OrArousal)) {
                return Err(UndefinedCombination::Rule1bArousal);
            }
        }
        Some(Modifier::HypopneaDefinition(HypopneaDefinition::Aasm2015Rule1a)) => {
            if let Some(value) = desaturation
                && value != DesaturationThreshold::Desat3Pct
            {
                return Err(UndefinedCombination::Rule1aDesaturation(value));
            }
        }
        _ => {}
    }

    if modifiers.contains(&Modifier::SleepStage(SleepStage::Wake))
        && matches!(
            definition.group,
            ConceptGroup::RespiratoryEvents | ConceptGroup::Arousals | ConceptGroup::LimbMovements
        )
    {
        return Err(UndefinedCombination::WakeStage {
            slot: definition.slot,
            group: definition.group,
        });
    }

    Ok(())
}

fn render_canonical(definitions: &BTreeMap<CanonicalSlot, SlotDefinition>) -> String {
    let mut out = String::new();
    for definition in definitions.values() {
        let axes: Vec<&str> = definition.axes.iter().map(ModifierAxis::as_str).collect();
        out.push_str(&format!(
            "{}|{}|{}|{}|{}\n",
            definition.slot,
            definition.group,
            definition.kind.as_str(),
            axes.join(","),
            definition.keywords.join(",")
        ));
    }
    for axis in ModifierAxis::ALL {
        let values: Vec<&str> = axis.values().iter().map(Modifier::value).collect();
        out.push_str(&format!("{}={}\n", axis, values.join(",")));
    }
    out
}
