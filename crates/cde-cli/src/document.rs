//! The JSON mapping document written by `cde map`.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use cde_map::BatchOutcome;
use cde_model::{
    ConfidenceLevel, MalformedInputError, MappingTarget, StrategyName, ValidationReport,
    VariableMapping,
};

pub const DOCUMENT_SCHEMA: &str = "sleep-cde.mapping-document";
pub const DOCUMENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct MappingDocument {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub registry_fingerprint: String,
    /// False when the batch stopped before every record was resolved.
    pub complete: bool,
    pub mappings: Vec<VariableMapping>,
    pub rejected: Vec<MalformedInputError>,
    pub validation: ValidationReport,
}

impl MappingDocument {
    pub fn new(outcome: BatchOutcome, validation: ValidationReport) -> Self {
        Self {
            schema: DOCUMENT_SCHEMA,
            schema_version: DOCUMENT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            registry_fingerprint: outcome.registry_fingerprint,
            complete: outcome.completeness.is_complete(),
            mappings: outcome.mappings,
            rejected: outcome.rejected,
            validation,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serialize mapping document")?;
        std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("write mapping document: {}", path.display()))?;
        Ok(())
    }

    /// Mapping counts per strategy, in chain order, zero counts included.
    pub fn tally(&self) -> Vec<StrategyCount> {
        StrategyName::ALL
            .iter()
            .map(|strategy| StrategyCount {
                strategy: *strategy,
                confidence: strategy.confidence(),
                mappings: self
                    .mappings
                    .iter()
                    .filter(|mapping| mapping.strategy == *strategy)
                    .count(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyCount {
    pub strategy: StrategyName,
    pub confidence: ConfidenceLevel,
    pub mappings: usize,
}

/// One-line rendering of a mapping target for terminal output.
pub fn describe_target(target: &MappingTarget) -> String {
    match target {
        MappingTarget::CanonicalSlot { slot_id, modifiers } if modifiers.is_empty() => {
            slot_id.to_string()
        }
        MappingTarget::CanonicalSlot { slot_id, modifiers } => {
            format!("{slot_id} [{modifiers}]")
        }
        MappingTarget::SurveyItemResponse {
            instrument_id,
            item_id,
            item_keyword,
        } => match item_keyword {
            Some(keyword) => format!("{instrument_id} item {item_id} ({keyword})"),
            None => format!("{instrument_id} item {item_id}"),
        },
        MappingTarget::DatasetLocal { .. } => "dataset-local".to_string(),
    }
}
