use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::{CellAlignment, Table};
use tracing::{info, info_span};

use cde_cli::document::{MappingDocument, describe_target};
use cde_cli::input::read_variables;
use cde_map::{BatchOptions, Resolver};
use cde_model::{ConceptGroup, ModifierAxis, SourceVariable, StrategyName};
use cde_standards::{EngineConfig, Standards};
use cde_validate::validate_batch;

use crate::cli::{ExplainArgs, MapArgs, SlotsArgs};
use crate::summary::{align_column, apply_table_style, header_cell, print_decision};

pub struct MapResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub document: MappingDocument,
}

pub fn run_map(args: &MapArgs) -> Result<MapResult> {
    let span = info_span!("map", input = %args.input.display());
    let _guard = span.enter();

    let config =
        EngineConfig::load_or_default(args.config.as_deref()).context("load engine config")?;
    let standards = Arc::new(Standards::load().context("build schema registry")?);
    let resolver =
        Resolver::new(Arc::clone(&standards), &config).context("build strategy chain")?;
    let variables = read_variables(&args.input)?;

    let workers = args
        .workers
        .map_or_else(|| config.workers(), std::num::NonZeroUsize::get);
    let start = Instant::now();
    let outcome = resolver
        .resolve_batch(&variables, &BatchOptions::with_workers(workers))
        .context("resolve batch")?;
    let validation = validate_batch(
        &standards.registry,
        &config.validation,
        &outcome.mappings,
        outcome.completeness,
    );
    info!(
        variables = variables.len(),
        workers,
        elapsed_ms = start.elapsed().as_millis(),
        "mapping complete"
    );

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    let document = MappingDocument::new(outcome, validation);
    document.write(&output)?;
    Ok(MapResult {
        input: args.input.clone(),
        output,
        document,
    })
}

/// `vars.tsv` becomes `vars.mappings.json` beside the input.
fn default_output_path(input: &std::path::Path) -> PathBuf {
    input.with_extension("mappings.json")
}

pub fn run_slots(args: &SlotsArgs) -> Result<()> {
    let standards = Standards::load().context("build schema registry")?;
    let group = args
        .group
        .as_deref()
        .map(str::parse::<ConceptGroup>)
        .transpose()
        .context("parse --group")?;

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Slot"),
        header_cell("Group"),
        header_cell("Kind"),
        header_cell("Modifier axes"),
        header_cell("Title"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    let mut listed = 0usize;
    for definition in standards
        .registry
        .slots()
        .filter(|definition| group.is_none_or(|group| definition.group == group))
    {
        let axes: Vec<&str> = definition.axes.iter().map(ModifierAxis::as_str).collect();
        table.add_row(vec![
            definition.slot.to_string(),
            definition.group.to_string(),
            definition.kind.as_str().to_string(),
            if axes.is_empty() {
                "-".to_string()
            } else {
                axes.join(", ")
            },
            definition.title.to_string(),
        ]);
        listed += 1;
    }
    println!("{table}");
    println!(
        "{listed} slot(s); registry {}",
        standards.registry.fingerprint()
    );
    Ok(())
}

pub fn run_explain(args: &ExplainArgs) -> Result<()> {
    let config =
        EngineConfig::load_or_default(args.config.as_deref()).context("load engine config")?;
    let standards = Arc::new(Standards::load().context("build schema registry")?);
    let resolver = Resolver::new(standards, &config).context("build strategy chain")?;

    let mut variable = SourceVariable::new(args.dataset.as_str(), args.name.as_str());
    variable.label = args.label.clone();
    variable.concept_path = args.path.clone();
    let resolution = resolver.explain(&variable)?;
    let mapping = &resolution.mapping;

    let declined: Vec<&str> = mapping
        .declined
        .iter()
        .map(StrategyName::as_str)
        .collect();
    print_decision(&[
        (
            "Variable",
            format!("{}/{}", mapping.source_dataset, mapping.source_variable),
        ),
        ("Target class", mapping.target.class_name().to_string()),
        ("Target", describe_target(&mapping.target)),
        ("Strategy", mapping.strategy.to_string()),
        ("Confidence", mapping.confidence.to_string()),
        (
            "Declined",
            if declined.is_empty() {
                "-".to_string()
            } else {
                declined.join(" -> ")
            },
        ),
        (
            "BDCHM class",
            mapping
                .bdchm_class
                .map_or_else(|| "-".to_string(), |class| class.to_string()),
        ),
        ("CURIE", mapping.curie.clone().unwrap_or_else(|| "-".to_string())),
        ("Note", resolution.note.clone()),
    ]);
    Ok(())
}
