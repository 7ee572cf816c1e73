//! Variable listing readers.
//!
//! Tabular listings (TSV, CSV) are matched on header aliases; JSONL records
//! accept the same aliases as field names. Rows with a blank dataset or name
//! are kept so the resolver can report them as malformed with their index.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use csv::ReaderBuilder;
use serde::Deserialize;

use cde_model::SourceVariable;

/// Supported listing formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Tsv,
    Csv,
    Jsonl,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "tsv" | "tab" => Ok(Self::Tsv),
            "csv" => Ok(Self::Csv),
            "jsonl" | "ndjson" => Ok(Self::Jsonl),
            _ => Err(anyhow!(
                "unsupported input format for {} (expected .tsv, .csv or .jsonl)",
                path.display()
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Dataset,
    Name,
    Label,
    ConceptPath,
    Description,
    Units,
    Tags,
}

impl Column {
    const ALL: [Column; 7] = [
        Column::Dataset,
        Column::Name,
        Column::Label,
        Column::ConceptPath,
        Column::Description,
        Column::Units,
        Column::Tags,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Dataset => &["dataset", "study"],
            Column::Name => &["variable_name", "name", "id"],
            Column::Label => &["label", "variable_label", "display_name"],
            Column::ConceptPath => &["concept_path", "folder"],
            Column::Description => &["description"],
            Column::Units => &["units"],
            Column::Tags => &["tags"],
        }
    }

    fn from_header(header: &str) -> Option<Self> {
        let header = header.trim_matches('\u{feff}').trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|column| column.aliases().contains(&header.as_str()))
    }
}

/// Reads a variable listing, choosing the format from the extension.
pub fn read_variables(path: &Path) -> Result<Vec<SourceVariable>> {
    let format = InputFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read input: {}", path.display()))?;
    let variables = parse_variables(&contents, format)
        .with_context(|| format!("parse input: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        variables = variables.len(),
        "variable listing loaded"
    );
    Ok(variables)
}

pub fn parse_variables(contents: &str, format: InputFormat) -> Result<Vec<SourceVariable>> {
    match format {
        InputFormat::Tsv => parse_tabular(contents, b'\t'),
        InputFormat::Csv => parse_tabular(contents, b','),
        InputFormat::Jsonl => parse_jsonl(contents),
    }
}

fn parse_tabular(contents: &str, delimiter: u8) -> Result<Vec<SourceVariable>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers = reader.headers().context("read headers")?.clone();
    // First matching header wins for each column.
    let mut positions: Vec<(Column, usize)> = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        if let Some(column) = Column::from_header(header)
            && !positions.iter().any(|(known, _)| *known == column)
        {
            positions.push((column, index));
        }
    }
    for required in [Column::Dataset, Column::Name] {
        if !positions.iter().any(|(column, _)| *column == required) {
            bail!(
                "missing a {} column (accepted headers: {})",
                required.aliases()[0],
                required.aliases().join(", ")
            );
        }
    }

    let mut variables = Vec::new();
    for (row, record) in reader.records().enumerate() {
        // Header is line 1.
        let record = record.with_context(|| format!("read record on line {}", row + 2))?;
        let mut variable = SourceVariable::default();
        for (column, index) in &positions {
            let value = record.get(*index).unwrap_or("").trim();
            match column {
                Column::Dataset => variable.dataset = value.to_string(),
                Column::Name => variable.name = value.to_string(),
                Column::Label => variable.label = optional(value),
                Column::ConceptPath => variable.concept_path = optional(value),
                Column::Description => variable.description = optional(value),
                Column::Units => variable.units = optional(value),
                Column::Tags => variable.tags = split_tags(value),
            }
        }
        variables.push(variable);
    }
    Ok(variables)
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(default, alias = "study")]
    dataset: Option<String>,
    #[serde(default, alias = "variable_name", alias = "id")]
    name: Option<String>,
    #[serde(default, alias = "variable_label", alias = "display_name")]
    label: Option<String>,
    #[serde(default, alias = "folder")]
    concept_path: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    units: Option<String>,
    #[serde(default)]
    tags: Option<TagField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagField {
    List(Vec<String>),
    Text(String),
}

impl From<JsonRecord> for SourceVariable {
    fn from(record: JsonRecord) -> Self {
        let text = |value: Option<String>| value.as_deref().and_then(|v| optional(v.trim()));
        Self {
            dataset: record.dataset.unwrap_or_default().trim().to_string(),
            name: record.name.unwrap_or_default().trim().to_string(),
            label: text(record.label),
            concept_path: text(record.concept_path),
            description: text(record.description),
            units: text(record.units),
            tags: match record.tags {
                Some(TagField::List(tags)) => tags
                    .into_iter()
                    .map(|tag| tag.trim().to_string())
                    .filter(|tag| !tag.is_empty())
                    .collect(),
                Some(TagField::Text(tags)) => split_tags(&tags),
                None => Vec::new(),
            },
        }
    }
}

fn parse_jsonl(contents: &str) -> Result<Vec<SourceVariable>> {
    let mut variables = Vec::new();
    for (line, text) in contents.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        let record: JsonRecord = serde_json::from_str(text)
            .with_context(|| format!("parse JSON record on line {}", line + 1))?;
        variables.push(record.into());
    }
    Ok(variables)
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Tabular tag cells separate tags with `;` or `|`.
fn split_tags(value: &str) -> Vec<String> {
    value
        .split([';', '|'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("shhs/vars.TSV")).unwrap(),
            InputFormat::Tsv
        );
        assert_eq!(
            InputFormat::from_path(Path::new("vars.csv")).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            InputFormat::from_path(Path::new("vars.jsonl")).unwrap(),
            InputFormat::Jsonl
        );
        assert!(InputFormat::from_path(Path::new("vars.xlsx")).is_err());
        assert!(InputFormat::from_path(Path::new("vars")).is_err());
    }

    #[test]
    fn test_header_aliases() {
        assert_eq!(Column::from_header("\u{feff}Study"), Some(Column::Dataset));
        assert_eq!(Column::from_header(" id "), Some(Column::Name));
        assert_eq!(Column::from_header("display_name"), Some(Column::Label));
        assert_eq!(Column::from_header("folder"), Some(Column::ConceptPath));
        assert_eq!(Column::from_header("type"), None);
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(
            split_tags(" apnea-hypopnea index ; ahi| |"),
            vec!["apnea-hypopnea index".to_string(), "ahi".to_string()]
        );
        assert!(split_tags("").is_empty());
    }
}
