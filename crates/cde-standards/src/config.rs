#![deny(unsafe_code)]

//! Engine configuration, read once from TOML before a batch runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StandardsError;

pub const CONFIG_SCHEMA: &str = "sleep-cde.engine-config";
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub config: ConfigHeader,
    #[serde(default)]
    pub harmonization: HarmonizationConfig,
    #[serde(default)]
    pub similarity: SimilarityConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub annotations: AnnotationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonizationConfig {
    /// Name prefixes marking custodian-harmonized variables.
    pub prefixes: Vec<String>,
}

impl Default for HarmonizationConfig {
    fn default() -> Self {
        Self {
            prefixes: vec!["nsrr_".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Minimum share of a slot's keywords found in the label.
    pub min_overlap: f64,
    /// Minimum number of slot keywords found in the label.
    pub min_keyword_hits: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            min_overlap: 0.5,
            min_keyword_hits: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub slot_ceiling: usize,
    /// Inclusive `[lower, upper]` target for distinct slots per batch.
    pub target_band: [usize; 2],
    pub max_name_components: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            slot_ceiling: 200,
            target_band: [40, 120],
            max_name_components: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads; unset means available parallelism.
    pub workers: Option<usize>,
}

/// Label annotations attached to every mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub bdchm_class: bool,
    pub curie: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            bdchm_class: true,
            curie: true,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config: ConfigHeader {
                schema: CONFIG_SCHEMA.to_string(),
                schema_version: CONFIG_SCHEMA_VERSION,
            },
            harmonization: HarmonizationConfig::default(),
            similarity: SimilarityConfig::default(),
            validation: ValidationConfig::default(),
            batch: BatchConfig::default(),
            annotations: AnnotationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        let config: Self = toml::from_str(&contents).map_err(|e| StandardsError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    /// Built-in defaults when `path` is `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, StandardsError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), StandardsError> {
        if self.config.schema != CONFIG_SCHEMA {
            return Err(StandardsError::invalid(format!(
                "unsupported schema: {}",
                self.config.schema
            )));
        }
        if self.config.schema_version != CONFIG_SCHEMA_VERSION {
            return Err(StandardsError::invalid(format!(
                "unsupported schema_version: {}",
                self.config.schema_version
            )));
        }
        for prefix in &self.harmonization.prefixes {
            if prefix.trim().is_empty() {
                return Err(StandardsError::invalid(format!(
                    "harmonization prefix must not be blank: {prefix:?}"
                )));
            }
            if prefix.trim() != prefix {
                return Err(StandardsError::invalid(format!(
                    "harmonization prefix has surrounding whitespace: {prefix:?}"
                )));
            }
        }
        let overlap = self.similarity.min_overlap;
        if !(overlap > 0.0 && overlap <= 1.0) {
            return Err(StandardsError::invalid(format!(
                "similarity.min_overlap must be in (0, 1], got {overlap}"
            )));
        }
        if self.similarity.min_keyword_hits == 0 {
            return Err(StandardsError::invalid(
                "similarity.min_keyword_hits must be at least 1",
            ));
        }
        let [lower, upper] = self.validation.target_band;
        if lower > upper {
            return Err(StandardsError::invalid(format!(
                "validation.target_band lower bound {lower} exceeds upper bound {upper}"
            )));
        }
        if self.validation.slot_ceiling < upper {
            return Err(StandardsError::invalid(format!(
                "validation.slot_ceiling {} is below the target band upper bound {upper}",
                self.validation.slot_ceiling
            )));
        }
        if self.validation.max_name_components == 0 {
            return Err(StandardsError::invalid(
                "validation.max_name_components must be at least 1",
            ));
        }
        if self.batch.workers == Some(0) {
            return Err(StandardsError::invalid("batch.workers must be at least 1"));
        }
        Ok(())
    }

    /// Trimmed, lower-cased harmonization prefixes, blanks dropped.
    pub fn prefixes(&self) -> Vec<String> {
        self.harmonization
            .prefixes
            .iter()
            .map(|prefix| prefix.trim().to_ascii_lowercase())
            .filter(|prefix| !prefix.is_empty())
            .collect()
    }

    pub fn workers(&self) -> usize {
        self.batch.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
        })
    }
}
