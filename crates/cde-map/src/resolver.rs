//! Strategy chain and batch resolution.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use cde_model::{
    BatchCompleteness, MalformedInputError, MappingTarget, SchemaError, SourceVariable,
    StrategyName, VariableMapping,
};
use cde_standards::config::AnnotationConfig;
use cde_standards::{EngineConfig, Standards};

use crate::error::ResolveError;
use crate::parser::{TagParser, suffix};
use crate::strategy::{
    Candidate, CompositionalParse, ConceptTag, DatasetLocalFallback, HarmonizedPrefix,
    InstrumentItem, PathLabelSimilarity, Strategy,
};

/// A mapping together with the winning strategy's account of the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub mapping: VariableMapping,
    pub note: String,
}

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions<'a> {
    pub workers: usize,
    /// Checked before each record; once set, no further records start.
    pub cancel: Option<&'a AtomicBool>,
}

impl Default for BatchOptions<'_> {
    fn default() -> Self {
        Self {
            workers: 1,
            cancel: None,
        }
    }
}

impl<'a> BatchOptions<'a> {
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            cancel: None,
        }
    }

    pub fn cancel_on(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }
}

/// Result of one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// In input order.
    pub mappings: Vec<VariableMapping>,
    /// Malformed records, in input order.
    pub rejected: Vec<MalformedInputError>,
    pub completeness: BatchCompleteness,
    /// Fingerprint of the registry that produced this batch.
    pub registry_fingerprint: String,
}

enum ItemOutcome {
    Mapped(VariableMapping),
    Rejected(MalformedInputError),
}

/// Ordered strategy chain over one immutable set of standards.
///
/// Resolution is total: the dataset-local fallback closes the chain, so a
/// well-formed variable always yields exactly one mapping.
pub struct Resolver {
    standards: Arc<Standards>,
    chain: Vec<Box<dyn Strategy>>,
    fallback: DatasetLocalFallback,
    annotations: AnnotationConfig,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("strategies", &self.strategies())
            .field("registry_fingerprint", &self.standards.fingerprint())
            .finish()
    }
}

impl Resolver {
    pub fn new(standards: Arc<Standards>, config: &EngineConfig) -> Result<Self, SchemaError> {
        let parser = TagParser::standard()?;
        let chain: Vec<Box<dyn Strategy>> = vec![
            Box::new(HarmonizedPrefix::new(
                Arc::clone(&standards),
                config.prefixes(),
            )),
            Box::new(InstrumentItem::new(&standards)?),
            Box::new(ConceptTag::new(Arc::clone(&standards))),
            Box::new(CompositionalParse::new(
                Arc::clone(&standards),
                parser,
                config.prefixes(),
            )),
            Box::new(PathLabelSimilarity::new(
                Arc::clone(&standards),
                &config.similarity,
            )),
        ];
        Ok(Self {
            standards,
            chain,
            fallback: DatasetLocalFallback,
            annotations: config.annotations.clone(),
        })
    }

    pub fn standards(&self) -> &Arc<Standards> {
        &self.standards
    }

    /// Strategy names in priority order, fallback last.
    pub fn strategies(&self) -> Vec<StrategyName> {
        self.chain
            .iter()
            .map(|strategy| strategy.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }

    pub fn resolve(&self, variable: &SourceVariable) -> Result<VariableMapping, ResolveError> {
        Ok(self.explain_at(0, variable)?.mapping)
    }

    /// Like [`Resolver::resolve`], keeping the winning strategy's note.
    pub fn explain(&self, variable: &SourceVariable) -> Result<Resolution, ResolveError> {
        self.explain_at(0, variable)
    }

    fn explain_at(
        &self,
        index: usize,
        variable: &SourceVariable,
    ) -> Result<Resolution, ResolveError> {
        check_identity(index, variable)?;
        let dataset = variable.dataset.trim();
        let name = variable.name.trim();

        let mut declined = Vec::new();
        let mut rejected = Vec::new();
        let mut winner: Option<(StrategyName, Candidate)> = None;
        for strategy in &self.chain {
            let mut candidate = strategy.attempt(variable)?;
            if candidate.is_none() && strategy.matches_suffixed_names() {
                candidate = self.attempt_suffixed(strategy.as_ref(), variable, &mut rejected)?;
            }
            match candidate {
                Some(candidate) => {
                    winner = Some((strategy.name(), candidate));
                    break;
                }
                None => {
                    tracing::trace!(
                        dataset,
                        variable = name,
                        strategy = %strategy.name(),
                        "strategy declined"
                    );
                    declined.push(strategy.name());
                }
            }
        }
        let (strategy, candidate) = winner.unwrap_or_else(|| {
            let mut candidate = self.fallback.candidate(variable);
            if !rejected.is_empty() {
                candidate.note = format!("{}; {}", candidate.note, rejected.join("; "));
            }
            (self.fallback.name(), candidate)
        });

        tracing::debug!(
            dataset,
            variable = name,
            strategy = %strategy,
            confidence = %strategy.confidence(),
            "variable resolved"
        );
        let label = variable.label_text();
        let annotations = &self.standards.annotations;
        Ok(Resolution {
            mapping: VariableMapping {
                source_dataset: dataset.to_string(),
                source_variable: name.to_string(),
                target: candidate.target,
                confidence: strategy.confidence(),
                strategy,
                declined,
                bdchm_class: label
                    .filter(|_| self.annotations.bdchm_class)
                    .and_then(|label| annotations.bdchm_class(label)),
                curie: label
                    .filter(|_| self.annotations.curie)
                    .and_then(|label| annotations.curie(label))
                    .map(str::to_string),
            },
            note: candidate.note,
        })
    }

    /// Retries `strategy` on the name with stage and position suffixes
    /// peeled off, then applies the suffixes to the base slot.
    ///
    /// A suffix that conflicts with a pinned axis, or yields a combination
    /// the slot does not define, rejects the name for this strategy; the
    /// reason is pushed onto `rejected`.
    fn attempt_suffixed(
        &self,
        strategy: &dyn Strategy,
        variable: &SourceVariable,
        rejected: &mut Vec<String>,
    ) -> Result<Option<Candidate>, SchemaError> {
        let name = variable.name.trim().to_ascii_lowercase();
        for (base, suffixes) in suffix::peelings(&name) {
            let Some(candidate) =
                strategy.attempt(&SourceVariable::new(variable.dataset.as_str(), base))?
            else {
                continue;
            };
            let MappingTarget::CanonicalSlot {
                slot_id,
                mut modifiers,
            } = candidate.target
            else {
                continue;
            };
            let outcome = match suffix::apply(&mut modifiers, &candidate.fixed, &suffixes) {
                Ok(()) => self
                    .standards
                    .registry
                    .check_combination(slot_id, &modifiers)?
                    .map_err(|undefined| undefined.to_string()),
                Err(reason) => Err(reason.to_string()),
            };
            return match outcome {
                Ok(()) => {
                    let rendered: Vec<String> =
                        suffixes.iter().map(ToString::to_string).collect();
                    Ok(Some(Candidate {
                        target: MappingTarget::slot(slot_id, modifiers),
                        note: format!("{} with suffix {}", candidate.note, rendered.join(", ")),
                        fixed: candidate.fixed,
                    }))
                }
                Err(reason) => {
                    tracing::warn!(
                        dataset = variable.dataset.trim(),
                        variable = variable.name.trim(),
                        strategy = %strategy.name(),
                        %reason,
                        "suffixed name rejected"
                    );
                    rejected.push(format!("{} rejected '{name}': {reason}", strategy.name()));
                    Ok(None)
                }
            };
        }
        Ok(None)
    }

    /// Resolves `variables` over `options.workers` threads.
    ///
    /// Malformed records are collected and skipped; a schema error stops
    /// every worker and fails the batch.
    pub fn resolve_batch(
        &self,
        variables: &[SourceVariable],
        options: &BatchOptions<'_>,
    ) -> Result<BatchOutcome, SchemaError> {
        let total = variables.len();
        let workers = options.workers.clamp(1, total.max(1));
        let abort = AtomicBool::new(false);

        let chunks: Vec<Result<Vec<ItemOutcome>, SchemaError>> = if workers == 1 {
            vec![self.run_chunk(0, variables, options.cancel, &abort)]
        } else {
            let chunk_size = total.div_ceil(workers);
            let abort = &abort;
            std::thread::scope(|scope| {
                let handles: Vec<_> = variables
                    .chunks(chunk_size)
                    .enumerate()
                    .map(|(n, chunk)| {
                        scope.spawn(move || {
                            self.run_chunk(n * chunk_size, chunk, options.cancel, abort)
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        handle
                            .join()
                            .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                    })
                    .collect()
            })
        };

        let mut mappings = Vec::with_capacity(total);
        let mut rejected = Vec::new();
        for chunk in chunks {
            for outcome in chunk? {
                match outcome {
                    ItemOutcome::Mapped(mapping) => mappings.push(mapping),
                    ItemOutcome::Rejected(error) => rejected.push(error),
                }
            }
        }

        let completeness = BatchCompleteness::from_counts(mappings.len() + rejected.len(), total);
        tracing::info!(
            total,
            mapped = mappings.len(),
            rejected = rejected.len(),
            workers,
            complete = completeness.is_complete(),
            "batch resolved"
        );
        Ok(BatchOutcome {
            mappings,
            rejected,
            completeness,
            registry_fingerprint: self.standards.fingerprint().to_string(),
        })
    }

    fn run_chunk(
        &self,
        offset: usize,
        chunk: &[SourceVariable],
        cancel: Option<&AtomicBool>,
        abort: &AtomicBool,
    ) -> Result<Vec<ItemOutcome>, SchemaError> {
        let mut out = Vec::with_capacity(chunk.len());
        for (position, variable) in chunk.iter().enumerate() {
            if abort.load(Ordering::Relaxed)
                || cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                break;
            }
            match self.explain_at(offset + position, variable) {
                Ok(resolution) => out.push(ItemOutcome::Mapped(resolution.mapping)),
                Err(ResolveError::Malformed(error)) => {
                    tracing::warn!(%error, "skipping malformed record");
                    out.push(ItemOutcome::Rejected(error));
                }
                Err(ResolveError::Schema(error)) => {
                    abort.store(true, Ordering::Relaxed);
                    return Err(error);
                }
            }
        }
        Ok(out)
    }
}

fn check_identity(index: usize, variable: &SourceVariable) -> Result<(), MalformedInputError> {
    let reason = if variable.dataset.trim().is_empty() {
        "dataset identifier is blank"
    } else if variable.name.trim().is_empty() {
        "variable name is blank"
    } else {
        return Ok(());
    };
    Err(MalformedInputError {
        index,
        dataset: variable.dataset.clone(),
        name: variable.name.clone(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cde_model::ConfidenceLevel;

    fn resolver() -> Resolver {
        Resolver::new(
            Arc::new(Standards::load().unwrap()),
            &EngineConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_chain_order() {
        assert_eq!(resolver().strategies(), StrategyName::ALL.to_vec());
    }

    #[test]
    fn test_declined_trail() {
        let mapping = resolver()
            .resolve(&SourceVariable::new("mesa", "zz_unknown"))
            .unwrap();
        assert_eq!(mapping.strategy, StrategyName::DatasetLocalFallback);
        assert_eq!(mapping.confidence, ConfidenceLevel::DatasetLocal);
        assert_eq!(mapping.declined, StrategyName::ALL[..5].to_vec());
    }

    #[test]
    fn test_malformed_records() {
        let resolver = resolver();
        for variable in [
            SourceVariable::new("mesa", "  "),
            SourceVariable::new("", "bmi"),
        ] {
            assert!(matches!(
                resolver.resolve(&variable),
                Err(ResolveError::Malformed(_))
            ));
        }
    }

    #[test]
    fn test_identity_fields_are_trimmed() {
        let mapping = resolver()
            .resolve(&SourceVariable::new(" mesa ", " bmi "))
            .unwrap();
        assert_eq!(mapping.source_dataset, "mesa");
        assert_eq!(mapping.source_variable, "bmi");
    }

    #[test]
    fn test_empty_batch_is_complete() {
        let outcome = resolver()
            .resolve_batch(&[], &BatchOptions::with_workers(4))
            .unwrap();
        assert!(outcome.mappings.is_empty());
        assert_eq!(outcome.completeness, BatchCompleteness::Complete);
        assert_eq!(outcome.registry_fingerprint.len(), 64);
    }
}
