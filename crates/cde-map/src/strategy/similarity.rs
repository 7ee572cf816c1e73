//! Concept-path plus label keyword scoring.
//!
//! The concept path selects candidate groups through the path-prefix table.
//! Every slot of a matched group is scored by how many of its keywords occur
//! among the label's words:
//!
//! - coverage: `hits / keyword_count`, compared exactly;
//! - hits: the raw keyword count, so a longer fully-covered keyword list
//!   beats a shorter one;
//! - depth: the depth of the deepest path prefix that made the slot a
//!   candidate.
//!
//! Scores are ordered by coverage, then hits, then depth. A tie at the top
//! declines instead of guessing.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use cde_model::{
    CanonicalSlot, MappingTarget, ModifierSet, SchemaError, SourceVariable, StrategyName,
};
use cde_standards::Standards;
use cde_standards::config::SimilarityConfig;
use cde_standards::text::tokens;

use super::{Candidate, Strategy};

/// Score of one candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityScore {
    pub slot: CanonicalSlot,
    pub hits: usize,
    pub keywords: usize,
    pub depth: usize,
}

impl SimilarityScore {
    pub fn coverage(&self) -> f64 {
        if self.keywords == 0 {
            return 0.0;
        }
        self.hits as f64 / self.keywords as f64
    }

    /// Ranking order; the slot itself never breaks a tie.
    pub fn rank(&self, other: &Self) -> Ordering {
        (self.hits * other.keywords)
            .cmp(&(other.hits * self.keywords))
            .then(self.hits.cmp(&other.hits))
            .then(self.depth.cmp(&other.depth))
    }

    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        format!(
            "keyword coverage: {:.0}% ({} of {}); path depth: {}",
            self.coverage() * 100.0,
            self.hits,
            self.keywords,
            self.depth
        )
    }
}

#[derive(Debug, Clone)]
pub struct PathLabelSimilarity {
    standards: Arc<Standards>,
    min_overlap: f64,
    min_keyword_hits: usize,
}

impl PathLabelSimilarity {
    pub fn new(standards: Arc<Standards>, config: &SimilarityConfig) -> Self {
        Self {
            standards,
            min_overlap: config.min_overlap,
            min_keyword_hits: config.min_keyword_hits,
        }
    }

    /// Every qualifying slot, best first.
    pub fn score_all(
        &self,
        variable: &SourceVariable,
    ) -> Result<Vec<SimilarityScore>, SchemaError> {
        let (Some(label), Some(path)) = (variable.label_text(), variable.path_text()) else {
            return Ok(Vec::new());
        };
        let matches = self.standards.paths.matches(path);
        if matches.is_empty() {
            return Ok(Vec::new());
        }
        let words: BTreeSet<String> = tokens(label).into_iter().collect();

        // Deepest prefix first, so the first depth recorded per slot is its best.
        let mut depths: BTreeMap<CanonicalSlot, usize> = BTreeMap::new();
        for found in &matches {
            for slot in self.standards.registry.members_of(found.group) {
                depths.entry(*slot).or_insert(found.depth);
            }
        }

        let mut scores = Vec::new();
        for (slot, depth) in depths {
            let definition = self.standards.registry.definition(slot)?;
            let keywords = definition.keywords.len();
            let hits = definition
                .keywords
                .iter()
                .filter(|keyword| words.contains(**keyword))
                .count();
            let score = SimilarityScore {
                slot,
                hits,
                keywords,
                depth,
            };
            if keywords > 0
                && hits >= self.min_keyword_hits
                && score.coverage() >= self.min_overlap
            {
                scores.push(score);
            }
        }
        scores.sort_by(|a, b| b.rank(a).then(a.slot.cmp(&b.slot)));
        Ok(scores)
    }
}

impl Strategy for PathLabelSimilarity {
    fn name(&self) -> StrategyName {
        StrategyName::PathLabelSimilarity
    }

    fn attempt(&self, variable: &SourceVariable) -> Result<Option<Candidate>, SchemaError> {
        let scores = self.score_all(variable)?;
        let Some(best) = scores.first() else {
            return Ok(None);
        };
        if let Some(runner_up) = scores.get(1)
            && best.rank(runner_up) == Ordering::Equal
        {
            tracing::trace!(
                first = %best.slot,
                second = %runner_up.slot,
                "similarity tie, declining"
            );
            return Ok(None);
        }
        Ok(Some(Candidate::new(
            MappingTarget::slot(best.slot, ModifierSet::new()),
            best.explain(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> PathLabelSimilarity {
        PathLabelSimilarity::new(
            Arc::new(Standards::load().unwrap()),
            &SimilarityConfig::default(),
        )
    }

    fn respiratory(label: &str) -> SourceVariable {
        SourceVariable::new("shhs1", "x")
            .with_label(label)
            .with_concept_path("Sleep Monitoring/Polysomnography/Respiratory Events")
    }

    #[test]
    fn test_more_hits_break_equal_coverage() {
        let strategy = strategy();
        let scores = strategy.score_all(&respiratory("Apnea hypopnea index")).unwrap();
        assert_eq!(scores[0].slot, CanonicalSlot::Ahi);
        assert_eq!(scores[0].hits, 3);
        let candidate = strategy
            .attempt(&respiratory("Apnea hypopnea index"))
            .unwrap()
            .unwrap();
        assert_eq!(
            candidate.target,
            MappingTarget::slot(CanonicalSlot::Ahi, ModifierSet::new())
        );
    }

    #[test]
    fn test_rank_orders_coverage_hits_depth() {
        let score = |hits, keywords, depth| SimilarityScore {
            slot: CanonicalSlot::Ahi,
            hits,
            keywords,
            depth,
        };
        assert_eq!(score(2, 2, 1).rank(&score(2, 3, 3)), Ordering::Greater);
        assert_eq!(score(3, 3, 1).rank(&score(2, 2, 3)), Ordering::Greater);
        assert_eq!(score(2, 2, 3).rank(&score(2, 2, 2)), Ordering::Greater);
        assert_eq!(score(1, 2, 2).rank(&score(2, 4, 2)), Ordering::Less);
        assert_eq!(score(2, 4, 2).rank(&score(2, 4, 2)), Ordering::Equal);
    }

    #[test]
    fn test_tie_declines() {
        let strategy = strategy();
        // "index" alone half-covers apnea_index and hypopnea_index equally.
        assert_eq!(strategy.attempt(&respiratory("Index")).unwrap(), None);
    }

    #[test]
    fn test_needs_label_and_known_path() {
        let strategy = strategy();
        let no_label = SourceVariable::new("shhs1", "x")
            .with_concept_path("Sleep Monitoring/Polysomnography/Respiratory Events");
        assert_eq!(strategy.attempt(&no_label).unwrap(), None);

        let unknown_path = SourceVariable::new("shhs1", "x")
            .with_label("Apnea hypopnea index")
            .with_concept_path("Miscellaneous/Other");
        assert_eq!(strategy.attempt(&unknown_path).unwrap(), None);
    }
}
