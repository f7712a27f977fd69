//! The randomized mutation engine: harden and relax passes.

use log::{debug, info};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::audit::AuditLog;
use crate::error::MutationError;
use crate::model::{Atom, Domain};

use super::candidates::{exclude_negated_effects, exclude_positive_effects, matched_atoms};
use super::operators::MutationOp;

/// The per-action edit choices of a harden pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HardenOp {
    InsertPrecondition,
    InsertNegatedPrecondition,
    DeletePositiveEffect,
    InsertPositiveEffect,
    InsertNegatedEffect,
    DeleteNegatedEffect,
}

/// Catalogue licensed for domains without the negated-precondition
/// capability.
const BASIC_CATALOGUE: [HardenOp; 3] = [
    HardenOp::InsertPrecondition,
    HardenOp::DeletePositiveEffect,
    HardenOp::InsertNegatedEffect,
];

/// Catalogue licensed when the validator set the capability flag.
const EXTENDED_CATALOGUE: [HardenOp; 6] = [
    HardenOp::InsertPrecondition,
    HardenOp::InsertNegatedPrecondition,
    HardenOp::DeletePositiveEffect,
    HardenOp::InsertPositiveEffect,
    HardenOp::InsertNegatedEffect,
    HardenOp::DeleteNegatedEffect,
];

/// Tunable configuration for a mutation run.
///
/// The weight vectors are parallel to the operator catalogues; they are
/// configuration, not per-call literals. The extended default keeps the
/// insertion operators far heavier than the deletions and leaves the
/// negated-precondition insertion dormant at weight zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Fraction of actions to edit per pass; the pass touches
    /// `ceil(|actions| * rate)` distinct actions.
    pub rate: f64,

    /// Weights over the basic catalogue
    /// {insert-precondition, delete-positive-effect, insert-negated-effect}.
    pub basic_weights: Vec<f64>,

    /// Weights over the extended catalogue
    /// {insert-precondition, insert-negated-precondition,
    /// delete-positive-effect, insert-positive-effect,
    /// insert-negated-effect, delete-negated-effect}.
    pub extended_weights: Vec<f64>,

    /// RNG seed for reproducible runs; None draws from entropy.
    pub seed: Option<u64>,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            rate: 0.2,
            basic_weights: vec![1.0, 1.0, 1.0],
            extended_weights: vec![0.1, 0.0, 0.2, 0.5, 0.1, 0.1],
            seed: None,
        }
    }
}

/// Applies randomized, type-consistent edits to a validated domain.
///
/// A `Mutator` owns the RNG and the audit log of everything it changed; the
/// domain itself is borrowed exclusively per pass and edited in place.
///
/// # Examples
///
/// ```
/// use planfuzz::{MutationConfig, Mutator};
///
/// let mut config = MutationConfig::default();
/// config.rate = 0.3;
/// config.seed = Some(7);
/// let mutator = Mutator::new(config);
/// assert!(mutator.audit_log().is_empty());
/// ```
#[derive(Debug)]
pub struct Mutator {
    config: MutationConfig,
    rng: StdRng,
    log: AuditLog,
}

impl Mutator {
    /// Creates a mutator with the given configuration.
    #[must_use]
    pub fn new(config: MutationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            log: AuditLog::new(),
        }
    }

    /// The audit log of all edits applied so far, in order.
    #[must_use]
    pub fn audit_log(&self) -> &AuditLog {
        &self.log
    }

    /// Consumes the mutator and returns its audit log.
    #[must_use]
    pub fn into_audit_log(self) -> AuditLog {
        self.log
    }

    /// Number of actions a pass edits for this domain.
    fn edit_budget(&self, domain: &Domain) -> usize {
        let n = domain.actions.len();
        let budget = (n as f64 * self.config.rate).ceil();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let budget = budget.max(0.0) as usize;
        budget.min(n)
    }

    /// Hardens the domain: inserts precondition/effect literals or deletes
    /// positive effects, making the specification more restrictive than
    /// ground truth.
    ///
    /// Edits `ceil(|actions| * rate)` distinct actions (sampled without
    /// replacement), one weighted operator draw per action. An action whose
    /// candidate pool for the drawn operator is empty is skipped. Returns the
    /// number of edits applied.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::InvalidWeights`] for a malformed weight
    /// vector, or propagates operator contract violations.
    pub fn harden(&mut self, domain: &mut Domain) -> Result<usize, MutationError> {
        let budget = self.edit_budget(domain);
        if budget == 0 {
            return Ok(0);
        }
        let (catalogue, weights): (&[HardenOp], &[f64]) = if domain.negated_preconditions {
            (&EXTENDED_CATALOGUE, &self.config.extended_weights)
        } else {
            (&BASIC_CATALOGUE, &self.config.basic_weights)
        };
        if weights.len() != catalogue.len() {
            return Err(MutationError::InvalidWeights {
                detail: format!(
                    "expected {} weights, got {}",
                    catalogue.len(),
                    weights.len()
                ),
            });
        }
        let dist = WeightedIndex::new(weights).map_err(|e| MutationError::InvalidWeights {
            detail: e.to_string(),
        })?;

        let picked = rand::seq::index::sample(&mut self.rng, domain.actions.len(), budget);
        let mut applied = 0;
        for idx in picked.iter() {
            let kind = catalogue[dist.sample(&mut self.rng)];
            let Some(op) = self.draw(domain, idx, kind) else {
                debug!(
                    "event=harden_skip action={} op={kind:?} reason=no_candidates",
                    domain.actions[idx].name
                );
                continue;
            };
            let record = op.apply(&mut domain.actions[idx])?;
            info!("event=harden_edit run={} record={record}", self.log.run_id);
            self.log.push(record);
            applied += 1;
        }
        Ok(applied)
    }

    /// Relaxes the domain: deletes literals from existing preconditions,
    /// making the specification less restrictive than ground truth.
    ///
    /// Delete targets are drawn from the action's actual, unfiltered
    /// precondition conjuncts; actions with an empty precondition are
    /// skipped. Returns the number of edits applied.
    ///
    /// # Errors
    ///
    /// Propagates operator contract violations.
    pub fn relax(&mut self, domain: &mut Domain) -> Result<usize, MutationError> {
        let budget = self.edit_budget(domain);
        if budget == 0 {
            return Ok(0);
        }
        let picked = rand::seq::index::sample(&mut self.rng, domain.actions.len(), budget);
        let mut applied = 0;
        for idx in picked.iter() {
            let pool = domain.actions[idx].precondition.conjuncts().to_vec();
            let Some(atom) = pool.choose(&mut self.rng).cloned() else {
                debug!(
                    "event=relax_skip action={} reason=empty_precondition",
                    domain.actions[idx].name
                );
                continue;
            };
            let record = MutationOp::DeletePrecondition(atom).apply(&mut domain.actions[idx])?;
            info!("event=relax_edit run={} record={record}", self.log.run_id);
            self.log.push(record);
            applied += 1;
        }
        Ok(applied)
    }

    /// Builds the concrete operator for one action, or None if the candidate
    /// pool is empty.
    fn draw(&mut self, domain: &Domain, idx: usize, kind: HardenOp) -> Option<MutationOp> {
        let action = &domain.actions[idx];
        let (pool, build): (Vec<Atom>, fn(Atom) -> MutationOp) = match kind {
            HardenOp::InsertPrecondition => {
                (matched_atoms(domain, action), MutationOp::InsertPrecondition)
            }
            HardenOp::InsertNegatedPrecondition => (
                matched_atoms(domain, action)
                    .iter()
                    .map(Atom::negate)
                    .collect(),
                MutationOp::InsertPrecondition,
            ),
            HardenOp::DeletePositiveEffect => {
                (action.positive_effect_literals(), MutationOp::DeleteEffect)
            }
            HardenOp::InsertPositiveEffect => (
                exclude_positive_effects(action, matched_atoms(domain, action)),
                MutationOp::InsertEffect,
            ),
            HardenOp::InsertNegatedEffect => (
                exclude_negated_effects(action, matched_atoms(domain, action))
                    .iter()
                    .map(Atom::negate)
                    .collect(),
                MutationOp::InsertEffect,
            ),
            HardenOp::DeleteNegatedEffect => {
                (action.negated_effect_literals(), MutationOp::DeleteEffect)
            }
        };
        pool.choose(&mut self.rng).cloned().map(build)
    }
}
