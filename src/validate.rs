//! Feature validation for parsed domains.
//!
//! Rejects domains the rest of the pipeline cannot reason about before any
//! mutation or transformation is attempted. Rejection is a returned error,
//! never a panic: for arbitrary benchmark input it is expected control flow
//! and the caller skips the instance.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::Domain;

/// Requirements flags the pipeline refuses to process.
pub const DISALLOWED_REQUIREMENTS: [&str; 6] = [
    ":disjunctive-preconditions",
    ":existential-preconditions",
    ":universal-preconditions",
    ":quantified-preconditions",
    ":conditional-effects",
    ":derived-predicates",
];

/// Policy for negated precondition literals.
///
/// Historical variants of this validator disagree on whether negative
/// preconditions are a disallowed feature or a capability that unlocks extra
/// mutation operators, so the choice is an explicit per-run configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativePreconditionPolicy {
    /// Reject any domain with a negated precondition literal.
    #[default]
    Reject,
    /// Accept negated preconditions and set the domain's capability flag,
    /// licensing the extended mutation operator catalogue.
    Allow,
}

/// Validates a domain against the supported feature set.
///
/// On success, sets the domain's `negated_preconditions` capability flag when
/// the policy allows negated literals and the domain contains one.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered: a disallowed
/// requirement flag, a declared axiom, a negated precondition under
/// [`NegativePreconditionPolicy::Reject`], or a conditional effect.
pub fn validate(
    domain: &mut Domain,
    policy: NegativePreconditionPolicy,
) -> Result<(), ValidationError> {
    for flag in DISALLOWED_REQUIREMENTS {
        if domain.requirements.contains(flag) {
            debug!(
                "event=validate_reject domain={} requirement={flag}",
                domain.name
            );
            return Err(ValidationError::DisallowedRequirement {
                domain: domain.name.clone(),
                requirement: flag.to_string(),
            });
        }
    }

    let mut has_negated = false;
    for action in &domain.actions {
        for atom in action.precondition.conjuncts() {
            if atom.negated {
                if policy == NegativePreconditionPolicy::Reject {
                    debug!(
                        "event=validate_reject domain={} action={} reason=negated_precondition",
                        domain.name, action.name
                    );
                    return Err(ValidationError::NegatedPrecondition {
                        action: action.name.clone(),
                        atom: atom.clone(),
                    });
                }
                has_negated = true;
            }
        }
        for effect in &action.effects {
            if !effect.is_unconditional() {
                return Err(ValidationError::ConditionalEffect {
                    action: action.name.clone(),
                    atom: effect.literal.clone(),
                });
            }
        }
    }

    domain.negated_preconditions = has_negated;
    Ok(())
}
