//! Error types for planfuzz.
//!
//! All errors are strongly typed using thiserror and split by pipeline
//! stage. This enables pattern matching on specific failure conditions:
//! validation failures are expected, recoverable control flow for batch
//! callers, while mutation-operator contract violations indicate a
//! construction bug and are fatal for that attempt.

use thiserror::Error;

use crate::model::Atom;

/// Errors raised while reading PDDL text into the specification model.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected token `{token}`")]
    UnexpectedToken {
        token: String,
    },

    #[error("expected {expected}, found `{found}`")]
    Expected {
        expected: &'static str,
        found: String,
    },

    #[error("unsupported construct `{construct}`")]
    Unsupported {
        construct: String,
    },

    #[error("malformed {section}: {detail}")]
    Malformed {
        section: &'static str,
        detail: String,
    },
}

/// Errors raised by the feature validator.
///
/// These are expected outcomes for arbitrary benchmark input: the caller
/// skips the offending domain and continues.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("domain `{domain}` uses disallowed requirement `{requirement}`")]
    DisallowedRequirement {
        domain: String,
        requirement: String,
    },

    #[error("action `{action}` has a negated precondition {atom} and negative preconditions are rejected")]
    NegatedPrecondition {
        action: String,
        atom: Atom,
    },

    #[error("action `{action}` has a conditional effect on {atom}")]
    ConditionalEffect {
        action: String,
        atom: Atom,
    },
}

/// The site of a structural edit inside an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSite {
    /// The action's precondition conjunction.
    Precondition,
    /// The action's effect list.
    Effects,
}

impl std::fmt::Display for EditSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Precondition => write!(f, "precondition"),
            Self::Effects => write!(f, "effects"),
        }
    }
}

/// Errors raised while applying mutation operators.
///
/// These indicate the candidate pool or delete target was built
/// incorrectly by the calling engine, not a property of the input domain.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("inconsistent arguments: {atom} does not bind to the parameters of action `{action}`")]
    InconsistentArguments {
        action: String,
        atom: Atom,
    },

    #[error("literal {atom} not found in the {site} of action `{action}`")]
    LiteralNotFound {
        action: String,
        atom: Atom,
        site: EditSite,
    },

    #[error("invalid operator weights: {detail}")]
    InvalidWeights {
        detail: String,
    },
}

/// Errors raised while building a composite cross-validation domain.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("action `{action}` has no counterpart in the {side} domain")]
    MissingCounterpart {
        action: String,
        side: &'static str,
    },

    #[error("predicate `{predicate}` has no shadow mapping")]
    UnknownPredicate {
        predicate: String,
    },
}

/// Top-level error type for planfuzz.
#[derive(Debug, Error)]
pub enum PlanFuzzError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PlanFuzzError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this failure is an expected, skippable validation
    /// outcome rather than a construction bug.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Validation(_))
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a mutation error.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Self::Mutation(_))
    }

    /// Returns true if this is a transform error.
    #[must_use]
    pub const fn is_transform(&self) -> bool {
        matches!(self, Self::Transform(_))
    }
}

/// Result type alias for planfuzz operations.
pub type FuzzResult<T> = Result<T, PlanFuzzError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Atom {
        Atom::positive(name, Vec::new())
    }

    #[test]
    fn test_validation_error_message() {
        let err = ValidationError::DisallowedRequirement {
            domain: "logistics".to_string(),
            requirement: ":conditional-effects".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("logistics"));
        assert!(msg.contains(":conditional-effects"));
    }

    #[test]
    fn test_mutation_error_carries_atom_and_action() {
        let err = MutationError::LiteralNotFound {
            action: "drive".to_string(),
            atom: atom("road"),
            site: EditSite::Precondition,
        };
        let msg = format!("{err}");
        assert!(msg.contains("drive"));
        assert!(msg.contains("road"));
        assert!(msg.contains("precondition"));
    }

    #[test]
    fn test_recoverable_classification() {
        let validation: PlanFuzzError = ValidationError::NegatedPrecondition {
            action: "a".to_string(),
            atom: atom("p").negate(),
        }
        .into();
        assert!(validation.is_recoverable());
        assert!(validation.is_validation());

        let mutation: PlanFuzzError = MutationError::InconsistentArguments {
            action: "a".to_string(),
            atom: atom("p"),
        }
        .into();
        assert!(!mutation.is_recoverable());
        assert!(mutation.is_mutation());
    }

    #[test]
    fn test_transform_error_from() {
        let err: PlanFuzzError = TransformError::MissingCounterpart {
            action: "load".to_string(),
            side: "origin",
        }
        .into();
        assert!(err.is_transform());
        assert!(!err.is_recoverable());
        let msg = format!("{err}");
        assert!(msg.contains("load"));
        assert!(msg.contains("origin"));
    }

    #[test]
    fn test_internal_error() {
        let err = PlanFuzzError::internal("unexpected state");
        let msg = format!("{err}");
        assert!(msg.contains("unexpected state"));
    }
}
