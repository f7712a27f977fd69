//! Actions: parameterized operators with a precondition and effects.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::atom::Atom;
use super::condition::Condition;

/// A typed action parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, including the `?` prefix.
    pub name: String,

    /// Declared type name.
    pub type_name: String,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A (conditions, literal) effect pair.
///
/// The pipeline only ever produces and consumes unconditional effects: the
/// condition list stays empty and stands for the tautology. A non-empty list
/// marks a conditional effect, which the feature validator rejects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Effect conditions; empty means unconditional.
    #[serde(default)]
    pub conditions: Vec<Atom>,

    /// The literal asserted (positive) or retracted (negated) on firing.
    pub literal: Atom,
}

impl Effect {
    /// Creates an unconditional effect.
    #[must_use]
    pub fn unconditional(literal: Atom) -> Self {
        Self {
            conditions: Vec::new(),
            literal,
        }
    }

    /// Returns true if this effect has no conditions.
    #[must_use]
    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// A parameterized action: precondition formula, ordered effect list, and an
/// opaque cost term passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Action name.
    pub name: String,

    /// Ordered, typed parameter list.
    pub parameters: Vec<Parameter>,

    /// Precondition formula over the parameters.
    pub precondition: Condition,

    /// Ordered effect list.
    pub effects: Vec<Effect>,

    /// Cost term text, e.g. `(increase (total-cost) 1)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
}

impl Action {
    /// Creates an action with no effects and no cost term.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        precondition: Condition,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            precondition,
            effects: Vec::new(),
            cost: None,
        }
    }

    /// Returns the set of declared parameter names.
    #[must_use]
    pub fn parameter_names(&self) -> HashSet<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    /// Returns true if every argument of `atom` names a declared parameter.
    #[must_use]
    pub fn binds(&self, atom: &Atom) -> bool {
        let names = self.parameter_names();
        atom.args.iter().all(|arg| names.contains(arg.as_str()))
    }

    /// Returns the positive effect literals in order.
    #[must_use]
    pub fn positive_effect_literals(&self) -> Vec<Atom> {
        self.effects
            .iter()
            .filter(|e| !e.literal.negated)
            .map(|e| e.literal.clone())
            .collect()
    }

    /// Returns the negated effect literals in order.
    #[must_use]
    pub fn negated_effect_literals(&self) -> Vec<Atom> {
        self.effects
            .iter()
            .filter(|e| e.literal.negated)
            .map(|e| e.literal.clone())
            .collect()
    }
}
