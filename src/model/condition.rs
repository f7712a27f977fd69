//! Precondition and goal formulas.

use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};

use super::atom::Atom;

/// A precondition or goal formula: a single literal or a conjunction of
/// literals.
///
/// These are the only two shapes the pipeline models; disjunctions,
/// quantifiers, and nested conjunctions are rejected at the parse boundary
/// and can never enter a [`Condition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "parts", rename_all = "snake_case")]
pub enum Condition {
    /// A single literal.
    Atom(Atom),
    /// An ordered conjunction of literals.
    And(Vec<Atom>),
}

impl Condition {
    /// An empty conjunction (trivially true).
    #[must_use]
    pub const fn truth() -> Self {
        Self::And(Vec::new())
    }

    /// Returns the conjunct literals in order.
    ///
    /// A lone literal is viewed as a one-element conjunction.
    #[must_use]
    pub fn conjuncts(&self) -> &[Atom] {
        match self {
            Self::Atom(atom) => slice::from_ref(atom),
            Self::And(parts) => parts,
        }
    }

    /// Consumes the condition and returns its conjuncts.
    #[must_use]
    pub fn into_conjuncts(self) -> Vec<Atom> {
        match self {
            Self::Atom(atom) => vec![atom],
            Self::And(parts) => parts,
        }
    }

    /// Appends a literal, rebuilding the formula as a conjunction.
    pub fn push(&mut self, atom: Atom) {
        let mut parts = std::mem::replace(self, Self::truth()).into_conjuncts();
        parts.push(atom);
        *self = Self::And(parts);
    }

    /// Removes the first literal structurally equal to `atom`, rebuilding
    /// the formula as a conjunction of the remainder.
    ///
    /// Returns false (leaving the formula unchanged) if no literal matches.
    pub fn remove(&mut self, atom: &Atom) -> bool {
        let Some(idx) = self.conjuncts().iter().position(|a| a == atom) else {
            return false;
        };
        let mut parts = std::mem::replace(self, Self::truth()).into_conjuncts();
        parts.remove(idx);
        *self = Self::And(parts);
        true
    }

    /// Returns true if any conjunct is structurally equal to `atom`.
    #[must_use]
    pub fn contains(&self, atom: &Atom) -> bool {
        self.conjuncts().iter().any(|a| a == atom)
    }

    /// Returns the number of conjuncts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conjuncts().len()
    }

    /// Returns true if the formula has no conjuncts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conjuncts().is_empty()
    }
}

impl From<Atom> for Condition {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(atom) => write!(f, "{atom}"),
            Self::And(parts) => {
                write!(f, "(and")?;
                for part in parts {
                    write!(f, " {part}")?;
                }
                write!(f, ")")
            }
        }
    }
}
