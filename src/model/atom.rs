//! Atoms: predicate applications with a polarity flag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A predicate name applied to an ordered argument tuple, with a polarity.
///
/// Two atoms are equal iff predicate name, argument tuple (order-sensitive),
/// and polarity all match. Negation is a property of the atom, not a separate
/// type: [`Atom::negate`] flips the flag and is its own inverse.
///
/// Arguments are plain names: `?`-prefixed action parameters inside a domain,
/// object names in a ground task state.
///
/// # Examples
///
/// ```
/// use planfuzz::Atom;
///
/// let at = Atom::positive("at", vec!["?t".to_string(), "?l".to_string()]);
/// assert_eq!(at.negate().negate(), at);
/// assert_eq!(format!("{at}"), "(at ?t ?l)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    /// The predicate being applied.
    pub predicate: String,

    /// Ordered argument terms (variables or constants).
    pub args: Vec<String>,

    /// Polarity: true for a negated literal.
    #[serde(default)]
    pub negated: bool,
}

impl Atom {
    /// Creates a positive atom.
    #[must_use]
    pub fn positive(predicate: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            predicate: predicate.into(),
            args,
            negated: false,
        }
    }

    /// Creates a negated atom.
    #[must_use]
    pub fn negated(predicate: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            predicate: predicate.into(),
            args,
            negated: true,
        }
    }

    /// Returns this atom with its polarity flipped.
    ///
    /// The operation is an involution: `a.negate().negate() == a`.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            args: self.args.clone(),
            negated: !self.negated,
        }
    }

    /// Returns the number of argument terms.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Returns true if this atom and `other` apply the same predicate to the
    /// same arguments, ignoring polarity.
    #[must_use]
    pub fn same_grounding(&self, other: &Self) -> bool {
        self.predicate == other.predicate && self.args == other.args
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "(not ")?;
        }
        write!(f, "({}", self.predicate)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        write!(f, ")")?;
        if self.negated {
            write!(f, ")")?;
        }
        Ok(())
    }
}
