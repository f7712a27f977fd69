//! Domains: the top-level planning specification.

use serde::{Deserialize, Serialize};

use super::action::Action;

/// A type declaration with an optional parent; types form a tree used for
/// parameter and argument compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Type name.
    pub name: String,

    /// Parent type name, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl TypeDef {
    /// Creates a type declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            name: name.into(),
            parent,
        }
    }
}

/// A typed constant or task object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedObject {
    /// Object name.
    pub name: String,

    /// Declared type name.
    pub type_name: String,
}

impl TypedObject {
    /// Creates a typed object.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A predicate (or function) declaration: a name plus ordered typed argument
/// slots. Arity and per-slot types are fixed at declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    /// Predicate name.
    pub name: String,

    /// Ordered, typed argument slots.
    pub arguments: Vec<super::action::Parameter>,
}

impl Predicate {
    /// Creates a predicate declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, arguments: Vec<super::action::Parameter>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Returns the declared arity.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

/// The requirements set: flags naming optional language features in use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Requirements(pub Vec<String>);

impl Requirements {
    /// Creates an empty requirements set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns true if the flag is declared.
    #[must_use]
    pub fn contains(&self, flag: &str) -> bool {
        self.0.iter().any(|r| r == flag)
    }

    /// Returns true if no flags are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A planning domain.
///
/// Exclusively owned by one mutation or transformation run at a time; the
/// mutation engine and transformer edit the action list in place. Axioms are
/// opaque text, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain name.
    pub name: String,

    /// Declared requirements flags.
    #[serde(default)]
    pub requirements: Requirements,

    /// Ordered type declarations.
    #[serde(default)]
    pub types: Vec<TypeDef>,

    /// Domain constants.
    #[serde(default)]
    pub constants: Vec<TypedObject>,

    /// Predicate declarations.
    pub predicates: Vec<Predicate>,

    /// Function declarations (numeric fluents), passed through unchanged.
    #[serde(default)]
    pub functions: Vec<Predicate>,

    /// Action list, the mutation target.
    pub actions: Vec<Action>,

    /// Opaque axiom blocks, passed through unchanged.
    #[serde(default)]
    pub axioms: Vec<String>,

    /// Capability flag: the validator sets this when the domain carries
    /// negated preconditions and the run allows them. Consulted by the
    /// mutation engine to pick the licensed operator catalogue.
    #[serde(default)]
    pub negated_preconditions: bool,
}

impl Domain {
    /// Creates an empty domain with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirements: Requirements::empty(),
            types: Vec::new(),
            constants: Vec::new(),
            predicates: Vec::new(),
            functions: Vec::new(),
            actions: Vec::new(),
            axioms: Vec::new(),
            negated_preconditions: false,
        }
    }

    /// Looks up a predicate declaration by name.
    #[must_use]
    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.name == name)
    }

    /// Looks up an action by name.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Parameter};

    #[test]
    fn test_requirements_contains() {
        let reqs = Requirements(vec![":strips".to_string(), ":typing".to_string()]);
        assert!(reqs.contains(":typing"));
        assert!(!reqs.contains(":conditional-effects"));
        assert!(Requirements::empty().is_empty());
    }

    #[test]
    fn test_domain_lookups() {
        let mut domain = Domain::new("logistics");
        domain.predicates.push(Predicate::new(
            "at",
            vec![Parameter::new("?o", "object"), Parameter::new("?l", "location")],
        ));
        domain
            .actions
            .push(crate::model::Action::new("drive", Vec::new(), Condition::truth()));

        assert_eq!(domain.predicate("at").unwrap().arity(), 2);
        assert!(domain.predicate("on").is_none());
        assert!(domain.action("drive").is_some());
        assert!(domain.action("fly").is_none());
    }

    #[test]
    fn test_capability_flag_defaults_off() {
        let domain = Domain::new("d");
        assert!(!domain.negated_preconditions);

        let json = serde_json::to_string(&domain).unwrap();
        let decoded: Domain = serde_json::from_str(&json).unwrap();
        assert_eq!(domain, decoded);
    }
}
