//! Candidate-atom generation for mutation operators.

use crate::model::{Action, Atom, Domain};

/// The built-in equality predicate, excluded from candidate pools.
pub const EQUALITY_PREDICATE: &str = "=";

/// Enumerates every atom that can be grounded over an action's own
/// parameters.
///
/// For each predicate in the domain and each of its argument slots, the
/// action's parameters whose type equals the slot type are collected; a
/// predicate with any unmatchable slot contributes nothing. Otherwise every
/// element of the Cartesian product of the per-slot parameter lists yields
/// one positive atom (the same parameter may fill several slots).
#[must_use]
pub fn matched_atoms(domain: &Domain, action: &Action) -> Vec<Atom> {
    let mut atoms = Vec::new();
    for pred in &domain.predicates {
        if pred.name == EQUALITY_PREDICATE {
            continue;
        }
        let mut slots: Vec<Vec<&str>> = Vec::with_capacity(pred.arity());
        let mut grounded = true;
        for arg in &pred.arguments {
            let matched: Vec<&str> = action
                .parameters
                .iter()
                .filter(|p| p.type_name == arg.type_name)
                .map(|p| p.name.as_str())
                .collect();
            if matched.is_empty() {
                grounded = false;
                break;
            }
            slots.push(matched);
        }
        if grounded {
            for args in cartesian_product(&slots) {
                atoms.push(Atom::positive(&pred.name, args));
            }
        }
    }
    atoms
}

/// The Cartesian product of the per-slot candidate lists, in slot-major
/// order. An empty slot list yields the single empty tuple (the grounding of
/// a nullary predicate).
fn cartesian_product(slots: &[Vec<&str>]) -> Vec<Vec<String>> {
    let mut tuples: Vec<Vec<String>> = vec![Vec::new()];
    for slot in slots {
        let mut next = Vec::with_capacity(tuples.len() * slot.len());
        for tuple in &tuples {
            for name in slot {
                let mut extended = tuple.clone();
                extended.push((*name).to_string());
                next.push(extended);
            }
        }
        tuples = next;
    }
    tuples
}

/// Retains candidates whose negation is not already an effect literal of the
/// action (those would cancel an existing delete effect rather than add a
/// new constraint).
#[must_use]
pub(crate) fn exclude_negated_effects(action: &Action, atoms: Vec<Atom>) -> Vec<Atom> {
    let negated: Vec<Atom> = action
        .negated_effect_literals()
        .iter()
        .map(Atom::negate)
        .collect();
    atoms.into_iter().filter(|a| !negated.contains(a)).collect()
}

/// Retains candidates that are not already positive effect literals of the
/// action.
#[must_use]
pub(crate) fn exclude_positive_effects(action: &Action, atoms: Vec<Atom>) -> Vec<Atom> {
    let positive = action.positive_effect_literals();
    atoms.into_iter().filter(|a| !positive.contains(a)).collect()
}
