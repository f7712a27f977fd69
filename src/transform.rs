//! The cross-validation transformer.
//!
//! Given `origin` and `modified` domains with a 1:1 action-name
//! correspondence, builds one composite domain whose solutions certify that
//! a plan is executable-and-successful under *both* domains in lockstep, and
//! rewrites a task to match.
//!
//! The construction interleaves two tracks. Origin actions may fire only
//! while `unlock-origin-domain` holds; firing asserts a per-instantiation
//! lock atom and hands control to the shadow track. The `<action>-copy`
//! shadow action replays the modified semantics on `-copy` predicates and
//! returns control. For every precondition literal the modified action
//! demands, an `<action>-stop-<i>` action fires when the shadow state
//! violates it, asserting the terminal `invalid` atom; the nullary `turning`
//! action lets the origin track continue after a detected divergence so the
//! plan can still be judged against the goal, which a caller extends with
//! the negation of `invalid`.
//!
//! All synthesized names are a stable output contract; consumers must treat
//! them as domain-private.

use std::collections::{HashMap, HashSet};

use log::info;

use crate::error::TransformError;
use crate::model::{Action, Atom, Condition, Domain, Effect, Predicate, Task};

/// Terminal divergence marker predicate.
pub const INVALID_PREDICATE: &str = "invalid";

/// Gate predicate: true while the origin track may fire.
pub const UNLOCK_PREDICATE: &str = "unlock-origin-domain";

/// Suffix of shadow predicates and shadow actions.
pub const COPY_SUFFIX: &str = "-copy";

/// Suffix of per-action lock predicates.
pub const LOCK_SUFFIX: &str = "-lock";

/// Name of the divergence-recovery action.
pub const TURNING_ACTION: &str = "turning";

/// Builds and holds a composite cross-validation domain.
#[derive(Debug)]
pub struct Transformer {
    shadow: HashMap<String, String>,
    domain: Domain,
}

impl Transformer {
    /// Builds the composite domain from `origin` (consumed and extended in
    /// place) and `modified` (read for its shadow semantics).
    ///
    /// # Errors
    ///
    /// - [`TransformError::MissingCounterpart`] if the action name sets of
    ///   the two domains differ in either direction.
    /// - [`TransformError::UnknownPredicate`] if a modified action refers to
    ///   a predicate the modified domain does not declare.
    pub fn new(mut origin: Domain, modified: &Domain) -> Result<Self, TransformError> {
        for action in &origin.actions {
            if modified.action(&action.name).is_none() {
                return Err(TransformError::MissingCounterpart {
                    action: action.name.clone(),
                    side: "modified",
                });
            }
        }

        let mut shadow = HashMap::new();
        let mut extended_preds = Vec::new();
        for pred in &modified.predicates {
            let copy_name = format!("{}{COPY_SUFFIX}", pred.name);
            shadow.insert(pred.name.clone(), copy_name.clone());
            extended_preds.push(Predicate::new(copy_name, pred.arguments.clone()));
        }
        extended_preds.push(Predicate::new(INVALID_PREDICATE, Vec::new()));
        extended_preds.push(Predicate::new(UNLOCK_PREDICATE, Vec::new()));

        let unlock = Atom::positive(UNLOCK_PREDICATE, Vec::new());
        let invalid = Atom::positive(INVALID_PREDICATE, Vec::new());
        let mut extended_actions = Vec::new();

        for y in &modified.actions {
            let Some(x_idx) = origin.actions.iter().position(|a| a.name == y.name) else {
                return Err(TransformError::MissingCounterpart {
                    action: y.name.clone(),
                    side: "origin",
                });
            };

            let lock = Atom::positive(
                format!("{}{LOCK_SUFFIX}", y.name),
                y.parameters.iter().map(|p| p.name.clone()).collect(),
            );
            extended_preds.push(Predicate::new(lock.predicate.clone(), y.parameters.clone()));

            // Origin side of the handshake: may fire only while unlocked,
            // and hands control to the shadow replay of this instance.
            let x = &mut origin.actions[x_idx];
            x.precondition.push(unlock.clone());
            x.effects.push(Effect::unconditional(lock.clone()));
            x.effects.push(Effect::unconditional(unlock.negate()));

            // Shadow precondition, plus one trap per demanded literal.
            let mut copy_prec = vec![lock.clone()];
            for (idx, literal) in y.precondition.conjuncts().iter().enumerate() {
                let shadow_literal = translate(&shadow, literal)?;
                let mut stop = Action::new(
                    format!("{}-stop-{idx}", y.name),
                    y.parameters.clone(),
                    Condition::And(vec![shadow_literal.negate(), lock.clone()]),
                );
                stop.effects = vec![Effect::unconditional(invalid.clone())];
                stop.cost = y.cost.clone();
                extended_actions.push(stop);
                copy_prec.push(shadow_literal);
            }

            // Shadow replay: completes the lockstep step and returns control.
            let mut copy = Action::new(
                format!("{}{COPY_SUFFIX}", y.name),
                y.parameters.clone(),
                Condition::And(copy_prec),
            );
            copy.effects = vec![
                Effect::unconditional(lock.negate()),
                Effect::unconditional(unlock.clone()),
            ];
            for eff in &y.effects {
                // Bookkeeping literals are already handled above.
                if eff.literal == lock || eff.literal == unlock.negate() {
                    continue;
                }
                copy.effects
                    .push(Effect::unconditional(translate(&shadow, &eff.literal)?));
            }
            copy.cost = y.cost.clone();
            extended_actions.push(copy);
        }

        let mut turning = Action::new(
            TURNING_ACTION,
            Vec::new(),
            Condition::And(vec![invalid]),
        );
        turning.effects = vec![Effect::unconditional(unlock)];
        turning.cost = origin.actions.last().and_then(|a| a.cost.clone());
        extended_actions.push(turning);

        info!(
            "event=transform domain={} shadow_predicates={} extended_actions={}",
            origin.name,
            shadow.len(),
            extended_actions.len()
        );
        origin.predicates.extend(extended_preds);
        origin.actions.extend(extended_actions);
        Ok(Self {
            shadow,
            domain: origin,
        })
    }

    /// The composite domain.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Consumes the transformer and returns the composite domain.
    #[must_use]
    pub fn into_domain(self) -> Domain {
        self.domain
    }

    /// The shadow predicate name for `predicate`, if one was synthesized.
    #[must_use]
    pub fn shadow_predicate(&self, predicate: &str) -> Option<&str> {
        self.shadow.get(predicate).map(String::as_str)
    }

    /// Rewrites a task for the composite domain.
    ///
    /// The goal gains the negation of `invalid` (a plan that ends in a
    /// divergent state cannot be a solution); the initial state gains
    /// `unlock-origin-domain` plus a shadow-translated copy of every initial
    /// atom so the two tracks start in matching states; objects shadowed by
    /// domain constants are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnknownPredicate`] if an initial atom's
    /// predicate has no shadow mapping.
    pub fn rewrite_task(&self, task: &Task) -> Result<Task, TransformError> {
        let mut out = task.clone();
        out.domain_name = self.domain.name.clone();
        out.goal.push(Atom::negated(INVALID_PREDICATE, Vec::new()));

        let mut extension = vec![Atom::positive(UNLOCK_PREDICATE, Vec::new())];
        for atom in &task.init {
            extension.push(translate(&self.shadow, atom)?);
        }
        for atom in extension {
            if !out.init.contains(&atom) {
                out.init.push(atom);
            }
        }

        let constants: HashSet<&str> = self
            .domain
            .constants
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        out.objects.retain(|o| !constants.contains(o.name.as_str()));
        Ok(out)
    }
}

fn translate(shadow: &HashMap<String, String>, atom: &Atom) -> Result<Atom, TransformError> {
    let predicate = shadow
        .get(&atom.predicate)
        .ok_or_else(|| TransformError::UnknownPredicate {
            predicate: atom.predicate.clone(),
        })?;
    Ok(Atom {
        predicate: predicate.clone(),
        args: atom.args.clone(),
        negated: atom.negated,
    })
}
