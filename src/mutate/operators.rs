//! The closed set of structural mutation operators.

use crate::audit::{EditKind, EditRecord};
use crate::error::{EditSite, MutationError};
use crate::model::{Action, Atom, Effect};

/// A single structural edit, applied in place to an action.
///
/// The operator set is closed: these four variants are the only edits the
/// engine can make. Each `apply` is a pure data transformation on the owning
/// action and returns the audit record for the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOp {
    /// Append the atom as a new conjunct of the action's precondition.
    InsertPrecondition(Atom),
    /// Remove the first precondition literal structurally equal to the atom.
    DeletePrecondition(Atom),
    /// Append an unconditional effect with the given literal.
    InsertEffect(Atom),
    /// Remove the first effect whose literal structurally equals the atom.
    DeleteEffect(Atom),
}

impl MutationOp {
    /// The atom this operator targets.
    #[must_use]
    pub const fn atom(&self) -> &Atom {
        match self {
            Self::InsertPrecondition(atom)
            | Self::DeletePrecondition(atom)
            | Self::InsertEffect(atom)
            | Self::DeleteEffect(atom) => atom,
        }
    }

    /// Applies the edit to `action`.
    ///
    /// # Errors
    ///
    /// - [`MutationError::InconsistentArguments`] if an insertion's atom
    ///   references an argument that is not one of the action's parameters
    ///   (the candidate pool was built incorrectly).
    /// - [`MutationError::LiteralNotFound`] if a deletion's atom is absent
    ///   from the action's current precondition/effects.
    pub fn apply(&self, action: &mut Action) -> Result<EditRecord, MutationError> {
        match self {
            Self::InsertPrecondition(atom) => {
                check_binding(action, atom)?;
                action.precondition.push(atom.clone());
                Ok(EditRecord::new(
                    EditKind::InsertPrecondition,
                    &action.name,
                    atom.clone(),
                ))
            }
            Self::DeletePrecondition(atom) => {
                if !action.precondition.remove(atom) {
                    return Err(MutationError::LiteralNotFound {
                        action: action.name.clone(),
                        atom: atom.clone(),
                        site: EditSite::Precondition,
                    });
                }
                Ok(EditRecord::new(
                    EditKind::DeletePrecondition,
                    &action.name,
                    atom.clone(),
                ))
            }
            Self::InsertEffect(atom) => {
                check_binding(action, atom)?;
                action.effects.push(Effect::unconditional(atom.clone()));
                Ok(EditRecord::new(
                    EditKind::InsertEffect,
                    &action.name,
                    atom.clone(),
                ))
            }
            Self::DeleteEffect(atom) => {
                let Some(idx) = action.effects.iter().position(|e| &e.literal == atom) else {
                    return Err(MutationError::LiteralNotFound {
                        action: action.name.clone(),
                        atom: atom.clone(),
                        site: EditSite::Effects,
                    });
                };
                action.effects.remove(idx);
                Ok(EditRecord::new(
                    EditKind::DeleteEffect,
                    &action.name,
                    atom.clone(),
                ))
            }
        }
    }
}

fn check_binding(action: &Action, atom: &Atom) -> Result<(), MutationError> {
    if action.binds(atom) {
        Ok(())
    } else {
        Err(MutationError::InconsistentArguments {
            action: action.name.clone(),
            atom: atom.clone(),
        })
    }
}
