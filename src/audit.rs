//! The mutation audit trail.
//!
//! Every successful edit appends an immutable [`EditRecord`] to an ordered
//! [`AuditLog`]. The rendered line format is a stable, machine-diffable
//! contract consumed by downstream labeling tools:
//!
//! ```text
//! <action-name>,<predicate-name>,<edit-class>,<±1>
//! ```
//!
//! with edit-class in `{precPos, precNeg, effPos, effNeg}` and `1` / `-1`
//! marking insertion / deletion.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Atom;

/// The four structural edit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    /// A literal was appended to an action's precondition conjunction.
    InsertPrecondition,
    /// A literal was removed from an action's precondition conjunction.
    DeletePrecondition,
    /// An unconditional effect was appended to an action.
    InsertEffect,
    /// An effect was removed from an action.
    DeleteEffect,
}

impl EditKind {
    /// Returns true for the insertion variants.
    #[must_use]
    pub const fn is_insertion(&self) -> bool {
        matches!(self, Self::InsertPrecondition | Self::InsertEffect)
    }

    /// Returns true for the precondition variants.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::InsertPrecondition | Self::DeletePrecondition)
    }
}

/// A single recorded edit: operation kind, target action, affected atom.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    kind: EditKind,
    action: String,
    atom: Atom,
}

impl EditRecord {
    /// Creates a record for an applied edit.
    #[must_use]
    pub fn new(kind: EditKind, action: impl Into<String>, atom: Atom) -> Self {
        Self {
            kind,
            action: action.into(),
            atom,
        }
    }

    /// The operation kind.
    #[must_use]
    pub const fn kind(&self) -> EditKind {
        self.kind
    }

    /// The target action name.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The affected atom.
    #[must_use]
    pub const fn atom(&self) -> &Atom {
        &self.atom
    }

    /// The stable edit-class tag derived from the edit site and polarity.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match (self.kind.is_precondition(), self.atom.negated) {
            (true, false) => "precPos",
            (true, true) => "precNeg",
            (false, false) => "effPos",
            (false, true) => "effNeg",
        }
    }

    /// The signed direction: `1` for insertions, `-1` for deletions.
    #[must_use]
    pub const fn direction(&self) -> i8 {
        if self.kind.is_insertion() {
            1
        } else {
            -1
        }
    }
}

impl fmt::Display for EditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.action,
            self.atom.predicate,
            self.class(),
            self.direction()
        )
    }
}

/// The ordered audit log of one mutation run.
///
/// Carries run metadata for correlation alongside the records; only the
/// records participate in the rendered line contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    /// Unique identifier of this mutation run.
    pub run_id: Uuid,

    /// When this log was created.
    pub created_at: DateTime<Utc>,

    records: Vec<EditRecord>,
}

impl AuditLog {
    /// Creates an empty log with fresh run metadata.
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
            records: Vec::new(),
        }
    }

    /// Appends a record.
    pub fn push(&mut self, record: EditRecord) {
        self.records.push(record);
    }

    /// The recorded edits in application order.
    #[must_use]
    pub fn records(&self) -> &[EditRecord] {
        &self.records
    }

    /// The number of recorded edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no edits were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Renders the stable line format, one record per line in order.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
