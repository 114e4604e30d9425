//! Diff-by-identity reconciliation for nested scout-model rows.
//!
//! A scout model arrives from the editor as a complete nested payload in
//! which every category and subcategory either echoes a persisted id or
//! carries none (new row). This module computes what has to happen to the
//! persisted rows for one level of that hierarchy; the db layer applies the
//! plan inside its transaction, once for the categories of a model and once
//! per category for its subcategories.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// What to do with one incoming entry, aligned by position with the
/// incoming list the plan was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// The entry echoes a persisted id: update that row in place.
    Update(DbId),
    /// The entry carries no id: insert a new row.
    Insert,
}

/// A reconciliation plan for one level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    /// Persisted ids absent from the incoming payload, in storage order.
    pub to_delete: Vec<DbId>,
    /// One action per incoming entry, in payload order.
    pub actions: Vec<RowAction>,
}

/// Diff the persisted id set against an incoming payload.
///
/// `existing` holds the ids currently persisted under the parent row;
/// `incoming` holds the (optional) id of each payload entry, in payload
/// order.
///
/// An incoming id that is not persisted is a stale reference: the editor is
/// echoing a row that some other write has already removed. That payload
/// cannot be applied faithfully, so the whole operation is rejected with
/// [`CoreError::Conflict`] rather than silently dropping or resurrecting
/// the row. An id appearing twice in the payload is rejected the same way.
pub fn plan_sync(
    entity: &'static str,
    existing: &[DbId],
    incoming: &[Option<DbId>],
) -> Result<SyncPlan, CoreError> {
    let existing_set: HashSet<DbId> = existing.iter().copied().collect();

    let mut seen: HashSet<DbId> = HashSet::new();
    let mut actions = Vec::with_capacity(incoming.len());
    for id in incoming {
        match *id {
            Some(id) => {
                if !existing_set.contains(&id) {
                    return Err(CoreError::Conflict(format!(
                        "stale {entity} reference: id {id} is not persisted"
                    )));
                }
                if !seen.insert(id) {
                    return Err(CoreError::Conflict(format!(
                        "duplicate {entity} id {id} in payload"
                    )));
                }
                actions.push(RowAction::Update(id));
            }
            None => actions.push(RowAction::Insert),
        }
    }

    let to_delete = existing
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();

    Ok(SyncPlan { to_delete, actions })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
