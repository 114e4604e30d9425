//! Match-report assembly.
//!
//! A report is a player x (category x outcome) contingency table for one
//! project: every roster player in roster order, one column group per
//! category that actually occurred in the recorded actions, one column per
//! outcome subcategory the model defines for it. The db layer fetches the
//! three inputs; the assembly itself is pure so it can be tested without a
//! database.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::types::DbId;

/// One `(category, outcome, weight)` triple from the project's scout model,
/// in model order. Weights are passed through untouched for the spreadsheet
/// exporter's efficiency formulas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStructureRow {
    pub category_name: String,
    pub subcategory_name: String,
    pub weight: f64,
}

/// One recorded action, joined to the names the tally is keyed by.
#[derive(Debug, Clone)]
pub struct ActionRow {
    pub player_id: DbId,
    pub category_name: String,
    pub resultado_name: String,
}

/// One roster entry, in team order.
#[derive(Debug, Clone)]
pub struct RosterPlayer {
    pub player_id: DbId,
    pub player_name: String,
    pub player_number: Option<i32>,
}

/// Column group for one active category: its outcome names in model order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryHeader {
    pub category: String,
    pub outcomes: Vec<String>,
}

/// Per-player tally row. `actions[category][outcome]` is a count; every
/// cell named by the headers is present, zero-filled.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub player_id: DbId,
    pub player_name: String,
    pub player_number: Option<i32>,
    pub actions: BTreeMap<String, BTreeMap<String, i64>>,
}

/// The full report handed to the UI and the spreadsheet exporter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchReport {
    pub headers: Vec<CategoryHeader>,
    pub rows: Vec<ReportRow>,
    pub model_structure: Vec<ModelStructureRow>,
}

/// Assemble a report from the persisted inputs.
///
/// `model_structure` must already be restricted to outcome-type
/// subcategories and ordered by category then subcategory; `roster` must be
/// in team order. With no recorded actions the report keeps the full roster
/// with empty tallies and no headers.
pub fn build_report(
    model_structure: Vec<ModelStructureRow>,
    actions: Vec<ActionRow>,
    roster: Vec<RosterPlayer>,
) -> MatchReport {
    let active: HashSet<&str> = actions.iter().map(|a| a.category_name.as_str()).collect();

    let headers = build_headers(&model_structure, &active);

    let mut rows: Vec<ReportRow> = roster
        .into_iter()
        .map(|player| {
            let mut tally = BTreeMap::new();
            for header in &headers {
                let outcomes: BTreeMap<String, i64> = header
                    .outcomes
                    .iter()
                    .map(|name| (name.clone(), 0))
                    .collect();
                tally.insert(header.category.clone(), outcomes);
            }
            ReportRow {
                player_id: player.player_id,
                player_name: player.player_name,
                player_number: player.player_number,
                actions: tally,
            }
        })
        .collect();

    for action in &actions {
        // Actions from players no longer on the roster, or naming a cell the
        // model no longer defines, are ignored rather than failing the report.
        let Some(row) = rows.iter_mut().find(|r| r.player_id == action.player_id) else {
            continue;
        };
        if let Some(cell) = row
            .actions
            .get_mut(&action.category_name)
            .and_then(|outcomes| outcomes.get_mut(&action.resultado_name))
        {
            *cell += 1;
        }
    }

    MatchReport {
        headers,
        rows,
        model_structure,
    }
}

/// Ordered, de-duplicated column groups for the categories in `active`.
fn build_headers(model_structure: &[ModelStructureRow], active: &HashSet<&str>) -> Vec<CategoryHeader> {
    let mut headers: Vec<CategoryHeader> = Vec::new();
    for row in model_structure {
        if !active.contains(row.category_name.as_str()) {
            continue;
        }
        let index = match headers.iter().position(|h| h.category == row.category_name) {
            Some(index) => index,
            None => {
                headers.push(CategoryHeader {
                    category: row.category_name.clone(),
                    outcomes: Vec::new(),
                });
                headers.len() - 1
            }
        };
        let header = &mut headers[index];
        if !header.outcomes.contains(&row.subcategory_name) {
            header.outcomes.push(row.subcategory_name.clone());
        }
    }
    headers
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
