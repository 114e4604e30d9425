//! Match-report aggregation queries.
//!
//! The queries here only fetch rows; the cross-tabulation itself lives in
//! `volleyscout_core::report` where it is unit-tested without a database.

use volleyscout_core::error::CoreError;
use volleyscout_core::report::{build_report, ActionRow, MatchReport, ModelStructureRow, RosterPlayer};
use volleyscout_core::types::DbId;

use crate::error::DbError;
use crate::repositories::ProjectRepo;
use crate::DbPool;

/// Produces the player x (category x outcome) report for a project.
pub struct ReportRepo;

impl ReportRepo {
    /// Build the match report for `project_id`.
    ///
    /// A project whose scout model defines no outcome subcategories yields
    /// the empty report; a project with no recorded actions yields the full
    /// roster with empty tallies. A project id that does not exist is a
    /// `CoreError::NotFound`.
    pub async fn match_report(pool: &DbPool, project_id: DbId) -> Result<MatchReport, DbError> {
        let project = ProjectRepo::find_by_id(pool, project_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "project",
                id: project_id,
            })?;

        let model_structure: Vec<ModelStructureRow> = sqlx::query_as::<_, (String, String, f64)>(
            "SELECT c.name, s.name, s.weight
             FROM categories c
             JOIN subcategories s ON s.category_id = c.id
             WHERE c.model_id = $1 AND s.type = 'resultado'
             ORDER BY c.id, s.id",
        )
        .bind(project.id_scout_model)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|(category_name, subcategory_name, weight)| ModelStructureRow {
            category_name,
            subcategory_name,
            weight,
        })
        .collect();

        // No scoreable outcomes defined: nothing to fetch or tabulate.
        if model_structure.is_empty() {
            return Ok(MatchReport::default());
        }

        let actions: Vec<ActionRow> = sqlx::query_as::<_, (DbId, String, String)>(
            "SELECT pa.player_id, c.name, res.name
             FROM player_actions pa
             JOIN subcategories res ON pa.resultado_id = res.id
             JOIN categories c ON res.category_id = c.id
             WHERE pa.project_id = $1",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|(player_id, category_name, resultado_name)| ActionRow {
            player_id,
            category_name,
            resultado_name,
        })
        .collect();

        let roster: Vec<RosterPlayer> = sqlx::query_as::<_, (DbId, String, Option<i32>)>(
            "SELECT id, name, number FROM players WHERE team_id = $1 ORDER BY player_order ASC",
        )
        .bind(project.id_team)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|(player_id, player_name, player_number)| RosterPlayer {
            player_id,
            player_name,
            player_number,
        })
        .collect();

        tracing::debug!(
            project_id,
            actions = actions.len(),
            roster = roster.len(),
            "assembling match report"
        );
        Ok(build_report(model_structure, actions, roster))
    }
}
