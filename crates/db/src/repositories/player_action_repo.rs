//! Repository for the `player_actions` table.

use volleyscout_core::clip::{clamp_clip_start, clip_window, validate_clip_range};
use volleyscout_core::error::CoreError;
use volleyscout_core::types::{DbId, Seconds};

use crate::error::DbError;
use crate::models::player_action::{
    CreatePlayerAction, PlayerAction, ScoutedEvent, TagPlayerAction,
};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, player_id, resultado_id, zona_id, clip_start, clip_end, created_at";

/// Provides operations for recorded player actions.
pub struct PlayerActionRepo;

impl PlayerActionRepo {
    /// Record a new action, returning the created row.
    ///
    /// The clip start is clamped to the start of the video; a clip that does
    /// not run forward is rejected with `CoreError::Validation` before
    /// anything is written.
    pub async fn create(
        pool: &DbPool,
        input: &CreatePlayerAction,
    ) -> Result<PlayerAction, DbError> {
        let clip_start = clamp_clip_start(input.clip_start);
        validate_clip_range(clip_start, input.clip_end)?;

        let query = format!(
            "INSERT INTO player_actions (project_id, player_id, resultado_id, zona_id, clip_start, clip_end)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let action = sqlx::query_as::<_, PlayerAction>(&query)
            .bind(input.project_id)
            .bind(input.player_id)
            .bind(input.resultado_id)
            .bind(input.zona_id)
            .bind(clip_start)
            .bind(input.clip_end)
            .fetch_one(pool)
            .await?;
        Ok(action)
    }

    /// Tag an action at the moment it happens in the video, returning the
    /// created row.
    ///
    /// The clip window pads `event_time` with the outcome category's
    /// configured lead-in and lead-out, clamped to the start of the video.
    /// An outcome id that matches no subcategory is `CoreError::NotFound`.
    pub async fn tag(pool: &DbPool, input: &TagPlayerAction) -> Result<PlayerAction, DbError> {
        let Some((before, after)) = sqlx::query_as::<_, (Seconds, Seconds)>(
            "SELECT c.time_to_clip_before_event, c.time_to_clip_after_event
             FROM categories c
             JOIN subcategories s ON s.category_id = c.id
             WHERE s.id = $1",
        )
        .bind(input.resultado_id)
        .fetch_optional(pool)
        .await?
        else {
            return Err(CoreError::NotFound {
                entity: "subcategory",
                id: input.resultado_id,
            }
            .into());
        };

        let (clip_start, clip_end) = clip_window(input.event_time, before, after);
        Self::create(
            pool,
            &CreatePlayerAction {
                project_id: input.project_id,
                player_id: input.player_id,
                resultado_id: input.resultado_id,
                zona_id: input.zona_id,
                clip_start,
                clip_end,
            },
        )
        .await
    }

    /// Find an action by its internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<PlayerAction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM player_actions WHERE id = $1");
        sqlx::query_as::<_, PlayerAction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's actions as the review sidebar displays them:
    /// joined to player and category names, ordered by clip start.
    pub async fn list_by_project(
        pool: &DbPool,
        project_id: DbId,
    ) -> Result<Vec<ScoutedEvent>, sqlx::Error> {
        sqlx::query_as::<_, ScoutedEvent>(
            "SELECT
                pa.id,
                p.name AS player_name,
                p.number AS player_number,
                p.photo AS player_photo,
                c.name AS category_name,
                c.color AS category_color,
                res.name AS resultado_name,
                zon.name AS zona_name,
                pa.clip_start,
                pa.clip_end
             FROM player_actions pa
             JOIN players p ON pa.player_id = p.id
             JOIN subcategories res ON pa.resultado_id = res.id
             JOIN subcategories zon ON pa.zona_id = zon.id
             JOIN categories c ON res.category_id = c.id
             WHERE pa.project_id = $1
             ORDER BY pa.clip_start ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Delete an action by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM player_actions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
