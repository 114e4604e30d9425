//! Repository for the `teams` table.

use volleyscout_core::types::DbId;

use crate::models::team::{CreateTeam, Team, UpdateTeam};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, logo, color, created_at";

/// Placeholder name for a team created from an empty form.
const DEFAULT_NAME: &str = "Nova Equipe";

/// Provides CRUD operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Insert a new team, returning the created row.
    ///
    /// Name and color default to the editor placeholders when omitted.
    pub async fn create(pool: &DbPool, input: &CreateTeam) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (name, logo, color)
             VALUES (COALESCE($1, '{DEFAULT_NAME}'), $2, COALESCE($3, '#cccccc'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(&input.name)
            .bind(&input.logo)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a team by its internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all teams ordered by name.
    pub async fn list(pool: &DbPool) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams ORDER BY name");
        sqlx::query_as::<_, Team>(&query).fetch_all(pool).await
    }

    /// Update a team from a full-record payload.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateTeam,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!(
            "UPDATE teams SET name = $2, logo = $3, color = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.logo)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a team by ID. Returns `true` if a row was removed.
    ///
    /// The team's players are removed by cascade.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
