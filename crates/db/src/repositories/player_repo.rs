//! Repository for the `players` table.
//!
//! `player_order` is a dense zero-based sequence per team. Creation appends
//! at the end, deletion closes the gap, and `update_order` renumbers from
//! the drag-and-drop result, each inside one transaction.

use volleyscout_core::types::DbId;

use crate::models::player::{CreatePlayer, Player, UpdatePlayer};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, name, number, height, position, photo, player_order, created_at";

/// Provides CRUD and roster-ordering operations for players.
pub struct PlayerRepo;

impl PlayerRepo {
    /// Insert a new player at the end of the team's roster, returning the
    /// created row.
    pub async fn create(pool: &DbPool, input: &CreatePlayer) -> Result<Player, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let next_order: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM players WHERE team_id = $1")
                .bind(input.team_id)
                .fetch_one(&mut *tx)
                .await?;

        let query = format!(
            "INSERT INTO players (team_id, name, number, height, position, photo, player_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let player = sqlx::query_as::<_, Player>(&query)
            .bind(input.team_id)
            .bind(&input.name)
            .bind(input.number)
            .bind(&input.height)
            .bind(&input.position)
            .bind(&input.photo)
            .bind(next_order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(player)
    }

    /// Find a player by its internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players WHERE id = $1");
        sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a team's roster in roster order.
    pub async fn list_by_team(pool: &DbPool, team_id: DbId) -> Result<Vec<Player>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM players WHERE team_id = $1 ORDER BY player_order ASC");
        sqlx::query_as::<_, Player>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }

    /// Update a player from a full-record payload.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdatePlayer,
    ) -> Result<Option<Player>, sqlx::Error> {
        let query = format!(
            "UPDATE players SET name = $2, number = $3, height = $4, position = $5, photo = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.number)
            .bind(&input.height)
            .bind(&input.position)
            .bind(&input.photo)
            .fetch_optional(pool)
            .await
    }

    /// Renumber a team's roster to match `ordered_ids`.
    ///
    /// The list is the full roster in its new order; each player receives
    /// its index as `player_order`. Ids not belonging to the team are
    /// ignored by the per-row team guard.
    pub async fn update_order(
        pool: &DbPool,
        team_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (index, player_id) in ordered_ids.iter().enumerate() {
            sqlx::query("UPDATE players SET player_order = $1 WHERE id = $2 AND team_id = $3")
                .bind(index as i64)
                .bind(player_id)
                .bind(team_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::debug!(team_id, count = ordered_ids.len(), "roster reordered");
        Ok(())
    }

    /// Delete a player and close the roster gap it leaves behind.
    ///
    /// Returns `false` if the player does not exist.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some((team_id, player_order)) = sqlx::query_as::<_, (DbId, i64)>(
            "SELECT team_id, player_order FROM players WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE players SET player_order = player_order - 1
             WHERE team_id = $1 AND player_order > $2",
        )
        .bind(team_id)
        .bind(player_order)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
