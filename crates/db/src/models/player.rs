//! Player entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use volleyscout_core::types::{DbId, Timestamp};

/// A player row from the `players` table.
///
/// `player_order` is the player's dense zero-based position within the team
/// roster; the repository maintains it on create, delete, and reorder.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub id: DbId,
    pub team_id: DbId,
    pub name: String,
    pub number: Option<i32>,
    pub height: Option<String>,
    pub position: Option<String>,
    /// Base64-encoded photo.
    pub photo: Option<String>,
    pub player_order: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a new player. The roster position is assigned by the
/// repository (appended at the end of the team).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayer {
    pub team_id: DbId,
    pub name: String,
    pub number: Option<i32>,
    pub height: Option<String>,
    pub position: Option<String>,
    pub photo: Option<String>,
}

/// DTO for updating a player. The editor submits the full record; team and
/// roster position are changed through dedicated operations instead.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlayer {
    pub name: String,
    pub number: Option<i32>,
    pub height: Option<String>,
    pub position: Option<String>,
    pub photo: Option<String>,
}
