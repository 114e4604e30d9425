//! Recorded player action model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use volleyscout_core::types::{DbId, Seconds, Timestamp};

/// A row from the `player_actions` table: one tagging event recorded during
/// video review. `resultado_id` and `zona_id` both reference subcategory
/// rows of the project's scout model.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayerAction {
    pub id: DbId,
    pub project_id: DbId,
    pub player_id: DbId,
    pub resultado_id: DbId,
    pub zona_id: DbId,
    pub clip_start: Seconds,
    pub clip_end: Seconds,
    pub created_at: Timestamp,
}

/// DTO for recording a new action. The clip start is clamped to the start
/// of the video before persisting; a clip that does not run forward is
/// rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayerAction {
    pub project_id: DbId,
    pub player_id: DbId,
    pub resultado_id: DbId,
    pub zona_id: DbId,
    pub clip_start: Seconds,
    pub clip_end: Seconds,
}

/// DTO for tagging an action at the moment it happens in the video. The
/// clip window is derived from the outcome category's configured lead-in
/// and lead-out around `event_time`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagPlayerAction {
    pub project_id: DbId,
    pub player_id: DbId,
    pub resultado_id: DbId,
    pub zona_id: DbId,
    /// Video offset at which the operator tagged the event.
    pub event_time: Seconds,
}

/// One action joined to the names the review sidebar displays, ordered by
/// clip start.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoutedEvent {
    pub id: DbId,
    pub player_name: String,
    pub player_number: Option<i32>,
    pub player_photo: Option<String>,
    pub category_name: String,
    pub category_color: String,
    pub resultado_name: String,
    pub zona_name: String,
    pub clip_start: Seconds,
    pub clip_end: Seconds,
}
