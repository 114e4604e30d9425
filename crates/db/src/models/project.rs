//! Project (match) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use volleyscout_core::types::{DbId, Timestamp};

/// A project row from the `projects` table: one match/analysis session
/// binding a team, a scout model, and optionally a video file on disk.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub season: String,
    pub tournament: String,
    pub description: Option<String>,
    pub id_team: DbId,
    pub id_scout_model: DbId,
    pub video_path: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub season: String,
    pub tournament: String,
    pub description: Option<String>,
    pub id_team: DbId,
    pub id_scout_model: DbId,
    pub video_path: Option<String>,
}

/// DTO for updating a project. The editor submits the full record.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub season: String,
    pub tournament: String,
    pub description: Option<String>,
    pub id_team: DbId,
    pub id_scout_model: DbId,
    pub video_path: Option<String>,
}
