//! Team entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use volleyscout_core::types::{DbId, Timestamp};

/// A team row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    /// Base64-encoded logo image.
    pub logo: Option<String>,
    pub color: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new team. Name and color fall back to defaults when
/// omitted, matching the editor's "new team" placeholder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTeam {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub color: Option<String>,
}

/// DTO for updating a team. The editor submits the full record.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeam {
    pub name: String,
    pub logo: Option<String>,
    pub color: String,
}
