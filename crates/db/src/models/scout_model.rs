//! Scout-model entity models: persisted rows, the nested editor payload,
//! and the nested read view.
//!
//! Categories and subcategories are never edited row by row — the editor
//! always submits the whole model and `ScoutModelRepo::save` reconciles it
//! against storage.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use volleyscout_core::types::{DbId, Seconds, Timestamp};

/// A scout model row from the `scout_models` table. Grid dimensions are a
/// display hint for the tagging panel layout.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoutModel {
    pub id: DbId,
    pub name: String,
    pub grid_width: i32,
    pub grid_height: i32,
    pub created_at: Timestamp,
}

/// A category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub model_id: DbId,
    pub name: String,
    pub color: String,
    /// Seconds of video kept before a tagged event.
    pub time_to_clip_before_event: Seconds,
    /// Seconds of video kept after a tagged event.
    pub time_to_clip_after_event: Seconds,
}

/// A subcategory row from the `subcategories` table. `kind` is the
/// free-form `type` column: `"resultado"` for outcomes, `"zona"` for court
/// zones.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subcategory {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub weight: f64,
}

/// The nested payload the editor submits. A missing `id` anywhere in the
/// tree marks a row to insert; a present `id` must echo a persisted row.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoutModelInput {
    pub id: Option<DbId>,
    pub name: String,
    pub grid_width: i32,
    pub grid_height: i32,
    pub categories: Vec<CategoryInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    pub id: Option<DbId>,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_clip_padding")]
    pub time_to_clip_before_event: Seconds,
    #[serde(default = "default_clip_padding")]
    pub time_to_clip_after_event: Seconds,
    #[serde(default)]
    pub subcategories: Vec<SubcategoryInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubcategoryInput {
    pub id: Option<DbId>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub weight: f64,
}

fn default_color() -> String {
    "#cccccc".to_string()
}

fn default_clip_padding() -> Seconds {
    volleyscout_core::clip::DEFAULT_CLIP_PADDING_SECS
}

/// A scout model with its full category/subcategory tree, as the editor
/// loads it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoutModelWithCategories {
    pub model: ScoutModel,
    pub categories: Vec<CategoryWithSubcategories>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithSubcategories {
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
}
