//! Repository for the `scout_models`, `categories`, and `subcategories`
//! tables.
//!
//! The category/subcategory tree is only ever written through [`ScoutModelRepo::save`],
//! which reconciles the editor's complete payload against storage in a
//! single transaction. Rows that echo a persisted id are updated in place so
//! recorded actions keep pointing at the same subcategory rows.

use volleyscout_core::error::CoreError;
use volleyscout_core::sync::{plan_sync, RowAction};
use volleyscout_core::types::DbId;

use crate::error::DbError;
use crate::models::scout_model::{
    Category, CategoryInput, CategoryWithSubcategories, ScoutModel, ScoutModelInput,
    ScoutModelWithCategories, Subcategory, SubcategoryInput,
};
use crate::DbPool;

type SqliteTx<'a> = sqlx::Transaction<'a, sqlx::Sqlite>;

/// Column list for the `scout_models` table.
const COLUMNS: &str = "id, name, grid_width, grid_height, created_at";

/// Column list for the `categories` table.
const CATEGORY_COLUMNS: &str =
    "id, model_id, name, color, time_to_clip_before_event, time_to_clip_after_event";

/// Column list for the `subcategories` table.
const SUBCATEGORY_COLUMNS: &str = "id, category_id, name, type, weight";

/// Provides read and synchronization operations for scout models.
pub struct ScoutModelRepo;

impl ScoutModelRepo {
    /// List all scout models ordered by name.
    pub async fn list(pool: &DbPool) -> Result<Vec<ScoutModel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scout_models ORDER BY name");
        sqlx::query_as::<_, ScoutModel>(&query).fetch_all(pool).await
    }

    /// Find a scout model by its internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<ScoutModel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scout_models WHERE id = $1");
        sqlx::query_as::<_, ScoutModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a scout model by ID, enriched with its full category tree in
    /// insertion order.
    pub async fn find_with_categories(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<ScoutModelWithCategories>, sqlx::Error> {
        let Some(model) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let category_query =
            format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE model_id = $1 ORDER BY id");
        let categories = sqlx::query_as::<_, Category>(&category_query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        let subcategory_query = format!(
            "SELECT {SUBCATEGORY_COLUMNS} FROM subcategories WHERE category_id = $1 ORDER BY id"
        );
        let mut tree = Vec::with_capacity(categories.len());
        for category in categories {
            let subcategories = sqlx::query_as::<_, Subcategory>(&subcategory_query)
                .bind(category.id)
                .fetch_all(pool)
                .await?;
            tree.push(CategoryWithSubcategories {
                category,
                subcategories,
            });
        }

        Ok(Some(ScoutModelWithCategories {
            model,
            categories: tree,
        }))
    }

    /// Persist a complete scout model, reconciling its category tree
    /// against storage.
    ///
    /// Rows echoing a persisted id are updated in place, rows without an id
    /// are inserted, and persisted rows absent from the payload are deleted
    /// (subcategories by cascade). The whole pass runs in one transaction;
    /// any failure leaves storage untouched. A payload id that no longer
    /// exists in storage aborts with `CoreError::Conflict` (stale child row)
    /// or `CoreError::NotFound` (the model itself is gone).
    ///
    /// Returns the resolved model id.
    pub async fn save(pool: &DbPool, input: &ScoutModelInput) -> Result<DbId, DbError> {
        let mut tx = pool.begin().await?;

        let model_id = match input.id {
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE scout_models SET name = $2, grid_width = $3, grid_height = $4
                     WHERE id = $1",
                )
                .bind(id)
                .bind(&input.name)
                .bind(input.grid_width)
                .bind(input.grid_height)
                .execute(&mut *tx)
                .await?;
                if result.rows_affected() == 0 {
                    return Err(CoreError::NotFound {
                        entity: "scout_model",
                        id,
                    }
                    .into());
                }
                id
            }
            None => {
                sqlx::query_scalar::<_, DbId>(
                    "INSERT INTO scout_models (name, grid_width, grid_height)
                     VALUES ($1, $2, $3)
                     RETURNING id",
                )
                .bind(&input.name)
                .bind(input.grid_width)
                .bind(input.grid_height)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        Self::sync_categories(&mut tx, model_id, &input.categories).await?;

        tx.commit().await?;
        tracing::info!(model_id, categories = input.categories.len(), "scout model saved");
        Ok(model_id)
    }

    /// Delete a scout model by ID. Returns `true` if a row was removed.
    ///
    /// Categories and subcategories are removed by cascade.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scout_models WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Reconcile the persisted categories of `model_id` against the payload.
    async fn sync_categories(
        tx: &mut SqliteTx<'_>,
        model_id: DbId,
        categories: &[CategoryInput],
    ) -> Result<(), DbError> {
        let existing: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM categories WHERE model_id = $1 ORDER BY id")
                .bind(model_id)
                .fetch_all(&mut **tx)
                .await?;

        let incoming: Vec<Option<DbId>> = categories.iter().map(|c| c.id).collect();
        let plan = plan_sync("category", &existing, &incoming)?;

        for id in &plan.to_delete {
            sqlx::query("DELETE FROM categories WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }

        for (category, action) in categories.iter().zip(&plan.actions) {
            let category_id = match *action {
                RowAction::Update(id) => {
                    sqlx::query(
                        "UPDATE categories SET name = $2, color = $3,
                            time_to_clip_before_event = $4, time_to_clip_after_event = $5
                         WHERE id = $1",
                    )
                    .bind(id)
                    .bind(&category.name)
                    .bind(&category.color)
                    .bind(category.time_to_clip_before_event)
                    .bind(category.time_to_clip_after_event)
                    .execute(&mut **tx)
                    .await?;
                    id
                }
                RowAction::Insert => {
                    sqlx::query_scalar::<_, DbId>(
                        "INSERT INTO categories
                            (model_id, name, color, time_to_clip_before_event, time_to_clip_after_event)
                         VALUES ($1, $2, $3, $4, $5)
                         RETURNING id",
                    )
                    .bind(model_id)
                    .bind(&category.name)
                    .bind(&category.color)
                    .bind(category.time_to_clip_before_event)
                    .bind(category.time_to_clip_after_event)
                    .fetch_one(&mut **tx)
                    .await?
                }
            };

            Self::sync_subcategories(tx, category_id, &category.subcategories).await?;
        }

        Ok(())
    }

    /// Reconcile the persisted subcategories of `category_id` against the
    /// payload. Same diff as the category level, one nesting down.
    async fn sync_subcategories(
        tx: &mut SqliteTx<'_>,
        category_id: DbId,
        subcategories: &[SubcategoryInput],
    ) -> Result<(), DbError> {
        let existing: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM subcategories WHERE category_id = $1 ORDER BY id")
                .bind(category_id)
                .fetch_all(&mut **tx)
                .await?;

        let incoming: Vec<Option<DbId>> = subcategories.iter().map(|s| s.id).collect();
        let plan = plan_sync("subcategory", &existing, &incoming)?;

        for id in &plan.to_delete {
            sqlx::query("DELETE FROM subcategories WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }

        for (subcategory, action) in subcategories.iter().zip(&plan.actions) {
            match *action {
                RowAction::Update(id) => {
                    sqlx::query(
                        "UPDATE subcategories SET name = $2, type = $3, weight = $4 WHERE id = $1",
                    )
                    .bind(id)
                    .bind(&subcategory.name)
                    .bind(&subcategory.kind)
                    .bind(subcategory.weight)
                    .execute(&mut **tx)
                    .await?;
                }
                RowAction::Insert => {
                    sqlx::query(
                        "INSERT INTO subcategories (category_id, name, type, weight)
                         VALUES ($1, $2, $3, $4)",
                    )
                    .bind(category_id)
                    .bind(&subcategory.name)
                    .bind(&subcategory.kind)
                    .bind(subcategory.weight)
                    .execute(&mut **tx)
                    .await?;
                }
            }
        }

        Ok(())
    }
}
