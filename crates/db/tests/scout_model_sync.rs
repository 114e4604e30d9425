//! Integration tests for scout-model synchronization.
//!
//! The editor always submits the complete nested model; `ScoutModelRepo::save`
//! must update echoed rows in place, insert id-less rows, delete absent
//! rows, and do all of it atomically.

use assert_matches::assert_matches;
use sqlx::SqlitePool;
use volleyscout_core::error::CoreError;
use volleyscout_db::error::DbError;
use volleyscout_db::models::scout_model::{
    CategoryInput, ScoutModelInput, ScoutModelWithCategories, SubcategoryInput,
};
use volleyscout_db::repositories::ScoutModelRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn subcategory(name: &str, kind: &str, weight: f64) -> SubcategoryInput {
    SubcategoryInput {
        id: None,
        name: name.to_string(),
        kind: kind.to_string(),
        weight,
    }
}

fn category(name: &str, subcategories: Vec<SubcategoryInput>) -> CategoryInput {
    CategoryInput {
        id: None,
        name: name.to_string(),
        color: "#ff0000".to_string(),
        time_to_clip_before_event: 5.0,
        time_to_clip_after_event: 3.0,
        subcategories,
    }
}

fn model(name: &str, categories: Vec<CategoryInput>) -> ScoutModelInput {
    ScoutModelInput {
        id: None,
        name: name.to_string(),
        grid_width: 4,
        grid_height: 3,
        categories,
    }
}

/// Rebuild the editor payload from a persisted tree, echoing every id —
/// what the UI submits when the user saves without touching anything.
fn tree_to_input(tree: &ScoutModelWithCategories) -> ScoutModelInput {
    ScoutModelInput {
        id: Some(tree.model.id),
        name: tree.model.name.clone(),
        grid_width: tree.model.grid_width,
        grid_height: tree.model.grid_height,
        categories: tree
            .categories
            .iter()
            .map(|c| CategoryInput {
                id: Some(c.category.id),
                name: c.category.name.clone(),
                color: c.category.color.clone(),
                time_to_clip_before_event: c.category.time_to_clip_before_event,
                time_to_clip_after_event: c.category.time_to_clip_after_event,
                subcategories: c
                    .subcategories
                    .iter()
                    .map(|s| SubcategoryInput {
                        id: Some(s.id),
                        name: s.name.clone(),
                        kind: s.kind.clone(),
                        weight: s.weight,
                    })
                    .collect(),
            })
            .collect(),
    }
}

async fn fetch_tree(pool: &SqlitePool, id: i64) -> ScoutModelWithCategories {
    ScoutModelRepo::find_with_categories(pool, id)
        .await
        .unwrap()
        .unwrap()
}

/// A two-category model: Attack (+, -, Z1) and Serve (ace).
fn standard_model() -> ScoutModelInput {
    model(
        "Standard",
        vec![
            category(
                "Attack",
                vec![
                    subcategory("+", "resultado", 1.0),
                    subcategory("-", "resultado", -1.0),
                    subcategory("Z1", "zona", 0.0),
                ],
            ),
            category("Serve", vec![subcategory("ace", "resultado", 2.0)]),
        ],
    )
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn creating_a_model_persists_the_full_tree(pool: SqlitePool) {
    let model_id = ScoutModelRepo::save(&pool, &standard_model()).await.unwrap();

    let tree = fetch_tree(&pool, model_id).await;
    assert_eq!(tree.model.name, "Standard");
    assert_eq!(tree.categories.len(), 2);
    assert_eq!(tree.categories[0].category.name, "Attack");
    assert_eq!(tree.categories[0].subcategories.len(), 3);
    assert_eq!(tree.categories[1].category.name, "Serve");
    assert_eq!(tree.categories[1].subcategories[0].kind, "resultado");
}

// ---------------------------------------------------------------------------
// Idempotence and identity preservation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn resaving_the_fetched_payload_changes_nothing(pool: SqlitePool) {
    let model_id = ScoutModelRepo::save(&pool, &standard_model()).await.unwrap();
    let before = fetch_tree(&pool, model_id).await;

    let resolved = ScoutModelRepo::save(&pool, &tree_to_input(&before)).await.unwrap();
    assert_eq!(resolved, model_id);

    let after = fetch_tree(&pool, model_id).await;
    let ids = |tree: &ScoutModelWithCategories| {
        tree.categories
            .iter()
            .map(|c| {
                (
                    c.category.id,
                    c.subcategories.iter().map(|s| s.id).collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&before), ids(&after));
    assert_eq!(after.categories[0].category.name, "Attack");
}

#[sqlx::test(migrations = "./migrations")]
async fn renaming_a_subcategory_keeps_its_row(pool: SqlitePool) {
    let model_id = ScoutModelRepo::save(&pool, &standard_model()).await.unwrap();
    let tree = fetch_tree(&pool, model_id).await;
    let old_id = tree.categories[0].subcategories[0].id;

    let mut input = tree_to_input(&tree);
    input.categories[0].subcategories[0].name = "kill".to_string();
    ScoutModelRepo::save(&pool, &input).await.unwrap();

    let after = fetch_tree(&pool, model_id).await;
    let renamed = &after.categories[0].subcategories[0];
    assert_eq!(renamed.id, old_id);
    assert_eq!(renamed.name, "kill");
}

// ---------------------------------------------------------------------------
// Deletion and insertion through the payload
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn categories_absent_from_the_payload_are_deleted(pool: SqlitePool) {
    let model_id = ScoutModelRepo::save(&pool, &standard_model()).await.unwrap();
    let tree = fetch_tree(&pool, model_id).await;

    let mut input = tree_to_input(&tree);
    input.categories.retain(|c| c.name == "Attack");
    ScoutModelRepo::save(&pool, &input).await.unwrap();

    let after = fetch_tree(&pool, model_id).await;
    assert_eq!(after.categories.len(), 1);
    assert_eq!(after.categories[0].category.name, "Attack");
    assert_eq!(after.categories[0].subcategories.len(), 3);

    // Serve's subcategories went with it.
    let orphans: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM subcategories WHERE name = 'ace'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(orphans.0, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn idless_category_is_inserted_with_a_fresh_id(pool: SqlitePool) {
    let model_id = ScoutModelRepo::save(&pool, &standard_model()).await.unwrap();
    let tree = fetch_tree(&pool, model_id).await;
    let known: Vec<i64> = tree.categories.iter().map(|c| c.category.id).collect();

    let mut input = tree_to_input(&tree);
    input
        .categories
        .push(category("Block", vec![subcategory("stuff", "resultado", 1.5)]));
    ScoutModelRepo::save(&pool, &input).await.unwrap();

    let after = fetch_tree(&pool, model_id).await;
    assert_eq!(after.categories.len(), 3);
    let block = after
        .categories
        .iter()
        .find(|c| c.category.name == "Block")
        .unwrap();
    assert!(!known.contains(&block.category.id));
    assert_eq!(block.category.model_id, model_id);
    assert_eq!(block.subcategories.len(), 1);
}

// ---------------------------------------------------------------------------
// Failure handling
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn failed_save_rolls_back_every_change(pool: SqlitePool) {
    let model_id = ScoutModelRepo::save(&pool, &standard_model()).await.unwrap();
    let tree = fetch_tree(&pool, model_id).await;

    // First category gets a legitimate rename, second category references a
    // subcategory row that does not exist. The save must fail as a whole.
    let mut input = tree_to_input(&tree);
    input.categories[0].subcategories[0].name = "kill".to_string();
    input.categories[1].subcategories[0].id = Some(9999);

    let err = ScoutModelRepo::save(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Conflict(_)));

    // The rename from the first category must not have stuck.
    let after = fetch_tree(&pool, model_id).await;
    assert_eq!(after.categories[0].subcategories[0].name, "+");
}

#[sqlx::test(migrations = "./migrations")]
async fn stale_category_reference_is_a_conflict(pool: SqlitePool) {
    let model_id = ScoutModelRepo::save(&pool, &standard_model()).await.unwrap();
    let tree = fetch_tree(&pool, model_id).await;

    let mut input = tree_to_input(&tree);
    input.categories[0].id = Some(4242);

    let err = ScoutModelRepo::save(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn saving_a_vanished_model_is_not_found(pool: SqlitePool) {
    let mut input = standard_model();
    input.id = Some(777);

    let err = ScoutModelRepo::save(&pool, &input).await.unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound {
            entity: "scout_model",
            id: 777
        })
    );
}
