//! Integration tests for roster ordering.
//!
//! `player_order` must stay a dense zero-based sequence per team through
//! creation, deletion, and drag-and-drop reordering.

use sqlx::SqlitePool;
use volleyscout_db::models::player::{CreatePlayer, UpdatePlayer};
use volleyscout_db::models::team::CreateTeam;
use volleyscout_db::repositories::{PlayerRepo, TeamRepo};

fn new_player(team_id: i64, name: &str) -> CreatePlayer {
    CreatePlayer {
        team_id,
        name: name.to_string(),
        number: None,
        height: None,
        position: None,
        photo: None,
    }
}

async fn new_team(pool: &SqlitePool) -> i64 {
    TeamRepo::create(
        pool,
        &CreateTeam {
            name: Some("Vipers".to_string()),
            logo: None,
            color: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "./migrations")]
async fn players_are_appended_in_order(pool: SqlitePool) {
    let team_id = new_team(&pool).await;

    for name in ["Ana", "Bia", "Carla"] {
        PlayerRepo::create(&pool, &new_player(team_id, name)).await.unwrap();
    }

    let roster = PlayerRepo::list_by_team(&pool, team_id).await.unwrap();
    let orders: Vec<i32> = roster.iter().map(|p| p.player_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(roster[0].name, "Ana");
    assert_eq!(roster[2].name, "Carla");
}

#[sqlx::test(migrations = "./migrations")]
async fn each_team_has_its_own_sequence(pool: SqlitePool) {
    let team_a = new_team(&pool).await;
    let team_b = new_team(&pool).await;

    PlayerRepo::create(&pool, &new_player(team_a, "Ana")).await.unwrap();
    let first_b = PlayerRepo::create(&pool, &new_player(team_b, "Bia")).await.unwrap();

    assert_eq!(first_b.player_order, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_player_closes_the_gap(pool: SqlitePool) {
    let team_id = new_team(&pool).await;

    let mut ids = Vec::new();
    for name in ["Ana", "Bia", "Carla"] {
        ids.push(PlayerRepo::create(&pool, &new_player(team_id, name)).await.unwrap().id);
    }

    // Remove the middle player; the tail must slide down.
    assert!(PlayerRepo::delete(&pool, ids[1]).await.unwrap());

    let roster = PlayerRepo::list_by_team(&pool, team_id).await.unwrap();
    let orders: Vec<i32> = roster.iter().map(|p| p.player_order).collect();
    assert_eq!(orders, vec![0, 1]);
    assert_eq!(roster[0].name, "Ana");
    assert_eq!(roster[1].name, "Carla");
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_missing_player_is_a_noop(pool: SqlitePool) {
    assert!(!PlayerRepo::delete(&pool, 9999).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn update_order_renumbers_from_the_given_list(pool: SqlitePool) {
    let team_id = new_team(&pool).await;

    let mut ids = Vec::new();
    for name in ["Ana", "Bia", "Carla"] {
        ids.push(PlayerRepo::create(&pool, &new_player(team_id, name)).await.unwrap().id);
    }

    PlayerRepo::update_order(&pool, team_id, &[ids[2], ids[0], ids[1]])
        .await
        .unwrap();

    let roster = PlayerRepo::list_by_team(&pool, team_id).await.unwrap();
    let names: Vec<&str> = roster.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Carla", "Ana", "Bia"]);
    let orders: Vec<i32> = roster.iter().map(|p| p.player_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_keeps_roster_position(pool: SqlitePool) {
    let team_id = new_team(&pool).await;
    let player = PlayerRepo::create(&pool, &new_player(team_id, "Ana")).await.unwrap();
    PlayerRepo::create(&pool, &new_player(team_id, "Bia")).await.unwrap();

    let updated = PlayerRepo::update(
        &pool,
        player.id,
        &UpdatePlayer {
            name: "Ana Clara".to_string(),
            number: Some(9),
            height: Some("1.90".to_string()),
            position: Some("setter".to_string()),
            photo: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Ana Clara");
    assert_eq!(updated.player_order, 0);
}
