//! PostgreSQL place repository against a live database.
//!
//! Ignored by default. Run with a scratch database:
//!
//! ```text
//! DATABASE_URL=postgresql://localhost/place_keeper_test cargo test -- --ignored
//! ```

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use place_keeper::adapters::PostgresPlaceRepository;
use place_keeper::domain::foundation::{ConversationId, Coordinates};
use place_keeper::domain::place::Place;
use place_keeper::ports::PlaceRepository;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("database reachable");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations apply");
    pool
}

/// Random negative chat ids so parallel runs never collide.
fn owner() -> ConversationId {
    ConversationId::new(-((uuid::Uuid::new_v4().as_u128() as i64) & i64::MAX) - 1)
}

fn place(owner: ConversationId, name: &str, lat: f64) -> Place {
    Place::new(
        owner,
        name,
        format!("photos/user_{}/{}.jpg", owner, name),
        Coordinates::new(lat, -73.968285).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn save_creates_user_once_and_lists_places() {
    let repo = PostgresPlaceRepository::new(pool().await);
    let owner = owner();

    repo.save(&place(owner, "Central Park", 40.785091)).await.unwrap();
    repo.save(&place(owner, "Bethesda Terrace", 40.774)).await.unwrap();

    assert_eq!(repo.count(owner).await.unwrap(), 2);

    let all = repo.list_all(owner).await.unwrap();
    assert_eq!(all[0].name(), "Central Park");
    assert_eq!(all[0].coordinates().latitude(), 40.785091);

    let recent = repo.list_recent(owner, 1).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].name(), "Bethesda Terrace");

    repo.delete_all(owner).await.unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn delete_all_removes_user_and_places() {
    let pool = pool().await;
    let repo = PostgresPlaceRepository::new(pool.clone());
    let owner = owner();
    repo.save(&place(owner, "a", 10.0)).await.unwrap();
    repo.save(&place(owner, "b", 11.0)).await.unwrap();

    assert_eq!(repo.delete_all(owner).await.unwrap(), 2);

    let users: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE chat_id = $1")
        .bind(owner.as_i64())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users.0, 0);
    assert!(repo.list_all(owner).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn owners_are_isolated() {
    let repo = PostgresPlaceRepository::new(pool().await);
    let (first, second) = (owner(), owner());
    repo.save(&place(first, "mine", 1.0)).await.unwrap();

    assert_eq!(repo.count(second).await.unwrap(), 0);
    assert_eq!(repo.delete_all(second).await.unwrap(), 0);
    assert_eq!(repo.count(first).await.unwrap(), 1);

    repo.delete_all(first).await.unwrap();
}
