//! PostgreSQL implementation of PlaceRepository.
//!
//! Places reference their owner through `users.id`; the chat id only lives
//! on the user row. Coordinates are stored as `"lat, lng"` text.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    ConversationId, Coordinates, DomainError, ErrorCode, PlaceId, Timestamp,
};
use crate::domain::place::Place;
use crate::ports::PlaceRepository;

/// PostgreSQL implementation of PlaceRepository.
#[derive(Clone)]
pub struct PostgresPlaceRepository {
    pool: PgPool,
}

impl PostgresPlaceRepository {
    /// Creates a new PostgresPlaceRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceRepository for PostgresPlaceRepository {
    async fn save(&self, place: &Place) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::database(format!("Failed to begin transaction: {}", e))
        })?;

        // Lookup-or-create the owner row
        let user_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (chat_id, created_at)
            VALUES ($1, $2)
            ON CONFLICT (chat_id) DO UPDATE SET chat_id = EXCLUDED.chat_id
            RETURNING id
            "#,
        )
        .bind(place.owner().as_i64())
        .bind(place.created_at().as_datetime())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to upsert user: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO places (id, user_id, name, photo, location, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(place.id().as_uuid())
        .bind(user_id)
        .bind(place.name())
        .bind(place.photo())
        .bind(place.coordinates().to_string())
        .bind(place.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert place: {}", e)))?;

        tx.commit().await.map_err(|e| {
            DomainError::database(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    async fn list_recent(
        &self,
        owner: ConversationId,
        limit: u32,
    ) -> Result<Vec<Place>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, u.chat_id, p.name, p.photo, p.location, p.created_at
            FROM places p
            JOIN users u ON u.id = p.user_id
            WHERE u.chat_id = $1
            ORDER BY p.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(owner.as_i64())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch places: {}", e)))?;

        rows.into_iter().map(row_to_place).collect()
    }

    async fn list_all(&self, owner: ConversationId) -> Result<Vec<Place>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, u.chat_id, p.name, p.photo, p.location, p.created_at
            FROM places p
            JOIN users u ON u.id = p.user_id
            WHERE u.chat_id = $1
            ORDER BY p.created_at ASC
            "#,
        )
        .bind(owner.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch places: {}", e)))?;

        rows.into_iter().map(row_to_place).collect()
    }

    async fn count(&self, owner: ConversationId) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM places p
            JOIN users u ON u.id = p.user_id
            WHERE u.chat_id = $1
            "#,
        )
        .bind(owner.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count places: {}", e)))?;

        Ok(result.0 as u64)
    }

    async fn delete_all(&self, owner: ConversationId) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::database(format!("Failed to begin transaction: {}", e))
        })?;

        // Places go first so the count is exact; the user delete would cascade anyway
        let deleted = sqlx::query(
            r#"
            DELETE FROM places
            WHERE user_id IN (SELECT id FROM users WHERE chat_id = $1)
            "#,
        )
        .bind(owner.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to delete places: {}", e)))?
        .rows_affected();

        sqlx::query("DELETE FROM users WHERE chat_id = $1")
            .bind(owner.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete user: {}", e)))?;

        tx.commit().await.map_err(|e| {
            DomainError::database(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(deleted)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

fn row_to_place(row: sqlx::postgres::PgRow) -> Result<Place, DomainError> {
    let id: Uuid = row.get("id");
    let chat_id: i64 = row.get("chat_id");
    let name: String = row.get("name");
    let photo: String = row.get("photo");
    let location: String = row.get("location");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    Ok(Place::reconstitute(
        PlaceId::from_uuid(id),
        ConversationId::new(chat_id),
        name,
        photo,
        parse_location(&location)?,
        Timestamp::from_datetime(created_at),
    ))
}

fn parse_location(stored: &str) -> Result<Coordinates, DomainError> {
    stored.parse::<Coordinates>().map_err(|e| {
        DomainError::new(
            ErrorCode::DataIntegrity,
            format!("Stored location is not a coordinate pair: {}", e),
        )
        .with_detail("location", stored)
    })
}
