use super::DbRepository;
use crate::error::DbError;
use core_types::{Segment, SegmentMember};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(FromRow, Debug, Clone)]
struct DbSegment {
    id: Uuid,
    segment_name: String,
    criteria: String,
}

#[derive(FromRow, Debug, Clone)]
struct DbSegmentMember {
    segment_id: Uuid,
    customer_id: Uuid,
    customer_name: String,
}

impl DbRepository {
    pub async fn create_segment(&self, name: &str, criteria: &str) -> Result<Uuid, DbError> {
        let segment_id = Uuid::new_v4();
        let mut tx = self.begin().await?;
        sqlx::query("INSERT INTO segments (id, segment_name, criteria) VALUES ($1, $2, $3)")
            .bind(segment_id)
            .bind(name)
            .bind(criteria)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(%segment_id, name, "Created segment.");
        Ok(segment_id)
    }

    /// Adds customers to a segment as one batch. Pairs that are already members
    /// are skipped, so repeating a call is harmless. An unknown customer or
    /// segment id fails the whole batch. Returns how many memberships were new.
    pub async fn add_customers_to_segment(&self, segment_id: Uuid, customer_ids: &[Uuid]) -> Result<u64, DbError> {
        let mut tx = self.begin().await?;
        let mut added = 0;
        for customer_id in customer_ids {
            added += sqlx::query(
                r#"
                INSERT INTO customer_segments (customer_id, segment_id)
                VALUES ($1, $2)
                ON CONFLICT (customer_id, segment_id) DO NOTHING
                "#,
            )
            .bind(customer_id)
            .bind(segment_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;

        tracing::info!(%segment_id, requested = customer_ids.len(), added, "Added customers to segment.");
        Ok(added)
    }

    /// Fetches every segment with the (id, name) of each member customer.
    pub async fn read_segments(&self) -> Result<Vec<Segment>, DbError> {
        let mut tx = self.begin().await?;

        let rows = sqlx::query_as::<_, DbSegment>(
            "SELECT id, segment_name, criteria FROM segments ORDER BY segment_name ASC, id ASC",
        )
        .fetch_all(&mut *tx)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let member_rows = sqlx::query_as::<_, DbSegmentMember>(
            r#"
            SELECT cs.segment_id, c.id AS customer_id, c.name AS customer_name
            FROM customers c
            JOIN customer_segments cs ON c.id = cs.customer_id
            WHERE cs.segment_id = ANY($1)
            ORDER BY c.name ASC, c.id ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let mut members_by_segment: HashMap<Uuid, Vec<SegmentMember>> = HashMap::new();
        for row in member_rows {
            members_by_segment.entry(row.segment_id).or_default().push(SegmentMember {
                customer_id: row.customer_id,
                name: row.customer_name,
            });
        }

        let segments = rows
            .into_iter()
            .map(|row| Segment {
                members: members_by_segment.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.segment_name,
                criteria: row.criteria,
            })
            .collect();

        Ok(segments)
    }

    /// Deletes a segment. Its membership rows are removed by the cascade.
    pub async fn delete_segment(&self, segment_id: Uuid) -> Result<u64, DbError> {
        let mut tx = self.begin().await?;
        let deleted = sqlx::query("DELETE FROM segments WHERE id = $1")
            .bind(segment_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        tracing::info!(%segment_id, deleted, "Deleted segment.");
        Ok(deleted)
    }
}
