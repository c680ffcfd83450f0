use super::DbRepository;
use crate::error::DbError;
use chrono::{DateTime, Utc};
use core_types::{MetricEntry, PerformanceMetric};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow, Debug, Clone)]
struct DbPerformanceMetric {
    id: Uuid,
    campaign_id: Uuid,
    emails_sent: i64,
    emails_opened: i64,
    clicks: i64,
    timestamp: DateTime<Utc>,
}

impl From<DbPerformanceMetric> for PerformanceMetric {
    fn from(row: DbPerformanceMetric) -> Self {
        PerformanceMetric {
            id: row.id,
            campaign_id: row.campaign_id,
            emails_sent: row.emails_sent,
            emails_opened: row.emails_opened,
            clicks: row.clicks,
            timestamp: row.timestamp,
        }
    }
}

impl DbRepository {
    /// Appends one metric entry. The timestamp comes from the database clock.
    ///
    /// `emails_opened <= emails_sent` is not enforced here; see
    /// [`MetricEntry::check`].
    pub async fn log_performance_metric(&self, entry: &MetricEntry) -> Result<Uuid, DbError> {
        let metric_id = Uuid::new_v4();
        let mut tx = self.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO performance_metrics (id, campaign_id, emails_sent, emails_opened, clicks)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(metric_id)
        .bind(entry.campaign_id)
        .bind(i64::from(entry.emails_sent))
        .bind(i64::from(entry.emails_opened))
        .bind(i64::from(entry.clicks))
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(%metric_id, campaign_id = %entry.campaign_id, "Logged performance metric.");
        Ok(metric_id)
    }

    /// Fetches metric entries, oldest first, for one campaign or for all of them.
    pub async fn get_performance_metrics(&self, campaign_id: Option<Uuid>) -> Result<Vec<PerformanceMetric>, DbError> {
        let mut tx = self.begin().await?;
        let rows = sqlx::query_as::<_, DbPerformanceMetric>(
            r#"
            SELECT id, campaign_id, emails_sent, emails_opened, clicks, timestamp
            FROM performance_metrics
            WHERE ($1::UUID IS NULL OR campaign_id = $1)
            ORDER BY timestamp ASC, id ASC
            "#,
        )
        .bind(campaign_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(rows.into_iter().map(PerformanceMetric::from).collect())
    }
}
