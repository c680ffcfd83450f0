use super::DbRepository;
use crate::error::DbError;
use core_types::{CampaignPerformance, MetricExtremes, TopCampaign};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow, Debug, Clone)]
struct DbTopCampaign {
    name: String,
    total_clicks: i64,
}

/// The single-row result of the six MIN/MAX aggregates. Every column is NULL
/// when the metrics table is empty.
#[derive(FromRow, Debug, Clone, Default)]
struct DbMetricExtremes {
    max_sent: Option<i64>,
    min_sent: Option<i64>,
    max_opened: Option<i64>,
    min_opened: Option<i64>,
    max_clicks: Option<i64>,
    min_clicks: Option<i64>,
}

impl DbMetricExtremes {
    fn into_extremes(self) -> Option<MetricExtremes> {
        Some(MetricExtremes {
            max_sent: self.max_sent?,
            min_sent: self.min_sent?,
            max_opened: self.max_opened?,
            min_opened: self.min_opened?,
            max_clicks: self.max_clicks?,
            min_clicks: self.min_clicks?,
        })
    }
}

#[derive(FromRow, Debug, Clone)]
struct DbCampaignPerformance {
    campaign_id: Uuid,
    campaign_name: String,
    emails_sent: i64,
    emails_opened: i64,
    clicks: i64,
}

impl DbRepository {
    /// Sum of all campaign budgets; zero when there are no campaigns.
    pub async fn get_total_campaign_budget(&self) -> Result<Decimal, DbError> {
        let mut tx = self.begin().await?;
        let total: Decimal = sqlx::query_scalar("SELECT COALESCE(SUM(budget), 0) FROM campaigns")
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(total)
    }

    /// Average of the raw `clicks` column over every metric entry. This is a
    /// per-entry average, not an average of per-campaign totals.
    pub async fn get_average_clicks_per_campaign(&self) -> Result<Decimal, DbError> {
        let mut tx = self.begin().await?;
        let average: Decimal = sqlx::query_scalar("SELECT COALESCE(AVG(clicks), 0) FROM performance_metrics")
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(average)
    }

    /// The campaign name with the highest summed clicks, or `None` when no
    /// metrics have been logged. Campaigns sharing a name are counted
    /// together; equal totals are decided by name.
    pub async fn get_most_successful_campaign(&self) -> Result<Option<TopCampaign>, DbError> {
        let mut tx = self.begin().await?;
        let top = sqlx::query_as::<_, DbTopCampaign>(
            r#"
            SELECT c.name, SUM(pm.clicks)::BIGINT AS total_clicks
            FROM campaigns c
            JOIN performance_metrics pm ON c.id = pm.campaign_id
            GROUP BY c.name
            ORDER BY total_clicks DESC, c.name ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(top.map(|row| TopCampaign {
            name: row.name,
            total_clicks: row.total_clicks,
        }))
    }

    pub async fn get_campaign_count(&self) -> Result<i64, DbError> {
        let mut tx = self.begin().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM campaigns")
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(count)
    }

    /// Highest and lowest single-entry counts, computed in one pass. `None`
    /// when the metrics table is empty.
    pub async fn get_max_min_metrics(&self) -> Result<Option<MetricExtremes>, DbError> {
        let mut tx = self.begin().await?;
        let row = sqlx::query_as::<_, DbMetricExtremes>(
            r#"
            SELECT
                MAX(emails_sent) AS max_sent, MIN(emails_sent) AS min_sent,
                MAX(emails_opened) AS max_opened, MIN(emails_opened) AS min_opened,
                MAX(clicks) AS max_clicks, MIN(clicks) AS min_clicks
            FROM performance_metrics
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(row.into_extremes())
    }

    /// Summed counts per campaign, for every campaign that has at least one
    /// metric entry.
    pub async fn get_campaign_performance(&self) -> Result<Vec<CampaignPerformance>, DbError> {
        let mut tx = self.begin().await?;
        let rows = sqlx::query_as::<_, DbCampaignPerformance>(
            r#"
            SELECT
                c.id AS campaign_id,
                c.name AS campaign_name,
                SUM(pm.emails_sent)::BIGINT AS emails_sent,
                SUM(pm.emails_opened)::BIGINT AS emails_opened,
                SUM(pm.clicks)::BIGINT AS clicks
            FROM campaigns c
            JOIN performance_metrics pm ON c.id = pm.campaign_id
            GROUP BY c.id, c.name
            ORDER BY c.name ASC, c.id ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(rows
            .into_iter()
            .map(|row| CampaignPerformance {
                campaign_id: row.campaign_id,
                campaign_name: row.campaign_name,
                emails_sent: row.emails_sent,
                emails_opened: row.emails_opened,
                clicks: row.clicks,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_null_aggregates_become_the_empty_record() {
        assert_eq!(DbMetricExtremes::default().into_extremes(), None);
    }

    #[test]
    fn populated_aggregates_map_field_by_field() {
        let row = DbMetricExtremes {
            max_sent: Some(100),
            min_sent: Some(50),
            max_opened: Some(60),
            min_opened: Some(40),
            max_clicks: Some(25),
            min_clicks: Some(10),
        };
        assert_eq!(
            row.into_extremes(),
            Some(MetricExtremes {
                max_sent: 100,
                min_sent: 50,
                max_opened: 60,
                min_opened: 40,
                max_clicks: 25,
                min_clicks: 10,
            })
        );
    }
}
