use super::DbRepository;
use super::channels::{insert_channels, parse_channel, reconcile_channels};
use crate::error::DbError;
use chrono::NaiveDate;
use core_types::{Campaign, CampaignDraft, ChannelType};
use rust_decimal::Decimal;
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

// This struct represents a row fetched from the campaigns table.
#[derive(FromRow, Debug, Clone)]
struct DbCampaign {
    id: Uuid,
    name: String,
    budget: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
    description: String,
}

#[derive(FromRow, Debug, Clone)]
struct DbChannel {
    campaign_id: Uuid,
    channel_type: String,
}

impl DbRepository {
    /// Inserts a campaign and one channel row per distinct channel within a
    /// single transaction, returning the generated id.
    pub async fn create_campaign(&self, draft: &CampaignDraft) -> Result<Uuid, DbError> {
        draft.validate()?;
        let campaign_id = Uuid::new_v4();
        let channels = draft.distinct_channels();

        let mut tx = self.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO campaigns (id, name, budget, start_date, end_date, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(campaign_id)
        .bind(&draft.name)
        .bind(draft.budget)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(&draft.description)
        .execute(&mut *tx)
        .await?;

        insert_channels(&mut tx, campaign_id, &channels).await?;
        tx.commit().await?;

        tracing::info!(%campaign_id, name = %draft.name, channels = channels.len(), "Created campaign.");
        Ok(campaign_id)
    }

    /// Fetches every campaign together with its channels, in the order the
    /// channels were attached.
    pub async fn read_campaigns(&self) -> Result<Vec<Campaign>, DbError> {
        let mut tx = self.begin().await?;

        let rows = sqlx::query_as::<_, DbCampaign>(
            "SELECT id, name, budget, start_date, end_date, description FROM campaigns ORDER BY name ASC, id ASC",
        )
        .fetch_all(&mut *tx)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let channel_rows = sqlx::query_as::<_, DbChannel>(
            "SELECT campaign_id, channel_type FROM channels WHERE campaign_id = ANY($1) ORDER BY id ASC",
        )
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let mut channels_by_campaign: HashMap<Uuid, Vec<ChannelType>> = HashMap::new();
        for row in channel_rows {
            channels_by_campaign
                .entry(row.campaign_id)
                .or_default()
                .push(parse_channel(row.channel_type)?);
        }

        let campaigns = rows
            .into_iter()
            .map(|row| Campaign {
                channels: channels_by_campaign.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                budget: row.budget,
                start_date: row.start_date,
                end_date: row.end_date,
                description: row.description,
            })
            .collect();

        Ok(campaigns)
    }

    /// Replaces the scalar fields of a campaign and reconciles its channel set,
    /// atomically. Fails with `NotFound` when no such campaign exists.
    pub async fn update_campaign(&self, campaign_id: Uuid, draft: &CampaignDraft) -> Result<(), DbError> {
        draft.validate()?;
        let mut tx = self.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE campaigns
            SET name = $1, budget = $2, start_date = $3, end_date = $4, description = $5
            WHERE id = $6
            "#,
        )
        .bind(&draft.name)
        .bind(draft.budget)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(&draft.description)
        .bind(campaign_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(DbError::NotFound { entity: "campaign", id: campaign_id });
        }

        let diff = reconcile_channels(&mut tx, campaign_id, &draft.distinct_channels()).await?;
        tx.commit().await?;

        tracing::info!(
            %campaign_id,
            added = diff.added.len(),
            removed = diff.removed.len(),
            "Updated campaign."
        );
        Ok(())
    }

    /// Deletes a campaign. Its channels and metric history go with it through
    /// the foreign-key cascade. Returns the number of campaigns removed, which
    /// is 0 for an unknown id.
    pub async fn delete_campaign(&self, campaign_id: Uuid) -> Result<u64, DbError> {
        let mut tx = self.begin().await?;
        let deleted = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(campaign_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        tracing::info!(%campaign_id, deleted, "Deleted campaign.");
        Ok(deleted)
    }
}
