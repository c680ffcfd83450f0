use crate::error::DbError;
use core_types::ChannelType;
use sqlx::postgres::PgConnection;
use uuid::Uuid;

/// The writes needed to move a campaign from its stored channel set to the
/// desired one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelDiff {
    pub added: Vec<ChannelType>,
    pub removed: Vec<ChannelType>,
}

impl ChannelDiff {
    /// Channels present in both sets are left alone. `added` keeps the order of
    /// `desired`, `removed` the order of `current`.
    pub fn between(current: &[ChannelType], desired: &[ChannelType]) -> Self {
        let mut added = Vec::new();
        for channel in desired {
            if !current.contains(channel) && !added.contains(channel) {
                added.push(*channel);
            }
        }
        let removed = current
            .iter()
            .filter(|channel| !desired.contains(channel))
            .copied()
            .collect();
        Self { added, removed }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

pub(super) fn parse_channel(value: String) -> Result<ChannelType, DbError> {
    value
        .parse()
        .map_err(|_| DbError::DecodeError { column: "channel_type", value })
}

pub(super) async fn insert_channels(
    conn: &mut PgConnection,
    campaign_id: Uuid,
    channels: &[ChannelType],
) -> Result<(), DbError> {
    for channel in channels {
        sqlx::query("INSERT INTO channels (campaign_id, channel_type) VALUES ($1, $2)")
            .bind(campaign_id)
            .bind(channel.as_str())
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

pub(super) async fn fetch_channels(
    conn: &mut PgConnection,
    campaign_id: Uuid,
) -> Result<Vec<ChannelType>, DbError> {
    let labels: Vec<String> = sqlx::query_scalar(
        "SELECT channel_type FROM channels WHERE campaign_id = $1 ORDER BY id ASC",
    )
    .bind(campaign_id)
    .fetch_all(&mut *conn)
    .await?;
    labels.into_iter().map(parse_channel).collect()
}

/// Brings the stored channel set of `campaign_id` in line with `desired`,
/// touching only the rows that differ.
pub(super) async fn reconcile_channels(
    conn: &mut PgConnection,
    campaign_id: Uuid,
    desired: &[ChannelType],
) -> Result<ChannelDiff, DbError> {
    let current = fetch_channels(conn, campaign_id).await?;
    let diff = ChannelDiff::between(&current, desired);

    if !diff.removed.is_empty() {
        let removed: Vec<&str> = diff.removed.iter().map(ChannelType::as_str).collect();
        sqlx::query("DELETE FROM channels WHERE campaign_id = $1 AND channel_type = ANY($2)")
            .bind(campaign_id)
            .bind(removed)
            .execute(&mut *conn)
            .await?;
    }
    insert_channels(conn, campaign_id, &diff.added).await?;

    Ok(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ChannelType::{Email, PaidAds, SocialMedia};

    #[test]
    fn identical_sets_need_no_writes() {
        let diff = ChannelDiff::between(&[Email, PaidAds], &[PaidAds, Email]);
        assert!(diff.is_empty());
    }

    #[test]
    fn diff_splits_into_added_and_removed() {
        let diff = ChannelDiff::between(&[Email, SocialMedia], &[SocialMedia, PaidAds]);
        assert_eq!(diff.added, vec![PaidAds]);
        assert_eq!(diff.removed, vec![Email]);
    }

    #[test]
    fn clearing_all_channels_removes_everything() {
        let diff = ChannelDiff::between(&[Email, SocialMedia, PaidAds], &[]);
        assert!(diff.added.is_empty());
        assert_eq!(diff.removed, vec![Email, SocialMedia, PaidAds]);
    }

    #[test]
    fn repeated_desired_channels_are_added_once() {
        let diff = ChannelDiff::between(&[], &[PaidAds, PaidAds, Email]);
        assert_eq!(diff.added, vec![PaidAds, Email]);
    }

    #[test]
    fn unknown_stored_label_is_a_decode_error() {
        let err = parse_channel("Fax".to_string()).unwrap_err();
        assert!(matches!(err, DbError::DecodeError { column: "channel_type", .. }));
    }
}
