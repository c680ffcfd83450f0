use crate::enums::ChannelType;
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored campaign together with the channels it runs on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub budget: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub channels: Vec<ChannelType>,
}

/// The caller-supplied fields of a campaign, used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub name: String,
    pub budget: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub channels: Vec<ChannelType>,
}

/// Budgets are stored as `NUMERIC(14, 2)`: at most 12 integer digits and
/// 2 decimal places.
pub const BUDGET_SCALE: u32 = 2;
pub const BUDGET_LIMIT: i64 = 1_000_000_000_000;

impl CampaignDraft {
    /// Rejects a budget that storage would refuse or silently round.
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = |reason: String| Err(CoreError::InvalidInput("budget".to_string(), reason));
        if self.budget < Decimal::ZERO {
            return invalid(format!("must not be negative, got {}", self.budget));
        }
        if self.budget.normalize().scale() > BUDGET_SCALE {
            return invalid(format!(
                "at most {BUDGET_SCALE} decimal places are allowed, got {}",
                self.budget
            ));
        }
        if self.budget >= Decimal::from(BUDGET_LIMIT) {
            return invalid(format!("must be below {BUDGET_LIMIT}, got {}", self.budget));
        }
        Ok(())
    }

    /// The channel list with repeats removed, first occurrence wins.
    pub fn distinct_channels(&self) -> Vec<ChannelType> {
        let mut seen = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            if !seen.contains(channel) {
                seen.push(*channel);
            }
        }
        seen
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub demographics: String,
}

/// A customer as listed under a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMember {
    pub customer_id: Uuid,
    pub name: String,
}

/// A manually curated group of customers. `criteria` is documentation for
/// the team and is never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: Uuid,
    pub name: String,
    pub criteria: String,
    pub members: Vec<SegmentMember>,
}

/// One immutable log entry of send/open/click counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub emails_sent: i64,
    pub emails_opened: i64,
    pub clicks: i64,
    pub timestamp: DateTime<Utc>,
}

/// Counts to be logged against a campaign. The timestamp is assigned by
/// storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub campaign_id: Uuid,
    pub emails_sent: u32,
    pub emails_opened: u32,
    pub clicks: u32,
}

impl MetricEntry {
    /// The opened-versus-sent sanity check a front end runs before logging.
    /// Storage accepts entries that fail it.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.emails_opened > self.emails_sent {
            return Err(CoreError::InvalidInput(
                "emails_opened".to_string(),
                format!(
                    "{} opened cannot exceed {} sent",
                    self.emails_opened, self.emails_sent
                ),
            ));
        }
        Ok(())
    }
}

/// Highest and lowest single-entry values across the metrics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricExtremes {
    pub max_sent: i64,
    pub min_sent: i64,
    pub max_opened: i64,
    pub min_opened: i64,
    pub max_clicks: i64,
    pub min_clicks: i64,
}

/// Summed counts for one campaign across all of its log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignPerformance {
    pub campaign_id: Uuid,
    pub campaign_name: String,
    pub emails_sent: i64,
    pub emails_opened: i64,
    pub clicks: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCampaign {
    pub name: String,
    pub total_clicks: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft(budget: Decimal, channels: Vec<ChannelType>) -> CampaignDraft {
        CampaignDraft {
            name: "Spring Launch".to_string(),
            budget,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            description: "Newsletter push".to_string(),
            channels,
        }
    }

    #[test]
    fn negative_budget_is_invalid() {
        assert!(draft(dec!(-0.01), vec![]).validate().is_err());
        assert!(draft(dec!(0), vec![]).validate().is_ok());
        assert!(draft(dec!(1500.50), vec![]).validate().is_ok());
    }

    #[test]
    fn budget_must_fit_the_stored_precision() {
        assert!(draft(dec!(1.005), vec![]).validate().is_err());
        assert!(draft(dec!(0.001), vec![]).validate().is_err());
        // Trailing zeros do not count against the scale.
        assert!(draft(dec!(12.5000), vec![]).validate().is_ok());

        assert!(draft(dec!(999999999999.99), vec![]).validate().is_ok());
        assert!(draft(dec!(1000000000000), vec![]).validate().is_err());
    }

    #[test]
    fn distinct_channels_keeps_first_occurrence_order() {
        let d = draft(
            dec!(10),
            vec![
                ChannelType::PaidAds,
                ChannelType::Email,
                ChannelType::PaidAds,
                ChannelType::Email,
            ],
        );
        assert_eq!(d.distinct_channels(), vec![ChannelType::PaidAds, ChannelType::Email]);
    }

    #[test]
    fn opened_above_sent_fails_the_check() {
        let mut entry = MetricEntry {
            campaign_id: Uuid::new_v4(),
            emails_sent: 50,
            emails_opened: 60,
            clicks: 25,
        };
        assert!(entry.check().is_err());

        entry.emails_opened = 50;
        assert!(entry.check().is_ok());
    }
}
