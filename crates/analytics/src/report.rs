use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A campaign's summed counts and the percentages derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementReport {
    pub campaign_id: Uuid,
    pub campaign_name: String,
    pub emails_sent: i64,
    pub emails_opened: i64,
    pub clicks: i64,
    /// `emails_opened / emails_sent * 100`, two decimal places.
    pub open_rate_pct: Decimal,
    /// `clicks / emails_opened * 100`, two decimal places.
    pub click_through_rate_pct: Decimal,
}
