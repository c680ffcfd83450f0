use crate::report::EngagementReport;
use core_types::CampaignPerformance;
use rust_decimal::{Decimal, RoundingStrategy};

/// A stateless calculator for the engagement rates shown next to each
/// campaign's totals.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the open rate and click-through rate for one campaign.
    ///
    /// A rate whose denominator is zero is reported as 0 rather than left
    /// undefined.
    pub fn calculate(&self, performance: &CampaignPerformance) -> EngagementReport {
        EngagementReport {
            campaign_id: performance.campaign_id,
            campaign_name: performance.campaign_name.clone(),
            emails_sent: performance.emails_sent,
            emails_opened: performance.emails_opened,
            clicks: performance.clicks,
            open_rate_pct: percentage(performance.emails_opened, performance.emails_sent),
            click_through_rate_pct: percentage(performance.clicks, performance.emails_opened),
        }
    }

    pub fn calculate_all(&self, performance: &[CampaignPerformance]) -> Vec<EngagementReport> {
        let reports: Vec<EngagementReport> = performance.iter().map(|p| self.calculate(p)).collect();
        tracing::debug!(campaigns = reports.len(), "Calculated engagement rates.");
        reports
    }
}

fn percentage(numerator: i64, denominator: i64) -> Decimal {
    if denominator == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(numerator) / Decimal::from(denominator) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn performance(sent: i64, opened: i64, clicks: i64) -> CampaignPerformance {
        CampaignPerformance {
            campaign_id: Uuid::new_v4(),
            campaign_name: "Autumn Sale".to_string(),
            emails_sent: sent,
            emails_opened: opened,
            clicks,
        }
    }

    #[test]
    fn rates_are_percentages_rounded_to_two_places() {
        let report = AnalyticsEngine::new().calculate(&performance(150, 100, 33));
        assert_eq!(report.open_rate_pct, dec!(66.67));
        assert_eq!(report.click_through_rate_pct, dec!(33.00));
    }

    #[test]
    fn zero_denominators_yield_zero() {
        let report = AnalyticsEngine::new().calculate(&performance(0, 0, 7));
        assert_eq!(report.open_rate_pct, Decimal::ZERO);
        assert_eq!(report.click_through_rate_pct, Decimal::ZERO);
    }

    #[test]
    fn opened_above_sent_is_reported_as_is() {
        let report = AnalyticsEngine::new().calculate(&performance(50, 60, 25));
        assert_eq!(report.open_rate_pct, dec!(120));
    }

    #[test]
    fn calculate_all_preserves_order() {
        let input = vec![performance(10, 5, 1), performance(20, 10, 2)];
        let reports = AnalyticsEngine::new().calculate_all(&input);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].campaign_id, input[0].campaign_id);
        assert_eq!(reports[1].emails_sent, 20);
    }
}
