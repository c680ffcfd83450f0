use crate::error::DbError;
use crate::repository::DbRepository;
use core_types::{
    Campaign, CampaignDraft, CampaignPerformance, Customer, MetricEntry, MetricExtremes,
    PerformanceMetric, Segment, TopCampaign,
};
use rust_decimal::Decimal;
use uuid::Uuid;

/// The boundary a front end calls into.
///
/// Every operation returns either its value or a fixed fallback (`false`, an
/// empty list, zero, or `None`) and never an error. Failures are logged with
/// their kind before the fallback is returned. Callers that need to tell the
/// kinds apart use [`Tracker::repository`] and inspect the `DbError`.
#[derive(Debug, Clone)]
pub struct Tracker {
    repo: DbRepository,
}

impl Tracker {
    pub fn new(repo: DbRepository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &DbRepository {
        &self.repo
    }

    // --- Campaigns ---

    pub async fn create_campaign(&self, draft: &CampaignDraft) -> bool {
        settle("create_campaign", self.repo.create_campaign(draft).await).is_some()
    }

    pub async fn read_campaigns(&self) -> Vec<Campaign> {
        settle("read_campaigns", self.repo.read_campaigns().await).unwrap_or_default()
    }

    pub async fn update_campaign(&self, campaign_id: Uuid, draft: &CampaignDraft) -> bool {
        settle("update_campaign", self.repo.update_campaign(campaign_id, draft).await).is_some()
    }

    /// Deleting an id that does not exist still counts as success.
    pub async fn delete_campaign(&self, campaign_id: Uuid) -> bool {
        settle("delete_campaign", self.repo.delete_campaign(campaign_id).await).is_some()
    }

    // --- Customers ---

    pub async fn create_customer(&self, name: &str, email: &str, demographics: &str) -> bool {
        settle(
            "create_customer",
            self.repo.create_customer(name, email, demographics).await,
        )
        .is_some()
    }

    pub async fn read_customers(&self) -> Vec<Customer> {
        settle("read_customers", self.repo.read_customers().await).unwrap_or_default()
    }

    pub async fn update_customer(&self, customer_id: Uuid, name: &str, email: &str, demographics: &str) -> bool {
        settle(
            "update_customer",
            self.repo.update_customer(customer_id, name, email, demographics).await,
        )
        .is_some()
    }

    pub async fn delete_customer(&self, customer_id: Uuid) -> bool {
        settle("delete_customer", self.repo.delete_customer(customer_id).await).is_some()
    }

    // --- Segments ---

    pub async fn create_segment(&self, name: &str, criteria: &str) -> Option<Uuid> {
        settle("create_segment", self.repo.create_segment(name, criteria).await)
    }

    pub async fn add_customers_to_segment(&self, segment_id: Uuid, customer_ids: &[Uuid]) -> bool {
        settle(
            "add_customers_to_segment",
            self.repo.add_customers_to_segment(segment_id, customer_ids).await,
        )
        .is_some()
    }

    pub async fn read_segments(&self) -> Vec<Segment> {
        settle("read_segments", self.repo.read_segments().await).unwrap_or_default()
    }

    pub async fn delete_segment(&self, segment_id: Uuid) -> bool {
        settle("delete_segment", self.repo.delete_segment(segment_id).await).is_some()
    }

    // --- Performance metrics ---

    pub async fn log_performance_metric(&self, entry: &MetricEntry) -> bool {
        settle("log_performance_metric", self.repo.log_performance_metric(entry).await).is_some()
    }

    pub async fn get_performance_metrics(&self, campaign_id: Option<Uuid>) -> Vec<PerformanceMetric> {
        settle(
            "get_performance_metrics",
            self.repo.get_performance_metrics(campaign_id).await,
        )
        .unwrap_or_default()
    }

    // --- Reporting ---

    pub async fn get_total_campaign_budget(&self) -> Decimal {
        settle("get_total_campaign_budget", self.repo.get_total_campaign_budget().await).unwrap_or_default()
    }

    pub async fn get_average_clicks_per_campaign(&self) -> Decimal {
        settle(
            "get_average_clicks_per_campaign",
            self.repo.get_average_clicks_per_campaign().await,
        )
        .unwrap_or_default()
    }

    pub async fn get_most_successful_campaign(&self) -> Option<TopCampaign> {
        settle(
            "get_most_successful_campaign",
            self.repo.get_most_successful_campaign().await,
        )
        .flatten()
    }

    pub async fn get_campaign_count(&self) -> i64 {
        settle("get_campaign_count", self.repo.get_campaign_count().await).unwrap_or_default()
    }

    /// `None` doubles as the empty record for an empty metrics table.
    pub async fn get_max_min_metrics(&self) -> Option<MetricExtremes> {
        settle("get_max_min_metrics", self.repo.get_max_min_metrics().await).flatten()
    }

    pub async fn get_campaign_performance(&self) -> Vec<CampaignPerformance> {
        settle("get_campaign_performance", self.repo.get_campaign_performance().await).unwrap_or_default()
    }
}

/// Logs a failed operation and discards the error.
fn settle<T>(operation: &'static str, result: Result<T, DbError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::error!(
                operation,
                kind = %error.kind(),
                retryable = error.is_retryable(),
                error = %error,
                "Storage operation failed."
            );
            None
        }
    }
}
