//! Behaviour of every operation when the server cannot be reached. These tests
//! need no database: the pool points at a closed local port.

mod common;

use common::draft;
use configuration::DatabaseSettings;
use core_types::{ChannelType, MetricEntry};
use database::{DbRepository, FailureKind, Tracker, connect_options};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use uuid::Uuid;

fn unreachable_repository() -> DbRepository {
    let settings = DatabaseSettings {
        name: "campaign_tracker".to_string(),
        user: "postgres".to_string(),
        password: "postgres".to_string(),
        host: "127.0.0.1".to_string(),
        port: 1,
        max_connections: 1,
        acquire_timeout_secs: 1,
    };
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(300))
        .connect_lazy_with(connect_options(&settings));
    DbRepository::new(pool)
}

#[tokio::test]
async fn mutations_report_false() {
    let tracker = Tracker::new(unreachable_repository());
    let id = Uuid::new_v4();
    let campaign = draft("Launch", dec!(100), &[ChannelType::Email]);

    assert!(!tracker.create_campaign(&campaign).await);
    assert!(!tracker.update_campaign(id, &campaign).await);
    assert!(!tracker.delete_campaign(id).await);
    assert!(!tracker.create_customer("Ada", "ada@example.com", "").await);
    assert!(!tracker.update_customer(id, "Ada", "ada@example.com", "").await);
    assert!(!tracker.delete_customer(id).await);
    assert!(!tracker.add_customers_to_segment(id, &[Uuid::new_v4()]).await);
    assert!(!tracker.delete_segment(id).await);
    let entry = MetricEntry { campaign_id: id, emails_sent: 1, emails_opened: 1, clicks: 1 };
    assert!(!tracker.log_performance_metric(&entry).await);
}

#[tokio::test]
async fn reads_report_empty_zero_or_absent() {
    let tracker = Tracker::new(unreachable_repository());

    assert!(tracker.read_campaigns().await.is_empty());
    assert!(tracker.read_customers().await.is_empty());
    assert!(tracker.read_segments().await.is_empty());
    assert!(tracker.get_performance_metrics(None).await.is_empty());
    assert!(tracker.get_campaign_performance().await.is_empty());
    assert_eq!(tracker.create_segment("VIP", "spend > 1000").await, None);
    assert_eq!(tracker.get_total_campaign_budget().await, Decimal::ZERO);
    assert_eq!(tracker.get_average_clicks_per_campaign().await, Decimal::ZERO);
    assert_eq!(tracker.get_campaign_count().await, 0);
    assert_eq!(tracker.get_most_successful_campaign().await, None);
    assert_eq!(tracker.get_max_min_metrics().await, None);
}

#[tokio::test]
async fn repository_tags_the_failure_as_retryable() {
    let repo = unreachable_repository();
    let err = repo.read_customers().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Unavailable);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn invalid_budget_is_rejected_before_touching_storage() {
    let repo = unreachable_repository();
    let err = repo
        .create_campaign(&draft("Refund", dec!(-5), &[]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Constraint);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn budget_beyond_two_decimals_is_rejected_before_touching_storage() {
    let repo = unreachable_repository();
    let err = repo
        .create_campaign(&draft("Precise", dec!(1.005), &[]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Constraint);

    let err = repo
        .update_campaign(Uuid::new_v4(), &draft("Huge", dec!(1000000000000), &[]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Constraint);
}
