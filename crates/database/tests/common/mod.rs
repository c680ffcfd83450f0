#![allow(dead_code)]

use chrono::NaiveDate;
use core_types::{CampaignDraft, ChannelType};
use database::{DbRepository, Tracker, run_migrations};
use rust_decimal::Decimal;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use uuid::Uuid;

/// A tracker bound to a private schema of the server named by
/// `TEST_DATABASE_URL`, so tests can run in parallel and count rows freely.
pub struct TestDb {
    pub tracker: Tracker,
    admin: PgPool,
    schema: String,
}

/// Returns `None` when `TEST_DATABASE_URL` is not set.
pub async fn isolated_database() -> Option<TestDb> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let schema = format!("tracker_test_{}", Uuid::new_v4().simple());

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("TEST_DATABASE_URL must point at a reachable server");
    let create = format!("CREATE SCHEMA {schema}");
    sqlx::query(&create)
        .execute(&admin)
        .await
        .expect("create test schema");

    let options = PgConnectOptions::from_str(&url)
        .expect("parse TEST_DATABASE_URL")
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
        .expect("connect to test schema");
    run_migrations(&pool).await.expect("apply migrations");

    Some(TestDb {
        tracker: Tracker::new(DbRepository::new(pool)),
        admin,
        schema,
    })
}

impl TestDb {
    pub async fn teardown(self) {
        self.tracker.repository().pool().close().await;
        let drop = format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema);
        sqlx::query(&drop)
            .execute(&self.admin)
            .await
            .expect("drop test schema");
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn draft(name: &str, budget: Decimal, channels: &[ChannelType]) -> CampaignDraft {
    CampaignDraft {
        name: name.to_string(),
        budget,
        start_date: date(2026, 1, 1),
        end_date: date(2026, 2, 28),
        description: format!("{name} description"),
        channels: channels.to_vec(),
    }
}
