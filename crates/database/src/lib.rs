//! # Campaign Tracker Database Crate
//!
//! This crate is the data-access and reporting layer of the campaign tracker.
//! It owns every interaction with PostgreSQL: campaigns and their channels,
//! customers, segments and their memberships, and the append-only performance
//! log, plus the aggregate queries behind the insights view.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application sees
//!   `core-types` structs only.
//! - **One Transaction per Operation:** Each repository method acquires its own
//!   pooled connection, does its work in a transaction and commits only on
//!   success.
//! - **Two Error Surfaces:** `DbRepository` returns `Result<T, DbError>` with a
//!   classified `FailureKind`. `Tracker` wraps it for front ends that only want
//!   a value or a fallback.
//!
//! ## Public API
//!
//! - `connect`: Builds the (lazy) connection pool from `DatabaseSettings`.
//! - `run_migrations`: Applies the schema migrations.
//! - `DbRepository`: The typed data-access methods.
//! - `Tracker`: The fallback-returning boundary over `DbRepository`.
//! - `DbError` / `FailureKind`: The specific error types of this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod tracker;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_options, run_migrations};
pub use error::{DbError, FailureKind};
pub use repository::{ChannelDiff, DbRepository};
pub use tracker::Tracker;
