//! `db` crate — persistence layer for companies and their jobs.
//!
//! Provides a connection pool, the [`Store`] query seam, row models, the
//! partial-update SQL helper and repository functions for the `companies`
//! table.  No HTTP or presentation concerns live here.

pub mod error;
pub mod mock;
pub mod models;
pub mod pool;
pub mod repository;
pub mod sql;
pub mod store;

pub use error::DbError;
pub use models::{Company, CompanyFilter, CompanyUpdate, CompanyWithJobs, JobSummary};
pub use pool::DbPool;
pub use store::{PgStore, Row, SqlValue, Store};
