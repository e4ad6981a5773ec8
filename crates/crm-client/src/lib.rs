//! Blocking HTTP client for the crm API.
//!
//! [`ApiClient`] offers strict `try_*` calls returning [`ClientError`], and
//! lenient calls that log failures and return an empty list, `None` or
//! `false`. Entity pages talk to it through the [`RecordApi`] trait.

pub mod client;
pub mod dashboard;
pub mod error;

pub use client::{ApiClient, RecordApi};
pub use dashboard::DashboardData;
pub use error::ClientError;
