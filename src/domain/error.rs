use thiserror::Error;

/// Failures of one dashboard pipeline run. Nothing is retried.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("sales source unavailable: {0:#}")]
    Fetch(anyhow::Error),

    #[error("sales data could not be decoded: {0:#}")]
    Decode(anyhow::Error),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}
