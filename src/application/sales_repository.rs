// Repository trait for sales data access
use crate::domain::error::DashboardError;
use crate::domain::filter::SourceQuery;
use crate::domain::transaction::Transaction;
use async_trait::async_trait;

#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Fetch every transaction matching the region/year query parameters
    async fn fetch_transactions(&self, query: &SourceQuery) -> Result<Vec<Transaction>, DashboardError>;
}
