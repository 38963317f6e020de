// Dashboard service - Use case for building the sales dashboard
use crate::application::dashboard_composer::{self, ComposeOptions};
use crate::application::pipeline;
use crate::application::sales_repository::SalesRepository;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::DashboardError;
use crate::domain::filter::{FilterCriteria, SourceQuery, TopN, salesperson_names};
use crate::domain::transaction::Transaction;
use std::sync::Arc;
use tokio::sync::Mutex;

type FetchMemo = Option<(SourceQuery, Arc<Vec<Transaction>>)>;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn SalesRepository>,
    options: ComposeOptions,
    default_top_n: TopN,
    // Last fetch only: salesperson and top-N changes reuse it, region/year changes replace it
    last_fetch: Arc<Mutex<FetchMemo>>,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn SalesRepository>,
        options: ComposeOptions,
        default_top_n: TopN,
    ) -> Self {
        Self {
            repository,
            options,
            default_top_n,
            last_fetch: Arc::new(Mutex::new(None)),
        }
    }

    pub fn title(&self) -> &str {
        &self.options.title
    }

    pub fn default_top_n(&self) -> TopN {
        self.default_top_n
    }

    async fn transactions(
        &self,
        query: SourceQuery,
    ) -> Result<Arc<Vec<Transaction>>, DashboardError> {
        // Held across the fetch: concurrent requests for a new region/year wait for one upstream call
        let mut memo = self.last_fetch.lock().await;
        if let Some((cached_query, transactions)) = memo.as_ref() {
            if *cached_query == query {
                tracing::debug!(?query, "Reusing {} fetched transactions", transactions.len());
                return Ok(transactions.clone());
            }
        }

        let transactions = Arc::new(self.repository.fetch_transactions(&query).await?);
        tracing::info!(?query, "Fetched {} transactions", transactions.len());
        *memo = Some((query, transactions.clone()));
        Ok(transactions)
    }

    pub async fn get_dashboard(&self, criteria: &FilterCriteria) -> Result<Dashboard, DashboardError> {
        let transactions = self.transactions(criteria.source).await?;
        let names = salesperson_names(&transactions);

        // A selection carried over from another region/year only keeps names still on offer
        let mut criteria = criteria.clone();
        criteria.salespeople.retain(|name| names.contains(name));

        let tables = pipeline::compute(&transactions, &criteria);
        if tables.is_empty() {
            tracing::warn!(?criteria, "No transactions left after filtering");
        }

        Ok(dashboard_composer::compose(&self.options, &criteria, &names, &tables))
    }

    /// Names offered by the salesperson multi-select for one region/year.
    pub async fn list_salespeople(&self, query: SourceQuery) -> Result<Vec<String>, DashboardError> {
        let transactions = self.transactions(query).await?;
        Ok(salesperson_names(&transactions))
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::{FakeRepository, options};
    use super::*;
    use crate::domain::dashboard::Widget;
    use crate::domain::filter::{Region, YearFilter};
    use crate::domain::transaction::fixtures::sale;

    fn repository() -> Arc<FakeRepository> {
        Arc::new(FakeRepository::new(vec![
            sale("SP", "livros", "Ana", 100.0, "2022-01-10"),
            sale("RJ", "livros", "Bia", 200.0, "2023-02-10"),
            sale("MG", "brinquedos", "Caio", 300.0, "2023-03-10"),
        ]))
    }

    #[tokio::test]
    async fn test_get_dashboard() {
        let repo = repository();
        let service = DashboardService::new(repo.clone(), options(), TopN::default());

        let dashboard = service.get_dashboard(&FilterCriteria::default()).await.unwrap();
        assert_eq!(dashboard.title, "Sales dashboard");
        assert_eq!(dashboard.controls.salespeople.len(), 3);
        assert!(!dashboard.no_data);
        match &dashboard.tabs[0].left[0] {
            Widget::Metric(metric) => assert_eq!(metric.value, "R$ 600.00"),
            other => panic!("expected metric, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_salesperson_change_reuses_fetch() {
        let repo = repository();
        let service = DashboardService::new(repo.clone(), options(), TopN::default());

        service.get_dashboard(&FilterCriteria::default()).await.unwrap();
        let criteria = FilterCriteria {
            salespeople: ["Ana".to_string()].into_iter().collect(),
            top_n: TopN::new(3).unwrap(),
            ..FilterCriteria::default()
        };
        let dashboard = service.get_dashboard(&criteria).await.unwrap();
        assert_eq!(repo.calls(), 1);
        // The multi-select still lists everyone from the fetch
        assert_eq!(dashboard.controls.salespeople.len(), 3);
    }

    #[tokio::test]
    async fn test_year_change_fetches_again() {
        let repo = repository();
        let service = DashboardService::new(repo.clone(), options(), TopN::default());

        service.get_dashboard(&FilterCriteria::default()).await.unwrap();
        let criteria = FilterCriteria {
            source: SourceQuery {
                region: Region::Brasil,
                year: YearFilter::Year(2023),
            },
            ..FilterCriteria::default()
        };
        let dashboard = service.get_dashboard(&criteria).await.unwrap();
        assert_eq!(repo.calls(), 2);
        assert_eq!(dashboard.controls.salespeople.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let repo = repository();
        let service = DashboardService::new(repo.clone(), options(), TopN::default());
        let criteria = FilterCriteria::default();

        let (first, second) = tokio::join!(
            service.get_dashboard(&criteria),
            service.get_dashboard(&criteria)
        );
        assert!(first.is_ok() && second.is_ok());
        assert_eq!(repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_year_change_drops_unavailable_salespeople() {
        let repo = repository();
        let service = DashboardService::new(repo.clone(), options(), TopN::default());

        // Ana only sold in 2022
        let criteria = FilterCriteria {
            source: SourceQuery {
                region: Region::Brasil,
                year: YearFilter::Year(2023),
            },
            salespeople: ["Ana".to_string()].into_iter().collect(),
            ..FilterCriteria::default()
        };
        let dashboard = service.get_dashboard(&criteria).await.unwrap();
        assert!(!dashboard.no_data);
        assert!(dashboard.controls.salespeople.iter().all(|opt| !opt.selected));
        match &dashboard.tabs[0].left[0] {
            Widget::Metric(metric) => assert_eq!(metric.value, "R$ 500.00"),
            other => panic!("expected metric, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_selection_keeps_available_salespeople() {
        let service = DashboardService::new(repository(), options(), TopN::default());
        let criteria = FilterCriteria {
            salespeople: ["Bia".to_string(), "Nobody".to_string()].into_iter().collect(),
            ..FilterCriteria::default()
        };
        let dashboard = service.get_dashboard(&criteria).await.unwrap();
        let selected: Vec<_> = dashboard
            .controls
            .salespeople
            .iter()
            .filter(|opt| opt.selected)
            .map(|opt| opt.value.as_str())
            .collect();
        assert_eq!(selected, vec!["Bia"]);
        match &dashboard.tabs[0].left[0] {
            Widget::Metric(metric) => assert_eq!(metric.value, "R$ 200.00"),
            other => panic!("expected metric, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_fetch_marks_no_data() {
        let service = DashboardService::new(repository(), options(), TopN::default());
        let criteria = FilterCriteria {
            source: SourceQuery {
                region: Region::Brasil,
                year: YearFilter::Year(2021),
            },
            ..FilterCriteria::default()
        };
        let dashboard = service.get_dashboard(&criteria).await.unwrap();
        assert!(dashboard.no_data);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let repo = Arc::new(FakeRepository {
            fail: true,
            ..FakeRepository::default()
        });
        let service = DashboardService::new(repo, options(), TopN::default());
        let err = service.get_dashboard(&FilterCriteria::default()).await.unwrap_err();
        assert!(matches!(err, DashboardError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_list_salespeople() {
        let service = DashboardService::new(repository(), options(), TopN::default());
        let names = service.list_salespeople(SourceQuery::default()).await.unwrap();
        assert_eq!(names, vec!["Ana", "Bia", "Caio"]);
    }
}
