// HTTP sales source repository implementation
use crate::application::sales_repository::SalesRepository;
use crate::domain::error::DashboardError;
use crate::domain::filter::SourceQuery;
use crate::domain::transaction::{Location, Transaction, parse_purchase_date};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSalesRepository {
    client: reqwest::Client,
    base_url: String,
}

/// One element of the JSON array returned by the sales source.
#[derive(Debug, Deserialize)]
struct SaleRecord {
    #[serde(rename = "Categoria do Produto")]
    category: String,
    #[serde(rename = "Preço")]
    price: f64,
    #[serde(rename = "Data da Compra")]
    purchase_date: String,
    #[serde(rename = "Local da compra")]
    state: String,
    lat: f64,
    lon: f64,
    #[serde(rename = "Vendedor")]
    salesperson: String,
}

impl SaleRecord {
    fn into_transaction(self) -> Result<Transaction> {
        let purchase_date = parse_purchase_date(&self.purchase_date)
            .with_context(|| format!("Invalid purchase date '{}'", self.purchase_date))?;
        Ok(Transaction::new(
            self.category,
            self.price,
            purchase_date,
            Location::new(self.state, self.lat, self.lon),
            self.salesperson,
        ))
    }
}

impl HttpSalesRepository {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_query_url(&self, query: &SourceQuery) -> String {
        format!(
            "{}?regiao={}&ano={}",
            self.base_url,
            urlencoding::encode(&query.region.query_value()),
            urlencoding::encode(&query.year.query_value())
        )
    }

    async fn execute_query(&self, query: &SourceQuery) -> Result<String> {
        let url = self.build_query_url(query);
        tracing::debug!("Requesting sales data: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to sales source")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Sales source failed with status {}: {}", status, body);
        }

        response
            .text()
            .await
            .context("Failed to read sales source response")
    }
}

/// Decode the sales source body into transactions.
pub fn decode_transactions(body: &str) -> Result<Vec<Transaction>> {
    let records: Vec<SaleRecord> =
        serde_json::from_str(body).context("Failed to parse sales source response")?;

    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            record
                .into_transaction()
                .with_context(|| format!("Bad record at index {}", idx))
        })
        .collect()
}

#[async_trait]
impl SalesRepository for HttpSalesRepository {
    async fn fetch_transactions(
        &self,
        query: &SourceQuery,
    ) -> Result<Vec<Transaction>, DashboardError> {
        let body = self
            .execute_query(query)
            .await
            .map_err(DashboardError::Fetch)?;
        decode_transactions(&body).map_err(DashboardError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{Region, YearFilter};
    use chrono::NaiveDate;

    const BODY: &str = r#"[
        {
            "Produto": "Modelagem preditiva",
            "Categoria do Produto": "livros",
            "Preço": 92.45,
            "Frete": 5.6096965236,
            "Data da Compra": "01/01/2020",
            "Vendedor": "Thiago Silva",
            "Local da compra": "BA",
            "Avaliação da compra": 1,
            "Tipo de pagamento": "cartao_credito",
            "Quantidade de parcelas": 3,
            "lat": -13.29,
            "lon": -41.71
        },
        {
            "Categoria do Produto": "eletronicos",
            "Preço": 1500,
            "Data da Compra": "28/02/2023",
            "Vendedor": "Ana Lima",
            "Local da compra": "SP",
            "lat": -22.19,
            "lon": -48.79
        }
    ]"#;

    #[test]
    fn test_decode_transactions() {
        let transactions = decode_transactions(BODY).unwrap();
        assert_eq!(transactions.len(), 2);

        let first = &transactions[0];
        assert_eq!(first.category, "livros");
        assert_eq!(first.price, 92.45);
        assert_eq!(first.purchase_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(first.location, Location::new("BA".to_string(), -13.29, -41.71));
        assert_eq!(first.salesperson, "Thiago Silva");

        assert_eq!(transactions[1].price, 1500.0);
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let body = r#"[{"Categoria do Produto": "livros", "Preço": 1.0}]"#;
        assert!(decode_transactions(body).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_date() {
        let body = BODY.replace("28/02/2023", "2023-02-28");
        let err = decode_transactions(&body).unwrap_err();
        assert!(format!("{:#}", err).contains("index 1"));
    }

    #[test]
    fn test_build_query_url() {
        let repo = HttpSalesRepository::new("https://labdados.com/produtos/".to_string(), None).unwrap();

        let all = repo.build_query_url(&SourceQuery::default());
        assert_eq!(all, "https://labdados.com/produtos?regiao=&ano=");

        let filtered = repo.build_query_url(&SourceQuery {
            region: Region::CentroOeste,
            year: YearFilter::Year(2021),
        });
        assert_eq!(filtered, "https://labdados.com/produtos?regiao=centro-oeste&ano=2021");
    }
}
