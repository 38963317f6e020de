// Filter criteria and the salesperson filter stage
use super::error::DashboardError;
use super::transaction::Transaction;
use std::collections::BTreeSet;

pub const MIN_YEAR: i32 = 2020;
pub const MAX_YEAR: i32 = 2023;

pub const MIN_TOP_N: usize = 2;
pub const MAX_TOP_N: usize = 10;
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// Whole country, i.e. no region filter.
    #[default]
    Brasil,
    CentroOeste,
    Nordeste,
    Norte,
    Sudeste,
    Sul,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Brasil,
        Region::CentroOeste,
        Region::Nordeste,
        Region::Norte,
        Region::Sudeste,
        Region::Sul,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::Brasil => "Brasil",
            Region::CentroOeste => "Centro-Oeste",
            Region::Nordeste => "Nordeste",
            Region::Norte => "Norte",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }

    /// Value of the `regiao` query parameter: empty for the whole country.
    pub fn query_value(&self) -> String {
        match self {
            Region::Brasil => String::new(),
            other => other.label().to_lowercase(),
        }
    }

    /// Accepts either the display label or the lowercased query value.
    pub fn parse(text: &str) -> Result<Self, DashboardError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Region::Brasil);
        }
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(text))
            .ok_or_else(|| DashboardError::InvalidFilter(format!("unknown region '{}'", text)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    pub fn year(year: i32) -> Result<Self, DashboardError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DashboardError::InvalidFilter(format!(
                "year {} outside {}..={}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        Ok(YearFilter::Year(year))
    }

    /// Value of the `ano` query parameter: empty for every year.
    pub fn query_value(&self) -> String {
        match self {
            YearFilter::All => String::new(),
            YearFilter::Year(year) => year.to_string(),
        }
    }
}

/// Number of salespeople shown in the salespeople view, bounded to 2..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopN(usize);

impl TopN {
    pub fn new(n: usize) -> Result<Self, DashboardError> {
        if !(MIN_TOP_N..=MAX_TOP_N).contains(&n) {
            return Err(DashboardError::InvalidFilter(format!(
                "top-N {} outside {}..={}",
                n, MIN_TOP_N, MAX_TOP_N
            )));
        }
        Ok(Self(n))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(DEFAULT_TOP_N)
    }
}

/// Parameters of one remote fetch. Changing either one requires a new request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceQuery {
    pub region: Region,
    pub year: YearFilter,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub source: SourceQuery,
    /// Empty means every salesperson.
    pub salespeople: BTreeSet<String>,
    pub top_n: TopN,
}

/// Restrict rows to the selected salespeople; an empty selection keeps everything.
pub fn filter_by_salespeople(
    transactions: &[Transaction],
    selected: &BTreeSet<String>,
) -> Vec<Transaction> {
    if selected.is_empty() {
        return transactions.to_vec();
    }
    transactions
        .iter()
        .filter(|t| selected.contains(&t.salesperson))
        .cloned()
        .collect()
}

/// Distinct salesperson names in order of first appearance.
pub fn salesperson_names(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    transactions
        .iter()
        .filter(|t| seen.insert(t.salesperson.as_str()))
        .map(|t| t.salesperson.clone())
        .collect()
}
