// Summary tables derived from the filtered transactions
use crate::domain::chart::ValueFormat;
use chrono::Month;
use serde::Serialize;

/// A numeric measure attached to a group: revenue (`f64`) or sales count (`u64`).
pub trait Measure: Copy + Default + PartialEq + std::ops::AddAssign {
    const FORMAT: ValueFormat;

    fn as_f64(self) -> f64;
}

impl Measure for f64 {
    const FORMAT: ValueFormat = ValueFormat::Decimal;

    fn as_f64(self) -> f64 {
        self
    }
}

impl Measure for u64 {
    const FORMAT: ValueFormat = ValueFormat::Integer;

    fn as_f64(self) -> f64 {
        self as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal<M> {
    pub key: String,
    pub value: M,
}

impl<M> GroupTotal<M> {
    pub fn new(key: String, value: M) -> Self {
        Self { key, value }
    }
}

pub type RevenueRow = GroupTotal<f64>;
pub type SalesRow = GroupTotal<u64>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoRow<M> {
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub value: M,
}

/// One calendar-month bucket. Months without sales inside the covered span carry zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow<M> {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub value: M,
}

impl<M> MonthlyRow<M> {
    pub fn new(year: i32, month: u32, value: M) -> Self {
        let month_name = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name().to_string())
            .unwrap_or_default();
        Self {
            year,
            month,
            month_name,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalespersonRow {
    pub name: String,
    pub revenue: f64,
    pub sales: u64,
}

/// Every table the dashboard shows, recomputed from scratch on each run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SummaryTables {
    pub total_revenue: f64,
    pub total_sales: u64,
    pub state_revenue: Vec<RevenueRow>,
    pub state_sales: Vec<SalesRow>,
    pub geo_revenue: Vec<GeoRow<f64>>,
    pub geo_sales: Vec<GeoRow<u64>>,
    pub monthly_revenue: Vec<MonthlyRow<f64>>,
    pub monthly_sales: Vec<MonthlyRow<u64>>,
    pub category_revenue: Vec<RevenueRow>,
    pub category_sales: Vec<SalesRow>,
    pub salespeople: Vec<SalespersonRow>,
    pub top_salespeople_revenue: Vec<SalespersonRow>,
    pub top_salespeople_sales: Vec<SalespersonRow>,
}

impl SummaryTables {
    pub fn is_empty(&self) -> bool {
        self.total_sales == 0
    }
}
