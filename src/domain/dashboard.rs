// Dashboard domain model
use super::chart::ChartSpec;
use serde::Serialize;

/// A fixed position in the dashboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetSlot {
    RevenueMetric,
    SalesMetric,
    RevenueMap,
    SalesMap,
    TopStatesRevenue,
    TopStatesSales,
    MonthlyRevenue,
    MonthlySales,
    CategoryRevenue,
    CategorySales,
    TopSalespeopleRevenue,
    TopSalespeopleSales,
}

impl WidgetSlot {
    pub fn id(&self) -> &'static str {
        match self {
            WidgetSlot::RevenueMetric => "revenue-metric",
            WidgetSlot::SalesMetric => "sales-metric",
            WidgetSlot::RevenueMap => "revenue-map",
            WidgetSlot::SalesMap => "sales-map",
            WidgetSlot::TopStatesRevenue => "top-states-revenue",
            WidgetSlot::TopStatesSales => "top-states-sales",
            WidgetSlot::MonthlyRevenue => "monthly-revenue",
            WidgetSlot::MonthlySales => "monthly-sales",
            WidgetSlot::CategoryRevenue => "category-revenue",
            WidgetSlot::CategorySales => "category-sales",
            WidgetSlot::TopSalespeopleRevenue => "top-salespeople-revenue",
            WidgetSlot::TopSalespeopleSales => "top-salespeople-sales",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub id: String,
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Widget {
    Metric(Metric),
    Chart(ChartSpec),
}

impl Widget {
    pub fn id(&self) -> &str {
        match self {
            Widget::Metric(m) => &m.id,
            Widget::Chart(c) => &c.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub title: String,
    /// The salespeople tab carries the top-N input above its columns.
    pub shows_top_n: bool,
    pub left: Vec<Widget>,
    pub right: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Current state of every input control, echoed back so the page can re-render it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub regions: Vec<SelectOption>,
    pub all_years: bool,
    pub year: i32,
    pub year_min: i32,
    pub year_max: i32,
    pub salespeople: Vec<SelectOption>,
    pub top_n: usize,
    pub top_n_min: usize,
    pub top_n_max: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub title: String,
    pub controls: Controls,
    pub tabs: Vec<Tab>,
    /// Set when the filtered table has no rows; charts are then empty.
    pub no_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSkeleton {
    pub id: String,
    pub title: String,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// Layout known before any data arrives, sent first when streaming.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSkeleton {
    pub title: String,
    pub tabs: Vec<TabSkeleton>,
}
