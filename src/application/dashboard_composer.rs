// Dashboard composer - Lays out metrics, charts and controls into tabs
use crate::application::chart_builder;
use crate::domain::dashboard::{
    Controls, Dashboard, DashboardSkeleton, Metric, SelectOption, Tab, TabSkeleton, Widget,
    WidgetSlot,
};
use crate::domain::filter::{
    FilterCriteria, MAX_TOP_N, MAX_YEAR, MIN_TOP_N, MIN_YEAR, Region, YearFilter,
};
use crate::domain::number_format::format_number;
use crate::domain::summary::SummaryTables;

pub struct TabLayout {
    pub id: &'static str,
    pub title: &'static str,
    pub shows_top_n: bool,
    pub left: &'static [WidgetSlot],
    pub right: &'static [WidgetSlot],
}

pub const LAYOUT: [TabLayout; 3] = [
    TabLayout {
        id: "revenue",
        title: "Revenue",
        shows_top_n: false,
        left: &[
            WidgetSlot::RevenueMetric,
            WidgetSlot::RevenueMap,
            WidgetSlot::TopStatesRevenue,
        ],
        right: &[
            WidgetSlot::SalesMetric,
            WidgetSlot::MonthlyRevenue,
            WidgetSlot::CategoryRevenue,
        ],
    },
    TabLayout {
        id: "sales",
        title: "Sales count",
        shows_top_n: false,
        left: &[
            WidgetSlot::RevenueMetric,
            WidgetSlot::SalesMap,
            WidgetSlot::TopStatesSales,
        ],
        right: &[
            WidgetSlot::SalesMetric,
            WidgetSlot::MonthlySales,
            WidgetSlot::CategorySales,
        ],
    },
    TabLayout {
        id: "salespeople",
        title: "Salespeople",
        shows_top_n: true,
        left: &[WidgetSlot::RevenueMetric, WidgetSlot::TopSalespeopleRevenue],
        right: &[WidgetSlot::SalesMetric, WidgetSlot::TopSalespeopleSales],
    },
];

/// Presentation settings the composer needs besides the computed tables.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub title: String,
    pub currency_prefix: String,
}

pub fn skeleton(title: &str) -> DashboardSkeleton {
    let ids = |slots: &[WidgetSlot]| -> Vec<String> {
        slots.iter().map(|s| s.id().to_string()).collect()
    };
    DashboardSkeleton {
        title: title.to_string(),
        tabs: LAYOUT
            .iter()
            .map(|layout| TabSkeleton {
                id: layout.id.to_string(),
                title: layout.title.to_string(),
                left: ids(layout.left),
                right: ids(layout.right),
            })
            .collect(),
    }
}

pub fn compose(
    options: &ComposeOptions,
    criteria: &FilterCriteria,
    available_salespeople: &[String],
    tables: &SummaryTables,
) -> Dashboard {
    let render = |slots: &[WidgetSlot]| -> Vec<Widget> {
        slots
            .iter()
            .map(|slot| render_slot(*slot, options, criteria, tables))
            .collect()
    };

    let tabs = LAYOUT
        .iter()
        .map(|layout| Tab {
            id: layout.id.to_string(),
            title: layout.title.to_string(),
            shows_top_n: layout.shows_top_n,
            left: render(layout.left),
            right: render(layout.right),
        })
        .collect();

    Dashboard {
        title: options.title.clone(),
        controls: controls(criteria, available_salespeople),
        tabs,
        no_data: tables.is_empty(),
    }
}

fn render_slot(
    slot: WidgetSlot,
    options: &ComposeOptions,
    criteria: &FilterCriteria,
    tables: &SummaryTables,
) -> Widget {
    let top_n = criteria.top_n.get();
    match slot {
        WidgetSlot::RevenueMetric => Widget::Metric(Metric {
            id: slot.id().to_string(),
            title: "Revenue".to_string(),
            value: format_number(tables.total_revenue, &options.currency_prefix),
        }),
        WidgetSlot::SalesMetric => Widget::Metric(Metric {
            id: slot.id().to_string(),
            title: "Sales count".to_string(),
            value: format_number(tables.total_sales as f64, ""),
        }),
        WidgetSlot::RevenueMap => Widget::Chart(chart_builder::revenue_map(&tables.geo_revenue)),
        WidgetSlot::SalesMap => Widget::Chart(chart_builder::sales_map(&tables.geo_sales)),
        WidgetSlot::TopStatesRevenue => {
            Widget::Chart(chart_builder::top_states_revenue(&tables.state_revenue))
        }
        WidgetSlot::TopStatesSales => {
            Widget::Chart(chart_builder::top_states_sales(&tables.state_sales))
        }
        WidgetSlot::MonthlyRevenue => {
            Widget::Chart(chart_builder::monthly_revenue(&tables.monthly_revenue))
        }
        WidgetSlot::MonthlySales => {
            Widget::Chart(chart_builder::monthly_sales(&tables.monthly_sales))
        }
        WidgetSlot::CategoryRevenue => {
            Widget::Chart(chart_builder::category_revenue(&tables.category_revenue))
        }
        WidgetSlot::CategorySales => {
            Widget::Chart(chart_builder::category_sales(&tables.category_sales))
        }
        WidgetSlot::TopSalespeopleRevenue => Widget::Chart(
            chart_builder::top_salespeople_revenue(&tables.top_salespeople_revenue, top_n),
        ),
        WidgetSlot::TopSalespeopleSales => Widget::Chart(chart_builder::top_salespeople_sales(
            &tables.top_salespeople_sales,
            top_n,
        )),
    }
}

fn controls(criteria: &FilterCriteria, available_salespeople: &[String]) -> Controls {
    let regions = Region::ALL
        .iter()
        .map(|region| SelectOption {
            value: region.label().to_string(),
            label: region.label().to_string(),
            selected: *region == criteria.source.region,
        })
        .collect();

    let salespeople = available_salespeople
        .iter()
        .map(|name| SelectOption {
            value: name.clone(),
            label: name.clone(),
            selected: criteria.salespeople.contains(name),
        })
        .collect();

    let (all_years, year) = match criteria.source.year {
        YearFilter::All => (true, MIN_YEAR),
        YearFilter::Year(year) => (false, year),
    };

    Controls {
        regions,
        all_years,
        year,
        year_min: MIN_YEAR,
        year_max: MAX_YEAR,
        salespeople,
        top_n: criteria.top_n.get(),
        top_n_min: MIN_TOP_N,
        top_n_max: MAX_TOP_N,
    }
}
