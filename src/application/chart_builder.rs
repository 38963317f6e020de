// Chart builder - Summary table to chart specification
use crate::domain::chart::{ChartKind, ChartPoint, ChartSeries, ChartSpec, Orientation, ValueFormat};
use crate::domain::dashboard::WidgetSlot;
use crate::domain::summary::{GeoRow, GroupTotal, Measure, MonthlyRow, SalespersonRow};
use std::collections::BTreeMap;

const GEO_SCOPE: &str = "south america";
const REVENUE: &str = "Revenue";
const SALES: &str = "Sales";

fn geo_chart<M: Measure>(slot: WidgetSlot, title: &str, label: &str, rows: &[GeoRow<M>]) -> ChartSpec {
    let points = rows
        .iter()
        .map(|r| ChartPoint::located(r.state.clone(), r.value.as_f64(), r.latitude, r.longitude))
        .collect();

    let mut chart = ChartSpec::new(
        slot.id(),
        title.to_string(),
        ChartKind::GeoBubble,
        vec![ChartSeries::new(label.to_string(), points)],
    );
    chart.y_label = Some(label.to_string());
    chart.geo_scope = Some(GEO_SCOPE.to_string());
    chart
}

/// One line per year, x axis by month name, y axis from zero to the series maximum.
fn monthly_chart<M: Measure>(
    slot: WidgetSlot,
    title: &str,
    label: &str,
    rows: &[MonthlyRow<M>],
) -> ChartSpec {
    let mut by_year: BTreeMap<i32, Vec<ChartPoint>> = BTreeMap::new();
    for row in rows {
        by_year
            .entry(row.year)
            .or_default()
            .push(ChartPoint::new(row.month_name.clone(), row.value.as_f64()));
    }
    let series = by_year
        .into_iter()
        .map(|(year, points)| ChartSeries::new(year.to_string(), points))
        .collect();

    let max = rows.iter().map(|r| r.value.as_f64()).fold(0.0, f64::max);

    let mut chart = ChartSpec::new(slot.id(), title.to_string(), ChartKind::Line, series);
    chart.x_label = Some("Month".to_string());
    chart.y_label = Some(label.to_string());
    chart.y_range = Some((0.0, max));
    chart.markers = true;
    chart
}

fn bar_chart<M: Measure>(
    slot: WidgetSlot,
    title: &str,
    x_label: &str,
    label: &str,
    rows: &[GroupTotal<M>],
) -> ChartSpec {
    let points = rows
        .iter()
        .map(|r| ChartPoint::new(r.key.clone(), r.value.as_f64()))
        .collect();

    let mut chart = ChartSpec::new(
        slot.id(),
        title.to_string(),
        ChartKind::Bar,
        vec![ChartSeries::new(label.to_string(), points)],
    );
    chart.x_label = Some(x_label.to_string());
    chart.y_label = Some(label.to_string());
    chart.value_labels = Some(M::FORMAT);
    chart
}

fn salespeople_chart(
    slot: WidgetSlot,
    title: String,
    label: &str,
    rows: &[SalespersonRow],
    measure: fn(&SalespersonRow) -> f64,
    format: ValueFormat,
) -> ChartSpec {
    let points = rows
        .iter()
        .map(|r| ChartPoint::new(r.name.clone(), measure(r)))
        .collect();

    let mut chart = ChartSpec::new(
        slot.id(),
        title,
        ChartKind::Bar,
        vec![ChartSeries::new(label.to_string(), points)],
    );
    chart.orientation = Orientation::Horizontal;
    chart.x_label = Some(label.to_string());
    chart.y_label = Some("Salesperson".to_string());
    chart.value_labels = Some(format);
    chart
}

pub fn revenue_map(rows: &[GeoRow<f64>]) -> ChartSpec {
    geo_chart(WidgetSlot::RevenueMap, "Revenue by state", REVENUE, rows)
}

pub fn sales_map(rows: &[GeoRow<u64>]) -> ChartSpec {
    geo_chart(WidgetSlot::SalesMap, "Sales by state", SALES, rows)
}

pub fn monthly_revenue(rows: &[MonthlyRow<f64>]) -> ChartSpec {
    monthly_chart(WidgetSlot::MonthlyRevenue, "Monthly revenue", REVENUE, rows)
}

pub fn monthly_sales(rows: &[MonthlyRow<u64>]) -> ChartSpec {
    monthly_chart(WidgetSlot::MonthlySales, "Monthly sales", SALES, rows)
}

pub fn top_states_revenue(rows: &[GroupTotal<f64>]) -> ChartSpec {
    bar_chart(WidgetSlot::TopStatesRevenue, "Top states (revenue)", "State", REVENUE, rows)
}

pub fn top_states_sales(rows: &[GroupTotal<u64>]) -> ChartSpec {
    bar_chart(WidgetSlot::TopStatesSales, "Top states (sales)", "State", SALES, rows)
}

pub fn category_revenue(rows: &[GroupTotal<f64>]) -> ChartSpec {
    bar_chart(WidgetSlot::CategoryRevenue, "Revenue by category", "Category", REVENUE, rows)
}

pub fn category_sales(rows: &[GroupTotal<u64>]) -> ChartSpec {
    bar_chart(WidgetSlot::CategorySales, "Sales by category", "Category", SALES, rows)
}

pub fn top_salespeople_revenue(rows: &[SalespersonRow], top_n: usize) -> ChartSpec {
    salespeople_chart(
        WidgetSlot::TopSalespeopleRevenue,
        format!("Top {} salespeople (revenue)", top_n),
        REVENUE,
        rows,
        |r| r.revenue,
        ValueFormat::Decimal,
    )
}

pub fn top_salespeople_sales(rows: &[SalespersonRow], top_n: usize) -> ChartSpec {
    salespeople_chart(
        WidgetSlot::TopSalespeopleSales,
        format!("Top {} salespeople (sales count)", top_n),
        SALES,
        rows,
        |r| r.sales as f64,
        ValueFormat::Integer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_chart_splits_years() {
        let rows = vec![
            MonthlyRow::new(2022, 12, 40.0),
            MonthlyRow::new(2023, 1, 100.0),
            MonthlyRow::new(2023, 2, 60.0),
        ];
        let chart = monthly_revenue(&rows);
        assert_eq!(chart.kind, ChartKind::Line);
        assert!(chart.markers);
        assert_eq!(chart.y_range, Some((0.0, 100.0)));
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "2022");
        assert_eq!(chart.series[1].points[0].label, "January");
        assert_eq!(chart.series[1].points[1].value, 60.0);
    }

    #[test]
    fn test_map_carries_coordinates() {
        let rows = vec![GeoRow {
            state: "São Paulo".to_string(),
            latitude: -23.5,
            longitude: -46.6,
            value: 12u64,
        }];
        let chart = sales_map(&rows);
        assert_eq!(chart.id, "sales-map");
        assert_eq!(chart.kind, ChartKind::GeoBubble);
        assert_eq!(chart.geo_scope.as_deref(), Some("south america"));
        assert_eq!(chart.series[0].points[0].coordinates, Some((-23.5, -46.6)));
        assert_eq!(chart.series[0].points[0].value, 12.0);
    }

    #[test]
    fn test_bar_chart_keeps_table_order() {
        let rows = vec![
            GroupTotal::new("livros".to_string(), 9u64),
            GroupTotal::new("brinquedos".to_string(), 3u64),
        ];
        let chart = category_sales(&rows);
        assert_eq!(chart.value_labels, Some(ValueFormat::Integer));
        assert_eq!(category_revenue(&[]).value_labels, Some(ValueFormat::Decimal));
        assert_eq!(chart.orientation, Orientation::Vertical);
        let labels: Vec<_> = chart.series[0].points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["livros", "brinquedos"]);
    }

    #[test]
    fn test_salespeople_chart_title_and_orientation() {
        let rows = vec![SalespersonRow {
            name: "Ana".to_string(),
            revenue: 10.0,
            sales: 3,
        }];
        let chart = top_salespeople_sales(&rows, 7);
        assert_eq!(chart.title, "Top 7 salespeople (sales count)");
        assert_eq!(chart.orientation, Orientation::Horizontal);
        assert_eq!(chart.series[0].points[0].value, 3.0);
        assert_eq!(chart.value_labels, Some(ValueFormat::Integer));
        assert_eq!(top_salespeople_revenue(&rows, 7).value_labels, Some(ValueFormat::Decimal));
    }

    #[test]
    fn test_empty_table_gives_empty_chart() {
        assert!(top_states_revenue(&[]).is_empty());
        assert_eq!(monthly_sales(&[]).y_range, Some((0.0, 0.0)));
    }
}
