// Mapper to convert chart specifications to Plotly figures
use crate::domain::chart::{ChartKind, ChartSeries, ChartSpec, Orientation, ValueFormat};
use serde_json::{Value, json};

const DASH_STYLES: [&str; 5] = ["solid", "dot", "dash", "longdash", "dashdot"];
const MAX_BUBBLE_PX: f64 = 40.0;

pub fn chart_to_plotly(chart: &ChartSpec) -> Value {
    let data: Vec<Value> = match chart.kind {
        ChartKind::GeoBubble => chart.series.iter().map(geo_trace).collect(),
        ChartKind::Line => chart
            .series
            .iter()
            .enumerate()
            .map(|(idx, series)| line_trace(series, idx, chart.markers))
            .collect(),
        ChartKind::Bar => chart
            .series
            .iter()
            .map(|series| bar_trace(series, chart.orientation, chart.value_labels))
            .collect(),
    };

    json!({
        "data": data,
        "layout": layout(chart),
    })
}

fn layout(chart: &ChartSpec) -> Value {
    let show_legend = chart.kind == ChartKind::Line;
    let mut layout = json!({
        "title": { "text": chart.title },
        "template": "seaborn",
        "showlegend": show_legend,
    });

    if let Some(scope) = &chart.geo_scope {
        layout["geo"] = json!({ "scope": scope });
    }
    if let Some(label) = &chart.x_label {
        layout["xaxis"] = json!({ "title": { "text": label } });
    }
    if let Some(label) = &chart.y_label {
        layout["yaxis"] = json!({ "title": { "text": label } });
    }
    if let Some((min, max)) = chart.y_range {
        layout["yaxis"]["range"] = json!([min, max]);
    }
    layout
}

fn geo_trace(series: &ChartSeries) -> Value {
    let (lat, lon): (Vec<f64>, Vec<f64>) = series
        .points
        .iter()
        .filter_map(|p| p.coordinates)
        .unzip();
    let located: Vec<_> = series.points.iter().filter(|p| p.coordinates.is_some()).collect();
    let values: Vec<f64> = located.iter().map(|p| p.value).collect();
    let labels: Vec<&str> = located.iter().map(|p| p.label.as_str()).collect();

    // Bubble area proportional to the value, largest bubble MAX_BUBBLE_PX wide
    let max = values.iter().copied().fold(0.0, f64::max);
    let sizeref = if max > 0.0 { 2.0 * max / MAX_BUBBLE_PX.powi(2) } else { 1.0 };

    json!({
        "type": "scattergeo",
        "name": series.name,
        "lat": lat,
        "lon": lon,
        "text": labels,
        "hovertemplate": "%{text}: %{marker.size}<extra></extra>",
        "marker": {
            "size": values,
            "sizemode": "area",
            "sizeref": sizeref,
        },
    })
}

fn line_trace(series: &ChartSeries, idx: usize, markers: bool) -> Value {
    let x: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
    let y: Vec<f64> = series.points.iter().map(|p| p.value).collect();

    let mode = if markers { "lines+markers" } else { "lines" };

    json!({
        "type": "scatter",
        "mode": mode,
        "name": series.name,
        "x": x,
        "y": y,
        "line": { "dash": DASH_STYLES[idx % DASH_STYLES.len()] },
    })
}

fn text_template(format: ValueFormat) -> &'static str {
    match format {
        ValueFormat::Decimal => "%{value:,.2f}",
        ValueFormat::Integer => "%{value:,}",
    }
}

fn bar_trace(
    series: &ChartSeries,
    orientation: Orientation,
    value_labels: Option<ValueFormat>,
) -> Value {
    let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
    let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();

    let mut trace = match orientation {
        Orientation::Vertical => json!({ "type": "bar", "x": labels, "y": values }),
        Orientation::Horizontal => {
            json!({ "type": "bar", "orientation": "h", "x": values, "y": labels })
        }
    };
    trace["name"] = json!(series.name);
    if let Some(format) = value_labels {
        trace["texttemplate"] = json!(text_template(format));
        trace["textposition"] = json!("auto");
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ChartPoint;

    fn series(points: Vec<ChartPoint>) -> Vec<ChartSeries> {
        vec![ChartSeries::new("Revenue".to_string(), points)]
    }

    #[test]
    fn test_geo_figure() {
        let mut chart = ChartSpec::new(
            "revenue-map",
            "Revenue by state".to_string(),
            ChartKind::GeoBubble,
            series(vec![
                ChartPoint::located("SP".to_string(), 800.0, -23.5, -46.6),
                ChartPoint::located("BA".to_string(), 200.0, -12.9, -38.5),
            ]),
        );
        chart.geo_scope = Some("south america".to_string());

        let figure = chart_to_plotly(&chart);
        let trace = &figure["data"][0];
        assert_eq!(trace["type"], "scattergeo");
        assert_eq!(trace["lat"], json!([-23.5, -12.9]));
        assert_eq!(trace["marker"]["sizeref"], json!(1.0));
        assert_eq!(figure["layout"]["geo"]["scope"], "south america");
        assert_eq!(figure["layout"]["title"]["text"], "Revenue by state");
    }

    #[test]
    fn test_line_figure_dash_per_year() {
        let mut chart = ChartSpec::new(
            "monthly-revenue",
            "Monthly revenue".to_string(),
            ChartKind::Line,
            vec![
                ChartSeries::new("2022".to_string(), vec![ChartPoint::new("January".to_string(), 1.0)]),
                ChartSeries::new("2023".to_string(), vec![ChartPoint::new("January".to_string(), 2.0)]),
            ],
        );
        chart.markers = true;
        chart.y_label = Some("Revenue".to_string());
        chart.y_range = Some((0.0, 2.0));

        let figure = chart_to_plotly(&chart);
        assert_eq!(figure["data"][0]["mode"], "lines+markers");
        assert_eq!(figure["data"][0]["line"]["dash"], "solid");
        assert_eq!(figure["data"][1]["line"]["dash"], "dot");
        assert_eq!(figure["layout"]["yaxis"]["range"], json!([0.0, 2.0]));
        assert_eq!(figure["layout"]["yaxis"]["title"]["text"], "Revenue");
    }

    #[test]
    fn test_horizontal_bar_swaps_axes() {
        let mut chart = ChartSpec::new(
            "top-salespeople-revenue",
            "Top 5 salespeople (revenue)".to_string(),
            ChartKind::Bar,
            series(vec![ChartPoint::new("Ana".to_string(), 10.0)]),
        );
        chart.orientation = Orientation::Horizontal;
        chart.value_labels = Some(ValueFormat::Integer);

        let figure = chart_to_plotly(&chart);
        let trace = &figure["data"][0];
        assert_eq!(trace["orientation"], "h");
        assert_eq!(trace["x"], json!([10.0]));
        assert_eq!(trace["y"], json!(["Ana"]));
        assert_eq!(trace["texttemplate"], "%{value:,}");
    }

    #[test]
    fn test_revenue_labels_use_two_decimals() {
        let mut chart = ChartSpec::new(
            "top-states-revenue",
            "Top states (revenue)".to_string(),
            ChartKind::Bar,
            series(vec![ChartPoint::new("SP".to_string(), 1234.5600000001)]),
        );
        chart.value_labels = Some(ValueFormat::Decimal);

        let figure = chart_to_plotly(&chart);
        let trace = &figure["data"][0];
        assert_eq!(trace["texttemplate"], "%{value:,.2f}");
        assert!(trace.get("text").is_none());
    }

    #[test]
    fn test_bar_without_labels() {
        let chart = ChartSpec::new(
            "top-states-sales",
            "Top states (sales)".to_string(),
            ChartKind::Bar,
            series(vec![ChartPoint::new("SP".to_string(), 3.0)]),
        );
        let figure = chart_to_plotly(&chart);
        assert!(figure["data"][0].get("texttemplate").is_none());
    }
}
