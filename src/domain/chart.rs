// Chart specification domain models
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    GeoBubble,
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<(f64, f64)>,
}

impl ChartPoint {
    pub fn new(label: String, value: f64) -> Self {
        Self {
            label,
            value,
            coordinates: None,
        }
    }

    pub fn located(label: String, value: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            label,
            value,
            coordinates: Some((latitude, longitude)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(name: String, points: Vec<ChartPoint>) -> Self {
        Self { name, points }
    }
}

/// How inline value labels are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// Two decimals with thousands separators
    Decimal,
    /// Whole numbers with thousands separators
    Integer,
}

/// Declarative chart: what to draw, never how.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub orientation: Orientation,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub y_range: Option<(f64, f64)>,
    pub markers: bool,
    pub value_labels: Option<ValueFormat>,
    pub geo_scope: Option<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn new(id: &str, title: String, kind: ChartKind, series: Vec<ChartSeries>) -> Self {
        Self {
            id: id.to_string(),
            title,
            kind,
            orientation: Orientation::Vertical,
            x_label: None,
            y_label: None,
            y_range: None,
            markers: false,
            value_labels: None,
            geo_scope: None,
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}
