//! HTML rendering of the dashboard page.
//!
//! The page is a sidebar form holding the filter controls next to three tabs
//! of metrics and charts. Charts are drawn client-side by Plotly from the
//! figures produced by [`plotly_mapper`](crate::infrastructure::plotly_mapper).

use crate::domain::dashboard::{Controls, Dashboard, Tab, Widget};
use crate::infrastructure::plotly_mapper::chart_to_plotly;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; }
aside { width: 260px; padding: 1rem; background: #f4f4f6; min-height: 100vh; }
aside label { display: block; margin-top: 1rem; font-weight: bold; }
aside select, aside input[type=range] { width: 100%; }
main { flex: 1; padding: 1rem 2rem; }
.tabs button { padding: .5rem 1rem; border: none; background: none; cursor: pointer; }
.tabs button.active { border-bottom: 2px solid #c44; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.metric { padding: .5rem 0; }
.metric-title { display: block; color: #666; }
.metric-value { font-size: 2rem; }
.chart { min-height: 420px; }
.chart-empty { min-height: 120px; color: #888; }
.notice { padding: 1rem; background: #fff4e5; border: 1px solid #f0c36d; }
"#;

const PAGE_SCRIPT: &str = r#"
document.querySelectorAll('.tabs button').forEach(function (button) {
    button.addEventListener('click', function () {
        var target = 'tab-' + button.dataset.tab;
        document.querySelectorAll('.tabs button').forEach(function (b) {
            b.classList.toggle('active', b === button);
        });
        document.getElementById('active-tab').value = button.dataset.tab;
        document.querySelectorAll('.tab').forEach(function (tab) {
            tab.hidden = tab.id !== target;
        });
        document.querySelectorAll('#' + target + ' .chart').forEach(function (el) {
            Plotly.Plots.resize(el);
        });
    });
});
var allYears = document.getElementById('all-years');
allYears.addEventListener('change', function () {
    document.getElementById('year-field').hidden = allYears.checked;
});
"#;

fn dom_id(tab: &Tab, widget: &Widget) -> String {
    format!("{}-{}", tab.id, widget.id())
}

fn widget_view(tab: &Tab, widget: &Widget) -> Markup {
    match widget {
        Widget::Metric(metric) => html! {
            div class="metric" id=(dom_id(tab, widget)) {
                span class="metric-title" { (metric.title) }
                span class="metric-value" { (metric.value) }
            }
        },
        Widget::Chart(chart) if chart.is_empty() => html! {
            div class="chart-empty" id=(dom_id(tab, widget)) {
                h3 { (chart.title) }
                p { "No data" }
            }
        },
        Widget::Chart(_) => html! {
            div class="chart" id=(dom_id(tab, widget)) {}
        },
    }
}

fn controls_view(controls: &Controls, active_tab: &str) -> Markup {
    html! {
        form id="filters" method="get" action="/" {
            h2 { "Filters" }
            input type="hidden" id="active-tab" name="tab" value=(active_tab);

            label for="region" { "Region" }
            select id="region" name="region" {
                @for opt in &controls.regions {
                    option value=(opt.value) selected[opt.selected] { (opt.label) }
                }
            }

            label {
                input type="hidden" name="all_years" value="false";
                input type="checkbox" id="all-years" name="all_years" value="true" checked[controls.all_years];
                " All periods"
            }

            div id="year-field" hidden[controls.all_years] {
                label for="year" { "Year: " output id="year-value" { (controls.year) } }
                input type="range" id="year" name="year"
                    min=(controls.year_min) max=(controls.year_max) value=(controls.year)
                    oninput="document.getElementById('year-value').value = this.value";
            }

            label for="sellers" { "Salespeople" }
            select id="sellers" name="sellers" multiple size="8" {
                @for opt in &controls.salespeople {
                    option value=(opt.value) selected[opt.selected] { (opt.label) }
                }
            }

            p { button type="submit" { "Apply" } }
        }
    }
}

fn tab_view(tab: &Tab, controls: &Controls, visible: bool) -> Markup {
    html! {
        section class="tab" id=(format!("tab-{}", tab.id)) hidden[!visible] {
            @if tab.shows_top_n {
                label for="top" { "Number of salespeople " }
                input type="number" id="top" name="top" form="filters"
                    min=(controls.top_n_min) max=(controls.top_n_max) value=(controls.top_n)
                    onchange="document.getElementById('filters').submit()";
            }
            div class="columns" {
                div class="column" {
                    @for widget in &tab.left { (widget_view(tab, widget)) }
                }
                div class="column" {
                    @for widget in &tab.right { (widget_view(tab, widget)) }
                }
            }
        }
    }
}

/// One `Plotly.newPlot` call per chart widget.
fn charts_script(dashboard: &Dashboard) -> String {
    dashboard
        .tabs
        .iter()
        .flat_map(|tab| tab.left.iter().chain(&tab.right).map(move |w| (tab, w)))
        .filter_map(|(tab, widget)| match widget {
            Widget::Chart(chart) if !chart.is_empty() => {
                // Keep user-provided labels from closing the script element
                let figure = chart_to_plotly(chart).to_string().replace("</", "<\\/");
                Some(format!(
                    "(function () {{ var f = {}; Plotly.newPlot('{}', f.data, f.layout, {{responsive: true}}); }})();",
                    figure,
                    dom_id(tab, widget)
                ))
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the dashboard with `active_tab` open, falling back to the first tab.
pub fn dashboard_page(dashboard: &Dashboard, active_tab: Option<&str>) -> Markup {
    let active = active_tab
        .and_then(|id| dashboard.tabs.iter().position(|tab| tab.id == id))
        .unwrap_or(0);
    let active_id = dashboard.tabs.get(active).map_or("", |tab| tab.id.as_str());

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (dashboard.title) }
                script src=(PLOTLY_CDN) {}
                style { (PreEscaped(STYLE)) }
            }
            body {
                aside { (controls_view(&dashboard.controls, active_id)) }
                main {
                    h1 { (dashboard.title) }
                    @if dashboard.no_data {
                        p class="notice" { "No sales match the current filters." }
                    }
                    nav class="tabs" {
                        @for (idx, tab) in dashboard.tabs.iter().enumerate() {
                            button type="button" data-tab=(tab.id) class=[(idx == active).then_some("active")] {
                                (tab.title)
                            }
                        }
                    }
                    @for (idx, tab) in dashboard.tabs.iter().enumerate() {
                        (tab_view(tab, &dashboard.controls, idx == active))
                    }
                }
                script { (PreEscaped(PAGE_SCRIPT)) }
                script { (PreEscaped(charts_script(dashboard))) }
            }
        }
    }
}

pub fn error_page(title: &str, message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                main {
                    h1 { (title) }
                    p class="notice" { (message) }
                    p { a href="/" { "Back to the dashboard" } }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_composer::{ComposeOptions, compose};
    use crate::application::pipeline::compute;
    use crate::domain::filter::FilterCriteria;
    use crate::domain::transaction::fixtures::sale;

    fn dashboard(sellers: &[&str]) -> Dashboard {
        let data = vec![
            sale("SP", "livros", "Ana", 1500.0, "2023-01-01"),
            sale("RJ", "livros", "Bia </script>", 500.0, "2023-02-01"),
        ];
        let criteria = FilterCriteria {
            salespeople: sellers.iter().map(|s| s.to_string()).collect(),
            ..FilterCriteria::default()
        };
        let options = ComposeOptions {
            title: "Sales dashboard".to_string(),
            currency_prefix: "R$".to_string(),
        };
        let names = vec!["Ana".to_string(), "Bia </script>".to_string()];
        compose(&options, &criteria, &names, &compute(&data, &criteria))
    }

    #[test]
    fn test_page_contains_tabs_and_charts() {
        let html = dashboard_page(&dashboard(&[]), None).into_string();
        assert!(html.contains("<title>Sales dashboard</title>"));
        assert!(html.contains(r#"id="tab-revenue""#));
        assert!(html.contains(r#"id="tab-salespeople""#));
        assert!(html.contains("Plotly.newPlot('revenue-revenue-map'"));
        assert!(html.contains("Plotly.newPlot('salespeople-top-salespeople-sales'"));
        assert!(html.contains("R$ 2.00 thousand"));
        assert!(!html.contains("No sales match"));
    }

    #[test]
    fn test_page_escapes_script_breakouts() {
        let html = dashboard_page(&dashboard(&[]), None).into_string();
        assert_eq!(html.matches("</script>").count(), 3);
        assert!(html.contains("Bia &lt;/script&gt;"));
    }

    #[test]
    fn test_page_shows_no_data_notice() {
        let html = dashboard_page(&dashboard(&["Nobody"]), None).into_string();
        assert!(html.contains("No sales match the current filters."));
        assert!(html.contains(r#"class="chart-empty" id="revenue-revenue-map""#));
        assert!(!html.contains("Plotly.newPlot("));
    }

    #[test]
    fn test_page_reopens_submitted_tab() {
        let html = dashboard_page(&dashboard(&[]), Some("salespeople")).into_string();
        assert!(html.contains(r#"name="tab" value="salespeople""#));
        assert!(html.contains(r#"<section class="tab" id="tab-salespeople">"#));
        assert!(html.contains(r#"<section class="tab" id="tab-revenue" hidden>"#));
        assert!(html.contains(r#"data-tab="salespeople" class="active""#));
    }

    #[test]
    fn test_page_unknown_tab_opens_first() {
        let html = dashboard_page(&dashboard(&[]), Some("bogus")).into_string();
        assert!(html.contains(r#"name="tab" value="revenue""#));
        assert!(html.contains(r#"<section class="tab" id="tab-revenue">"#));
    }

    #[test]
    fn test_error_page() {
        let html = error_page("Sales source unavailable", "connection refused").into_string();
        assert!(html.contains("connection refused"));
    }
}
