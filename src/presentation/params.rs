// Query-string parsing into filter criteria
//
// The page form submits the salesperson multi-select as repeated `sellers`
// keys, and the all-years checkbox as a hidden `all_years=false` followed by
// `all_years=true` when ticked, so for scalar keys the last value wins.
use crate::domain::error::DashboardError;
use crate::domain::filter::{FilterCriteria, MIN_YEAR, Region, SourceQuery, TopN, YearFilter};

fn last<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.trim())
}

fn parse_flag(value: &str) -> Result<bool, DashboardError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" => Ok(false),
        other => Err(DashboardError::InvalidFilter(format!(
            "expected a boolean, got '{}'",
            other
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, DashboardError> {
    value
        .parse()
        .map_err(|_| DashboardError::InvalidFilter(format!("{} must be a number, got '{}'", key, value)))
}

/// Tab that was open when the form was submitted.
pub fn active_tab(params: &[(String, String)]) -> Option<&str> {
    last(params, "tab").filter(|v| !v.is_empty())
}

pub fn source_from_params(params: &[(String, String)]) -> Result<SourceQuery, DashboardError> {
    let region = match last(params, "region") {
        Some(value) => Region::parse(value)?,
        None => Region::default(),
    };

    let all_years = match last(params, "all_years") {
        Some(value) => parse_flag(value)?,
        None => true,
    };

    let year = if all_years {
        YearFilter::All
    } else {
        match last(params, "year").filter(|v| !v.is_empty()) {
            Some(value) => YearFilter::year(parse_number("year", value)?)?,
            None => YearFilter::year(MIN_YEAR)?,
        }
    };

    Ok(SourceQuery { region, year })
}

pub fn criteria_from_params(
    params: &[(String, String)],
    default_top_n: TopN,
) -> Result<FilterCriteria, DashboardError> {
    let source = source_from_params(params)?;

    let salespeople = params
        .iter()
        .filter(|(k, v)| k == "sellers" && !v.trim().is_empty())
        .map(|(_, v)| v.trim().to_string())
        .collect();

    let top_n = match last(params, "top").filter(|v| !v.is_empty()) {
        Some(value) => TopN::new(parse_number("top", value)?)?,
        None => default_top_n,
    };

    Ok(FilterCriteria {
        source,
        salespeople,
        top_n,
    })
}
