// Aggregation stage - typed group-by functions over the filtered transactions
//
// Groups are enumerated in ascending key order and every sort is stable, so
// ties on a measure keep that key order.
use crate::domain::summary::{GeoRow, GroupTotal, Measure, MonthlyRow, SalespersonRow};
use crate::domain::transaction::Transaction;
use chrono::Datelike;
use std::collections::{BTreeMap, HashSet};

/// Number of states kept in the per-state tables and maps.
pub const TOP_STATES: usize = 5;

fn group_by<M, K, V>(transactions: &[Transaction], key: K, measure: V) -> Vec<GroupTotal<M>>
where
    M: Measure,
    K: Fn(&Transaction) -> &str,
    V: Fn(&Transaction) -> M,
{
    let mut groups: BTreeMap<&str, M> = BTreeMap::new();
    for t in transactions {
        *groups.entry(key(t)).or_default() += measure(t);
    }
    groups
        .into_iter()
        .map(|(k, v)| GroupTotal::new(k.to_string(), v))
        .collect()
}

fn sort_descending<M: Measure>(rows: &mut [GroupTotal<M>]) {
    rows.sort_by(|a, b| b.value.as_f64().total_cmp(&a.value.as_f64()));
}

fn price(t: &Transaction) -> f64 {
    t.price
}

fn one(_: &Transaction) -> u64 {
    1
}

fn top_states<M: Measure>(mut rows: Vec<GroupTotal<M>>) -> Vec<GroupTotal<M>> {
    sort_descending(&mut rows);
    rows.truncate(TOP_STATES);
    rows
}

/// Revenue of the five best states, highest first.
pub fn state_revenue(transactions: &[Transaction]) -> Vec<GroupTotal<f64>> {
    top_states(group_by(transactions, Transaction::state, price))
}

/// Sales count of the five busiest states, highest first.
pub fn state_sales(transactions: &[Transaction]) -> Vec<GroupTotal<u64>> {
    top_states(group_by(transactions, Transaction::state, one))
}

/// Attach coordinates to a per-state table.
///
/// Each state takes the coordinates of its first transaction; states absent
/// from `per_state` are dropped.
pub fn geo_table<M: Measure>(
    transactions: &[Transaction],
    per_state: &[GroupTotal<M>],
) -> Vec<GeoRow<M>> {
    let mut seen = HashSet::new();
    let mut rows: Vec<GeoRow<M>> = transactions
        .iter()
        .filter(|t| seen.insert(t.state()))
        .filter_map(|t| {
            per_state
                .iter()
                .find(|row| row.key == t.state())
                .map(|row| GeoRow {
                    state: row.key.clone(),
                    latitude: t.location.latitude,
                    longitude: t.location.longitude,
                    value: row.value,
                })
        })
        .collect();
    rows.sort_by(|a, b| b.value.as_f64().total_cmp(&a.value.as_f64()));
    rows
}

fn monthly<M, V>(transactions: &[Transaction], measure: V) -> Vec<MonthlyRow<M>>
where
    M: Measure,
    V: Fn(&Transaction) -> M,
{
    let mut buckets: BTreeMap<(i32, u32), M> = BTreeMap::new();
    for t in transactions {
        let key = (t.purchase_date.year(), t.purchase_date.month());
        *buckets.entry(key).or_default() += measure(t);
    }

    let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Vec::new();
    };

    // Cover the whole span so that gaps show up as zero
    let mut rows = Vec::new();
    let (mut year, mut month) = first;
    loop {
        let value = buckets.get(&(year, month)).copied().unwrap_or_default();
        rows.push(MonthlyRow::new(year, month, value));
        if (year, month) == last {
            break;
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    rows
}

pub fn monthly_revenue(transactions: &[Transaction]) -> Vec<MonthlyRow<f64>> {
    monthly(transactions, price)
}

pub fn monthly_sales(transactions: &[Transaction]) -> Vec<MonthlyRow<u64>> {
    monthly(transactions, one)
}

pub fn category_revenue(transactions: &[Transaction]) -> Vec<GroupTotal<f64>> {
    let mut rows = group_by(transactions, |t| t.category.as_str(), price);
    sort_descending(&mut rows);
    rows
}

pub fn category_sales(transactions: &[Transaction]) -> Vec<GroupTotal<u64>> {
    let mut rows = group_by(transactions, |t| t.category.as_str(), one);
    sort_descending(&mut rows);
    rows
}

/// Revenue and sales count per salesperson in a single pass, ordered by name.
pub fn salespeople(transactions: &[Transaction]) -> Vec<SalespersonRow> {
    let mut groups: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for t in transactions {
        let entry = groups.entry(t.salesperson.as_str()).or_default();
        entry.0 += t.price;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(name, (revenue, sales))| SalespersonRow {
            name: name.to_string(),
            revenue,
            sales,
        })
        .collect()
}

pub fn top_by_revenue(rows: &[SalespersonRow], n: usize) -> Vec<SalespersonRow> {
    let mut top = rows.to_vec();
    top.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    top.truncate(n);
    top
}

pub fn top_by_sales(rows: &[SalespersonRow], n: usize) -> Vec<SalespersonRow> {
    let mut top = rows.to_vec();
    top.sort_by(|a, b| b.sales.cmp(&a.sales));
    top.truncate(n);
    top
}
