// Pure dashboard pipeline: filter, then derive every summary table
use crate::application::aggregation;
use crate::domain::filter::{FilterCriteria, filter_by_salespeople};
use crate::domain::summary::SummaryTables;
use crate::domain::transaction::Transaction;

/// Recompute all summary tables for one set of criteria.
///
/// Region and year are already applied by the fetch, so only the salesperson
/// subset is filtered here. The result depends on nothing but the inputs.
pub fn compute(transactions: &[Transaction], criteria: &FilterCriteria) -> SummaryTables {
    let filtered = filter_by_salespeople(transactions, &criteria.salespeople);
    aggregate(&filtered, criteria.top_n.get())
}

pub fn aggregate(transactions: &[Transaction], top_n: usize) -> SummaryTables {
    let state_revenue = aggregation::state_revenue(transactions);
    let state_sales = aggregation::state_sales(transactions);
    let geo_revenue = aggregation::geo_table(transactions, &state_revenue);
    let geo_sales = aggregation::geo_table(transactions, &state_sales);
    let salespeople = aggregation::salespeople(transactions);

    SummaryTables {
        total_revenue: transactions.iter().map(|t| t.price).sum(),
        total_sales: transactions.len() as u64,
        geo_revenue,
        geo_sales,
        state_revenue,
        state_sales,
        monthly_revenue: aggregation::monthly_revenue(transactions),
        monthly_sales: aggregation::monthly_sales(transactions),
        category_revenue: aggregation::category_revenue(transactions),
        category_sales: aggregation::category_sales(transactions),
        top_salespeople_revenue: aggregation::top_by_revenue(&salespeople, top_n),
        top_salespeople_sales: aggregation::top_by_sales(&salespeople, top_n),
        salespeople,
    }
}
