use market_core::{HealthTier, MarketScope, Security};
use serde::Serialize;

/// Headline figures shown above the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub filtered: usize,
    pub strong_count: usize,
    /// Mean earnings growth of the filtered set, one decimal place
    pub avg_earnings_growth: f64,
    /// Mean P/E of the filtered set, one decimal place
    pub avg_pe: f64,
    pub scope_label: &'static str,
}

pub fn summarize(total: usize, view: &[&Security], scope: MarketScope) -> DashboardSummary {
    let strong_count = view
        .iter()
        .filter(|s| s.analysis.health == HealthTier::Strong)
        .count();

    DashboardSummary {
        total,
        filtered: view.len(),
        strong_count,
        avg_earnings_growth: mean(view.iter().map(|s| s.earnings_growth), view.len()),
        avg_pe: mean(view.iter().map(|s| s.pe_ratio), view.len()),
        scope_label: scope.label(),
    }
}

fn mean(values: impl Iterator<Item = f64>, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let avg = values.sum::<f64>() / len as f64;
    (avg * 10.0).round() / 10.0
}
