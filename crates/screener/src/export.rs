//! CSV export of the visible rows.
//!
//! Free-text columns are wrapped in double quotes as-is; embedded quotes are
//! not escaped, so downstream tools see exactly what the table shows.

use market_core::Security;

pub const EXPORT_ROW_LIMIT: usize = 1_000;
pub const EXPORT_FILENAME: &str = "market_analysis_export.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

const HEADER: &str = "Symbol,Name,Market,Category,Price,P/E,Earn Growth,Rev Growth,Debt/Eq,Insight";

/// Render `view` (already filtered and sorted) as CSV text.
pub fn export_csv(view: &[&Security]) -> String {
    let rows = view.iter().take(EXPORT_ROW_LIMIT).map(|s| row(s));
    std::iter::once(HEADER.to_string())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

fn row(s: &Security) -> String {
    format!(
        "{},\"{}\",{},{},{},{},{},{},{},\"{}\"",
        s.symbol,
        s.name,
        s.market.as_str(),
        s.analysis.category.as_str(),
        s.price,
        s.pe_ratio,
        s.earnings_growth,
        s.revenue_growth,
        s.debt_to_equity,
        s.analysis.insight,
    )
}
