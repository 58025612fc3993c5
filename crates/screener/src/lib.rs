//! Screener
//!
//! Derived, read-only views over the security universe: the filter
//! predicate, the multi-column sort, the dashboard state machine, the
//! detail view, headline statistics and CSV export.

pub mod detail;
pub mod display;
pub mod export;
pub mod filter;
pub mod sort;
pub mod state;
pub mod summary;

pub use detail::{
    ChartKind, ChartSeries, DetailSnapshot, DetailView, ANALYSIS_FAILED_MSG, ANALYSIS_NOT_CONFIGURED_MSG,
};
pub use export::{export_csv, EXPORT_CONTENT_TYPE, EXPORT_FILENAME, EXPORT_ROW_LIMIT};
pub use filter::{apply_filter, matches};
pub use sort::{sort_view, SortColumn, SortDirection, SortKey, SortSpec};
pub use state::{
    Affordance, DashboardAction, DashboardState, StateError, Ticket, QUERY_FAILED_MSG,
    QUERY_NOT_CONFIGURED_MSG,
};
pub use summary::{summarize, DashboardSummary};

use market_core::{FilterCriteria, Security};

/// Filter then sort: the rows the table shows.
pub fn screen<'a>(
    securities: &'a [Security],
    criteria: &FilterCriteria,
    sort: &SortSpec,
) -> Vec<&'a Security> {
    let mut view = apply_filter(securities, criteria);
    sort_view(&mut view, sort);
    view
}
