use market_core::{FilterCriteria, Security};

/// Whether `security` passes `criteria`.
///
/// Checks run cheapest-rejection first: market, search text, category, then
/// the three numeric bounds. Only `max_pe`, `min_growth` and `max_debt` are
/// consulted; `min_pe` is reserved.
pub fn matches(security: &Security, criteria: &FilterCriteria) -> bool {
    if !criteria.market.matches(security.market) {
        return false;
    }

    if !criteria.search.is_empty() {
        let query = criteria.search.to_lowercase();
        let hit = security.symbol.to_lowercase().contains(&query)
            || security.name.to_lowercase().contains(&query)
            || security.sector.to_lowercase().contains(&query);
        if !hit {
            return false;
        }
    }

    if !criteria.categories.is_empty() && !criteria.categories.contains(&security.analysis.category) {
        return false;
    }

    if security.pe_ratio > criteria.max_pe {
        return false;
    }
    if security.earnings_growth < criteria.min_growth {
        return false;
    }
    if security.debt_to_equity > criteria.max_debt {
        return false;
    }

    true
}

/// Borrowed view of every matching security, in dataset order.
pub fn apply_filter<'a>(securities: &'a [Security], criteria: &FilterCriteria) -> Vec<&'a Security> {
    securities.iter().filter(|s| matches(s, criteria)).collect()
}
