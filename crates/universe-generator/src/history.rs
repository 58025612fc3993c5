use market_core::HistoryPoint;
use rand::Rng;

use crate::sampling::uniform;

/// Reporting periods, oldest first.
pub const HISTORY_PERIODS: [&str; 5] = ["Q1 2024", "Q2 2024", "Q3 2024", "Q4 2024", "Q1 2025"];

/// Every series starts at this fraction of its base so the trend reads upward.
const START_FRACTION: f64 = 0.8;

const REVENUE_GROWTH: (f64, f64) = (0.95, 1.15);
const EARNINGS_NOISE: (f64, f64) = (0.9, 1.1);
const DEBT_DRIFT: (f64, f64) = (0.98, 1.05);

/// Compounding five-period history.
///
/// Each period multiplies the previous one: revenue by a growth factor,
/// earnings by the same factor times an independent noise factor, debt by a
/// small drift. Negative earnings stay negative; nothing is clamped.
pub fn generate_history<R: Rng + ?Sized>(
    rng: &mut R,
    base_revenue: f64,
    base_earnings: f64,
    base_debt: f64,
) -> Vec<HistoryPoint> {
    let mut revenue = base_revenue * START_FRACTION;
    let mut earnings = base_earnings * START_FRACTION;
    let mut debt = base_debt * START_FRACTION;

    HISTORY_PERIODS
        .iter()
        .map(|period| {
            let growth = uniform(rng, REVENUE_GROWTH.0, REVENUE_GROWTH.1);
            revenue *= growth;
            earnings *= growth * uniform(rng, EARNINGS_NOISE.0, EARNINGS_NOISE.1);
            debt *= uniform(rng, DEBT_DRIFT.0, DEBT_DRIFT.1);

            HistoryPoint {
                period: (*period).to_string(),
                revenue,
                earnings,
                debt,
            }
        })
        .collect()
}
