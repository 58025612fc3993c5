use std::time::Instant;

use chrono::{Duration, NaiveDate, Utc};
use fundamental_scoring::{Fundamentals, ScoringEngine};
use market_core::{Market, Security};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::history::generate_history;
use crate::names;
use crate::sampling::rounded;

/// Default universe size for a dashboard session
pub const DEFAULT_UNIVERSE_SIZE: usize = 10_000;

/// Report dates fall within this many days before the as-of date.
const REPORT_WINDOW_DAYS: i64 = 90;

/// Generation parameters
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub count: usize,
    /// Fixed seed for reproducible output; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Anchor for report dates.
    pub as_of: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_UNIVERSE_SIZE,
            seed: None,
            as_of: Utc::now().date_naive(),
        }
    }
}

pub struct UniverseGenerator {
    config: GeneratorConfig,
    scoring: ScoringEngine,
}

impl UniverseGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            scoring: ScoringEngine::new(),
        }
    }

    pub fn with_seed(count: usize, seed: u64, as_of: NaiveDate) -> Self {
        Self::new(GeneratorConfig {
            count,
            seed: Some(seed),
            as_of,
        })
    }

    /// Generate the full universe. Returns the securities and the seed used.
    pub fn generate(&self) -> (Vec<Security>, u64) {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let start = Instant::now();
        let securities = self.generate_with(&mut rng);
        tracing::info!(
            count = securities.len(),
            seed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generated security universe"
        );

        (securities, seed)
    }

    /// Generate `config.count` securities from the given RNG.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Security> {
        (0..self.config.count).map(|_| self.generate_one(rng)).collect()
    }

    fn generate_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Security {
        let market = if rng.gen_bool(0.5) { Market::In } else { Market::Global };

        // Price scale differs per market; purely cosmetic.
        let price = match market {
            Market::In => rounded(rng, 50.0, 5000.0, 2),
            Market::Global => rounded(rng, 10.0, 1000.0, 2),
        };

        let fundamentals = Fundamentals {
            pe_ratio: rounded(rng, 5.0, 150.0, 2),
            earnings_growth: rounded(rng, -20.0, 80.0, 1),
            revenue_growth: rounded(rng, -10.0, 50.0, 1),
            debt_to_equity: rounded(rng, 0.0, 5.0, 2),
            dividend_yield: rounded(rng, 0.0, 8.0, 2),
        };
        let analysis = self.scoring.assess(&fundamentals);

        let name = names::company_name(rng, market);
        let symbol = names::ticker(rng, market, &name);

        let base_revenue = rng.gen_range(1_000_000u64..=50_000_000) as f64;
        let base_earnings = base_revenue * rounded(rng, 0.05, 0.25, 4);
        let history = generate_history(rng, base_revenue, base_earnings, fundamentals.debt_to_equity);

        let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        let sector = names::sector(rng);
        let market_cap = rng.gen_range(100_000_000u64..=2_000_000_000_000);
        let last_report_date =
            self.config.as_of - Duration::days(rng.gen_range(0..REPORT_WINDOW_DAYS));

        Security {
            id,
            symbol,
            name,
            sector,
            market,
            price,
            pe_ratio: fundamentals.pe_ratio,
            earnings_growth: fundamentals.earnings_growth,
            revenue_growth: fundamentals.revenue_growth,
            debt_to_equity: fundamentals.debt_to_equity,
            dividend_yield: fundamentals.dividend_yield,
            market_cap,
            last_report_date,
            analysis,
            history,
        }
    }
}

impl Default for UniverseGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Lookup helper used by the detail view.
pub fn find_by_id(securities: &[Security], id: Uuid) -> Option<&Security> {
    securities.iter().find(|s| s.id == id)
}
