//! Rule-based fundamental scoring.
//!
//! Turns five raw ratios into a 0-100 score, a health tier, a valuation
//! category and a short insight. Every rule is a threshold on a single input;
//! the engine holds no state and never draws randomness.

use market_core::{Assessment, Category, HealthTier, Security};
use serde::Serialize;

const BASE_SCORE: i32 = 50;

const NEUTRAL_INSIGHT: &str = "Stable performance consistent with sector averages.";

/// Raw inputs to the scorer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fundamentals {
    pub pe_ratio: f64,
    pub earnings_growth: f64,
    pub revenue_growth: f64,
    pub debt_to_equity: f64,
    pub dividend_yield: f64,
}

impl From<&Security> for Fundamentals {
    fn from(s: &Security) -> Self {
        Self {
            pe_ratio: s.pe_ratio,
            earnings_growth: s.earnings_growth,
            revenue_growth: s.revenue_growth,
            debt_to_equity: s.debt_to_equity,
            dividend_yield: s.dividend_yield,
        }
    }
}

/// Additive score adjustment, triggered by one threshold.
struct Adjustment {
    label: &'static str,
    delta: i32,
    applies: fn(&Fundamentals) -> bool,
}

const ADJUSTMENTS: &[Adjustment] = &[
    Adjustment {
        label: "Low P/E Ratio",
        delta: 15,
        applies: |f| f.pe_ratio > 0.0 && f.pe_ratio < 20.0,
    },
    Adjustment {
        label: "High P/E Ratio",
        delta: -15,
        applies: |f| f.pe_ratio > 50.0,
    },
    Adjustment {
        label: "Strong Earnings Growth",
        delta: 20,
        applies: |f| f.earnings_growth > 15.0,
    },
    Adjustment {
        label: "Shrinking Earnings",
        delta: -20,
        applies: |f| f.earnings_growth < 0.0,
    },
    Adjustment {
        label: "Revenue Growth",
        delta: 10,
        applies: |f| f.revenue_growth > 10.0,
    },
    Adjustment {
        label: "Low Debt",
        delta: 15,
        applies: |f| f.debt_to_equity < 1.0,
    },
    Adjustment {
        label: "High Debt",
        delta: -20,
        applies: |f| f.debt_to_equity > 2.0,
    },
    Adjustment {
        label: "Dividend Yield",
        delta: 5,
        applies: |f| f.dividend_yield > 3.0,
    },
];

/// Category rule; the first matching entry wins.
struct CategoryRule {
    category: Category,
    matches: fn(&Fundamentals) -> bool,
}

const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::UndervaluedGrowing,
        matches: |f| f.pe_ratio < 25.0 && f.earnings_growth > 15.0 && f.debt_to_equity < 1.5,
    },
    CategoryRule {
        category: Category::HighGrowth,
        matches: |f| f.earnings_growth > 25.0 && f.revenue_growth > 20.0,
    },
    CategoryRule {
        category: Category::Overvalued,
        matches: |f| f.pe_ratio > 60.0 || (f.pe_ratio < 0.0 && f.pe_ratio > -100.0),
    },
    CategoryRule {
        category: Category::Risky,
        matches: |f| f.debt_to_equity > 2.5 || f.earnings_growth < -10.0,
    },
];

const FALLBACK_CATEGORY: Category = Category::FairlyValued;

/// Insight sentence; all matching entries are emitted in table order.
struct InsightRule {
    sentence: &'static str,
    applies: fn(&Fundamentals, HealthTier) -> bool,
}

const INSIGHT_RULES: &[InsightRule] = &[
    InsightRule {
        sentence: "Solid fundamentals across the board.",
        applies: |_, h| h == HealthTier::Strong,
    },
    InsightRule {
        sentence: "Exceptional earnings momentum.",
        applies: |f, _| f.earnings_growth > 20.0,
    },
    InsightRule {
        sentence: "Trading at a discount to industry.",
        applies: |f, _| f.pe_ratio < 15.0,
    },
    InsightRule {
        sentence: "High leverage concerns detected.",
        applies: |f, _| f.debt_to_equity > 2.0,
    },
    InsightRule {
        sentence: "Strong top-line expansion.",
        applies: |f, _| f.revenue_growth > 15.0,
    },
];

/// A triggered score adjustment, for display alongside the score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDriver {
    pub label: &'static str,
    pub delta: i32,
}

pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Full assessment: score, health, category, insight.
    pub fn assess(&self, f: &Fundamentals) -> Assessment {
        let score = self.score(f);
        let health = HealthTier::from_score(score);

        Assessment {
            score,
            health,
            category: self.categorize(f),
            insight: self.insight(f, health),
        }
    }

    /// Clamped 0-100 score.
    pub fn score(&self, f: &Fundamentals) -> u8 {
        let raw: i32 = BASE_SCORE + self.drivers(f).iter().map(|d| d.delta).sum::<i32>();
        raw.clamp(0, 100) as u8
    }

    /// Adjustments that fired for these inputs, in evaluation order.
    pub fn drivers(&self, f: &Fundamentals) -> Vec<ScoreDriver> {
        ADJUSTMENTS
            .iter()
            .filter(|a| (a.applies)(f))
            .map(|a| ScoreDriver { label: a.label, delta: a.delta })
            .collect()
    }

    pub fn categorize(&self, f: &Fundamentals) -> Category {
        CATEGORY_RULES
            .iter()
            .find(|rule| (rule.matches)(f))
            .map(|rule| rule.category)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    pub fn insight(&self, f: &Fundamentals, health: HealthTier) -> String {
        let sentences: Vec<&str> = INSIGHT_RULES
            .iter()
            .filter(|rule| (rule.applies)(f, health))
            .map(|rule| rule.sentence)
            .collect();

        if sentences.is_empty() {
            NEUTRAL_INSIGHT.to_string()
        } else {
            sentences.join(" ")
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper around [`ScoringEngine::assess`].
pub fn assess(
    pe_ratio: f64,
    earnings_growth: f64,
    revenue_growth: f64,
    debt_to_equity: f64,
    dividend_yield: f64,
) -> Assessment {
    ScoringEngine::new().assess(&Fundamentals {
        pe_ratio,
        earnings_growth,
        revenue_growth,
        debt_to_equity,
        dividend_yield,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fundamentals(pe: f64, eg: f64, rg: f64, de: f64, dy: f64) -> Fundamentals {
        Fundamentals {
            pe_ratio: pe,
            earnings_growth: eg,
            revenue_growth: rg,
            debt_to_equity: de,
            dividend_yield: dy,
        }
    }

    #[test]
    fn test_undervalued_growing_example() {
        // 50 + 15 (pe) + 20 (eg) + 0 (rg) + 0 (debt between 1 and 2) = 85
        let a = assess(18.0, 20.0, 5.0, 1.2, 1.0);
        assert_eq!(a.category, Category::UndervaluedGrowing);
        assert_eq!(a.score, 85);
        assert_eq!(a.health, HealthTier::Strong);
        assert_eq!(a.health, HealthTier::from_score(a.score));
    }

    #[test]
    fn test_score_clamps_high() {
        // Every bullish rule: 50 + 15 + 20 + 10 + 15 + 5 = 115
        let a = assess(10.0, 30.0, 30.0, 0.5, 5.0);
        assert_eq!(a.score, 100);
        assert_eq!(a.health, HealthTier::Strong);
    }

    #[test]
    fn test_score_clamps_low() {
        // 50 - 15 - 20 - 20 = -5
        let a = assess(80.0, -5.0, 0.0, 3.0, 0.0);
        assert_eq!(a.score, 0);
        assert_eq!(a.health, HealthTier::Risky);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let engine = ScoringEngine::new();
        // pe == 20, eg == 15, rg == 10, debt == 1.0 and 2.0, yield == 3 trigger nothing
        assert_eq!(engine.score(&fundamentals(20.0, 15.0, 10.0, 1.0, 3.0)), 50);
        assert_eq!(engine.score(&fundamentals(50.0, 0.0, 10.0, 2.0, 3.0)), 50);
        assert!(engine.drivers(&fundamentals(50.0, 0.0, 10.0, 2.0, 3.0)).is_empty());
    }

    #[test]
    fn test_negative_pe_gets_no_value_bonus() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.score(&fundamentals(-5.0, 5.0, 5.0, 1.5, 0.0)), 50);
    }

    #[test]
    fn test_category_first_match_wins() {
        let engine = ScoringEngine::new();

        // Qualifies for both rule 1 and rule 2; rule 1 wins
        assert_eq!(
            engine.categorize(&fundamentals(20.0, 30.0, 25.0, 1.0, 0.0)),
            Category::UndervaluedGrowing
        );
        // Rule 2 and rule 3 both qualify; rule 2 wins
        assert_eq!(
            engine.categorize(&fundamentals(80.0, 30.0, 25.0, 1.0, 0.0)),
            Category::HighGrowth
        );
        // Rule 3 and rule 4 both qualify; rule 3 wins
        assert_eq!(
            engine.categorize(&fundamentals(70.0, -15.0, 0.0, 3.0, 0.0)),
            Category::Overvalued
        );
    }

    #[test]
    fn test_category_boundary_falls_through() {
        let engine = ScoringEngine::new();
        // P/E exactly 25 misses rule 1; nothing later applies
        assert_eq!(
            engine.categorize(&fundamentals(25.0, 16.0, 5.0, 1.0, 0.0)),
            Category::FairlyValued
        );
        // Same, but leverage pushes it into Risky
        assert_eq!(
            engine.categorize(&fundamentals(25.0, 16.0, 5.0, 2.6, 0.0)),
            Category::Risky
        );
    }

    #[test]
    fn test_negative_pe_window_is_overvalued() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.categorize(&fundamentals(-50.0, 5.0, 5.0, 1.0, 0.0)), Category::Overvalued);
        // At or below -100 the negative-earnings rule no longer applies
        assert_eq!(engine.categorize(&fundamentals(-100.0, 5.0, 5.0, 1.0, 0.0)), Category::FairlyValued);
    }

    #[test]
    fn test_category_is_total() {
        let engine = ScoringEngine::new();
        let grid = [-150.0, -100.0, -1.0, 0.0, 15.0, 25.0, 60.0, 61.0, 150.0];
        for pe in grid {
            for eg in [-20.0, -10.0, 0.0, 15.0, 16.0, 25.0, 26.0, 80.0] {
                for rg in [-10.0, 20.0, 21.0, 50.0] {
                    for de in [0.0, 1.5, 2.5, 2.6, 5.0] {
                        let f = fundamentals(pe, eg, rg, de, 0.0);
                        let category = engine.categorize(&f);
                        assert!(Category::ALL.contains(&category));
                        let score = engine.score(&f);
                        assert!(score <= 100);
                    }
                }
            }
        }
    }

    #[test]
    fn test_insight_order_and_neutral_fallback() {
        let a = assess(10.0, 25.0, 20.0, 0.5, 0.0);
        assert_eq!(
            a.insight,
            "Solid fundamentals across the board. Exceptional earnings momentum. \
             Trading at a discount to industry. Strong top-line expansion."
        );

        let neutral = assess(30.0, 5.0, 5.0, 1.5, 0.0);
        assert_eq!(neutral.insight, NEUTRAL_INSIGHT);
    }

    #[test]
    fn test_leverage_insight() {
        let a = assess(30.0, 5.0, 5.0, 2.1, 0.0);
        assert_eq!(a.insight, "High leverage concerns detected.");
    }

    #[test]
    fn test_assess_is_idempotent() {
        let f = fundamentals(42.0, 12.5, 8.0, 1.75, 2.0);
        let engine = ScoringEngine::new();
        assert_eq!(engine.assess(&f), engine.assess(&f));
    }

    #[test]
    fn test_drivers_sum_to_unclamped_score() {
        let f = fundamentals(18.0, 20.0, 12.0, 0.8, 4.0);
        let engine = ScoringEngine::new();
        let total: i32 = engine.drivers(&f).iter().map(|d| d.delta).sum();
        approx::assert_relative_eq!((BASE_SCORE + total) as f64, 115.0);
        assert_eq!(engine.score(&f), 100);
    }
}
