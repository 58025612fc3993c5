use fundamental_scoring::{Fundamentals, ScoreDriver, ScoringEngine};
use market_core::{AiAssessment, AiError, Category, HealthTier, Security};
use serde::Serialize;

use crate::display::{format_market_cap, format_percent, format_price};

pub const ANALYSIS_NOT_CONFIGURED_MSG: &str =
    "Please add OPENAI_API_KEY to .env to use this feature.";
pub const ANALYSIS_FAILED_MSG: &str = "Analysis failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// One chart's worth of data; rendering is left to the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: &'static str,
    pub name: &'static str,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Serializable state of an open detail view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailSnapshot {
    pub security: Security,
    pub health: HealthTier,
    pub insight: String,
    pub category: Category,
    pub score: u8,
    pub ai_generated: bool,
    pub error: Option<String>,
    pub price_display: String,
    pub market_cap_display: String,
    pub earnings_growth_display: String,
    pub revenue_growth_display: String,
    pub score_drivers: Vec<ScoreDriver>,
    pub charts: Vec<ChartSeries>,
}

/// Transient per-security view.
///
/// An AI re-analysis replaces the displayed health and insight here only;
/// the canonical security in the universe is never touched.
#[derive(Debug, Clone)]
pub struct DetailView {
    security: Security,
    ai_override: Option<AiAssessment>,
    error: Option<String>,
}

impl DetailView {
    pub fn new(security: &Security) -> Self {
        Self {
            security: security.clone(),
            ai_override: None,
            error: None,
        }
    }

    pub fn security(&self) -> &Security {
        &self.security
    }

    pub fn current_health(&self) -> HealthTier {
        self.ai_override
            .as_ref()
            .map(|a| a.health)
            .unwrap_or(self.security.analysis.health)
    }

    pub fn current_insight(&self) -> &str {
        self.ai_override
            .as_ref()
            .map(|a| a.insight.as_str())
            .unwrap_or(self.security.analysis.insight.as_str())
    }

    pub fn is_ai_generated(&self) -> bool {
        self.ai_override.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Record the outcome of a re-analysis. Failures keep whatever was shown
    /// before and set an inline message.
    pub fn apply_analysis(&mut self, outcome: Result<AiAssessment, AiError>) {
        match outcome {
            Ok(assessment) => {
                self.ai_override = Some(assessment);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(symbol = %self.security.symbol, error = %e, "AI analysis failed, keeping prior insight");
                let message = if e.is_configuration() {
                    ANALYSIS_NOT_CONFIGURED_MSG
                } else {
                    ANALYSIS_FAILED_MSG
                };
                self.error = Some(message.to_string());
            }
        }
    }

    pub fn charts(&self) -> Vec<ChartSeries> {
        let labels: Vec<String> = self.security.history.iter().map(|h| h.period.clone()).collect();
        vec![
            ChartSeries {
                title: "Quarterly Earnings Trend",
                name: "Earnings",
                kind: ChartKind::Bar,
                labels: labels.clone(),
                values: self.security.history.iter().map(|h| h.earnings).collect(),
            },
            ChartSeries {
                title: "Revenue Growth",
                name: "Revenue",
                kind: ChartKind::Line,
                labels,
                values: self.security.history.iter().map(|h| h.revenue).collect(),
            },
        ]
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        let s = &self.security;
        DetailSnapshot {
            security: s.clone(),
            health: self.current_health(),
            insight: self.current_insight().to_string(),
            category: s.analysis.category,
            score: s.analysis.score,
            ai_generated: self.is_ai_generated(),
            error: self.error.clone(),
            price_display: format_price(s.price, s.market),
            market_cap_display: format_market_cap(s.market_cap as f64, s.market),
            earnings_growth_display: format_percent(s.earnings_growth),
            revenue_growth_display: format_percent(s.revenue_growth),
            score_drivers: ScoringEngine::new().drivers(&Fundamentals::from(s)),
            charts: self.charts(),
        }
    }
}
