use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exchange grouping a security is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    In,
    Global,
}

impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::In => "IN",
            Market::Global => "GLOBAL",
        }
    }
}

/// Market selector used by the screener ("ALL" disables the check)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketScope {
    #[default]
    All,
    In,
    Global,
}

impl MarketScope {
    pub fn matches(&self, market: Market) -> bool {
        match self {
            MarketScope::All => true,
            MarketScope::In => market == Market::In,
            MarketScope::Global => market == Market::Global,
        }
    }

    /// Human-readable label for the scope card
    pub fn label(&self) -> &'static str {
        match self {
            MarketScope::All => "Global + India",
            MarketScope::In => "India Only",
            MarketScope::Global => "Global Only",
        }
    }
}

/// Valuation bucket assigned by the rule-based scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Undervalued & Growing")]
    UndervaluedGrowing,
    #[serde(rename = "High Growth")]
    HighGrowth,
    #[serde(rename = "Fairly Valued")]
    FairlyValued,
    #[serde(rename = "Risky")]
    Risky,
    #[serde(rename = "Overvalued")]
    Overvalued,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::UndervaluedGrowing,
        Category::HighGrowth,
        Category::FairlyValued,
        Category::Risky,
        Category::Overvalued,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::UndervaluedGrowing => "Undervalued & Growing",
            Category::HighGrowth => "High Growth",
            Category::FairlyValued => "Fairly Valued",
            Category::Risky => "Risky",
            Category::Overvalued => "Overvalued",
        }
    }
}

/// Health tier, ordered Strong > Average > Risky
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthTier {
    Strong,
    Average,
    Risky,
}

impl HealthTier {
    /// Strong at 75 and above, Risky at 40 and below.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 75 => HealthTier::Strong,
            s if s <= 40 => HealthTier::Risky,
            _ => HealthTier::Average,
        }
    }

    /// Sort rank: Strong=1, Average=2, Risky=3
    pub fn rank(&self) -> u8 {
        match self {
            HealthTier::Strong => 1,
            HealthTier::Average => 2,
            HealthTier::Risky => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTier::Strong => "Strong",
            HealthTier::Average => "Average",
            HealthTier::Risky => "Risky",
        }
    }
}

/// One reporting period of a security's financial history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub period: String,
    pub revenue: f64,
    pub earnings: f64,
    pub debt: f64,
}

/// Output of the rule-based scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub score: u8,
    pub health: HealthTier,
    pub category: Category,
    pub insight: String,
}

/// A single synthetic equity with its fundamentals and precomputed assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub market: Market,
    pub price: f64,
    pub pe_ratio: f64,
    /// Percentage
    pub earnings_growth: f64,
    /// Percentage
    pub revenue_growth: f64,
    pub debt_to_equity: f64,
    /// Percentage
    pub dividend_yield: f64,
    pub market_cap: u64,
    pub last_report_date: NaiveDate,
    pub analysis: Assessment,
    /// Oldest period first
    pub history: Vec<HistoryPoint>,
}

/// Active screener filter. Replaced wholesale on every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search: String,
    /// Reserved: no control or predicate reads it.
    pub min_pe: f64,
    pub max_pe: f64,
    pub min_growth: f64,
    pub max_debt: f64,
    pub categories: Vec<Category>,
    pub market: MarketScope,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_pe: 0.0,
            max_pe: 150.0,
            min_growth: -50.0,
            max_debt: 5.0,
            categories: Vec::new(),
            market: MarketScope::All,
        }
    }
}

impl FilterCriteria {
    /// Overwrite only the fields present in `patch`.
    pub fn apply_patch(&mut self, patch: CriteriaPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(min_pe) = patch.min_pe {
            self.min_pe = min_pe;
        }
        if let Some(max_pe) = patch.max_pe {
            self.max_pe = max_pe;
        }
        if let Some(min_growth) = patch.min_growth {
            self.min_growth = min_growth;
        }
        if let Some(max_debt) = patch.max_debt {
            self.max_debt = max_debt;
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(market) = patch.market {
            self.market = market;
        }
    }

    pub fn toggle_category(&mut self, category: Category) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }
}

/// Partial criteria update; absent fields leave the current value untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_pe: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pe: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_growth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_debt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketScope>,
}

impl CriteriaPatch {
    pub fn is_empty(&self) -> bool {
        *self == CriteriaPatch::default()
    }
}

/// Replacement narrative produced by an external re-analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAssessment {
    pub health: HealthTier,
    pub insight: String,
}
