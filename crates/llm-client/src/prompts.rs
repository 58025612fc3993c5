//! Prompt text for the two completion calls.

use market_core::{FilterCriteria, Security};

pub const FILTER_SYSTEM_PROMPT: &str = "You are a JSON generator.";
pub const FILTER_TEMPERATURE: f32 = 0.1;
pub const ANALYSIS_TEMPERATURE: f32 = 0.3;

pub fn filter_prompt(query: &str, current: &FilterCriteria) -> String {
    let current_json = serde_json::to_string(current).unwrap_or_else(|_| "{}".to_string());
    format!(
        r#"You are a financial data assistant. Convert the user's natural language query into a JSON filter object for a stock database.

Filter schema:
- search: string (matches name, symbol or sector)
- minPe: number (default 0)
- maxPe: number (default 150)
- minGrowth: number (earnings growth %, default -50)
- maxDebt: number (debt/equity ratio, default 5)
- categories: array of ["Undervalued & Growing", "High Growth", "Fairly Valued", "Risky", "Overvalued"]
- market: "ALL" | "IN" | "GLOBAL"

Current filters: {current_json}

User query: "{query}"

Rules:
- Return ONLY valid JSON.
- "Indian" or "India" means market "IN".
- "Global" or "US" means market "GLOBAL".
- "Undervalued" usually means maxPe below 20.
- "High growth" usually means minGrowth above 15.
- "Safe" or "low risk" usually means maxDebt below 1.0.
- Only include fields that need to change."#
    )
}

pub fn analysis_prompt(security: &Security) -> String {
    let history = security
        .history
        .iter()
        .map(|h| format!("{}: Rev {:.0}, Earn {:.0}, Debt {:.2}", h.period, h.revenue, h.earnings, h.debt))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyze the following quarterly financial results for {name} ({symbol}).

Financial context:
- P/E Ratio: {pe}
- Debt/Equity: {debt}
- Sector: {sector}

Quarterly history:
{history}

Task:
1. Determine the health status: "Strong", "Average", or "Risky".
2. Write a concise 2-sentence insight explaining why, focusing on the trend of earnings and debt.

Output format (JSON):
{{"health": "Strong" | "Average" | "Risky", "insight": "Your explanation here."}}"#,
        name = security.name,
        symbol = security.symbol,
        pe = security.pe_ratio,
        debt = security.debt_to_equity,
        sector = security.sector,
    )
}
