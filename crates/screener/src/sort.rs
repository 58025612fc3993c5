use std::cmp::Ordering;

use market_core::Security;
use serde::{Deserialize, Serialize};

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[serde(rename = "healthRank")]
    Health,
    Symbol,
    Category,
    Price,
    PeRatio,
    EarningsGrowth,
    RevenueGrowth,
    DebtToEquity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortColumn {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Ordered list of sort columns; earlier columns take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec(pub Vec<SortColumn>);

impl Default for SortSpec {
    /// Quality first: Strong, then Average, then Risky.
    fn default() -> Self {
        Self(vec![SortColumn {
            key: SortKey::Health,
            direction: SortDirection::Asc,
        }])
    }
}

impl SortSpec {
    /// Cycle one column. Health rank stays the primary key and only flips
    /// between ascending and descending. Any other column goes absent ->
    /// ascending (appended after existing keys) -> descending -> removed.
    pub fn toggle(&mut self, key: SortKey) {
        let position = self.0.iter().position(|c| c.key == key);
        if key == SortKey::Health {
            match position {
                Some(i) => {
                    let column = self.0.remove(i);
                    self.0.insert(
                        0,
                        SortColumn {
                            key,
                            direction: column.direction.flipped(),
                        },
                    );
                }
                None => self.0.insert(
                    0,
                    SortColumn {
                        key,
                        direction: SortDirection::Asc,
                    },
                ),
            }
            return;
        }

        match position {
            None => self.0.push(SortColumn {
                key,
                direction: SortDirection::Asc,
            }),
            Some(i) if self.0[i].direction == SortDirection::Asc => {
                self.0[i].direction = SortDirection::Desc;
            }
            Some(i) => {
                self.0.remove(i);
            }
        }
    }

    pub fn columns(&self) -> &[SortColumn] {
        &self.0
    }

    pub fn compare(&self, a: &Security, b: &Security) -> Ordering {
        self.0.iter().fold(Ordering::Equal, |acc, column| {
            acc.then_with(|| {
                let ord = compare_by(column.key, a, b);
                match column.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            })
        })
    }
}

fn compare_by(key: SortKey, a: &Security, b: &Security) -> Ordering {
    match key {
        SortKey::Health => a.analysis.health.rank().cmp(&b.analysis.health.rank()),
        SortKey::Symbol => a.symbol.cmp(&b.symbol),
        SortKey::Category => a.analysis.category.as_str().cmp(b.analysis.category.as_str()),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::PeRatio => a.pe_ratio.total_cmp(&b.pe_ratio),
        SortKey::EarningsGrowth => a.earnings_growth.total_cmp(&b.earnings_growth),
        SortKey::RevenueGrowth => a.revenue_growth.total_cmp(&b.revenue_growth),
        SortKey::DebtToEquity => a.debt_to_equity.total_cmp(&b.debt_to_equity),
    }
}

/// Stable in-place sort; equal rows keep their incoming order.
pub fn sort_view(view: &mut [&Security], spec: &SortSpec) {
    if spec.0.is_empty() {
        return;
    }
    view.sort_by(|a, b| spec.compare(a, b));
}
