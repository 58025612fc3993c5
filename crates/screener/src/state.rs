//! Dashboard session state.
//!
//! One `DashboardState` per session. Every user interaction is a
//! `DashboardAction` fed through [`DashboardState::update`]; the two AI
//! affordances additionally go through `begin`/`finish` so that at most one
//! call of each kind is outstanding.

use market_core::{AiAssessment, AiError, Category, CriteriaPatch, FilterCriteria, MarketScope, Security};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::detail::DetailView;
use crate::sort::{SortKey, SortSpec};

pub const QUERY_NOT_CONFIGURED_MSG: &str = "Please add OPENAI_API_KEY to .env";
pub const QUERY_FAILED_MSG: &str = "Failed to interpret query. Try again.";

/// The two AI-backed operations a user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Affordance {
    FilterQuery,
    Analysis,
}

impl std::fmt::Display for Affordance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Affordance::FilterQuery => write!(f, "filter query"),
            Affordance::Analysis => write!(f, "analysis"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("An AI {0} request is already in progress")]
    Busy(Affordance),

    #[error("No security is selected")]
    NoSelection,
}

#[derive(Debug, Clone)]
pub enum DashboardAction {
    SetCriteria(FilterCriteria),
    ApplyPatch(CriteriaPatch),
    ToggleCategory(Category),
    SetMarket(MarketScope),
    SetSearch(String),
    SetMaxPe(f64),
    SetMinGrowth(f64),
    SetMaxDebt(f64),
    ResetFilters,
    ToggleSort(SortKey),
    Select(Box<Security>),
    CloseDetail,
}

/// Proof of a claimed affordance, tied to the selection it was claimed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    selection: u64,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    criteria: FilterCriteria,
    sort: SortSpec,
    detail: Option<DetailView>,
    /// Bumped on every select and close.
    selection: u64,
    filter_query_pending: bool,
    /// Selection generation of the outstanding analysis call, if any.
    analysis_claim: Option<u64>,
    query_error: Option<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.detail.as_ref().map(|d| d.security().id)
    }

    pub fn query_error(&self) -> Option<&str> {
        self.query_error.as_deref()
    }

    pub fn is_pending(&self, affordance: Affordance) -> bool {
        match affordance {
            Affordance::FilterQuery => self.filter_query_pending,
            Affordance::Analysis => self.analysis_claim.is_some(),
        }
    }

    pub fn update(&mut self, action: DashboardAction) {
        match action {
            DashboardAction::SetCriteria(criteria) => self.criteria = criteria,
            DashboardAction::ApplyPatch(patch) => self.criteria.apply_patch(patch),
            DashboardAction::ToggleCategory(category) => self.criteria.toggle_category(category),
            DashboardAction::SetMarket(scope) => self.criteria.market = scope,
            DashboardAction::SetSearch(search) => self.criteria.search = search,
            DashboardAction::SetMaxPe(v) => self.criteria.max_pe = v,
            DashboardAction::SetMinGrowth(v) => self.criteria.min_growth = v,
            DashboardAction::SetMaxDebt(v) => self.criteria.max_debt = v,
            DashboardAction::ResetFilters => {
                self.criteria = FilterCriteria::default();
                self.query_error = None;
            }
            DashboardAction::ToggleSort(key) => self.sort.toggle(key),
            DashboardAction::Select(security) => {
                self.detail = Some(DetailView::new(&security));
                self.selection += 1;
            }
            DashboardAction::CloseDetail => {
                self.detail = None;
                self.selection += 1;
            }
        }
    }

    /// Claim an affordance before issuing its AI call. The slot stays held
    /// until the call's outcome is recorded, even if the selection changes
    /// in the meantime.
    pub fn begin(&mut self, affordance: Affordance) -> Result<Ticket, StateError> {
        if affordance == Affordance::Analysis && self.detail.is_none() {
            return Err(StateError::NoSelection);
        }
        if self.is_pending(affordance) {
            return Err(StateError::Busy(affordance));
        }
        match affordance {
            Affordance::FilterQuery => self.filter_query_pending = true,
            Affordance::Analysis => self.analysis_claim = Some(self.selection),
        }
        Ok(Ticket {
            selection: self.selection,
        })
    }

    /// Release an affordance without recording an outcome.
    pub fn finish(&mut self, affordance: Affordance) {
        match affordance {
            Affordance::FilterQuery => self.filter_query_pending = false,
            Affordance::Analysis => self.analysis_claim = None,
        }
    }

    /// Merge a suggested patch into the criteria, or keep them unchanged and
    /// surface an inline message on failure.
    pub fn complete_filter_query(&mut self, outcome: Result<CriteriaPatch, AiError>) {
        self.finish(Affordance::FilterQuery);
        match outcome {
            Ok(patch) => {
                self.criteria.apply_patch(patch);
                self.query_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Filter query failed, criteria unchanged");
                let message = if e.is_configuration() {
                    QUERY_NOT_CONFIGURED_MSG
                } else {
                    QUERY_FAILED_MSG
                };
                self.query_error = Some(message.to_string());
            }
        }
    }

    /// Record the outcome of the analysis claimed with `ticket` and release
    /// the slot. The result is applied only while the detail view is the one
    /// the call was issued for; a close or re-select in between drops it.
    pub fn complete_analysis(&mut self, ticket: Ticket, outcome: Result<AiAssessment, AiError>) -> bool {
        if self.analysis_claim != Some(ticket.selection) {
            tracing::warn!(?ticket, "Analysis outcome without a matching claim");
            return false;
        }
        self.analysis_claim = None;

        match self.detail.as_mut() {
            Some(view) if ticket.selection == self.selection => {
                view.apply_analysis(outcome);
                true
            }
            _ => {
                tracing::debug!(?ticket, "Discarding analysis for a replaced detail view");
                false
            }
        }
    }
}
