//! The state shown by an expenses view and the transitions that change it.
//!
//! [reduce] is a pure function of the current state and an [Action], so the
//! same state drives the server-rendered page and the [Controller](super::Controller).

use crate::{
    expense::{Expense, MonthSummary},
    month::MonthScope,
};

/// A step through the calendar, one month at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The month before.
    Previous,
    /// The month after.
    Next,
}

impl Step {
    /// The signed number of months this step moves.
    pub fn delta(self) -> i32 {
        match self {
            Step::Previous => -1,
            Step::Next => 1,
        }
    }
}

/// The totals and listing fetched for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthData {
    /// The month the data was fetched for.
    pub scope: MonthScope,
    /// The spending and income totals.
    pub summary: MonthSummary,
    /// The month's records in ID order.
    pub expenses: Vec<Expense>,
}

/// The events that change a [ViewState].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the selected month one step.
    Navigate(Step),
    /// A fetch finished with the data for its month.
    Loaded(MonthData),
    /// A record was created, updated or deleted and the data must be fetched again.
    Mutated,
    /// A fetch for the month failed.
    FetchFailed(MonthScope),
}

/// The selected month and the most recent data shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    current: MonthScope,
    data: Option<MonthData>,
    stale: bool,
}

impl ViewState {
    /// A view of `current` with nothing fetched yet.
    pub fn new(current: MonthScope) -> Self {
        Self {
            current,
            data: None,
            stale: false,
        }
    }

    /// The selected month.
    pub fn current(&self) -> MonthScope {
        self.current
    }

    /// The month the "previous" control navigates to.
    pub fn previous_month(&self) -> MonthScope {
        self.current.previous()
    }

    /// The month the "next" control navigates to.
    pub fn next_month(&self) -> MonthScope {
        self.current.next()
    }

    /// The most recently loaded data.
    ///
    /// After navigating this may still hold the previous month until the new
    /// month is loaded.
    pub fn data(&self) -> Option<&MonthData> {
        self.data.as_ref()
    }

    /// Whether the data for the selected month has to be fetched.
    pub fn needs_fetch(&self) -> bool {
        self.stale
            || self
                .data
                .as_ref()
                .is_none_or(|data| data.scope != self.current)
    }
}

/// Apply `action` to `state`, returning the next state.
///
/// Data loaded for a month other than the selected one is stale and is
/// discarded. A failed fetch leaves the state unchanged.
pub fn reduce(state: &ViewState, action: Action) -> ViewState {
    match action {
        Action::Navigate(step) => ViewState {
            current: state.current.offset(step.delta()).unwrap_or(state.current),
            ..state.clone()
        },
        Action::Loaded(data) if data.scope == state.current => ViewState {
            current: state.current,
            data: Some(data),
            stale: false,
        },
        Action::Loaded(_) | Action::FetchFailed(_) => state.clone(),
        Action::Mutated => ViewState {
            stale: true,
            ..state.clone()
        },
    }
}
