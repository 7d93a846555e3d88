//! Per-conversation state, passed explicitly into routing.
//!
//! Each chat surface owns its own `ChatSession` value; there is no
//! process-wide session registry.

use crate::expense::ParsedExpense;
use crate::welfare::WelfareService;

#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    /// Parsed expense waiting for the user to confirm a transaction date.
    pub pending_expense: Option<ParsedExpense>,
    /// Services surfaced by the last recommendation, for detail requests.
    pub last_recommended: Vec<WelfareService>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pending(&mut self, expense: ParsedExpense) {
        self.pending_expense = Some(expense);
    }

    pub fn take_pending(&mut self) -> Option<ParsedExpense> {
        self.pending_expense.take()
    }

    pub fn remember_recommendation(&mut self, services: Vec<WelfareService>) {
        self.last_recommended = services;
    }

    pub fn clear_recommendation(&mut self) {
        self.last_recommended.clear();
    }
}
