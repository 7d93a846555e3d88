//! Persisted expense-row shape and assembly from parsed utterances.

use chrono::{DateTime, NaiveDate, Utc};
use donghang_core::{Category, ParsedExpense};
use serde::{Deserialize, Serialize};

/// One ledger row, as the backend's consumption table stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub transaction_date: NaiveDate,
    pub category: Category,
    /// Amount in won.
    pub amount: u64,
    pub merchant_name: String,
    /// Verbatim utterance, kept as the ledger memo.
    pub memo: String,
    pub created_at: DateTime<Utc>,
    /// False until the row has been replayed against the backend.
    pub synced: bool,
}

impl ExpenseRecord {
    /// Build a row from an accepted parse, the resolved transaction date
    /// and the caller's clock.
    pub fn from_parsed(parsed: &ParsedExpense, date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            transaction_date: date,
            category: parsed.category,
            amount: parsed.amount,
            merchant_name: parsed.merchant_name.clone(),
            memo: parsed.original_text.clone(),
            created_at: now,
            synced: false,
        }
    }
}
