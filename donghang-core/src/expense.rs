//! Parsed-expense types produced by the utterance parser.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ledger categories assigned by the keyword classifiers.
///
/// Serialized as the Korean labels the backend stores in its category
/// column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "식비")]
    Food,
    #[serde(rename = "교통비")]
    Transport,
    #[serde(rename = "쇼핑")]
    Shopping,
    #[serde(rename = "의료비")]
    Medical,
    #[serde(rename = "생활용품")]
    Household,
    #[serde(rename = "기타")]
    Other,
}

impl Category {
    /// Korean display label (same string the serde rename produces).
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "식비",
            Category::Transport => "교통비",
            Category::Shopping => "쇼핑",
            Category::Medical => "의료비",
            Category::Household => "생활용품",
            Category::Other => "기타",
        }
    }

    /// Emoji shown next to a recorded expense in chat confirmations.
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Food => "🍽️",
            Category::Transport => "🚗",
            Category::Shopping => "🛍️",
            Category::Medical => "🏥",
            Category::Household => "🏠",
            Category::Other => "💰",
        }
    }
}

/// Thousands-grouped display form: 12345 → "12,345".
pub fn format_won(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A spending utterance the parser accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedExpense {
    /// Amount in won. Never 0: a zero amount is a parse failure, not a
    /// valid record.
    pub amount: u64,
    pub category: Category,
    /// Fixed placeholder merchant; nothing is extracted from the input.
    pub merchant_name: String,
    /// Verbatim input, kept for audit and for the ledger memo.
    pub original_text: String,
    /// Always `None` at parse time; the caller resolves the real date.
    pub transaction_date: Option<NaiveDate>,
    /// True when the chat flow must ask the user for the date before
    /// persisting. The offline flow defaults the date to today instead.
    pub needs_date_confirmation: bool,
}
