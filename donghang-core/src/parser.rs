//! The expense parser: amount, then intent gate, then category.

use anyhow::Result;

use crate::amount::AmountExtractor;
use crate::classifier::CategoryClassifier;
use crate::expense::{Category, ParsedExpense};
use crate::intent::has_expense_intent;

/// Which call site this parser serves. The variants differ in category
/// table, merchant placeholder and the date-confirmation contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserVariant {
    /// Interactive chat: the user confirms the date before persisting.
    Interactive,
    /// Offline fallback: the caller defaults the date to today.
    Offline,
}

pub struct ExpenseParser {
    variant: ParserVariant,
    amounts: AmountExtractor,
    categories: CategoryClassifier,
}

impl ExpenseParser {
    pub fn interactive() -> Result<Self> {
        Ok(Self {
            variant: ParserVariant::Interactive,
            amounts: AmountExtractor::new()?,
            categories: CategoryClassifier::interactive(),
        })
    }

    pub fn offline() -> Result<Self> {
        Ok(Self {
            variant: ParserVariant::Offline,
            amounts: AmountExtractor::new()?,
            categories: CategoryClassifier::offline(),
        })
    }

    pub fn variant(&self) -> ParserVariant {
        self.variant
    }

    /// Parse one utterance. `None` means "not an expense" (no amount, or
    /// no spending keyword). Callers treat every failure identically and
    /// carry on with the conversation; this function never panics.
    pub fn parse(&self, input: &str) -> Option<ParsedExpense> {
        let normalized = input.to_lowercase();
        let text = normalized.trim();

        let amount = self.amounts.extract(text);
        if amount == 0 {
            return None;
        }

        if !has_expense_intent(text) {
            return None;
        }

        let category = self.categories.classify(text);

        Some(ParsedExpense {
            amount,
            category,
            merchant_name: self.merchant_for(category).to_string(),
            original_text: input.to_string(),
            transaction_date: None,
            needs_date_confirmation: self.variant == ParserVariant::Interactive,
        })
    }

    fn merchant_for(&self, category: Category) -> &'static str {
        match self.variant {
            ParserVariant::Interactive => match category {
                Category::Food => "일반음식점",
                _ => "일반상점",
            },
            ParserVariant::Offline => "일반가맹점",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interactive() -> ExpenseParser {
        ExpenseParser::interactive().unwrap()
    }

    fn offline() -> ExpenseParser {
        ExpenseParser::offline().unwrap()
    }

    #[test]
    fn test_food_expense_full_path() {
        let parsed = interactive().parse("5000원 먹었어").unwrap();
        assert_eq!(parsed.amount, 5_000);
        assert_eq!(parsed.category, Category::Food);
        assert_eq!(parsed.merchant_name, "일반음식점");
        assert_eq!(parsed.original_text, "5000원 먹었어");
        assert_eq!(parsed.transaction_date, None);
        assert!(parsed.needs_date_confirmation);
    }

    #[test]
    fn test_bus_fare_diverges_between_variants() {
        // The interactive table has no transport group; the offline one
        // recognizes "버스".
        let a = interactive().parse("5천원 버스비 냈어").unwrap();
        assert_eq!(a.amount, 5_000);
        assert_eq!(a.category, Category::Other);
        assert_eq!(a.merchant_name, "일반상점");

        let b = offline().parse("5천원 버스비 냈어").unwrap();
        assert_eq!(b.amount, 5_000);
        assert_eq!(b.category, Category::Transport);
        assert_eq!(b.merchant_name, "일반가맹점");
        assert!(!b.needs_date_confirmation);
    }

    #[test]
    fn test_bare_man_won_is_suppressed() {
        // Spoken "만원" means 10 000, but the pattern requires a leading
        // digit, so the whole utterance is rejected.
        assert_eq!(interactive().parse("만원 점심 먹었어"), None);
    }

    #[test]
    fn test_no_amount_no_keyword_is_no_match() {
        assert_eq!(interactive().parse("오늘 날씨 어때"), None);
    }

    #[test]
    fn test_amount_without_intent_is_no_match() {
        // An amount alone is not a transaction.
        assert_eq!(interactive().parse("5000원이 생겼어"), None);
    }

    #[test]
    fn test_comma_amount_defaults_to_other() {
        let parsed = interactive().parse("5,000원 썼다").unwrap();
        assert_eq!(parsed.amount, 5_000);
        assert_eq!(parsed.category, Category::Other);
    }

    #[test]
    fn test_negated_phrase_still_records() {
        // Documented false positive: the gate sees "먹었" inside
        // "안 먹었어" and accepts the utterance.
        let parsed = interactive().parse("안 먹었어 5000원").unwrap();
        assert_eq!(parsed.amount, 5_000);
        assert_eq!(parsed.category, Category::Food);
    }

    #[test]
    fn test_input_is_normalized_but_preserved() {
        let parsed = interactive().parse("  5000원 먹었어  ").unwrap();
        assert_eq!(parsed.amount, 5_000);
        assert_eq!(parsed.original_text, "  5000원 먹었어  ");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let p = interactive();
        assert_eq!(p.parse("3만원 옷 샀어"), p.parse("3만원 옷 샀어"));
    }

    #[test]
    fn test_successful_parse_never_has_zero_amount() {
        let p = offline();
        for input in ["5천원 밥 먹었어", "2만원 지하철 결제", "700원 껌 샀어"] {
            if let Some(parsed) = p.parse(input) {
                assert!(parsed.amount > 0, "{input} produced a zero amount");
            }
        }
    }
}
