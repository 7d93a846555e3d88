//! Expense intent gate: does the utterance describe a completed spend?

/// Past-tense spending fragments. Presence of any one anywhere in the
/// text satisfies the gate; no position, tense-strictness or negation
/// handling, so "안 먹었어" still passes on the "먹었" fragment.
const EXPENSE_KEYWORDS: [&str; 8] = ["먹었", "썼", "샀", "구매", "지불", "결제", "냈", "쇼핑했"];

pub fn has_expense_intent(text: &str) -> bool {
    EXPENSE_KEYWORDS.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spending_verbs_pass() {
        assert!(has_expense_intent("5000원 점심 먹었어"));
        assert!(has_expense_intent("버스비 냈어"));
        assert!(has_expense_intent("마트에서 결제했어"));
        assert!(has_expense_intent("옷 샀다"));
    }

    #[test]
    fn test_questions_and_plans_fail() {
        assert!(!has_expense_intent("오늘 날씨 어때"));
        assert!(!has_expense_intent("5000원이 얼마나 큰 돈이야"));
        assert!(!has_expense_intent("내일 점심 먹을까"));
    }

    #[test]
    fn test_negation_is_not_understood() {
        // Known false positive: substring presence only.
        assert!(has_expense_intent("안 먹었어 5000원"));
    }
}
