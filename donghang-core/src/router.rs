//! Deterministic utterance routing for the chat flow.
//!
//! Expense parsing runs before any dialogue handling: an utterance that
//! fails the parse is ordinary conversation and falls through to the AI
//! responder.

use chrono::NaiveDate;

use crate::date::resolve_transaction_date;
use crate::expense::ParsedExpense;
use crate::parser::ExpenseParser;
use crate::session::ChatSession;
use crate::welfare::{
    ActivityInquiry, analyze_activity_inquiry, is_detail_request, is_portal_request,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Pending expense plus a recognizable date answer.
    DateAnswer(NaiveDate),
    /// Pending expense but the answer wasn't a date; re-prompt.
    DateUnrecognized,
    /// A new expense candidate that still needs its date confirmed.
    ExpenseCandidate(ParsedExpense),
    PortalRequest,
    DetailRequest,
    WelfareInquiry(ActivityInquiry),
    /// Ordinary dialogue; forward to the AI responder.
    SmallTalk,
}

pub fn route_message(
    session: &ChatSession,
    parser: &ExpenseParser,
    message: &str,
    today: NaiveDate,
) -> Route {
    if session.pending_expense.is_some() {
        return match resolve_transaction_date(message, today) {
            Some(date) => Route::DateAnswer(date),
            None => Route::DateUnrecognized,
        };
    }

    if let Some(parsed) = parser.parse(message) {
        return Route::ExpenseCandidate(parsed);
    }

    if is_portal_request(message) {
        return Route::PortalRequest;
    }

    if is_detail_request(message, !session.last_recommended.is_empty()) {
        return Route::DetailRequest;
    }

    if let Some(inquiry) = analyze_activity_inquiry(message) {
        return Route::WelfareInquiry(inquiry);
    }

    Route::SmallTalk
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::Category;
    use crate::welfare::fallback_services;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 7).unwrap()
    }

    fn parser() -> ExpenseParser {
        ExpenseParser::interactive().unwrap()
    }

    #[test]
    fn test_expense_runs_before_dialogue() {
        let session = ChatSession::new();
        let route = route_message(&session, &parser(), "5000원 점심 먹었어", today());
        match route {
            Route::ExpenseCandidate(parsed) => {
                assert_eq!(parsed.amount, 5_000);
                assert_eq!(parsed.category, Category::Food);
            }
            other => panic!("expected expense candidate, got {other:?}"),
        }
    }

    #[test]
    fn test_pending_expense_captures_date_answer() {
        let mut session = ChatSession::new();
        session.set_pending(parser().parse("5000원 점심 먹었어").unwrap());

        let route = route_message(&session, &parser(), "어제", today());
        assert_eq!(
            route,
            Route::DateAnswer(NaiveDate::from_ymd_opt(2025, 8, 6).unwrap())
        );

        let route = route_message(&session, &parser(), "글쎄", today());
        assert_eq!(route, Route::DateUnrecognized);
    }

    #[test]
    fn test_failed_parse_falls_through_to_welfare() {
        let session = ChatSession::new();
        let route = route_message(&session, &parser(), "오늘 뭐할까", today());
        assert!(matches!(route, Route::WelfareInquiry(_)));
    }

    #[test]
    fn test_detail_needs_prior_recommendation() {
        let mut session = ChatSession::new();
        assert_ne!(
            route_message(&session, &parser(), "자세히 알려줘", today()),
            Route::DetailRequest
        );

        session.remember_recommendation(fallback_services());
        assert_eq!(
            route_message(&session, &parser(), "자세히 알려줘", today()),
            Route::DetailRequest
        );
    }

    #[test]
    fn test_portal_request_routes_before_inquiry() {
        let session = ChatSession::new();
        assert_eq!(
            route_message(&session, &parser(), "복지로 사이트 열어줘", today()),
            Route::PortalRequest
        );
    }

    #[test]
    fn test_everything_else_is_small_talk() {
        let session = ChatSession::new();
        assert_eq!(
            route_message(&session, &parser(), "오늘 날씨 어때", today()),
            Route::SmallTalk
        );
    }
}
