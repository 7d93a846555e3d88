//! donghang-core: utterance parsing and routing for the Donghang assistant

pub mod amount;
pub mod classifier;
pub mod date;
pub mod expense;
pub mod intent;
pub mod parser;
pub mod router;
pub mod session;
pub mod welfare;

pub use amount::AmountExtractor;
pub use classifier::CategoryClassifier;
pub use date::{local_hour, resolve_transaction_date, today_in};
pub use expense::{Category, ParsedExpense, format_won};
pub use intent::has_expense_intent;
pub use parser::{ExpenseParser, ParserVariant};
pub use router::{Route, route_message};
pub use session::ChatSession;
pub use welfare::{
    ActivityInquiry, WELFARE_PORTAL_URL, WelfareCategory, WelfareService,
    analyze_activity_inquiry, fallback_services, is_detail_request, is_portal_request,
};
