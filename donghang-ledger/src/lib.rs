//! donghang-ledger: expense rows, offline queue, sync client and export

pub mod api;
pub mod export;
pub mod queue;
pub mod record;
pub mod risk;

pub use api::{CreatedExpense, ExpenseApiClient, SyncReport};
pub use export::{to_csv_string, write_csv};
pub use queue::{OfflineQueue, QueuedExpense};
pub use record::ExpenseRecord;
pub use risk::{RiskAssessment, RiskLevel, assess, average_amount};
