//! Client for the backend expense-creation endpoint.
//!
//! The backend's endpoints don't agree on an envelope shape, so the
//! response is modeled as an explicit set of variants and normalized
//! here instead of probing optional fields at every call site.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::queue::OfflineQueue;
use crate::record::ExpenseRecord;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateConsumptionRequest<'a> {
    merchant_name: &'a str,
    amount: u64,
    category: &'a str,
    transaction_date: String,
    memo: &'a str,
}

/// The created row, as much of it as the server reports back.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreatedExpense {
    #[serde(alias = "consumptionNo")]
    pub id: u64,
    #[serde(default, alias = "riskLevel")]
    pub risk_level: Option<String>,
    #[serde(default, alias = "isAnomalous")]
    pub is_anomalous: Option<bool>,
}

/// Envelope variants observed across the backend's endpoints.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreateConsumptionResponse {
    Enveloped {
        data: CreatedExpense,
    },
    Wrapped {
        consumption: CreatedExpense,
    },
    Direct(CreatedExpense),
    /// Bare acknowledgement without the row.
    Ack {
        #[allow(dead_code)]
        message: String,
    },
}

impl CreateConsumptionResponse {
    fn normalize(self) -> Option<CreatedExpense> {
        match self {
            CreateConsumptionResponse::Enveloped { data } => Some(data),
            CreateConsumptionResponse::Wrapped { consumption } => Some(consumption),
            CreateConsumptionResponse::Direct(created) => Some(created),
            CreateConsumptionResponse::Ack { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub synced: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

pub struct ExpenseApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ExpenseApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            client: reqwest::Client::new(),
        }
    }

    /// POST one row. `Ok(None)` means the server acked without echoing
    /// the created row.
    pub async fn create(&self, record: &ExpenseRecord) -> Result<Option<CreatedExpense>> {
        let body = CreateConsumptionRequest {
            merchant_name: &record.merchant_name,
            amount: record.amount,
            category: record.category.label(),
            transaction_date: record.transaction_date.to_string(),
            memo: &record.memo,
        };

        let mut req = self
            .client
            .post(format!("{}/api/consumption", self.base_url))
            .json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.context("consumption request")?;
        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("consumption error: {status} {txt}");
        }

        let out: CreateConsumptionResponse =
            resp.json().await.context("parse consumption response")?;
        Ok(out.normalize())
    }

    /// Replay every unsynced queue entry. Entries that fail stay queued
    /// for the next attempt.
    pub async fn sync_queue(&self, queue: &OfflineQueue) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        for entry in queue.unsynced()? {
            match self.create(&entry.record).await {
                Ok(_) => {
                    queue.mark_synced(entry.id)?;
                    report.synced += 1;
                }
                Err(e) => {
                    report.failed += 1;
                    report.errors.push(format!("#{}: {e}", entry.id));
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_enveloped() {
        let resp: CreateConsumptionResponse = serde_json::from_str(
            r#"{"message":"소비 내역이 기록되었습니다.","data":{"consumptionNo":7,"riskLevel":"LOW"}}"#,
        )
        .unwrap();
        let created = resp.normalize().unwrap();
        assert_eq!(created.id, 7);
        assert_eq!(created.risk_level.as_deref(), Some("LOW"));
    }

    #[test]
    fn test_normalize_wrapped_and_direct() {
        let resp: CreateConsumptionResponse =
            serde_json::from_str(r#"{"consumption":{"id":3}}"#).unwrap();
        assert_eq!(resp.normalize().unwrap().id, 3);

        let resp: CreateConsumptionResponse =
            serde_json::from_str(r#"{"id":11,"isAnomalous":true}"#).unwrap();
        let created = resp.normalize().unwrap();
        assert_eq!(created.id, 11);
        assert_eq!(created.is_anomalous, Some(true));
    }

    #[test]
    fn test_ack_normalizes_to_none() {
        let resp: CreateConsumptionResponse =
            serde_json::from_str(r#"{"message":"기록 완료"}"#).unwrap();
        assert!(resp.normalize().is_none());
    }

    #[test]
    fn test_unknown_shape_is_an_error() {
        let resp: Result<CreateConsumptionResponse, _> = serde_json::from_str(r#"{"ok":true}"#);
        assert!(resp.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_and_keeps_entry_queued() {
        use crate::record::ExpenseRecord;
        use chrono::{NaiveDate, Utc};
        use donghang_core::ExpenseParser;

        let dir = tempfile::tempdir().unwrap();
        let queue = OfflineQueue::open(dir.path()).unwrap();

        let parser = ExpenseParser::offline().unwrap();
        let parsed = parser.parse("5천원 밥 먹었어").unwrap();
        queue
            .push(ExpenseRecord::from_parsed(
                &parsed,
                NaiveDate::from_ymd_opt(2025, 8, 7).unwrap(),
                Utc::now(),
            ))
            .unwrap();

        // Port 9 (discard) refuses connections on any sane test host.
        let client = ExpenseApiClient::new("http://127.0.0.1:9", None);
        let report = client.sync_queue(&queue).await.unwrap();

        assert_eq!(report.synced, 0);
        assert_eq!(report.failed, 1);
        assert_eq!(queue.unsynced().unwrap().len(), 1);
    }

    #[test]
    fn test_request_body_uses_backend_field_names() {
        let record = CreateConsumptionRequest {
            merchant_name: "일반음식점",
            amount: 5_000,
            category: "식비",
            transaction_date: "2025-08-07".to_string(),
            memo: "5000원 점심 먹었어",
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["merchantName"], "일반음식점");
        assert_eq!(json["transactionDate"], "2025-08-07");
        assert_eq!(json["amount"], 5_000);
    }
}
