//! Anomaly assessment for new expense rows.
//!
//! Mirrors the backend's screening: amounts far above the user's running
//! average, and night-time transactions, get flagged so the chat surface
//! can warn before anything is persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub is_anomalous: bool,
}

/// Assess one amount against the user's running average and the local
/// hour of day. With no history (`average <= 0`) only the night rule
/// applies.
pub fn assess(amount: u64, average: f64, hour: u32) -> RiskAssessment {
    let mut level = RiskLevel::Low;
    let mut anomalous = false;

    if average > 0.0 {
        let amount = amount as f64;
        if amount > average * 3.0 {
            level = RiskLevel::High;
            anomalous = true;
        } else if amount > average * 2.0 {
            level = RiskLevel::Medium;
        }
    }

    // Before 06:00 local counts as night and escalates one step.
    if hour < 6 {
        level = match level {
            RiskLevel::Low => RiskLevel::Medium,
            _ => RiskLevel::High,
        };
        anomalous = true;
    }

    RiskAssessment {
        level,
        is_anomalous: anomalous,
    }
}

/// Running mean of previously recorded amounts; 0.0 when empty.
pub fn average_amount(amounts: &[u64]) -> f64 {
    if amounts.is_empty() {
        return 0.0;
    }
    amounts.iter().sum::<u64>() as f64 / amounts.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_average_is_high() {
        let r = assess(31_000, 10_000.0, 12);
        assert_eq!(r.level, RiskLevel::High);
        assert!(r.is_anomalous);
    }

    #[test]
    fn test_double_average_is_medium_not_anomalous() {
        let r = assess(25_000, 10_000.0, 12);
        assert_eq!(r.level, RiskLevel::Medium);
        assert!(!r.is_anomalous);
    }

    #[test]
    fn test_ordinary_amount_is_low() {
        let r = assess(8_000, 10_000.0, 12);
        assert_eq!(r.level, RiskLevel::Low);
        assert!(!r.is_anomalous);
    }

    #[test]
    fn test_night_escalates_one_step() {
        let r = assess(8_000, 10_000.0, 3);
        assert_eq!(r.level, RiskLevel::Medium);
        assert!(r.is_anomalous);

        let r = assess(25_000, 10_000.0, 3);
        assert_eq!(r.level, RiskLevel::High);
    }

    #[test]
    fn test_no_history_uses_night_rule_only() {
        let r = assess(50_000, 0.0, 12);
        assert_eq!(r.level, RiskLevel::Low);
        assert!(!r.is_anomalous);
    }

    #[test]
    fn test_average() {
        assert_eq!(average_amount(&[]), 0.0);
        assert_eq!(average_amount(&[1_000, 3_000]), 2_000.0);
    }
}
