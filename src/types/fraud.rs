//! Fraud detection request and response structures.

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction channel. The French aliases are the legacy wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[serde(alias = "virement")]
    Transfer,
    #[serde(alias = "paiement")]
    Payment,
    #[serde(alias = "retrait")]
    Withdrawal,
    #[serde(alias = "depot")]
    Deposit,
}

impl TransactionType {
    /// Channels that carry a higher base fraud risk.
    pub fn is_high_risk(self) -> bool {
        matches!(self, TransactionType::Withdrawal | TransactionType::Transfer)
    }
}

/// A transaction submitted for fraud evaluation. Immutable per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudRequest {
    /// Unique transaction identifier
    pub transaction_id: String,

    /// Client the transaction belongs to
    pub client_id: String,

    /// Transaction amount, must be positive
    #[serde(alias = "montant")]
    pub amount: f64,

    #[serde(alias = "type")]
    pub transaction_type: TransactionType,

    #[serde(default = "default_currency", alias = "devise")]
    pub currency: String,

    /// Past unpaid debts for the client, when known
    #[serde(default, alias = "historique_impaye")]
    pub delinquency_count: u32,

    #[serde(default = "Utc::now", alias = "date_transaction")]
    pub timestamp: DateTime<Utc>,
}

fn default_currency() -> String {
    "MAD".to_string()
}

impl FraudRequest {
    /// Range-check the payload before it reaches the pipeline.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ApiError::Validation(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(ApiError::Validation("currency must not be empty".into()));
        }
        Ok(())
    }
}

/// Fraud evaluation outcome returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudResponse {
    pub transaction_id: String,
    pub client_id: String,
    /// Risk score in [0, 1]
    pub risk: f64,
    /// Whether the transaction crossed the alert threshold
    pub alert: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> FraudRequest {
        FraudRequest {
            transaction_id: "TX1001".to_string(),
            client_id: "C200".to_string(),
            amount: 2_000.0,
            transaction_type: TransactionType::Payment,
            currency: "MAD".to_string(),
            delinquency_count: 0,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn high_risk_channels() {
        assert!(TransactionType::Transfer.is_high_risk());
        assert!(TransactionType::Withdrawal.is_high_risk());
        assert!(!TransactionType::Payment.is_high_risk());
        assert!(!TransactionType::Deposit.is_high_risk());
    }

    #[test]
    fn non_positive_amount_rejected() {
        let mut req = request();
        req.amount = 0.0;
        assert!(req.validate().is_err());

        req.amount = f64::INFINITY;
        assert!(req.validate().is_err());
    }

    #[test]
    fn legacy_wire_format_accepted() {
        let req: FraudRequest = serde_json::from_str(
            r#"{"transaction_id":"TX1","client_id":"C1","montant":15000,"type":"virement","historique_impaye":2}"#,
        )
        .unwrap();
        assert_eq!(req.amount, 15_000.0);
        assert_eq!(req.transaction_type, TransactionType::Transfer);
        assert_eq!(req.delinquency_count, 2);
        assert_eq!(req.currency, "MAD");
    }

    #[test]
    fn unknown_transaction_type_rejected() {
        let result = serde_json::from_str::<FraudRequest>(
            r#"{"transaction_id":"TX1","client_id":"C1","amount":100,"transaction_type":"loan"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn response_round_trips() {
        let resp = FraudResponse {
            transaction_id: "TX1".to_string(),
            client_id: "C1".to_string(),
            risk: 0.8,
            alert: true,
            message: "suspicious transaction".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        let back: FraudResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.risk, 0.8);
        assert!(back.alert);
    }
}
