use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failure,
    Cancelled,
    Error,
}

impl OutcomeStatus {
    fn parse(raw: &str) -> Result<Self, DecodeError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "failure" | "failed" => Ok(Self::Failure),
            "cancelled" | "canceled" | "cancel" | "user_cancelled" => Ok(Self::Cancelled),
            "error" => Ok(Self::Error),
            _ => Err(DecodeError::UnknownStatus(raw.to_string())),
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            Self::Success => "payment successful",
            Self::Failure => "payment failed",
            Self::Cancelled => "payment cancelled by user",
            Self::Error => "payment error",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::Failure => f.write_str("FAILURE"),
            Self::Cancelled => f.write_str("CANCELLED"),
            Self::Error => f.write_str("ERROR"),
        }
    }
}

/// The terminal, immutable result of one payment session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub status: OutcomeStatus,
    #[serde(rename = "txnId")]
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_key: Option<String>,
    /// Always present and non-empty.
    pub message: String,
}

impl PaymentOutcome {
    /// An `ERROR` outcome synthesized locally rather than reported by the SDK.
    pub fn error(transaction_id: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: OutcomeStatus::Error,
            transaction_id: transaction_id.into(),
            payment_id: None,
            amount: None,
            merchant_key: None,
            message: if message.trim().is_empty() {
                OutcomeStatus::Error.default_message().to_string()
            } else {
                message
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Provider payload carried by the SDK's result notification.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    pub status: Option<String>,
    pub message: Option<String>,
    pub txn_id: Option<String>,
    pub payment_id: Option<String>,
    pub amount: Option<Value>,
    pub merchant_key: Option<String>,
}

/// Decodes a notification payload into an outcome.
///
/// `status` and `txnId` are required, and a successful payment must also
/// name its `paymentId`.
pub fn decode_payload(payload: Option<&Value>) -> Result<PaymentOutcome, DecodeError> {
    let payload = match payload {
        None | Some(Value::Null) => return Err(DecodeError::MissingPayload),
        Some(value) => ResultPayload::deserialize(value)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?,
    };

    let status = non_empty(payload.status).ok_or(DecodeError::MissingField("status"))?;
    let status = OutcomeStatus::parse(&status)?;
    let transaction_id = non_empty(payload.txn_id).ok_or(DecodeError::MissingField("txnId"))?;
    let payment_id = non_empty(payload.payment_id);
    if status == OutcomeStatus::Success && payment_id.is_none() {
        return Err(DecodeError::MissingField("paymentId"));
    }

    Ok(PaymentOutcome {
        status,
        transaction_id,
        payment_id,
        amount: payload.amount.as_ref().and_then(amount_text),
        merchant_key: non_empty(payload.merchant_key),
        message: non_empty(payload.message)
            .unwrap_or_else(|| status.default_message().to_string()),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn amount_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_success_payload() {
        let payload = json!({"status": "success", "txnId": "T1", "paymentId": "P1", "amount": "100"});
        let outcome = decode_payload(Some(&payload)).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.transaction_id, "T1");
        assert_eq!(outcome.payment_id.as_deref(), Some("P1"));
        assert_eq!(outcome.amount.as_deref(), Some("100"));
        assert!(!outcome.message.is_empty());
    }

    #[test]
    fn test_decode_failure_keeps_provider_message() {
        let payload = json!({"status": "failure", "message": "insufficient funds", "txnId": "TX1"});
        let outcome = decode_payload(Some(&payload)).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Failure);
        assert_eq!(outcome.message, "insufficient funds");
        assert_eq!(outcome.payment_id, None);
    }

    #[test]
    fn test_decode_numeric_amount_and_merchant_key() {
        let payload = json!({
            "status": "SUCCESS", "txnId": "T1", "paymentId": "P1",
            "amount": 250.5, "merchantKey": "key123"
        });
        let outcome = decode_payload(Some(&payload)).unwrap();
        assert_eq!(outcome.amount.as_deref(), Some("250.5"));
        assert_eq!(outcome.merchant_key.as_deref(), Some("key123"));
    }

    #[test]
    fn test_decode_cancelled_synthesizes_message() {
        let payload = json!({"status": "cancelled", "txnId": "T1"});
        let outcome = decode_payload(Some(&payload)).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Cancelled);
        assert_eq!(outcome.message, "payment cancelled by user");
    }

    #[test]
    fn test_decode_rejects_incomplete_payloads() {
        assert_eq!(decode_payload(None), Err(DecodeError::MissingPayload));
        assert_eq!(
            decode_payload(Some(&Value::Null)),
            Err(DecodeError::MissingPayload)
        );
        assert_eq!(
            decode_payload(Some(&json!({"txnId": "T1"}))),
            Err(DecodeError::MissingField("status"))
        );
        assert_eq!(
            decode_payload(Some(&json!({"status": "success", "txnId": "T1"}))),
            Err(DecodeError::MissingField("paymentId"))
        );
        assert!(matches!(
            decode_payload(Some(&json!({"status": "pending", "txnId": "T1"}))),
            Err(DecodeError::UnknownStatus(_))
        ));
        assert!(matches!(
            decode_payload(Some(&json!("not an object"))),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_error_outcome_never_has_empty_message() {
        let outcome = PaymentOutcome::error("T1", "");
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.message, "payment error");
    }

    #[test]
    fn test_outcome_serializes_with_bridge_keys() {
        let outcome = PaymentOutcome::error("T1", "boom");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, json!({"status": "error", "txnId": "T1", "message": "boom"}));
    }
}
