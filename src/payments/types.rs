//! Caller-facing request and response types
//!
//! These are the simplified structures the library exposes. The exact JSON the
//! gateway expects lives in [`crate::payments::wire`].

use serde::{Deserialize, Serialize};

use crate::payments::wire::PaymentAmount;

/// Charge a subscriber's wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Unique reference for this transaction; also sent as the client correlator
    pub reference_code: String,
    /// Subscriber MSISDN, e.g. "263771234567"
    pub phone_number: String,
    pub amount: f64,
    /// "USD" or "ZWG"
    pub currency: String,
    pub description: String,
}

/// Reverse an earlier charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Unique reference for this refund
    pub reference_code: String,
    pub phone_number: String,
    pub amount: f64,
    pub currency: String,
    /// `ecocashReference` of the transaction being reversed
    ///
    /// Sent as `originalEcocashReference` when non-blank. That field name is
    /// not part of the documented refund payload, so a strict gateway may
    /// reject it; leave this empty to send the documented fields only.
    pub original_ecocash_reference: String,
    pub description: String,
}

/// Gateway response shared by charge, refund and query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionResponse {
    pub client_correlator: String,
    pub end_time: i64,
    pub start_time: i64,
    pub server_reference_code: String,
    pub transaction_operation_status: String,
    pub response_code: String,
    pub ecocash_reference: String,
    pub payment_amount: PaymentAmount,
}

impl TransactionResponse {
    pub fn status(&self) -> TransactionStatus {
        TransactionStatus::from_operation_status(&self.transaction_operation_status)
    }
}

/// Normalised view of `transactionOperationStatus`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Waiting on the subscriber (PIN prompt) or the gateway
    Pending,
    Completed,
    Failed,
    /// Refunded or reversed
    Reversed,
    Unknown(String),
}

impl TransactionStatus {
    pub fn from_operation_status(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "COMPLETED" | "SUCCESS" | "SUCCESSFUL" | "CHARGED" => TransactionStatus::Completed,
            "FAILED" | "FAILURE" | "CANCELLED" | "EXPIRED" => TransactionStatus::Failed,
            "REFUNDED" | "REVERSED" => TransactionStatus::Reversed,
            s if s.starts_with("PENDING") || s == "PROCESSING" => TransactionStatus::Pending,
            _ => TransactionStatus::Unknown(raw.to_string()),
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed | TransactionStatus::Failed | TransactionStatus::Reversed
        )
    }
}
