//! Gateway wire format
//!
//! Field names here are fixed by the gateway and are case-sensitive,
//! including the lowercase `charginginformation`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ClientConfig;
use crate::payments::types::{ChargeRequest, RefundRequest};

pub const CHANNEL_WEB: &str = "WEB";
pub const ONLINE_PAYMENT: &str = "Online Payment";
/// Status hint sent with every charge; it is not the outcome.
pub const CHARGED_STATUS_HINT: &str = "Charged";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "MER")]
    MerchantPayment,
    #[serde(rename = "REF")]
    Refund,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentAmount {
    #[serde(rename = "charginginformation", default)]
    pub charging_information: ChargingInformation,
    #[serde(rename = "chargeMetaData", default)]
    pub charge_meta_data: ChargeMetaData,
}

impl PaymentAmount {
    /// Amount block with the fixed online-payment metadata.
    pub fn new(amount: f64, currency: &str, description: &str) -> Self {
        Self {
            charging_information: ChargingInformation {
                amount,
                currency: currency.to_string(),
                description: description.to_string(),
            },
            charge_meta_data: ChargeMetaData::online_payment(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargingInformation {
    pub amount: f64,
    pub currency: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChargeMetaData {
    pub channel: String,
    pub purchase_category_code: String,
    #[serde(rename = "onBeHalfOf")]
    pub on_behalf_of: String,
}

impl ChargeMetaData {
    pub fn online_payment() -> Self {
        Self {
            channel: CHANNEL_WEB.to_string(),
            purchase_category_code: ONLINE_PAYMENT.to_string(),
            on_behalf_of: ONLINE_PAYMENT.to_string(),
        }
    }
}

/// Full transaction payload posted to the gateway
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWireRequest {
    pub client_correlator: String,
    pub notify_url: String,
    pub reference_code: String,
    pub tran_type: TransactionType,
    pub end_user_id: String,
    pub remarks: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_operation_status: Option<String>,
    pub payment_amount: PaymentAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_ecocash_reference: Option<String>,
    pub merchant_code: String,
    pub merchant_pin: String,
    pub merchant_number: String,
    pub currency_code: String,
    pub country_code: String,
    #[serde(rename = "terminalID")]
    pub terminal_id: String,
    pub location: String,
    pub super_merchant_name: String,
    pub merchant_name: String,
}

impl TransactionWireRequest {
    pub fn charge(config: &ClientConfig, request: &ChargeRequest) -> Self {
        let mut wire = Self::for_merchant(
            config,
            TransactionType::MerchantPayment,
            &request.reference_code,
            &request.phone_number,
            request.amount,
            &request.currency,
            &request.description,
        );
        wire.transaction_operation_status = Some(CHARGED_STATUS_HINT.to_string());
        wire
    }

    pub fn refund(config: &ClientConfig, request: &RefundRequest) -> Self {
        let mut wire = Self::for_merchant(
            config,
            TransactionType::Refund,
            &request.reference_code,
            &request.phone_number,
            request.amount,
            &request.currency,
            &request.description,
        );
        let original = request.original_ecocash_reference.trim();
        if !original.is_empty() {
            wire.original_ecocash_reference = Some(original.to_string());
        }
        wire
    }

    fn for_merchant(
        config: &ClientConfig,
        tran_type: TransactionType,
        reference_code: &str,
        phone_number: &str,
        amount: f64,
        currency: &str,
        description: &str,
    ) -> Self {
        Self {
            client_correlator: reference_code.to_string(),
            notify_url: config.notify_url.clone(),
            reference_code: reference_code.to_string(),
            tran_type,
            end_user_id: phone_number.to_string(),
            remarks: description.to_string(),
            transaction_operation_status: None,
            payment_amount: PaymentAmount::new(amount, currency, description),
            original_ecocash_reference: None,
            merchant_code: config.merchant_code.clone(),
            merchant_pin: config.merchant_pin.clone(),
            merchant_number: config.merchant_number.clone(),
            currency_code: currency.to_string(),
            country_code: config.country_code.clone(),
            terminal_id: config.terminal_id.clone(),
            location: config.location.clone(),
            super_merchant_name: config.super_merchant_name.clone(),
            merchant_name: config.merchant_name.clone(),
        }
    }

    /// JSON form with the merchant PIN masked, for request tracing.
    pub(crate) fn redacted_json(&self) -> serde_json::Value {
        mask_merchant_pin(serde_json::to_value(self))
    }
}

fn mask_merchant_pin(
    serialized: Result<serde_json::Value, serde_json::Error>,
) -> serde_json::Value {
    match serialized {
        Ok(mut value) => {
            if let Some(pin) = value.get_mut("merchantPin") {
                *pin = serde_json::Value::String("****".to_string());
            }
            value
        }
        Err(e) => {
            warn!("Failed to serialize EcoCash request for tracing: {}", e);
            serde_json::Value::String(format!("<unserializable request: {}>", e))
        }
    }
}
