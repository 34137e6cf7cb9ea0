//! EcoCash gateway client
//!
//! Charge, refund and query operations against the EcoCash payment API. Every
//! call is a single authenticated round trip; nothing is retried or cached.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Url};
use tracing::{debug, error, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{GatewayError, GatewayResult, Operation};
use crate::payments::types::{ChargeRequest, RefundRequest, TransactionResponse};
use crate::payments::wire::TransactionWireRequest;

const USER_AGENT: &str = concat!("ecocash-gateway/", env!("CARGO_PKG_VERSION"));

const PAYMENT_API: [&str; 2] = ["payment", "v1"];

/// EcoCash payment gateway client
///
/// Holds no mutable state, so one instance can be shared across tasks
/// (wrap it in an `Arc` to hand it to spawned tasks).
pub struct GatewayClient {
    http_client: Client,
    config: ClientConfig,
}

impl GatewayClient {
    /// Create a client with its own HTTP transport.
    ///
    /// No request is made and the config is not validated here; call
    /// [`ClientConfig::validate`] first if the values come from outside.
    pub fn new(config: ClientConfig) -> GatewayResult<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder.build().map_err(|e| {
            GatewayError::config_error(format!("Failed to create HTTP client: {}", e))
        })?;

        Self::with_http_client(config, http_client)
    }

    /// Create a client on top of a caller-supplied reqwest client, e.g. one
    /// configured with a proxy or custom timeouts. Basic auth is still added
    /// to every request.
    ///
    /// # Errors
    ///
    /// Infallible today; returns `Result` to match [`GatewayClient::new`].
    pub fn with_http_client(config: ClientConfig, http_client: Client) -> GatewayResult<Self> {
        if config.is_plain_http() && !config.disable_http_warnings {
            warn!(
                "Basic auth credentials will be sent over plain HTTP to {}",
                config.base_url
            );
        }

        info!(
            "EcoCash client initialized for merchant {} with URL: {}",
            config.merchant_code, config.base_url
        );

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Debit a subscriber's wallet.
    #[instrument(skip(self, request), fields(reference = %request.reference_code))]
    pub async fn charge(&self, request: ChargeRequest) -> GatewayResult<TransactionResponse> {
        info!(
            "Initiating EcoCash charge: {} {} for {}",
            request.amount, request.currency, request.phone_number
        );

        let payload = TransactionWireRequest::charge(&self.config, &request);
        let url = self.endpoint(&["transactions", "amount"])?;
        let response = self
            .execute(Operation::Charge, Method::POST, url, Some(&payload))
            .await?;

        info!(
            "EcoCash charge accepted: ecocash_reference={}, status={}",
            response.ecocash_reference, response.transaction_operation_status
        );
        Ok(response)
    }

    /// Reverse a previous charge.
    #[instrument(
        skip(self, request),
        fields(
            reference = %request.reference_code,
            original = %request.original_ecocash_reference
        )
    )]
    pub async fn refund(&self, request: RefundRequest) -> GatewayResult<TransactionResponse> {
        info!(
            "Initiating EcoCash refund: {} {} for {}",
            request.amount, request.currency, request.phone_number
        );

        let payload = TransactionWireRequest::refund(&self.config, &request);
        let url = self.endpoint(&["transactions", "refund"])?;
        let response = self
            .execute(Operation::Refund, Method::POST, url, Some(&payload))
            .await?;

        info!(
            "EcoCash refund accepted: ecocash_reference={}, status={}",
            response.ecocash_reference, response.transaction_operation_status
        );
        Ok(response)
    }

    /// Look up a transaction by the reference code used when it was created.
    ///
    /// Both values are percent-encoded as path segments. Empty, `.` and `..`
    /// values are rejected before any request is made, since they would
    /// collapse into a different endpoint.
    #[instrument(skip(self))]
    pub async fn query_transaction(
        &self,
        phone_number: &str,
        reference_code: &str,
    ) -> GatewayResult<TransactionResponse> {
        debug!("Querying EcoCash transaction");

        check_path_segment(Operation::QueryTransaction, "phone_number", phone_number)?;
        check_path_segment(Operation::QueryTransaction, "reference_code", reference_code)?;

        let url = self.endpoint(&[phone_number, "transactions", "amount", reference_code])?;
        let response = self
            .execute(Operation::QueryTransaction, Method::GET, url, None)
            .await?;

        debug!(
            "EcoCash transaction status: {}",
            response.transaction_operation_status
        );
        Ok(response)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base_url}/payment/v1/{segments...}`
    fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            GatewayError::config_error(format!(
                "Invalid base_url {}: {}",
                self.config.base_url, e
            ))
        })?;

        {
            let mut path = url.path_segments_mut().map_err(|_| {
                GatewayError::config_error(format!(
                    "base_url cannot be used as a base: {}",
                    self.config.base_url
                ))
            })?;
            path.pop_if_empty()
                .extend(PAYMENT_API.iter())
                .extend(segments.iter());
        }

        Ok(url)
    }

    fn authorized(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(ACCEPT, "application/json")
    }

    async fn execute(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        body: Option<&TransactionWireRequest>,
    ) -> GatewayResult<TransactionResponse> {
        if self.config.trace_requests {
            let traced_body = body
                .map(|b| b.redacted_json().to_string())
                .unwrap_or_default();
            debug!(%method, %url, body = %traced_body, "EcoCash request");
        }

        let mut request = self.authorized(method, url);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("EcoCash {} transport failure: {}", operation, e);
            GatewayError::transport(operation, e)
        })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            error!("Failed to read EcoCash {} response: {}", operation, e);
            GatewayError::transport(operation, e)
        })?;

        if self.config.trace_requests {
            debug!(status = status.as_u16(), body = %response_text, "EcoCash response");
        }

        if !status.is_success() {
            if !self.config.disable_http_warnings {
                warn!("EcoCash {} rejected with HTTP {}", operation, status);
            }
            return Err(GatewayError::gateway(
                operation,
                status.as_u16(),
                response_text,
            ));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse EcoCash {} response: {}", operation, e);
            GatewayError::decode(operation, e)
        })
    }
}

/// Dot segments are dropped by URL normalisation and empty ones produce `//`,
/// so none of them can be sent as a literal path segment.
fn check_path_segment(operation: Operation, field: &str, value: &str) -> GatewayResult<()> {
    if matches!(value, "" | "." | "..") {
        return Err(GatewayError::invalid_request(
            operation,
            format!("{} cannot be {:?}", field, value),
        ));
    }
    Ok(())
}
