//! Client library for the EcoCash mobile-money payment gateway.
//!
//! ```no_run
//! use ecocash_gateway::{ChargeRequest, ClientConfig, GatewayClient};
//!
//! # async fn run() -> ecocash_gateway::GatewayResult<()> {
//! let client = GatewayClient::new(ClientConfig::from_env()?)?;
//! let response = client
//!     .charge(ChargeRequest {
//!         reference_code: "ORDER-1001".to_string(),
//!         phone_number: "263771234567".to_string(),
//!         amount: 25.50,
//!         currency: "USD".to_string(),
//!         description: "Order 1001".to_string(),
//!     })
//!     .await?;
//! println!("{} -> {:?}", response.ecocash_reference, response.status());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod payments;

pub use crate::config::ClientConfig;
pub use crate::error::{GatewayError, GatewayResult, Operation};
pub use crate::payments::client::GatewayClient;
pub use crate::payments::types::{ChargeRequest, RefundRequest, TransactionResponse, TransactionStatus};
pub use crate::payments::wire::{PaymentAmount, TransactionWireRequest};
