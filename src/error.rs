use std::fmt;

use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// The gateway operation an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Charge,
    Refund,
    QueryTransaction,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Charge => f.write_str("charge request"),
            Operation::Refund => f.write_str("refund request"),
            Operation::QueryTransaction => f.write_str("query transaction"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced an HTTP response (connect, DNS, timeout, body write).
    #[error("{operation} failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// A success response arrived but its body did not match `TransactionResponse`.
    #[error("{operation} returned an undecodable body: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// The gateway answered with a non-2xx status.
    #[error("{operation} failed with status code: {status}")]
    Gateway {
        operation: Operation,
        status: u16,
        body: String,
        payload: Option<serde_json::Value>,
    },

    /// Caller input that would change the request target; nothing was sent.
    #[error("{operation} not sent: {message}")]
    InvalidRequest { operation: Operation, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GatewayError {
    pub fn transport(operation: Operation, source: reqwest::Error) -> Self {
        Self::Transport { operation, source }
    }

    pub fn decode(operation: Operation, source: serde_json::Error) -> Self {
        Self::Decode { operation, source }
    }

    /// Builds a gateway error, keeping the provider's JSON error payload when there is one.
    pub fn gateway(operation: Operation, status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let payload = serde_json::from_str(&body).ok();
        Self::Gateway {
            operation,
            status,
            body,
            payload,
        }
    }

    pub fn invalid_request(operation: Operation, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            operation,
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for failures where no usable response was obtained.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Decode { .. })
    }

    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Gateway { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Transport { operation, .. }
            | Self::Decode { operation, .. }
            | Self::Gateway { operation, .. }
            | Self::InvalidRequest { operation, .. } => Some(*operation),
            Self::Config { .. } => None,
        }
    }
}

impl From<::config::ConfigError> for GatewayError {
    fn from(err: ::config::ConfigError) -> Self {
        GatewayError::config_error(err.to_string())
    }
}
