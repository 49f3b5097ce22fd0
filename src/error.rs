use crate::domain::money::Currency;
use crate::domain::order::{Platform, TransactionStatus};
use serde::Serialize;
use thiserror::Error;

/// Everything that can go wrong between receiving a raw webhook body and
/// having the canonical order persisted. Adapter and state-machine errors are
/// structural and reach the caller verbatim; only optimistic-concurrency
/// conflicts are retried (inside the repo) before surfacing here.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    #[error("unknown transaction status: {0}")]
    UnknownTransactionStatus(String),

    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("invalid timestamp in {field}: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("negative amount in {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("non-positive quantity in {field}: {value}")]
    InvalidQuantity { field: &'static str, value: i32 },

    #[error("malformed payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("no exchange rate for {from}->{to} on {as_of}")]
    CurrencyRateUnavailable {
        from: Currency,
        to: Currency,
        as_of: chrono::NaiveDate,
    },

    #[error("status transition denied: {current:?} -> {requested:?}")]
    DeniedTransition {
        current: TransactionStatus,
        requested: TransactionStatus,
    },

    #[error("storage conflict: gave up after {attempts} attempts")]
    StorageConflict { attempts: u32 },

    #[error("storage unavailable")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("no adapter configured for platform {0:?}")]
    AdapterNotConfigured(Platform),
}

impl IngestionError {
    pub fn code(&self) -> &'static str {
        match self {
            IngestionError::UnknownPaymentMethod(_) => "UNKNOWN_PAYMENT_METHOD",
            IngestionError::UnknownTransactionStatus(_) => "UNKNOWN_TRANSACTION_STATUS",
            IngestionError::UnsupportedCurrency(_) => "UNSUPPORTED_CURRENCY",
            IngestionError::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            IngestionError::InvalidAmount { .. } => "INVALID_AMOUNT",
            IngestionError::InvalidQuantity { .. } => "INVALID_QUANTITY",
            IngestionError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            IngestionError::CurrencyRateUnavailable { .. } => "CURRENCY_RATE_UNAVAILABLE",
            IngestionError::DeniedTransition { .. } => "DENIED_STATUS_TRANSITION",
            IngestionError::StorageConflict { .. } => "STORAGE_CONFLICT",
            IngestionError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            IngestionError::AdapterNotConfigured(_) => "ADAPTER_NOT_CONFIGURED",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn from_ingestion(e: &IngestionError) -> Self {
        Self {
            error: ErrorPayload {
                code: e.code().to_string(),
                message: e.to_string(),
                details: None,
            },
        }
    }
}
