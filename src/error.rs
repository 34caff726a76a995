use thiserror::Error;

use crate::checkout::AddressFieldError;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown base: {0} (expected roti, combo or rice)")]
    UnknownBase(String),

    #[error("Unknown meal type: {0} (expected lunch or dinner)")]
    UnknownMealType(String),

    #[error("Unknown payment method: {0} (expected cod, upi or card)")]
    UnknownPaymentMethod(String),

    #[error("No menu available: {0}")]
    MenuUnavailable(String),

    #[error("Order is not ready: {0}")]
    PreconditionFailed(String),

    #[error("Please sign in before placing an order")]
    NotAuthenticated,

    #[error("Invalid delivery address: {}", format_field_errors(.0))]
    InvalidAddress(Vec<AddressFieldError>),

    #[error("Failed to place order: {0}")]
    SubmissionFailed(String),
}

fn format_field_errors(errors: &[AddressFieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, OrderError>;
