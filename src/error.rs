use std::time::Duration;
use thiserror::Error;

/// The first payment field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Raised by the external SDK entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SdkError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("no foreground screen available to initialize the payment SDK")]
    HostUnavailable,
    #[error("payment SDK rejected initialization: {0}")]
    Sdk(#[from] SdkError),
}

/// Synchronous rejections of `launch`. Nothing past acceptance uses this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("payment SDK has not been initialized")]
    NotInitialized,
    #[error("a payment session is already awaiting its result")]
    SessionBusy,
    #[error("no foreground screen available to show the payment UI")]
    HostUnavailable,
}

/// Terminal rejections delivered through a `PendingPayment`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("payment session cancelled: {0}")]
    Cancelled(String),
    #[error("no payment result received within {0:?}")]
    Timeout(Duration),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no payment data received")]
    MissingPayload,
    #[error("payment result is missing `{0}`")]
    MissingField(&'static str),
    #[error("unrecognized payment status `{0}`")]
    UnknownStatus(String),
    #[error("malformed payment result: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum ParamServiceError {
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("failed to get payment params")]
    Rejected,
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
}

/// Everything a checkout attempt can fail with before an outcome exists.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    ParamService(#[from] ParamServiceError),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
