//! Error types for friend-pay operations
//!
//! Write paths (group/event creation) surface every failure to the caller and
//! the page turns it into a single user-visible message. Read paths log and
//! swallow, so most of the read-side variants only ever reach the logs.

use thiserror::Error;

/// Core error type for friend-pay operations
///
/// Covers draft validation, contract response shape problems and the three
/// phases of an on-chain write (simulate, submit, confirm).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum FriendPayError {
    /// No wallet account is available to sign with
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// A required draft field is missing or empty
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Contract returned arrays of unequal length or a malformed tuple
    #[error("Contract response shape mismatch: {0}")]
    ShapeMismatch(String),

    /// `eth_call` dry run of the write was rejected
    #[error("Simulation failed: {0}")]
    SimulationFailed(String),

    /// Signing or broadcasting failed (includes user rejection)
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// Receipt never arrived, or the transaction reverted
    ///
    /// The transaction may still be included later; nothing is retried.
    #[error("Confirmation failed: tx_hash={tx_hash}, reason={reason}")]
    ConfirmationFailed { tx_hash: String, reason: String },

    /// A submission is already running on this controller
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// Decimal amount could not be parsed into base units
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Address string is not a 20-byte hex address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Contract read failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Could not reach the JSON-RPC endpoint
    #[error("Failed to connect to RPC endpoint: {0}")]
    ConnectionFailed(String),

    /// Endpoint answered with something we could not interpret
    #[error("Invalid response from RPC endpoint: {0}")]
    InvalidResponse(String),

    /// Bad configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Contract has no entry point for the requested operation
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

// Helper functions for common error scenarios
impl FriendPayError {
    /// Create a connection failed error
    pub fn connection_failed(msg: impl Into<String>) -> Self {
        Self::ConnectionFailed(msg.into())
    }

    /// Create a confirmation failed error
    pub fn confirmation_failed(tx_hash: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfirmationFailed {
            tx_hash: tx_hash.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation failed error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailed(msg.into())
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Message shown to the end user for a failed write
    ///
    /// `subject` is the thing being created ("group", "event"). Chain-side
    /// failures collapse into one generic retry message. Local precondition
    /// failures keep their own wording.
    pub fn user_message(&self, subject: &str) -> String {
        match self {
            Self::WalletNotConnected => "Please connect your wallet first".to_string(),
            Self::ValidationFailed(msg) => format!("Please fill in all fields: {}", msg),
            Self::InvalidAmount(_) | Self::InvalidAddress(_) => self.to_string(),
            Self::SubmissionInFlight => format!("Your {} is already being created", subject),
            Self::Unsupported(msg) => msg.clone(),
            _ => format!("Failed to create {}. Please try again.", subject),
        }
    }

    /// Whether the failure happened after a transaction was broadcast
    pub fn is_post_broadcast(&self) -> bool {
        matches!(self, Self::ConfirmationFailed { .. })
    }
}
