//! Error Taxonomy
//!
//! Configuration, validation, transport and session failures, plus the
//! caller-facing [`GatewayError`] that wraps them.

use std::fmt;

use thiserror::Error;

/// Startup configuration problems. Fatal for gateway construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} is not configured. Please set {key} in your environment.")]
    MissingSetting { key: &'static str },
    #[error("Invalid network: {value}. Must be one of: {allowed}")]
    InvalidNetwork { value: String, allowed: String },
    #[error("Invalid node URL in {key}: {value:?}")]
    InvalidNodeUrl { key: &'static str, value: String },
}

/// Input rejected before any remote call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task cannot be empty")]
    EmptyTask,
    #[error("Task is too long (max {max} characters, got {actual})")]
    TaskTooLong { max: usize, actual: usize },
    #[error("Invalid todo ID {value:?}. Must be a positive integer.")]
    InvalidTodoId { value: String },
    #[error("User address is required")]
    EmptyAddress,
}

/// Failures raised by the ledger node or the signing agent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {message}")]
    Request { message: String },
    #[error("node returned http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("could not decode node response: {message}")]
    Decode { message: String },
    #[error("transaction {hash} was not executed successfully: {vm_status}")]
    Rejected { hash: String, vm_status: String },
    #[error("timed out waiting for transaction {hash}")]
    Timeout { hash: String },
    #[error("wallet error: {message}")]
    Wallet { message: String },
}

/// Errors reported by an external signing agent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("the request was rejected by the user")]
    UserRejected,
    #[error("{0}")]
    Provider(String),
}

impl From<WalletError> for TransportError {
    fn from(error: WalletError) -> Self {
        TransportError::Wallet {
            message: error.to_string(),
        }
    }
}

/// Connect/disconnect lifecycle failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown wallet: {name}")]
    UnknownWallet { name: String },
    #[error("wallet {name} is not installed or not ready")]
    NotReady { name: String },
    #[error("failed to connect to {name}: {source}")]
    Connect {
        name: String,
        #[source]
        source: WalletError,
    },
    #[error("failed to disconnect from {name}: {source}")]
    Disconnect {
        name: String,
        #[source]
        source: WalletError,
    },
}

/// The write operations the gateway can report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Complete,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create todo",
            Operation::Complete => "complete todo",
            Operation::Update => "update todo",
            Operation::Delete => "delete todo",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in the write path a remote failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Submit,
    Confirm,
}

/// Caller-facing gateway error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Wallet not connected. Please connect your wallet to perform this action.")]
    NotConnected,
    #[error("Failed to {operation}: {message}")]
    OperationFailed {
        operation: Operation,
        stage: Stage,
        message: String,
        #[source]
        source: TransportError,
    },
}

impl GatewayError {
    pub(crate) fn operation_failed(operation: Operation, stage: Stage, source: TransportError) -> Self {
        let message = match stage {
            Stage::Submit => source.to_string(),
            Stage::Confirm => format!("Transaction failed: {}", source),
        };
        GatewayError::OperationFailed {
            operation,
            stage,
            message,
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, GatewayError::Validation(_))
    }

    pub fn is_not_connected(&self) -> bool {
        matches!(self, GatewayError::NotConnected)
    }
}
