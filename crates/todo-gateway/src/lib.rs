//! Todo Gateway
//!
//! Layered client for the on-chain `todo_list` module:
//! - config: network and contract settings, validated once
//! - payload / item: wire shapes and the canonical todo entity
//! - transport / rest: ledger and signer seams, REST implementation
//! - gateway: todo intents mapped to view and entry calls
//! - session: wallet connect/disconnect lifecycle

mod config;
mod error;
mod gateway;
mod item;
mod payload;
mod rest;
mod session;
mod transport;

#[cfg(test)]
mod memory;
#[cfg(test)]
mod tests;

pub use config::{GatewayConfig, Network, CONTRACT_ADDRESS_KEY, NETWORK_KEY, NODE_URL_KEY};
pub use error::{
    ConfigError, GatewayError, Operation, SessionError, Stage, TransportError, ValidationError, WalletError,
};
pub use gateway::TodoGateway;
pub use item::{validate_task, TodoId, TodoItem, MAX_TASK_LENGTH, MIN_TASK_LENGTH};
pub use payload::{
    AccountAddress, EntryArgument, EntryFunctionTransaction, FunctionId, PendingTransaction, TodoFunction,
    ViewRequest, MODULE_NAME,
};
pub use rest::{AptosRestClient, TransactionStatus, DEFAULT_MAX_WAIT_POLLS, DEFAULT_POLL_INTERVAL};
pub use session::{
    wallet_info, Identity, Session, SessionState, WalletAgent, WalletInfo, WalletRegistry, KNOWN_WALLETS,
    PETRA_INSTALL_URL,
};
pub use transport::{LedgerClient, TransactionSigner};
