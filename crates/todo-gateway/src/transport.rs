//! Transport Layer - Core Traits
//!
//! Abstract seams for the ledger node (reads, confirmation) and for the
//! signing agent (submission). Implementations can be the REST client, a
//! browser wallet, or an in-memory contract for tests.
//!
//! Futures are not `Send`: the client runs on a single-threaded executor
//! and browser handles cannot cross threads.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::payload::{EntryFunctionTransaction, PendingTransaction, ViewRequest};

/// Read and confirmation access to the ledger
#[async_trait(?Send)]
pub trait LedgerClient {
    /// Run a view function; the response is the node's positional result array
    async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>, TransportError>;

    /// Resolve once the transaction is final, or fail if it was rejected or never lands
    async fn wait_for_transaction(&self, hash: &str) -> Result<(), TransportError>;
}

/// Co-signs and submits an entry call on behalf of the connected account
#[async_trait(?Send)]
pub trait TransactionSigner {
    async fn sign_and_submit(
        &self,
        transaction: &EntryFunctionTransaction,
    ) -> Result<PendingTransaction, TransportError>;
}
