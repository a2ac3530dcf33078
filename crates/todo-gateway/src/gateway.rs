//! Remote Call Gateway
//!
//! Maps todo intents onto the `todo_list` module: view calls for reads,
//! signed entry calls plus a confirmation wait for writes.
//!
//! Reads degrade to empty values on remote failure. Writes validate their
//! input first, then require a signer, then surface every remote failure.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::config::{GatewayConfig, Network};
use crate::error::{GatewayError, Operation, Stage, TransportError};
use crate::item::{coerce_bool, coerce_u64, decode_todo_list, validate_task, TodoId, TodoItem};
use crate::payload::{AccountAddress, EntryArgument, EntryFunctionTransaction, FunctionId, TodoFunction, ViewRequest};
use crate::rest::AptosRestClient;
use crate::transport::{LedgerClient, TransactionSigner};

pub struct TodoGateway {
    config: GatewayConfig,
    ledger: Rc<dyn LedgerClient>,
    signer: Option<Rc<dyn TransactionSigner>>,
    account: Option<AccountAddress>,
}

impl TodoGateway {
    /// Read-only gateway; writes fail with `NotConnected` until a signer is attached.
    pub fn new(config: GatewayConfig, ledger: Rc<dyn LedgerClient>) -> Self {
        Self {
            config,
            ledger,
            signer: None,
            account: None,
        }
    }

    /// Gateway talking to the node named in `config`
    pub fn from_config(config: GatewayConfig) -> Self {
        let ledger = Rc::new(AptosRestClient::from_config(&config));
        Self::new(config, ledger)
    }

    /// Attach the session's signing capability. Both halves are needed for writes.
    pub fn with_signer(
        mut self,
        signer: Option<Rc<dyn TransactionSigner>>,
        account: Option<AccountAddress>,
    ) -> Self {
        self.signer = signer;
        self.account = account;
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.config.contract_address().is_empty()
    }

    pub fn network(&self) -> Network {
        self.config.network()
    }

    pub fn contract_address(&self) -> &str {
        self.config.contract_address()
    }

    pub fn account(&self) -> Option<&AccountAddress> {
        self.account.as_ref()
    }

    pub fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    pub fn function_id(&self, function: TodoFunction) -> FunctionId {
        FunctionId::todo(self.config.contract_address(), function)
    }

    // ========================
    // Reads
    // ========================

    /// All todos of `address`. An empty address is rejected; remote failures yield an empty list.
    pub async fn get_list(&self, address: &str) -> Result<Vec<TodoItem>, GatewayError> {
        let address = AccountAddress::parse(address)?;

        let response = match self.view(TodoFunction::GetTodos, &address).await {
            Ok(response) => response,
            Err(error) => {
                log::error!("Error fetching todos for {}: {}", address, error);
                return Ok(Vec::new());
            }
        };

        match decode_todo_list(response.first()) {
            Ok(items) => Ok(items),
            Err(reason) => {
                log::warn!("Discarding todo list for {}: {}", address, reason);
                Ok(Vec::new())
            }
        }
    }

    /// Number of todos of `address`; 0 on empty input or any failure.
    pub async fn get_count(&self, address: &str) -> u64 {
        let Ok(address) = AccountAddress::parse(address) else {
            return 0;
        };
        match self.view(TodoFunction::GetTodoCount, &address).await {
            Ok(response) => response.first().and_then(coerce_u64).unwrap_or(0),
            Err(error) => {
                log::error!("Error fetching todo count for {}: {}", address, error);
                0
            }
        }
    }

    /// Whether `address` has a list resource; false on empty input or any failure.
    pub async fn has_list(&self, address: &str) -> bool {
        let Ok(address) = AccountAddress::parse(address) else {
            return false;
        };
        match self.view(TodoFunction::HasTodoList, &address).await {
            Ok(response) => response.first().map(coerce_bool).unwrap_or(false),
            Err(error) => {
                log::error!("Error checking todo list for {}: {}", address, error);
                false
            }
        }
    }

    async fn view(&self, function: TodoFunction, address: &AccountAddress) -> Result<Vec<Value>, TransportError> {
        let request = ViewRequest::new(
            self.function_id(function),
            vec![Value::String(address.as_str().to_string())],
        );
        self.ledger.view(&request).await
    }

    // ========================
    // Writes
    // ========================

    /// Create a todo with the trimmed `task`. Returns the confirmed transaction hash.
    pub async fn create(&self, task: &str) -> Result<String, GatewayError> {
        let task = validate_task(task)?;
        self.submit(
            Operation::Create,
            TodoFunction::CreateTodo,
            vec![EntryArgument::String(task)],
        )
        .await
    }

    /// Flip the completed flag of todo `id`.
    pub async fn toggle(&self, id: i64) -> Result<String, GatewayError> {
        let id = TodoId::new(id)?;
        self.submit(
            Operation::Complete,
            TodoFunction::CompleteTodo,
            vec![EntryArgument::U64(id.get())],
        )
        .await
    }

    /// Replace the task text of todo `id`.
    pub async fn update(&self, id: i64, task: &str) -> Result<String, GatewayError> {
        let id = TodoId::new(id)?;
        let task = validate_task(task)?;
        self.submit(
            Operation::Update,
            TodoFunction::UpdateTodo,
            vec![EntryArgument::U64(id.get()), EntryArgument::String(task)],
        )
        .await
    }

    /// Remove todo `id` permanently.
    pub async fn delete(&self, id: i64) -> Result<String, GatewayError> {
        let id = TodoId::new(id)?;
        self.submit(
            Operation::Delete,
            TodoFunction::DeleteTodo,
            vec![EntryArgument::U64(id.get())],
        )
        .await
    }

    async fn submit(
        &self,
        operation: Operation,
        function: TodoFunction,
        arguments: Vec<EntryArgument>,
    ) -> Result<String, GatewayError> {
        let (Some(signer), Some(sender)) = (self.signer.as_ref(), self.account.as_ref()) else {
            return Err(GatewayError::NotConnected);
        };

        let transaction = EntryFunctionTransaction::new(sender.clone(), self.function_id(function), arguments);
        log::debug!(
            "{}: function={} sender={} args={:?}",
            operation,
            transaction.function,
            transaction.sender,
            transaction.function_arguments
        );

        let pending = signer.sign_and_submit(&transaction).await.map_err(|error| {
            log::error!("Error in {} (contract {}): {}", operation, self.contract_address(), error);
            GatewayError::operation_failed(operation, Stage::Submit, error)
        })?;
        log::info!("{} submitted: {}", operation, pending.hash);

        self.ledger.wait_for_transaction(&pending.hash).await.map_err(|error| {
            log::error!("Error confirming {} {}: {}", operation, pending.hash, error);
            GatewayError::operation_failed(operation, Stage::Confirm, error)
        })?;
        log::info!("{} confirmed: {}", operation, pending.hash);

        Ok(pending.hash)
    }

    // ========================
    // Diagnostics
    // ========================

    /// Log the effective configuration and, for `address`, what the contract holds.
    pub async fn verify_configuration(&self, address: Option<&str>) {
        log::info!("Verifying todo gateway configuration:");
        log::info!("- Network: {}", self.network());
        log::info!("- Contract address: {}", self.contract_address());
        log::info!("- Signer available: {}", self.has_signer());
        log::info!("- Configured: {}", self.is_configured());

        if let Some(address) = address {
            log::info!("- User address: {}", address);
            log::info!("- User has todo list: {}", self.has_list(address).await);
            log::info!("- Todo count: {}", self.get_count(address).await);
        }
    }
}

impl fmt::Debug for TodoGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoGateway")
            .field("config", &self.config)
            .field("account", &self.account)
            .field("has_signer", &self.signer.is_some())
            .finish()
    }
}
