//! In-Memory Contract
//!
//! Test double standing in for both the node and the wallet. Executes the
//! `todo_list` entry functions against local state, answers view calls in
//! the node's JSON encoding, and records every call it sees.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::TransportError;
use crate::item::TodoItem;
use crate::payload::{EntryArgument, EntryFunctionTransaction, PendingTransaction, TodoFunction, ViewRequest};
use crate::transport::{LedgerClient, TransactionSigner};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    View(ViewRequest),
    Submit(EntryFunctionTransaction),
    Wait(String),
}

#[derive(Default)]
struct TodoList {
    next_id: u64,
    items: Vec<TodoItem>,
}

struct ContractState {
    lists: HashMap<String, TodoList>,
    clock: u64,
    submitted: u64,
    outcomes: HashMap<String, Result<(), String>>,
}

pub struct MemoryLedger {
    contract: String,
    state: RefCell<ContractState>,
    calls: RefCell<Vec<RecordedCall>>,
    /// Raw `get_todos` result served instead of the emulated list
    todos_override: RefCell<Option<Value>>,
    pub fail_views: Cell<bool>,
    pub fail_submit: Cell<bool>,
    pub fail_confirm: Cell<bool>,
}

impl MemoryLedger {
    pub fn new(contract: &str) -> Self {
        Self {
            contract: contract.to_string(),
            state: RefCell::new(ContractState {
                lists: HashMap::new(),
                clock: 1_700_000_000,
                submitted: 0,
                outcomes: HashMap::new(),
            }),
            calls: RefCell::new(Vec::new()),
            todos_override: RefCell::new(None),
            fail_views: Cell::new(false),
            fail_submit: Cell::new(false),
            fail_confirm: Cell::new(false),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn submissions(&self) -> Vec<EntryFunctionTransaction> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Submit(txn) => Some(txn.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Directly seed a todo for `owner`, bypassing the write path.
    pub fn seed(&self, owner: &str, task: &str) -> u64 {
        let mut state = self.state.borrow_mut();
        let created_at = state.clock;
        let list = state.lists.entry(owner.to_string()).or_default();
        list.next_id += 1;
        let id = list.next_id;
        list.items.push(TodoItem {
            id,
            task: task.to_string(),
            completed: false,
            created_at,
        });
        id
    }

    /// Serve `payload` verbatim for every later `get_todos` view.
    pub fn override_todos(&self, payload: Value) {
        *self.todos_override.borrow_mut() = Some(payload);
    }

    fn record(&self, call: RecordedCall) {
        self.calls.borrow_mut().push(call);
    }

    fn execute(&self, txn: &EntryFunctionTransaction) -> Result<(), String> {
        if txn.function.address() != self.contract || txn.function.module() != "todo_list" {
            return Err(format!("FUNCTION_RESOLUTION_FAILURE: {}", txn.function));
        }
        let function = TodoFunction::from_name(txn.function.name())
            .ok_or_else(|| format!("FUNCTION_RESOLUTION_FAILURE: {}", txn.function))?;
        let args = &txn.function_arguments;
        let id_arg = || args.first().and_then(EntryArgument::as_u64).ok_or("NUMBER_OF_ARGUMENTS_MISMATCH");

        let mut state = self.state.borrow_mut();
        state.clock += 60;
        let now = state.clock;
        let owner = txn.sender.as_str().to_string();

        match function {
            TodoFunction::CreateTodo => {
                let task = args.last().and_then(EntryArgument::as_str).ok_or("NUMBER_OF_ARGUMENTS_MISMATCH")?;
                let list = state.lists.entry(owner).or_default();
                list.next_id += 1;
                let id = list.next_id;
                list.items.push(TodoItem {
                    id,
                    task: task.to_string(),
                    completed: false,
                    created_at: now,
                });
                Ok(())
            }
            TodoFunction::CompleteTodo | TodoFunction::UpdateTodo | TodoFunction::DeleteTodo => {
                let id = id_arg()?;
                let list = state.lists.get_mut(&owner).ok_or("Move abort: E_NOT_INITIALIZED")?;
                let position = list
                    .items
                    .iter()
                    .position(|item| item.id == id)
                    .ok_or("Move abort: E_TODO_NOT_FOUND")?;
                match function {
                    TodoFunction::CompleteTodo => {
                        list.items[position].completed = !list.items[position].completed;
                    }
                    TodoFunction::UpdateTodo => {
                        let task = args.get(1).and_then(EntryArgument::as_str).ok_or("NUMBER_OF_ARGUMENTS_MISMATCH")?;
                        list.items[position].task = task.to_string();
                    }
                    _ => {
                        list.items.remove(position);
                    }
                }
                Ok(())
            }
            TodoFunction::GetTodos | TodoFunction::GetTodoCount | TodoFunction::HasTodoList => {
                Err(format!("{} is not an entry function", txn.function))
            }
        }
    }
}

#[async_trait(?Send)]
impl LedgerClient for MemoryLedger {
    async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>, TransportError> {
        self.record(RecordedCall::View(request.clone()));
        if self.fail_views.get() {
            return Err(TransportError::Request { message: "connection refused".into() });
        }

        let owner = request
            .arguments
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| TransportError::Http { status: 400, body: "missing address argument".into() })?;
        let state = self.state.borrow();
        let list = state.lists.get(owner);
        let not_initialized = || TransportError::Http {
            status: 400,
            body: "Move abort: E_NOT_INITIALIZED".into(),
        };

        match TodoFunction::from_name(request.function.name()) {
            Some(TodoFunction::GetTodos) => {
                if let Some(payload) = self.todos_override.borrow().clone() {
                    return Ok(vec![payload]);
                }
                let list = list.ok_or_else(not_initialized)?;
                let items: Vec<Value> = list
                    .items
                    .iter()
                    .map(|item| {
                        json!({
                            "id": item.id.to_string(),
                            "task": item.task,
                            "completed": item.completed,
                            "created_at": item.created_at.to_string(),
                        })
                    })
                    .collect();
                Ok(vec![Value::Array(items)])
            }
            Some(TodoFunction::GetTodoCount) => {
                let list = list.ok_or_else(not_initialized)?;
                Ok(vec![Value::String(list.items.len().to_string())])
            }
            Some(TodoFunction::HasTodoList) => Ok(vec![Value::Bool(list.is_some())]),
            _ => Err(TransportError::Http {
                status: 400,
                body: format!("{} is not a view function", request.function),
            }),
        }
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<(), TransportError> {
        self.record(RecordedCall::Wait(hash.to_string()));
        if self.fail_confirm.get() {
            return Err(TransportError::Timeout { hash: hash.to_string() });
        }
        match self.state.borrow().outcomes.get(hash) {
            Some(Ok(())) => Ok(()),
            Some(Err(vm_status)) => Err(TransportError::Rejected {
                hash: hash.to_string(),
                vm_status: vm_status.clone(),
            }),
            None => Err(TransportError::Timeout { hash: hash.to_string() }),
        }
    }
}

#[async_trait(?Send)]
impl TransactionSigner for MemoryLedger {
    async fn sign_and_submit(
        &self,
        transaction: &EntryFunctionTransaction,
    ) -> Result<PendingTransaction, TransportError> {
        self.record(RecordedCall::Submit(transaction.clone()));
        if self.fail_submit.get() {
            return Err(TransportError::Wallet { message: "User rejected the request".into() });
        }

        let outcome = self.execute(transaction);
        let mut state = self.state.borrow_mut();
        state.submitted += 1;
        let hash = format!("0x{:064x}", state.submitted);
        state.outcomes.insert(hash.clone(), outcome);
        Ok(PendingTransaction { hash })
    }
}
