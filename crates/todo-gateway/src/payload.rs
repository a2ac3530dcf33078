//! Remote Call Payloads
//!
//! Function addressing and the request shapes sent to the node (view calls)
//! and to the signing agent (entry calls).

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

use crate::error::ValidationError;

/// Move module that holds the todo list resource
pub const MODULE_NAME: &str = "todo_list";

/// Functions exposed by the `todo_list` module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoFunction {
    GetTodos,
    GetTodoCount,
    HasTodoList,
    CreateTodo,
    CompleteTodo,
    UpdateTodo,
    DeleteTodo,
}

impl TodoFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoFunction::GetTodos => "get_todos",
            TodoFunction::GetTodoCount => "get_todo_count",
            TodoFunction::HasTodoList => "has_todo_list",
            TodoFunction::CreateTodo => "create_todo",
            TodoFunction::CompleteTodo => "complete_todo",
            TodoFunction::UpdateTodo => "update_todo",
            TodoFunction::DeleteTodo => "delete_todo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            TodoFunction::GetTodos,
            TodoFunction::GetTodoCount,
            TodoFunction::HasTodoList,
            TodoFunction::CreateTodo,
            TodoFunction::CompleteTodo,
            TodoFunction::UpdateTodo,
            TodoFunction::DeleteTodo,
        ]
        .into_iter()
        .find(|f| f.as_str() == name)
    }
}

/// Fully qualified `<address>::<module>::<function>` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionId {
    address: String,
    module: String,
    name: String,
}

impl FunctionId {
    pub fn new(address: &str, module: &str, name: &str) -> Self {
        Self {
            address: address.to_string(),
            module: module.to_string(),
            name: name.to_string(),
        }
    }

    /// `<contract>::todo_list::<function>`
    pub fn todo(contract_address: &str, function: TodoFunction) -> Self {
        Self::new(contract_address, MODULE_NAME, function.as_str())
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)
    }
}

impl Serialize for FunctionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An account address as handed out by the wallet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    pub fn parse(address: &str) -> Result<Self, ValidationError> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x1234...abcd` form for display
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only call body, as accepted by the node's `/view` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRequest {
    pub function: FunctionId,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl ViewRequest {
    pub fn new(function: FunctionId, arguments: Vec<Value>) -> Self {
        Self {
            function,
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

/// Positional argument of an entry call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryArgument {
    U64(u64),
    String(String),
}

impl EntryArgument {
    /// Node JSON encoding: u64 travels as a decimal string.
    pub fn to_node_json(&self) -> Value {
        match self {
            EntryArgument::U64(n) => Value::String(n.to_string()),
            EntryArgument::String(s) => Value::String(s.clone()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EntryArgument::String(s) => Some(s),
            EntryArgument::U64(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            EntryArgument::U64(n) => Some(*n),
            EntryArgument::String(_) => None,
        }
    }
}

/// State-mutating call handed to the signing agent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFunctionTransaction {
    pub sender: AccountAddress,
    pub function: FunctionId,
    pub type_arguments: Vec<String>,
    pub function_arguments: Vec<EntryArgument>,
}

impl EntryFunctionTransaction {
    pub fn new(sender: AccountAddress, function: FunctionId, function_arguments: Vec<EntryArgument>) -> Self {
        Self {
            sender,
            function,
            type_arguments: Vec::new(),
            function_arguments,
        }
    }

    /// Legacy `entry_function_payload` object understood by injected wallets
    pub fn to_entry_function_payload(&self) -> Value {
        json!({
            "type": "entry_function_payload",
            "function": self.function.to_string(),
            "type_arguments": self.type_arguments,
            "arguments": self.function_arguments.iter().map(EntryArgument::to_node_json).collect::<Vec<_>>(),
        })
    }
}

/// Submission acknowledgment; the hash is the handle for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
}
