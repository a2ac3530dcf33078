//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_gateway::TodoItem;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Todos of the connected account, as last fetched
    pub todos: Vec<TodoItem>,
    /// A list fetch is in flight
    pub loading: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_todos(store: &AppStore) -> Vec<TodoItem> {
    store.todos().get()
}

pub fn store_set_todos(store: &AppStore, todos: Vec<TodoItem>) {
    store.todos().set(todos);
}

pub fn store_is_loading(store: &AppStore) -> bool {
    store.loading().get()
}

pub fn store_set_loading(store: &AppStore, loading: bool) {
    store.loading().set(loading);
}
