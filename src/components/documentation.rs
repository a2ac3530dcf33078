//! Documentation Component
//!
//! Reference page for the on-chain `todo_list` module and the client.

use leptos::prelude::*;
use todo_gateway::{TodoFunction, MODULE_NAME};

use crate::commands;

struct FunctionDoc {
    function: TodoFunction,
    signature: &'static str,
    summary: &'static str,
}

static ENTRY_FUNCTIONS: [FunctionDoc; 4] = [
    FunctionDoc {
        function: TodoFunction::CreateTodo,
        signature: "(account: &signer, task: String)",
        summary: "Creates a new to-do for the signer, creating the list on first use.",
    },
    FunctionDoc {
        function: TodoFunction::CompleteTodo,
        signature: "(account: &signer, todo_id: u64)",
        summary: "Toggles the completion status of a to-do.",
    },
    FunctionDoc {
        function: TodoFunction::UpdateTodo,
        signature: "(account: &signer, todo_id: u64, new_task: String)",
        summary: "Replaces the task text of a to-do.",
    },
    FunctionDoc {
        function: TodoFunction::DeleteTodo,
        signature: "(account: &signer, todo_id: u64)",
        summary: "Removes a to-do from the list.",
    },
];

static VIEW_FUNCTIONS: [FunctionDoc; 3] = [
    FunctionDoc {
        function: TodoFunction::GetTodos,
        signature: "(user_address: address): vector<TodoItem>",
        summary: "All to-dos owned by the address.",
    },
    FunctionDoc {
        function: TodoFunction::GetTodoCount,
        signature: "(user_address: address): u64",
        summary: "Number of to-dos owned by the address.",
    },
    FunctionDoc {
        function: TodoFunction::HasTodoList,
        signature: "(user_address: address): bool",
        summary: "Whether the address has created a list yet.",
    },
];

static TROUBLESHOOTING: [(&str, &str); 4] = [
    ("Wallet connection fails", "Make sure the wallet is installed and set to the configured network, then refresh the page."),
    ("Transaction fails with insufficient funds", "Fund the account with testnet APT from the Aptos faucet."),
    ("Contract address not found", "Check that CONTRACT_ADDRESS was set when the app was built."),
    ("To-dos not loading", "Check the browser console, and make sure the wallet is connected and the module is published."),
];

fn function_list(docs: &'static [FunctionDoc]) -> impl IntoView {
    docs.iter()
        .map(|doc| {
            view! {
                <li class="function-doc">
                    <code>{format!("{}{}", doc.function.as_str(), doc.signature)}</code>
                    <p>{doc.summary}</p>
                </li>
            }
        })
        .collect_view()
}

#[component]
pub fn Documentation() -> impl IntoView {
    let module_path = match commands::gateway_config() {
        Ok(config) => format!("{}::{}", config.contract_address(), MODULE_NAME),
        Err(_) => format!("todo_addr::{}", MODULE_NAME),
    };

    view! {
        <article class="documentation">
            <h2>"📚 Aptos To-do List Documentation"</h2>
            <p>
                "A to-do list stored entirely on the Aptos blockchain. Every to-do lives in a Move "
                "resource under your account, so the data is tied to your wallet address."
            </p>

            <section class="doc-card">
                <h3>"🚀 How It Works"</h3>
                <ol>
                    <li>"Connect an Aptos wallet (Petra, Martian, or Pontem)"</li>
                    <li>"Create to-dos; each one is a transaction you sign"</li>
                    <li>"Complete, edit, or delete them, also on-chain"</li>
                    <li>"Reads go through view functions and cost nothing"</li>
                </ol>
            </section>

            <h3>"Prerequisites"</h3>
            <ul>
                <li>"An Aptos wallet (Petra, Martian, or Pontem)"</li>
                <li>"Testnet APT for transaction fees"</li>
            </ul>

            <h3>"Smart Contract"</h3>
            <p>"Module: " <code>{module_path}</code></p>

            <h4>"TodoItem"</h4>
            <pre class="doc-code">
                "struct TodoItem has store, drop, copy {\n"
                "    id: u64,\n"
                "    task: String,\n"
                "    completed: bool,\n"
                "    created_at: u64,\n"
                "}"
            </pre>

            <h4>"TodoList"</h4>
            <pre class="doc-code">
                "struct TodoList has key {\n"
                "    todos: Table<u64, TodoItem>,\n"
                "    next_id: u64,\n"
                "    set_todo_event: EventHandle<TodoItem>,\n"
                "    task_counter: u64,\n"
                "}"
            </pre>

            <h4>"Entry functions"</h4>
            <ul class="function-docs">{function_list(&ENTRY_FUNCTIONS)}</ul>

            <h4>"View functions"</h4>
            <ul class="function-docs">{function_list(&VIEW_FUNCTIONS)}</ul>

            <h3>"Troubleshooting"</h3>
            <dl class="troubleshooting">
                {TROUBLESHOOTING
                    .iter()
                    .map(|(problem, solution)| {
                        view! {
                            <dt>{*problem}</dt>
                            <dd>{*solution}</dd>
                        }
                    })
                    .collect_view()}
            </dl>
        </article>
    }
}
