//! UI Components
//!
//! Reusable Leptos components.

mod add_todo;
mod delete_confirm_button;
mod documentation;
mod footer;
mod notification_stack;
mod todo_list;
mod todo_row;
mod wallet_connection;
mod wallet_helper;

pub use add_todo::AddTodo;
pub use delete_confirm_button::DeleteConfirmButton;
pub use documentation::Documentation;
pub use footer::Footer;
pub use notification_stack::NotificationStack;
pub use todo_list::TodoList;
pub use todo_row::TodoRow;
pub use wallet_connection::WalletConnection;
pub use wallet_helper::WalletHelper;
