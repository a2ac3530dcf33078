//! Todo Row Component
//!
//! One todo with its checkbox, inline editor and delete control.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_gateway::{validate_task, TodoItem, MAX_TASK_LENGTH};

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::format_created_at;

/// A single todo row
///
/// `editing` holds the id of the row being edited; at most one row edits at a time.
#[component]
pub fn TodoRow(todo: TodoItem, editing: RwSignal<Option<u64>>) -> impl IntoView {
    let ctx = use_app_context();

    let id = todo.id;
    let completed = todo.completed;
    let created_at = todo.created_at;
    let original = StoredValue::new(todo.task.clone());
    let (draft, set_draft) = signal(todo.task.clone());
    let is_editing = move || editing.get() == Some(id);
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    let toggle = move |_: web_sys::Event| {
        spawn_local(async move {
            if !ctx.perform("To-do updated successfully!", commands::toggle_todo(id)).await {
                // No re-fetch follows a failure; undo the browser's flip
                if let Some(input) = checkbox_ref.get_untracked() {
                    input.set_checked(completed);
                }
            }
        });
    };

    let start_edit = move |_: web_sys::MouseEvent| {
        set_draft.set(original.get_value());
        editing.set(Some(id));
    };

    let cancel_edit = move || {
        editing.set(None);
        set_draft.set(original.get_value());
    };

    let save_edit = move || {
        let text = draft.get_untracked();
        if let Err(error) = validate_task(&text) {
            ctx.notices.warning("Invalid Todo", error.to_string());
            return;
        }
        spawn_local(async move {
            if ctx.perform("To-do updated successfully!", commands::update_todo(id, text)).await {
                editing.set(None);
            }
        });
    };

    let delete = Callback::new(move |_| {
        spawn_local(async move {
            ctx.perform("To-do deleted successfully!", commands::delete_todo(id)).await;
        });
    });

    let busy = Signal::derive(move || ctx.busy.get());

    view! {
        <li class=if completed { "todo-row completed" } else { "todo-row" }>
            <input
                type="checkbox"
                class="todo-checkbox"
                node_ref=checkbox_ref
                prop:checked=completed
                disabled=move || ctx.busy.get() || is_editing()
                on:change=toggle
            />

            {move || if is_editing() {
                view! {
                    <div class="todo-edit">
                        <input
                            type="text"
                            class="todo-edit-input"
                            maxlength=MAX_TASK_LENGTH.to_string()
                            prop:value=move || draft.get()
                            disabled=move || ctx.busy.get()
                            autofocus=true
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                            on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                                "Enter" => {
                                    ev.prevent_default();
                                    save_edit();
                                }
                                "Escape" => {
                                    ev.prevent_default();
                                    cancel_edit();
                                }
                                _ => {}
                            }
                        />
                        <button
                            class="save-btn"
                            disabled=move || ctx.busy.get() || draft.with(|d| d.trim().is_empty())
                            on:click=move |_| save_edit()
                        >
                            "Save"
                        </button>
                        <button class="cancel-btn" on:click=move |_| cancel_edit()>"Cancel"</button>
                    </div>
                }.into_any()
            } else {
                view! {
                    <div class="todo-body">
                        <span class="todo-task">{original.get_value()}</span>
                        <span class="todo-meta">
                            {format!("ID: {} • Created: {}", id, format_created_at(created_at))}
                            {completed.then(|| view! { <span class="todo-tag">"Completed"</span> })}
                        </span>
                    </div>
                    <div class="todo-actions">
                        <button
                            class="edit-btn"
                            title="Edit todo"
                            disabled=move || ctx.busy.get()
                            on:click=start_edit
                        >
                            "Edit"
                        </button>
                        <DeleteConfirmButton button_class="delete-btn" disabled=busy on_confirm=delete />
                    </div>
                }.into_any()
            }}
        </li>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::context::{AppContext, Notices};
    use gloo_timers::future::TimeoutFuture;
    use leptos::mount::mount_to;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_failed_toggle_restores_checkbox() {
        let document = web_sys::window().unwrap().document().unwrap();
        let parent: web_sys::HtmlElement = document.create_element("div").unwrap().unchecked_into();
        document.body().unwrap().append_child(&parent).unwrap();

        let ctx = AppContext::new(signal(None), signal(0), signal(false), Notices::new());
        let todo = TodoItem {
            id: 1,
            task: "still pending".into(),
            completed: false,
            created_at: 1_700_000_000,
        };
        let _handle = mount_to(parent.clone(), move || {
            provide_context(ctx);
            view! { <TodoRow todo=todo editing=RwSignal::new(None) /> }
        });

        let checkbox: web_sys::HtmlInputElement = parent
            .query_selector(".todo-checkbox")
            .unwrap()
            .unwrap()
            .unchecked_into();
        assert!(!checkbox.checked());

        // No wallet is connected, so the toggle fails
        checkbox.click();
        assert!(checkbox.checked());
        TimeoutFuture::new(50).await;

        assert!(!checkbox.checked());
        assert!(!ctx.busy.get_untracked());
    }
}
