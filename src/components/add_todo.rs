//! Add Todo Form Component
//!
//! Single-line form creating a todo, with a live character counter.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_gateway::{validate_task, MAX_TASK_LENGTH};

use crate::commands;
use crate::context::use_app_context;

/// Counter turns to a warning below this many remaining characters
const LOW_REMAINING: usize = 20;

#[component]
pub fn AddTodo() -> impl IntoView {
    let ctx = use_app_context();

    let (task, set_task) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let char_count = move || task.with(|t| t.chars().count());
    let remaining = move || MAX_TASK_LENGTH.saturating_sub(char_count());
    let is_valid = move || task.with(|t| validate_task(t).is_ok());
    let disabled = move || submitting.get() || ctx.busy.get();

    // Enter submits through the form
    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() || ctx.busy.get_untracked() {
            return;
        }
        let text = task.get_untracked();
        if let Err(error) = validate_task(&text) {
            ctx.notices.warning("Invalid Todo", error.to_string());
            return;
        }

        set_submitting.set(true);
        spawn_local(async move {
            if ctx.perform("To-do added successfully!", commands::create_todo(text)).await {
                set_task.set(String::new());
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="add-todo" on:submit=create_todo>
            <h2>"Add New Todo"</h2>
            <div class="add-todo-row">
                <input
                    type="text"
                    class=move || { if char_count() > 0 && !is_valid() { "task-input invalid" } else { "task-input" } }
                    placeholder="What needs to be done?"
                    maxlength=MAX_TASK_LENGTH.to_string()
                    prop:value=move || task.get()
                    disabled=disabled
                    on:input=move |ev| set_task.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || disabled() || !is_valid()>
                    {move || if submitting.get() { "Adding..." } else { "Add Todo" }}
                </button>
            </div>
            <div class=move || { if remaining() < LOW_REMAINING { "char-counter warning" } else { "char-counter" } }>
                {move || format!("{}/{}", char_count(), MAX_TASK_LENGTH)}
                <Show when=move || { char_count() > 0 && remaining() < LOW_REMAINING }>
                    <span class="char-remaining">{move || format!(" ({} characters remaining)", remaining())}</span>
                </Show>
            </div>
        </form>
    }
}
