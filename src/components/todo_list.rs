//! Todo List Component
//!
//! The connected account's todos, pending first, with summary stats.

use leptos::prelude::*;

use crate::components::TodoRow;
use crate::models::{pending_first, TodoStats};
use crate::store::{store_is_loading, store_todos, use_app_store};

#[component]
pub fn TodoList() -> impl IntoView {
    let store = use_app_store();

    // Only one row edits at a time
    let editing = RwSignal::new(None::<u64>);

    let stats = Memo::new(move |_| TodoStats::from_items(&store_todos(&store)));
    let sorted = move || pending_first(store_todos(&store));

    view! {
        <section class="todo-list">
            <div class="todo-list-header">
                <h2>{move || {
                    let s = stats.get();
                    format!("Todo List ({} total, {} pending)", s.total, s.pending)
                }}</h2>
                <Show when=move || { stats.get().total > 0 }>
                    <span class=move || if stats.get().completion_rate == 100 { "rate-tag done" } else { "rate-tag" }>
                        {move || format!("{}% Complete", stats.get().completion_rate)}
                    </span>
                </Show>
            </div>

            <Show when=move || store_is_loading(&store)>
                <div class="loading">"Loading todos..."</div>
            </Show>

            <Show
                when=move || { stats.get().total > 0 }
                fallback=move || view! {
                    <div class="empty-state">"No todos yet. Add your first todo above! 📝"</div>
                }
            >
                <ul class="todo-items">
                    <For
                        each=sorted
                        key=|todo| (todo.id, todo.completed, todo.task.clone())
                        children=move |todo| view! { <TodoRow todo=todo editing=editing /> }
                    />
                </ul>
            </Show>

            <Show when=move || { stats.get().completed > 0 }>
                <div class="completion-summary">
                    {move || {
                        let s = stats.get();
                        let plural = if s.completed == 1 { "" } else { "s" };
                        format!("🎉 Great job! You've completed {} task{}.", s.completed, plural)
                    }}
                </div>
            </Show>
        </section>
    }
}
