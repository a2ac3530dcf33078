//! Notification Stack Component
//!
//! Renders the toasts held in [`Notices`](crate::context::Notices).

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn NotificationStack() -> impl IntoView {
    let notices = use_app_context().notices;

    view! {
        <div class="notification-stack">
            <For
                each=move || notices.list.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class() role="alert">
                            <div class="notice-body">
                                <strong>{notice.title}</strong>
                                <p>{notice.message}</p>
                            </div>
                            <button class="notice-close" on:click=move |_| notices.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
