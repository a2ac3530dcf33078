//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::future::Future;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::models::ConnectedAccount;

/// How long a notification stays on screen
pub const NOTICE_DURATION_MS: u32 = 4_500;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Connected account (None = disconnected) - read
    pub account: ReadSignal<Option<ConnectedAccount>>,
    /// Connected account - write
    set_account: WriteSignal<Option<ConnectedAccount>>,
    /// Trigger to reload todos from the chain - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload todos from the chain - write
    set_reload_trigger: WriteSignal<u32>,
    /// A write transaction is in flight - read
    pub busy: ReadSignal<bool>,
    /// A write transaction is in flight - write
    set_busy: WriteSignal<bool>,
    pub notices: Notices,
}

impl AppContext {
    pub fn new(
        account: (ReadSignal<Option<ConnectedAccount>>, WriteSignal<Option<ConnectedAccount>>),
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        busy: (ReadSignal<bool>, WriteSignal<bool>),
        notices: Notices,
    ) -> Self {
        Self {
            account: account.0,
            set_account: account.1,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            busy: busy.0,
            set_busy: busy.1,
            notices,
        }
    }

    /// Trigger a reload of todos
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn set_account(&self, account: Option<ConnectedAccount>) {
        self.set_account.set(account);
    }

    pub fn is_connected(&self) -> bool {
        self.account.with(Option::is_some)
    }

    /// Run one write: inputs are disabled while it is in flight, the list is
    /// re-fetched on success and the outcome is reported either way.
    /// Returns whether the write succeeded.
    pub async fn perform<F>(&self, success: &str, write: F) -> bool
    where
        F: Future<Output = Result<(), String>>,
    {
        self.set_busy.set(true);
        let succeeded = match write.await {
            Ok(()) => {
                self.reload();
                self.notices.success(success);
                true
            }
            Err(message) => {
                log::error!("{}", message);
                self.notices.error("Transaction Error", message);
                false
            }
        };
        self.set_busy.set(false);
        succeeded
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

// ========================
// Notifications
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Warning => "notice notice-warning",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

/// Transient toasts, each dismissed after [`NOTICE_DURATION_MS`]
#[derive(Clone, Copy)]
pub struct Notices {
    pub list: RwSignal<Vec<Notice>>,
    next_id: RwSignal<u32>,
}

impl Notices {
    pub fn new() -> Self {
        Self {
            list: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeKind::Success, "Success", message.into());
    }

    pub fn warning(&self, title: &str, message: impl Into<String>) {
        self.push(NoticeKind::Warning, title, message.into());
    }

    pub fn error(&self, title: &str, message: impl Into<String>) {
        self.push(NoticeKind::Error, title, message.into());
    }

    pub fn dismiss(&self, id: u32) {
        // The stack may already be gone when a timer fires
        let _ = self.list.try_update(|list| list.retain(|notice| notice.id != id));
    }

    fn push(&self, kind: NoticeKind, title: &str, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id.wrapping_add(1));
        self.list.update(|list| {
            list.push(Notice {
                id,
                kind,
                title: title.to_string(),
                message,
            })
        });

        let notices = *self;
        Timeout::new(NOTICE_DURATION_MS, move || notices.dismiss(id)).forget();
    }
}
