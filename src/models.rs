//! View Models
//!
//! Send-safe shapes the UI keeps in signals, plus list presentation helpers.

use chrono::{DateTime, Local};
use todo_gateway::{Identity, TodoItem};

/// The connected account as the header shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedAccount {
    pub wallet: String,
    pub address: String,
    pub short_address: String,
}

impl From<&Identity> for ConnectedAccount {
    fn from(identity: &Identity) -> Self {
        Self {
            wallet: identity.wallet().to_string(),
            address: identity.address().as_str().to_string(),
            short_address: identity.address().short(),
        }
    }
}

impl ConnectedAccount {
    /// `Petra: 0x1234...abcd`
    pub fn label(&self) -> String {
        format!("{}: {}", self.wallet, self.short_address)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Whole percent, rounded
    pub completion_rate: u32,
}

impl TodoStats {
    pub fn from_items(items: &[TodoItem]) -> Self {
        let total = items.len();
        let completed = items.iter().filter(|item| item.completed).count();
        let completion_rate = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }
}

/// Which panels the main area shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    App,
    Docs,
    Split,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::App, ViewMode::Docs, ViewMode::Split];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::App => "Todo App",
            ViewMode::Docs => "Documentation",
            ViewMode::Split => "Split View",
        }
    }

    pub fn shows_app(&self) -> bool {
        matches!(self, ViewMode::App | ViewMode::Split)
    }

    pub fn shows_docs(&self) -> bool {
        matches!(self, ViewMode::Docs | ViewMode::Split)
    }
}

/// Pending items first; order within each group is kept.
pub fn pending_first(mut items: Vec<TodoItem>) -> Vec<TodoItem> {
    items.sort_by_key(|item| item.completed);
    items
}

/// Render a creation timestamp (seconds) in local time.
pub fn format_created_at(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| utc.with_timezone(&Local).format("%b %-d, %Y, %I:%M %p").to_string())
        .unwrap_or_else(|| "Unknown date".to_string())
}
