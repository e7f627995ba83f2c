use std::time::Duration;

pub const LOAD_FAILED: &str = "Failed to load landmarks";
pub const ADD_FAILED: &str = "Failed to add landmark";
pub const ADDED: &str = "Landmark added successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Danger,
}

impl NotificationKind {
    pub fn alert_class(self) -> &'static str {
        match self {
            NotificationKind::Success => "alert-success",
            NotificationKind::Danger => "alert-danger",
        }
    }
}

/// A transient banner above the add-landmark form
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub expires_after: Duration,
}
