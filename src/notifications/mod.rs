mod console_notifier;
#[cfg(test)]
mod tests;

use std::fmt;
use std::fmt::{Display, Formatter};

pub use console_notifier::ConsoleNotifier;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error
}

/// A human readable message surfaced to whoever drives the import.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, message: message.into() }
    }
}

impl Display for Notification {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let label = match self.level {
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error"
        };

        write!(formatter, "[{}] {}", label, self.message)
    }
}

pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notification: Notification);
}
