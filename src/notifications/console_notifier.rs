use std::io::{stderr, Write};

use tracing::error;

use crate::notifications::{Notification, Notifier};

/// Writes notifications to stderr, leaving stdout free for redirected output.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(write_error) = writeln!(stderr().lock(), "{notification}") {
            error!("Could not write notification: {write_error}");
        }
    }
}
