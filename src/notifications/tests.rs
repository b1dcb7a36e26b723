use super::{Notification, NotificationLevel};

#[test]
fn test_notification_constructors_set_level() {
    assert_eq!(Notification::success("done").level, NotificationLevel::Success);
    assert_eq!(Notification::warning("careful").level, NotificationLevel::Warning);
    assert_eq!(Notification::error("failed").level, NotificationLevel::Error);
}

#[test]
fn test_notification_display_prefixes_level() {
    let notification = Notification::warning("2 trades imported, 1 failed");

    assert_eq!(notification.to_string(), "[warning] 2 trades imported, 1 failed");
}
