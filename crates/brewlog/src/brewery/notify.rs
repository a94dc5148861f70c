//! Notify — notifier that surfaces user-facing messages as tracing events.

use tracing::{info, warn};

use super::{NotificationKind, Notifier};

/// Emits every notification under the `brewlog::notify` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, headline: &str, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Warning | NotificationKind::Danger => warn!(
                target: "brewlog::notify",
                headline = headline,
                message = message,
                kind = kind.as_str(),
                "Notification"
            ),
            NotificationKind::Info | NotificationKind::Success => info!(
                target: "brewlog::notify",
                headline = headline,
                message = message,
                kind = kind.as_str(),
                "Notification"
            ),
        }
    }
}
