use std::time::{Duration, Instant};

use crate::core::Notification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Toast {
    pub message: &'static str,
    deadline: Instant,
}

/// At most one visible toast. Every toast carries its own deadline, so an
/// expiry check for a replaced toast cannot hide its successor.
#[derive(Debug, Clone)]
pub(crate) struct ToastSlot {
    ttl: Duration,
    current: Option<Toast>,
}

impl ToastSlot {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub(crate) fn show(&mut self, notification: Notification, now: Instant) {
        self.current = Some(Toast {
            message: notification.message(),
            deadline: now + self.ttl,
        });
    }

    pub(crate) fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub(crate) fn expire(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|toast| now >= toast.deadline)
        {
            self.current = None;
        }
    }

    pub(crate) fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3);

    #[test]
    fn toast_hides_after_ttl() {
        let start = Instant::now();
        let mut slot = ToastSlot::new(TTL);
        slot.show(Notification::Created, start);

        slot.expire(start + Duration::from_millis(2_900));
        assert_eq!(
            slot.current().map(|t| t.message),
            Some("Task Created Successfully")
        );

        slot.expire(start + TTL);
        assert!(slot.current().is_none());
    }

    #[test]
    fn replacement_restarts_deadline() {
        let start = Instant::now();
        let mut slot = ToastSlot::new(TTL);
        slot.show(Notification::Created, start);
        slot.show(Notification::Deleted, start + Duration::from_secs(2));

        // The first toast's deadline has passed; the second must survive it.
        slot.expire(start + Duration::from_secs(3));
        assert_eq!(slot.current().map(|t| t.message), Some("Task Deleted"));

        slot.expire(start + Duration::from_secs(5));
        assert!(slot.current().is_none());
    }

    #[test]
    fn dismiss_reports_whether_anything_was_visible() {
        let mut slot = ToastSlot::new(TTL);
        assert!(!slot.dismiss());
        slot.show(Notification::StatusEdited, Instant::now());
        assert!(slot.dismiss());
        assert!(slot.current().is_none());
    }
}
