//! Toast surface. The editor reports save outcomes through this channel and
//! nothing else; toasts are fire-and-forget and auto-dismiss.

use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration: Duration::from_millis(DEFAULT_TOAST_MS),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

pub trait Notifier {
    fn show(&mut self, toast: Toast);
}

#[derive(Debug, Clone)]
struct ActiveToast {
    toast: Toast,
    deadline: Instant,
}

/// In-memory [`Notifier`] a front end drains each frame. Entries expire
/// after their duration; [`ToastQueue::tick`] prunes them.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    entries: Vec<ActiveToast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_at(&mut self, toast: Toast, now: Instant) {
        let deadline = now + toast.duration;
        self.entries.push(ActiveToast { toast, deadline });
    }

    pub fn tick(&mut self, now: Instant) {
        self.entries.retain(|entry| entry.deadline > now);
    }

    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|entry| &entry.toast)
    }

    pub fn last(&self) -> Option<&Toast> {
        self.entries.last().map(|entry| &entry.toast)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn show(&mut self, toast: Toast) {
        self.show_at(toast, Instant::now());
    }
}
