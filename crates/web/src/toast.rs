//! Toast notifications.
//!
//! A toast moves through `Entering -> Shown -> Leaving` and is then removed.
//! Every transition is keyed by id and is a no-op once the toast is gone, so
//! late timers never touch a toast that was already dismissed by hand.

use std::str::FromStr;
use std::time::Duration;

use maud::{Markup, html};

/// Delay before the `show` class is added to a freshly inserted toast.
pub const ENTER_DELAY: Duration = Duration::from_millis(100);

/// Time between dropping the `show` class and removing the element.
pub const EXIT_DURATION: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
            ToastKind::Warning => "warning",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "fas fa-check-circle",
            ToastKind::Error => "fas fa-exclamation-circle",
            ToastKind::Info => "fas fa-info-circle",
            ToastKind::Warning => "fas fa-exclamation-triangle",
        }
    }

    /// Lenient parse for values coming from page scripts; unknown kinds become `Info`.
    pub fn from_name(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for ToastKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(ToastKind::Success),
            "error" => Ok(ToastKind::Error),
            "info" => Ok(ToastKind::Info),
            "warning" => Ok(ToastKind::Warning),
            other => Err(format!("unknown toast kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    pub fn get(self) -> u64 {
        self.0
    }

    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok().map(ToastId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
    pub phase: ToastPhase,
}

impl Toast {
    /// Class list for the toast element in its current phase.
    pub fn class_list(&self) -> String {
        match self.phase {
            ToastPhase::Shown => format!("toast {} show", self.kind.class()),
            _ => format!("toast {}", self.kind.class()),
        }
    }

    /// Inner markup: icon, escaped message, close affordance.
    pub fn render(&self) -> Markup {
        html! {
            i class={ "toast-icon " (self.kind.icon()) } {}
            span { (self.message) }
            i.toast-close.fas.fa-times {}
        }
    }
}

/// The live toasts of one toast container, oldest first.
#[derive(Debug, Default)]
pub struct ToastStack {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, duration: Duration) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.toasts.push(Toast { id, message: message.into(), kind, duration, phase: ToastPhase::Entering });
        id
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Entering -> Shown. False if the toast is gone or already past entering.
    pub fn reveal(&mut self, id: ToastId) -> bool {
        self.transition(id, ToastPhase::Entering, ToastPhase::Shown)
    }

    /// Start the exit transition. False if the toast is gone or already leaving.
    pub fn begin_exit(&mut self, id: ToastId) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) if toast.phase != ToastPhase::Leaving => {
                toast.phase = ToastPhase::Leaving;
                true
            }
            _ => false,
        }
    }

    /// Drop the toast. False if it was already removed.
    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    fn transition(&mut self, id: ToastId, from: ToastPhase, to: ToastPhase) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) if toast.phase == from => {
                toast.phase = to;
                true
            }
            _ => false,
        }
    }
}
