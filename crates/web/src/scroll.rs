//! Scroll-driven affordances: back-to-top button, progress bar, parallax.

use std::time::Duration;

/// Toast shown when the back-to-top button is clicked.
pub const BACK_TO_TOP_MESSAGE: &str = "Voltando ao topo...";
pub const BACK_TO_TOP_TOAST: Duration = Duration::from_millis(2000);

/// Parallax speed factor for `.gradient-bg` elements.
pub const PARALLAX_SPEED: f64 = 0.5;

/// Visibility state of the floating back-to-top button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackToTop {
    threshold: f64,
    visible: bool,
}

impl BackToTop {
    pub fn new(threshold: f64) -> Self {
        Self { threshold, visible: false }
    }

    /// Update for a new vertical scroll offset; returns whether the button shows.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        self.visible = offset > self.threshold;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Reading progress in percent for the given scroll metrics.
///
/// A page that cannot scroll (`scroll_height <= client_height`) reports 0.
pub fn progress_percent(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if !scrollable.is_finite() || scrollable <= 0.0 || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// CSS width value for the progress bar.
pub fn progress_width(scroll_top: f64, scroll_height: f64, client_height: f64) -> String {
    format!("{}%", progress_percent(scroll_top, scroll_height, client_height))
}

/// Transform for a parallax background at the given scroll offset.
pub fn parallax_transform(scroll_y: f64) -> String {
    format!("translateY({}px)", scroll_y * PARALLAX_SPEED)
}
