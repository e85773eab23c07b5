//! Mobile menu open/closed state for one injected header.

/// Class toggled on both the toggle control and the navigation panel.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Click on the toggle control.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Click on a navigation link.
    pub fn link_clicked(&mut self) -> bool {
        self.open = false;
        self.open
    }

    /// Click anywhere in the document; `inside` is true when the target lies
    /// within the toggle or the navigation panel.
    pub fn document_clicked(&mut self, inside: bool) -> bool {
        if !inside {
            self.open = false;
        }
        self.open
    }
}
