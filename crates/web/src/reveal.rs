//! Intersection-driven reveals: card animations, footer, lazy images.
//!
//! Each tracker is indexed by the position of the observed element in the
//! query result it was built from.

pub const OBSERVER_THRESHOLD: f64 = 0.1;
pub const OBSERVER_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Elements animated into place on first intersection.
pub const REVEAL_SELECTOR: &str = ".product-card, .support-section, .enhanced-card";

/// Inline style applied when a card starts being observed.
pub const HIDDEN_STYLE: &[(&str, &str)] = &[
    ("opacity", "0"),
    ("transform", "translateY(30px)"),
    ("transition", "opacity 0.6s ease, transform 0.6s ease"),
];

/// Inline style applied on first intersection.
pub const REVEALED_STYLE: &[(&str, &str)] = &[("opacity", "1"), ("transform", "translateY(0)")];

pub const ANIMATE_IN_CLASS: &str = "animate-in";

pub const FOOTER_ID: &str = "footer";
pub const FOOTER_VISIBLE_CLASS: &str = "visible";

pub const LAZY_SELECTOR: &str = "img[data-src]";
pub const LAZY_CLASS: &str = "lazy";

/// First-intersection tracking for a set of cards.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize) -> Self {
        Self { revealed: vec![false; count] }
    }

    /// Returns true exactly once per element: the first time it intersects.
    pub fn on_intersect(&mut self, index: usize, intersecting: bool) -> bool {
        match self.revealed.get_mut(index) {
            Some(seen) if intersecting && !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }
}

/// Footer reveal; the `visible` class is idempotent so repeat hits are harmless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FooterReveal {
    visible: bool,
}

impl FooterReveal {
    /// Returns whether the `visible` class should be (re)applied.
    pub fn on_intersect(&mut self, intersecting: bool) -> bool {
        if intersecting {
            self.visible = true;
        }
        intersecting
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Deferred image sources, swapped in once and then forgotten.
#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    pending: Vec<Option<String>>,
}

impl LazyImages {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { pending: sources.into_iter().map(|s| Some(s.into())).collect() }
    }

    /// The source to load for an intersecting image, at most once per image.
    pub fn on_intersect(&mut self, index: usize, intersecting: bool) -> Option<String> {
        if !intersecting {
            return None;
        }
        self.pending.get_mut(index).and_then(Option::take)
    }

    pub fn remaining(&self) -> usize {
        self.pending.iter().filter(|p| p.is_some()).count()
    }
}
