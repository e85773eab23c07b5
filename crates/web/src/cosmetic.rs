//! Decorative page effects: particles and anchor scrolling.
//!
//! Randomness is injected as a closure returning values in `[0, 1)` so the
//! browser can pass `Math.random` and tests can pass a fixed sequence.

pub const PARTICLE_COUNT: usize = 8;
pub const PARTICLES_ID: &str = "particles";
pub const PARTICLE_CLASS: &str = "particle";

pub const DARK_MODE_CLASS: &str = "dark-mode";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Gap left between the fixed header and an anchor target.
pub const ANCHOR_OFFSET: f64 = 20.0;

/// Geometry and timing of one decorative particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    pub size_px: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl ParticleSpec {
    pub fn sample(mut random: impl FnMut() -> f64) -> Self {
        Self {
            size_px: random() * 2.0 + 1.0,
            left_pct: random() * 100.0,
            top_pct: random() * 100.0,
            duration_s: random() * 20.0 + 10.0,
            delay_s: random() * 5.0,
        }
    }

    /// Inline style declarations, in application order.
    pub fn style(&self) -> [(&'static str, String); 6] {
        [
            ("width", format!("{}px", self.size_px)),
            ("height", format!("{}px", self.size_px)),
            ("left", format!("{}%", self.left_pct)),
            ("top", format!("{}%", self.top_pct)),
            ("animation-duration", format!("{}s", self.duration_s)),
            ("animation-delay", format!("{}s", self.delay_s)),
        ]
    }
}

pub fn particles(mut random: impl FnMut() -> f64) -> Vec<ParticleSpec> {
    (0..PARTICLE_COUNT).map(|_| ParticleSpec::sample(&mut random)).collect()
}

/// Scroll position for an in-page anchor, keeping it clear of the header.
pub fn anchor_scroll_top(target_offset_top: f64, header_height: f64) -> f64 {
    target_offset_top - header_height - ANCHOR_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_ranges() {
        let lows = particles(|| 0.0);
        assert_eq!(lows.len(), PARTICLE_COUNT);
        assert_eq!(
            lows[0],
            ParticleSpec { size_px: 1.0, left_pct: 0.0, top_pct: 0.0, duration_s: 10.0, delay_s: 0.0 }
        );

        let highs = particles(|| 0.999_999);
        for p in highs {
            assert!(p.size_px < 3.0);
            assert!(p.left_pct < 100.0 && p.top_pct < 100.0);
            assert!(p.duration_s < 30.0);
            assert!(p.delay_s < 5.0);
        }
    }

    #[test]
    fn test_particle_draw_order() {
        let mut draws = [0.5, 0.25, 0.75, 0.5, 0.2].into_iter();
        let p = ParticleSpec::sample(|| draws.next().unwrap_or(0.0));
        assert_eq!(p.size_px, 2.0);
        assert_eq!(p.left_pct, 25.0);
        assert_eq!(p.top_pct, 75.0);
        assert_eq!(p.duration_s, 20.0);
        assert_eq!(p.delay_s, 1.0);
        assert_eq!(p.style()[0], ("width", "2px".to_string()));
        assert_eq!(p.style()[5], ("animation-delay", "1s".to_string()));
    }

    #[test]
    fn test_anchor_scroll_top() {
        assert_eq!(anchor_scroll_top(900.0, 80.0), 800.0);
        assert_eq!(anchor_scroll_top(50.0, 80.0), -50.0);
    }
}
