#![forbid(unsafe_code)]

//! Intersection geometry for a scrolling host.
//!
//! [`ScrollViewport`] evaluates the rule an intersection observer applies:
//! shrink the viewport by the configured bottom margin, compute how much
//! of the section overlaps it, and compare the visible fraction against
//! the threshold. Hosts with a real observer primitive can feed
//! `Msg::Visibility` directly; the demo uses this to derive it from
//! scroll positions.

use showreel_core::ShowcaseConfig;

/// Geometry of the showcase section within a scrolling page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollViewport {
    viewport_height: f64,
    section_top: f64,
    section_height: f64,
    threshold: f64,
    bottom_margin_frac: f64,
}

impl ScrollViewport {
    /// Describe the section and viewport, taking threshold and margin
    /// from the component configuration.
    #[must_use]
    pub fn new(
        viewport_height: f64,
        section_top: f64,
        section_height: f64,
        config: &ShowcaseConfig,
    ) -> Self {
        Self {
            viewport_height,
            section_top,
            section_height,
            threshold: f64::from(config.visibility_threshold),
            bottom_margin_frac: f64::from(config.root_margin_bottom),
        }
    }

    /// Whether the section counts as intersecting at this scroll offset.
    #[must_use]
    pub fn is_intersecting(&self, scroll_offset: f64) -> bool {
        let root_top = scroll_offset;
        let root_bottom = scroll_offset + self.viewport_height * (1.0 + self.bottom_margin_frac);
        let visible_top = self.section_top.max(root_top);
        let visible_bottom = (self.section_top + self.section_height).min(root_bottom);
        let visible = (visible_bottom - visible_top).max(0.0);
        if self.section_height <= 0.0 {
            return false;
        }
        let ratio = visible / self.section_height;
        if self.threshold <= 0.0 {
            visible > 0.0
        } else {
            ratio >= self.threshold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ScrollViewport {
        // 900px viewport, section spans 1200..2200, default 10% threshold
        // with the bottom 20% of the viewport excluded.
        ScrollViewport::new(900.0, 1200.0, 1000.0, &ShowcaseConfig::default())
    }

    #[test]
    fn far_above_the_section_is_not_intersecting() {
        assert!(!viewport().is_intersecting(0.0));
    }

    #[test]
    fn intersects_once_enough_of_the_section_is_visible() {
        let v = viewport();
        // Root bottom at scroll + 720; threshold needs 100px of overlap,
        // so the section intersects from scroll offsets around 580 up.
        assert!(!v.is_intersecting(500.0));
        assert!(v.is_intersecting(600.0));
        assert!(v.is_intersecting(1500.0));
    }

    #[test]
    fn scrolled_past_the_section_is_not_intersecting() {
        assert!(!viewport().is_intersecting(2300.0));
    }

    #[test]
    fn bottom_margin_shrinks_the_effective_viewport() {
        let config = ShowcaseConfig::default().with_root_margin_bottom(0.0);
        let unshrunk = ScrollViewport::new(900.0, 1200.0, 1000.0, &config);
        // With the full viewport, 100px of overlap is reached earlier.
        assert!(unshrunk.is_intersecting(500.0));
        assert!(!viewport().is_intersecting(500.0));
    }

    #[test]
    fn zero_threshold_counts_any_overlap() {
        let config = ShowcaseConfig::default().with_visibility_threshold(0.0);
        let v = ScrollViewport::new(900.0, 1200.0, 1000.0, &config);
        assert!(!v.is_intersecting(479.0));
        assert!(v.is_intersecting(481.0));
    }
}
