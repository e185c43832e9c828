#![forbid(unsafe_code)]

//! Construction-time configuration for the showcase component.

use web_time::Duration;

/// Where the auto-advance sequence begins when it is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResetPolicy {
    /// Rewind to the first entry before stepping.
    #[default]
    FromStart,
    /// Step onward from whatever entry is currently active.
    Continue,
}

/// Tunables for visibility detection and the auto-advance driver.
///
/// Defaults match the canonical variant: 2 s between steps, a 500 ms delay
/// between first visibility and the first step, rewind-to-start, no
/// post-completion scroll-past, 10% visibility threshold with the bottom
/// 20% of the viewport excluded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowcaseConfig {
    /// Interval between auto-advance steps.
    pub tick_interval: Duration,
    /// Delay between first visibility and the sequence starting.
    /// Zero means the sequence starts immediately.
    pub start_delay: Duration,
    /// Index reset policy when the sequence is armed.
    pub reset_policy: ResetPolicy,
    /// When set, request a smooth scroll past the section this long after
    /// the sequence runs to completion.
    pub scroll_past_delay: Option<Duration>,
    /// Fraction of the root element that must be visible to count as
    /// intersecting, in `[0, 1]`.
    pub visibility_threshold: f32,
    /// Bottom margin applied to the viewport before the intersection test,
    /// as a fraction of viewport height. Negative values shrink the
    /// viewport (`-0.2` excludes the bottom 20%).
    pub root_margin_bottom: f32,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(2000),
            start_delay: Duration::from_millis(500),
            reset_policy: ResetPolicy::FromStart,
            scroll_past_delay: None,
            visibility_threshold: 0.1,
            root_margin_bottom: -0.2,
        }
    }
}

impl ShowcaseConfig {
    /// Set the interval between auto-advance steps.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the delay before the sequence starts after first visibility.
    #[must_use]
    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    /// Set the index reset policy.
    #[must_use]
    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// Request a scroll past the section after completion.
    #[must_use]
    pub fn with_scroll_past(mut self, delay: Duration) -> Self {
        self.scroll_past_delay = Some(delay);
        self
    }

    /// Set the visibility threshold fraction.
    #[must_use]
    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    /// Set the bottom root-margin fraction.
    #[must_use]
    pub fn with_root_margin_bottom(mut self, margin: f32) -> Self {
        self.root_margin_bottom = margin;
        self
    }
}
