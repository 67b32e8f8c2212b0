//! Active-section tracking
//!
//! [`compute_active`] is the whole algorithm: a pure function from one geometry
//! snapshot to the id of the section nearest the viewport centre.
//!
//! [`ActiveSectionTracker`] wraps it for a reactive caller. The caller owns the
//! tracker, tells it which sections to observe, and forwards geometry change
//! notifications. The tracker only reports a change when the computed id differs
//! from the one it reported last.

use crate::config::TrackerConfig;
use crate::types::Section;

/// Supplies section geometry for one evaluation pass
///
/// Implemented by whatever lays the page out. Coordinates are relative to the
/// top of the viewport and must be recomputed on every call.
pub trait GeometryProvider {
    /// Current visible height
    fn viewport_height(&self) -> f64;

    /// Current extent of the section with this id, or `None` if nothing is
    /// rendered for it
    fn section(&self, id: &str) -> Option<Section>;
}

/// Return the id of the visible section whose midpoint is closest to the
/// viewport centre.
///
/// A section is visible when its bottom edge is below `visibility_padding` and
/// its top edge is above `viewport_height - visibility_padding`. Ties go to the
/// section listed first.
pub fn compute_active(
    sections: &[Section],
    viewport_height: f64,
    visibility_padding: f64,
) -> Option<&str> {
    let center = viewport_height / 2.0;

    let mut visible: Vec<(&Section, f64)> = sections
        .iter()
        .filter(|s| s.is_visible(viewport_height, visibility_padding))
        .map(|s| (s, (s.midpoint() - center).abs()))
        .collect();

    // Stable: equal distances keep input order.
    visible.sort_by(|a, b| a.1.total_cmp(&b.1));

    visible.first().map(|(s, _)| s.id.as_str())
}

/// A change in the highlighted section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChange {
    pub previous: Option<String>,
    pub current: String,
}

/// Holds the observed section ids and the last reported active id
#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    config: TrackerConfig,
    observed: Vec<String>,
    active: Option<String>,
}

impl ActiveSectionTracker {
    /// Create a tracker with nothing observed and nothing highlighted
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            observed: Vec::new(),
            active: None,
        }
    }

    /// Builder method: start with `id` highlighted before any evaluation
    pub fn with_initial(mut self, id: impl Into<String>) -> Self {
        self.active = Some(id.into());
        self
    }

    /// Currently highlighted section id
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Section ids currently observed, in declaration order
    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    /// Replace the observed section set and evaluate immediately.
    ///
    /// The forced evaluation makes sure a highlight exists as soon as content
    /// is on screen, without waiting for the first change notification.
    pub fn observe<P: GeometryProvider>(
        &mut self,
        ids: impl IntoIterator<Item = String>,
        provider: &P,
    ) -> Option<ActiveChange> {
        self.observed = ids.into_iter().collect();
        log::debug!("Observing {} sections", self.observed.len());
        self.evaluate(provider)
    }

    /// Stop observing. The last highlight is kept.
    pub fn disconnect(&mut self) {
        log::debug!("Disconnecting from {} sections", self.observed.len());
        self.observed.clear();
    }

    /// Handle a geometry change notification
    pub fn on_geometry_change<P: GeometryProvider>(&mut self, provider: &P) -> Option<ActiveChange> {
        if self.observed.is_empty() {
            return None;
        }
        self.evaluate(provider)
    }

    /// Recompute the active section from the provider's current geometry.
    ///
    /// Returns a change only when the computed id differs from the current one.
    /// A pass that finds nothing visible leaves the highlight untouched.
    pub fn evaluate<P: GeometryProvider>(&mut self, provider: &P) -> Option<ActiveChange> {
        let sections: Vec<Section> = self
            .observed
            .iter()
            .filter_map(|id| {
                let section = provider.section(id);
                if section.is_none() {
                    log::trace!("No geometry for section {}", id);
                }
                section
            })
            .collect();

        let height = provider.viewport_height();
        let best = compute_active(&sections, height, self.config.visibility_padding)?;

        if self.active.as_deref() == Some(best) {
            log::trace!("Active section unchanged: {}", best);
            return None;
        }

        let change = ActiveChange {
            previous: self.active.replace(best.to_string()),
            current: best.to_string(),
        };
        log::debug!("Active section: {:?} -> {}", change.previous, change.current);
        Some(change)
    }
}
