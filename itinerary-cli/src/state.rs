//! Presentation state
//!
//! Owns the current page, scroll position and highlighted day. The tracker is
//! fed from here: a page switch re-observes (or disconnects), scrolling and
//! resizing forward a geometry change.

use itinerary_core::{ActiveChange, ActiveSectionTracker, DualTimeFormatter, Itinerary, TrackerConfig};
use std::collections::HashSet;

use crate::events::ViewEvent;
use crate::layout::{PageLayout, Viewport};
use crate::pages::{self, Page};

pub struct ViewState<'a> {
    itinerary: &'a Itinerary,
    formatter: DualTimeFormatter,
    checked: HashSet<String>,
    page: Page,
    layout: PageLayout,
    scroll: usize,
    height: usize,
    tracker: ActiveSectionTracker,
}

impl<'a> ViewState<'a> {
    /// Start on the home page with the first day highlighted
    pub fn new(
        itinerary: &'a Itinerary,
        formatter: DualTimeFormatter,
        tracker_config: TrackerConfig,
        height: usize,
    ) -> Self {
        let mut tracker = ActiveSectionTracker::new(tracker_config);
        if let Some(first) = itinerary.days.first() {
            tracker = tracker.with_initial(first.id.clone());
        }
        let checked = HashSet::new();
        let layout = pages::render(Page::Home, itinerary, &formatter, &checked);

        Self {
            itinerary,
            formatter,
            checked,
            page: Page::Home,
            layout,
            scroll: 0,
            height: height.max(1),
            tracker,
        }
    }

    /// Builder method: packing items shown as checked
    pub fn with_checked(mut self, checked: HashSet<String>) -> Self {
        self.checked = checked;
        self.layout = pages::render(self.page, self.itinerary, &self.formatter, &self.checked);
        self
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn viewport(&self) -> Viewport<'_> {
        self.layout.viewport(self.scroll, self.height)
    }

    /// Highlighted day id
    pub fn active_day(&self) -> Option<&str> {
        self.tracker.active()
    }

    /// Sidebar label of the highlighted day
    pub fn active_label(&self) -> Option<&str> {
        let id = self.tracker.active()?;
        self.itinerary.day(id).ok().map(|d| d.label.as_str())
    }

    /// Apply an event. Returns the highlight change it caused, if any.
    pub fn dispatch(&mut self, event: ViewEvent) -> Option<ActiveChange> {
        log::trace!("Dispatch {:?}", event);
        match event {
            ViewEvent::PageChanged(page) => {
                self.page = page;
                self.scroll = 0;
                self.layout = pages::render(page, self.itinerary, &self.formatter, &self.checked);

                if page == Page::Itinerary {
                    let viewport = self.layout.viewport(self.scroll, self.height);
                    self.tracker.observe(self.itinerary.day_ids(), &viewport)
                } else {
                    self.tracker.disconnect();
                    None
                }
            }
            ViewEvent::Scrolled(offset) => {
                self.scroll = offset.min(self.layout.max_scroll(self.height));
                let viewport = self.layout.viewport(self.scroll, self.height);
                self.tracker.on_geometry_change(&viewport)
            }
            ViewEvent::Resized(height) => {
                self.height = height.max(1);
                self.scroll = self.scroll.min(self.layout.max_scroll(self.height));
                let viewport = self.layout.viewport(self.scroll, self.height);
                self.tracker.on_geometry_change(&viewport)
            }
        }
    }

    /// Scroll so the section `id` starts at the top of the viewport
    pub fn jump_to(&mut self, id: &str) -> Option<ActiveChange> {
        let rows = self.layout.section_rows(id)?;
        self.dispatch(ViewEvent::Scrolled(rows.start))
    }

    /// Tab bar, then the sidebar and the visible page lines side by side
    pub fn screen(&self) -> Vec<String> {
        let highlight = match self.page {
            Page::Itinerary => self.tracker.active(),
            _ => None,
        };
        self.compose(self.viewport().visible_lines(), highlight)
    }

    /// The whole page instead of the viewport. No sidebar highlight, since
    /// no single day is centred.
    pub fn full_screen(&self) -> Vec<String> {
        self.compose(self.layout.lines(), None)
    }

    fn compose(&self, visible: &[String], highlight: Option<&str>) -> Vec<String> {
        let mut out = vec![pages::tab_bar(self.page), String::new()];

        let entries = pages::sidebar_entries(self.page, self.itinerary);
        if entries.is_empty() {
            out.extend(visible.iter().cloned());
            return out;
        }

        let sidebar = pages::sidebar(&entries, highlight);
        let rows = sidebar.len().max(visible.len());
        let blank = " ".repeat(pages::SIDEBAR_WIDTH);

        for row in 0..rows {
            let left = sidebar.get(row).unwrap_or(&blank);
            let right = visible.get(row).map(String::as_str).unwrap_or("");
            out.push(format!("{} │ {}", left, right).trim_end().to_string());
        }
        out
    }
}
