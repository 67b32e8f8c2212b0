//! Text page layout
//!
//! A rendered page is a list of terminal lines. Tracked sections are row ranges
//! within it. A [`Viewport`] is a window of rows at some scroll offset and is the
//! geometry provider the active-section tracker reads from.

use itinerary_core::{GeometryProvider, Section};
use std::ops::Range;

/// Lines of a rendered page plus the row ranges of its sections
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    lines: Vec<String>,
    sections: Vec<(String, Range<usize>)>,
    open: Option<(String, usize)>,
}

impl PageLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Start a section at the next line. Closes any section still open.
    pub fn begin_section(&mut self, id: impl Into<String>) {
        self.end_section();
        self.open = Some((id.into(), self.lines.len()));
    }

    /// Close the open section at the current line
    pub fn end_section(&mut self) {
        if let Some((id, start)) = self.open.take() {
            self.sections.push((id, start..self.lines.len()));
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Row range of a closed section
    pub fn section_rows(&self, id: &str) -> Option<Range<usize>> {
        self.sections
            .iter()
            .find(|(section_id, _)| section_id == id)
            .map(|(_, rows)| rows.clone())
    }

    /// Largest scroll offset that still fills a viewport of `height` rows
    pub fn max_scroll(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(height)
    }

    /// Window of `height` rows starting at `scroll`
    pub fn viewport(&self, scroll: usize, height: usize) -> Viewport<'_> {
        Viewport {
            layout: self,
            scroll,
            height,
        }
    }
}

/// A scrolled window onto a page
#[derive(Debug, Clone, Copy)]
pub struct Viewport<'a> {
    layout: &'a PageLayout,
    scroll: usize,
    height: usize,
}

impl<'a> Viewport<'a> {
    /// Lines currently on screen
    pub fn visible_lines(&self) -> &'a [String] {
        let lines = self.layout.lines();
        let start = self.scroll.min(lines.len());
        let end = self.scroll.saturating_add(self.height).min(lines.len());
        &lines[start..end]
    }
}

impl GeometryProvider for Viewport<'_> {
    fn viewport_height(&self) -> f64 {
        self.height as f64
    }

    fn section(&self, id: &str) -> Option<Section> {
        let rows = self.layout.section_rows(id)?;
        let top = rows.start as f64 - self.scroll as f64;
        let bottom = rows.end as f64 - self.scroll as f64;
        Some(Section::new(id, top, bottom))
    }
}
