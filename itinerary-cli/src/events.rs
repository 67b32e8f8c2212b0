//! View events
//!
//! Everything that can change what is on screen arrives as a [`ViewEvent`].
//! The presentation state turns these into tracker calls.

use crate::pages::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Switch to another page; scroll resets to the top
    PageChanged(Page),
    /// Scroll to an absolute row offset
    Scrolled(usize),
    /// Terminal height changed
    Resized(usize),
}

/// Scroll from the top to `max_scroll` in steps of `step` rows.
///
/// The last offset is always `max_scroll` so the bottom of the page is reached
/// even when `step` does not divide it.
pub fn scroll_sweep(max_scroll: usize, step: usize) -> impl Iterator<Item = ViewEvent> {
    let step = step.max(1);
    let mut next = (max_scroll > 0).then(|| step.min(max_scroll));

    std::iter::from_fn(move || {
        let offset = next?;
        next = if offset >= max_scroll {
            None
        } else {
            Some((offset + step).min(max_scroll))
        };
        Some(ViewEvent::Scrolled(offset))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(max_scroll: usize, step: usize) -> Vec<usize> {
        scroll_sweep(max_scroll, step)
            .map(|e| match e {
                ViewEvent::Scrolled(offset) => offset,
                other => panic!("unexpected event {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_sweep_reaches_bottom() {
        assert_eq!(offsets(10, 3), vec![3, 6, 9, 10]);
        assert_eq!(offsets(9, 3), vec![3, 6, 9]);
    }

    #[test]
    fn test_sweep_edge_cases() {
        assert!(offsets(0, 3).is_empty());
        assert_eq!(offsets(2, 5), vec![2]);
        // A zero step is treated as one row
        assert_eq!(offsets(3, 0), vec![1, 2, 3]);
    }
}
