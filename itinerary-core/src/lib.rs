//! Itinerary Core Library
//!
//! The stateless core of the travel itinerary viewer.
//!
//! # Architecture
//!
//! Two independent mechanisms, both pure functions of their inputs:
//! - **Active-section tracking**: picks the section nearest the viewport centre
//!   from a geometry snapshot ([`compute_active`], [`ActiveSectionTracker`])
//! - **Dual-time display**: shows a local time together with Taipei time
//!   ([`format_dual`], [`DualTimeFormatter`])
//!
//! Plus the read-only dataset model the pages are rendered from, and price
//! extraction for timeline sub-points.
//!
//! The library does NOT:
//! - Lay out or render pages
//! - Decide when geometry changes (the caller forwards notifications)
//! - Persist anything
//!
//! Rendering and the terminal surface live in the application layer
//! (itinerary-cli).
//!
//! # Example Usage
//!
//! ```
//! use itinerary_core::{compute_active, format_dual, Section};
//!
//! let sections = vec![
//!     Section::new("day-0912", -200.0, 150.0),
//!     Section::new("day-0913", 150.0, 700.0),
//! ];
//! assert_eq!(compute_active(&sections, 800.0, 12.0), Some("day-0913"));
//!
//! assert_eq!(
//!     format_dual("FRA", "09/13 Sat", "07:05", 2025),
//!     "FRA 07:05 (TPE 13:05)"
//! );
//! ```

// Public modules
pub mod config;
pub mod dataset;
pub mod price;
pub mod timezone;
pub mod tracker;
pub mod types;

// Re-export main types for convenience
pub use config::{FormatterConfig, TrackerConfig};
pub use dataset::{
    Country, DayEntry, Endpoint, Itinerary, Overview, PackingItem, TimelineItem, Transport,
    TransportGroup, TransportLeg,
};
pub use price::{split_price, PricedText};
pub use timezone::{
    format_dual, resolve_zone, zone_name_for, DualTimeFormatter, LOCATION_ZONES,
    REFERENCE_LABEL,
};
pub use tracker::{compute_active, ActiveChange, ActiveSectionTracker, GeometryProvider};
pub use types::{ClockTime, ConversionError, DateLabel, ItineraryError, Result, Section};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: bundled data feeds both mechanisms
        let itinerary = Itinerary::bundled().unwrap();
        let first = &itinerary.days[0];
        let sections = vec![Section::new(first.id.clone(), 0.0, 100.0)];
        assert_eq!(compute_active(&sections, 100.0, 12.0), Some(first.id.as_str()));
        assert!(format_dual("TPE", &first.date, "12:00", 2025).ends_with("(TPE 12:00)"));
    }
}
