//! Itinerary dataset model
//!
//! The dataset is read-only content. The core only cares about day ids/labels
//! (tracked sections) and the location/date/time triples on transport legs
//! (dual-time display); everything else is carried through for rendering.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::timezone::DualTimeFormatter;
use crate::types::{ItineraryError, Result};

/// Dataset compiled into the library
const BUNDLED_DATASET: &str = include_str!("../data/itinerary.json");

/// The whole itinerary document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub overview: Overview,
    pub days: Vec<DayEntry>,
    #[serde(default)]
    pub packing: Vec<PackingItem>,
    #[serde(default)]
    pub transport: Transport,
}

/// Home page content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub members: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub summary: String,
}

/// One day of the trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Section id used for navigation
    pub id: String,
    /// Date chip text, e.g. `"09/12 Fri"`
    pub date: String,
    /// Short sidebar label
    pub label: String,
    pub location: String,
    pub weather: String,
    pub sunrise: String,
    pub sunset: String,
    /// Clothing advice
    pub wear: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<TimelineItem>>,
}

impl DayEntry {
    /// Timeline entries, empty if the day has none
    pub fn timeline(&self) -> &[TimelineItem] {
        self.timeline.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub time: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpoints: Option<Vec<String>>,
}

impl TimelineItem {
    pub fn subpoints(&self) -> &[String] {
        self.subpoints.as_deref().unwrap_or_default()
    }
}

/// Packing checklist entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingItem {
    pub id: String,
    pub label: String,
}

/// Flights and ground transport, grouped by trip segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    #[serde(default)]
    pub flights: Vec<TransportGroup>,
    #[serde(default)]
    pub ground: Vec<TransportGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportGroup {
    pub title: String,
    pub legs: Vec<TransportLeg>,
}

/// One flight, train or drive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportLeg {
    /// Date badge, e.g. `"09/12–13"`
    pub badge: String,
    /// Carrier and number, or a short description
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Endpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Endpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Departure or arrival point of a leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Station or airport name shown before the time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    /// Location code or IANA zone name
    pub code: String,
    /// Local date label
    pub date: String,
    /// Local `HH:MM`
    pub time: String,
    /// Terminal or similar, shown after the time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl Endpoint {
    /// Render as `"[place ]CODE HH:MM (TPE HH:MM)[ suffix]"`
    pub fn display(&self, formatter: &DualTimeFormatter) -> String {
        let mut out = String::new();
        if let Some(place) = &self.place {
            out.push_str(place);
            out.push(' ');
        }
        out.push_str(&formatter.format(&self.code, &self.date, &self.time));
        if let Some(suffix) = &self.suffix {
            out.push(' ');
            out.push_str(suffix);
        }
        out
    }
}

impl Itinerary {
    /// Parse the dataset compiled into the library
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    /// Load and validate a dataset from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading itinerary dataset: {:?}", path);
        let content = fs::read_to_string(path)?;
        let itinerary = Self::from_json_str(&content)?;
        log::info!("Loaded {} days from {:?}", itinerary.days.len(), path);
        Ok(itinerary)
    }

    /// Parse and validate a dataset from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let itinerary: Itinerary = serde_json::from_str(json)?;
        itinerary.validate()?;
        Ok(itinerary)
    }

    /// Check that every day has a unique, non-empty id
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, day) in self.days.iter().enumerate() {
            if day.id.trim().is_empty() {
                return Err(ItineraryError::EmptyDayId(index));
            }
            if !seen.insert(day.id.as_str()) {
                return Err(ItineraryError::DuplicateDayId(day.id.clone()));
            }
        }
        Ok(())
    }

    /// Day ids in declaration order
    pub fn day_ids(&self) -> Vec<String> {
        self.days.iter().map(|d| d.id.clone()).collect()
    }

    /// `(id, label)` pairs for the sidebar
    pub fn day_labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.days.iter().map(|d| (d.id.as_str(), d.label.as_str()))
    }

    pub fn day(&self, id: &str) -> Result<&DayEntry> {
        self.days
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ItineraryError::DayNotFound(id.to_string()))
    }
}
