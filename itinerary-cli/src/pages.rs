//! Page rendering
//!
//! Each page is rendered to a [`PageLayout`]. Day sections on the itinerary
//! page are the ones the tracker follows. The home page marks its blocks as
//! sections too, one per sidebar anchor.

use itinerary_core::{split_price, DayEntry, DualTimeFormatter, Itinerary, TransportGroup};
use std::collections::HashSet;

use crate::layout::PageLayout;

pub const SIDEBAR_WIDTH: usize = 28;
const RULE: &str = "───────────────────────────────────────────────";

/// Top-level pages, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Itinerary,
    Packing,
    Transport,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Itinerary, Page::Packing, Page::Transport];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Itinerary => "Itinerary",
            Page::Packing => "Packing",
            Page::Transport => "Transport",
        }
    }
}

/// Tab bar with the current page marked
pub fn tab_bar(current: Page) -> String {
    let tabs: Vec<String> = Page::ALL
        .iter()
        .map(|&page| {
            if page == current {
                format!("[{}]", page.title())
            } else {
                format!(" {} ", page.title())
            }
        })
        .collect();
    format!("✈ Travel Plan   {}", tabs.join(" "))
}

/// Sidebar entries: `(anchor id, label)`
pub fn sidebar_entries(page: Page, itinerary: &Itinerary) -> Vec<(String, String)> {
    match page {
        Page::Home => vec![
            ("intro".to_string(), "About the trip".to_string()),
            ("countries".to_string(), "Countries".to_string()),
            ("members".to_string(), "Travellers".to_string()),
        ],
        Page::Itinerary => itinerary
            .day_labels()
            .map(|(id, label)| (id.to_string(), label.to_string()))
            .collect(),
        Page::Packing | Page::Transport => Vec::new(),
    }
}

/// Sidebar lines with `active` highlighted
pub fn sidebar(entries: &[(String, String)], active: Option<&str>) -> Vec<String> {
    entries
        .iter()
        .map(|(id, label)| {
            let marker = if Some(id.as_str()) == active { "▶" } else { " " };
            truncate(&format!("{} {}", marker, label), SIDEBAR_WIDTH)
        })
        .collect()
}

/// Render a page
pub fn render(
    page: Page,
    itinerary: &Itinerary,
    formatter: &DualTimeFormatter,
    checked: &HashSet<String>,
) -> PageLayout {
    match page {
        Page::Home => render_home(itinerary),
        Page::Itinerary => render_itinerary(itinerary),
        Page::Packing => render_packing(itinerary, checked),
        Page::Transport => render_transport(itinerary, formatter),
    }
}

fn render_home(itinerary: &Itinerary) -> PageLayout {
    let overview = &itinerary.overview;
    let mut layout = PageLayout::new();

    layout.begin_section("intro");
    layout.push(format!("✨ {}", overview.title));
    layout.push(overview.intro.clone());
    if !overview.tags.is_empty() {
        layout.push(
            overview
                .tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join("  "),
        );
    }
    layout.blank();

    layout.begin_section("countries");
    layout.push("Countries");
    layout.push(RULE);
    for country in &overview.countries {
        layout.push(format!("  • {}: {}", country.name, country.summary));
    }
    layout.blank();

    layout.begin_section("members");
    layout.push("Travellers");
    layout.push(RULE);
    layout.push(overview.members.clone());
    layout.end_section();

    layout.blank();
    layout.push("Tip: use the sidebar to jump between blocks.");
    layout
}

fn render_itinerary(itinerary: &Itinerary) -> PageLayout {
    let mut layout = PageLayout::new();

    for (idx, day) in itinerary.days.iter().enumerate() {
        layout.begin_section(day.id.clone());
        render_day(&mut layout, day);
        layout.end_section();

        if idx + 1 < itinerary.days.len() {
            layout.push(RULE);
        }
    }
    layout
}

fn render_day(layout: &mut PageLayout, day: &DayEntry) {
    layout.push(format!("[{}]  {}", day.date, day.location));
    layout.push(format!("  Weather   {}", day.weather));
    layout.push(format!("  Sun       ↑ {} · ↓ {}", day.sunrise, day.sunset));
    layout.push(format!("  Wear      {}", day.wear));

    if !day.timeline().is_empty() {
        layout.push("  Plan");
        for item in day.timeline() {
            let price = item
                .price
                .as_deref()
                .map(|p| format!(" [{}]", p))
                .unwrap_or_default();
            layout.push(format!("    {}{}  {}", item.time, price, item.text));

            for sub in item.subpoints() {
                let split = split_price(sub);
                match split.price {
                    Some(p) => layout.push(format!("        - ({}) {}", p, split.text)),
                    None => layout.push(format!("        - {}", split.text)),
                }
            }
        }
    }

    if let Some(notes) = &day.notes {
        layout.push(format!("  Notes: {}", notes));
    }
}

fn render_packing(itinerary: &Itinerary, checked: &HashSet<String>) -> PageLayout {
    let mut layout = PageLayout::new();
    layout.push("Packing checklist");
    layout.push(RULE);

    for item in &itinerary.packing {
        let mark = if checked.contains(&item.id) { "x" } else { " " };
        layout.push(format!("  [{}] {}", mark, item.label));
    }
    layout
}

fn render_transport(itinerary: &Itinerary, formatter: &DualTimeFormatter) -> PageLayout {
    let mut layout = PageLayout::new();

    layout.push("Flights");
    layout.push("Outbound → within Europe → north → Africa → return");
    layout.push(RULE);
    render_groups(&mut layout, &itinerary.transport.flights, formatter);

    layout.blank();
    layout.push("Ground transport & rentals");
    layout.push(RULE);
    render_groups(&mut layout, &itinerary.transport.ground, formatter);
    layout
}

fn render_groups(layout: &mut PageLayout, groups: &[TransportGroup], formatter: &DualTimeFormatter) {
    for group in groups {
        layout.push(format!("▸ {}", group.title));
        for leg in &group.legs {
            let mut line = format!("    [{}] {}", leg.badge, leg.title);
            match (&leg.from, &leg.to) {
                (Some(from), Some(to)) => {
                    line.push_str(&format!(
                        "  {} → {}",
                        from.display(formatter),
                        to.display(formatter)
                    ));
                }
                (Some(only), None) | (None, Some(only)) => {
                    line.push_str(&format!("  {}", only.display(formatter)));
                }
                (None, None) => {}
            }
            if let Some(note) = &leg.note {
                line.push_str(&format!(" · {}", note));
            }
            layout.push(line);
        }
    }
}

/// Cut `s` to at most `width` characters and pad it to exactly `width`
pub fn truncate(s: &str, width: usize) -> String {
    let cut: String = s.chars().take(width).collect();
    format!("{:<width$}", cut, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> Itinerary {
        Itinerary::bundled().unwrap()
    }

    #[test]
    fn test_itinerary_sections_cover_every_day() {
        let itinerary = bundled();
        let layout = render(Page::Itinerary, &itinerary, &DualTimeFormatter::default(), &HashSet::new());

        let mut previous_end = 0;
        for id in itinerary.day_ids() {
            let rows = layout.section_rows(&id).unwrap();
            assert!(rows.start >= previous_end);
            assert!(!rows.is_empty());
            previous_end = rows.end;
        }
    }

    #[test]
    fn test_subpoint_prices_become_pills() {
        let itinerary = bundled();
        let layout = render_itinerary(&itinerary);
        assert!(layout.lines().iter().any(|l| l.contains("- (€3.1) Tram 28 ticket")));
    }

    #[test]
    fn test_transport_shows_reference_time() {
        let itinerary = bundled();
        let layout = render_transport(&itinerary, &DualTimeFormatter::default());
        assert!(layout
            .lines()
            .iter()
            .any(|l| l.contains("SIN 23:55 (TPE 23:55) T3 → FRA 07:05 (TPE 13:05) T1")));
    }

    #[test]
    fn test_packing_marks_checked_items() {
        let itinerary = bundled();
        let checked: HashSet<String> = ["passport".to_string()].into_iter().collect();
        let layout = render_packing(&itinerary, &checked);

        let passport = layout.lines().iter().find(|l| l.contains("Passport")).unwrap();
        assert!(passport.starts_with("  [x]"));
        let adaptor = layout.lines().iter().find(|l| l.contains("adaptors")).unwrap();
        assert!(adaptor.starts_with("  [ ]"));
    }

    #[test]
    fn test_sidebar_highlight() {
        let entries = vec![
            ("a".to_string(), "First".to_string()),
            ("b".to_string(), "Second".to_string()),
        ];
        let lines = sidebar(&entries, Some("b"));
        assert!(lines[0].starts_with("  First"));
        assert!(lines[1].starts_with("▶ Second"));
        assert!(lines.iter().all(|l| l.chars().count() == SIDEBAR_WIDTH));
    }

    #[test]
    fn test_tab_bar() {
        assert!(tab_bar(Page::Packing).contains("[Packing]"));
        assert!(!tab_bar(Page::Packing).contains("[Home]"));
    }
}
