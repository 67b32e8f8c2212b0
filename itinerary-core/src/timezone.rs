//! Dual local/Taipei time display
//!
//! Turns `("FRA", "09/13 Sat", "07:05")` into `"FRA 07:05 (TPE 13:05)"`.
//!
//! Civil time is mapped back to an instant by search: the civil input is first
//! read as if it were UTC, then shifted in one-hour steps across a ±24 hour
//! window until rendering the candidate in the location's zone reproduces the
//! input exactly. `chrono-tz` only has to answer "what does this instant look
//! like in that zone", which keeps the zone rules out of this module.
//!
//! The one-hour step cannot land on a local time in a zone with a sub-hour
//! offset (e.g. Asia/Kolkata). Such inputs degrade like any other failure.

use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::FormatterConfig;
use crate::types::{ClockTime, ConversionError, DateLabel};

/// Location code to IANA zone name
pub const LOCATION_ZONES: &[(&str, &str)] = &[
    ("TPE", "Asia/Taipei"),
    ("SIN", "Asia/Singapore"),
    ("FRA", "Europe/Berlin"),
    ("OPO", "Europe/Lisbon"),
    ("LIS", "Europe/Lisbon"),
    ("KEF", "Atlantic/Reykjavik"),
    ("CDG", "Europe/Paris"),
    ("KGL", "Africa/Kigali"),
    ("JRO", "Africa/Dar_es_Salaam"),
    ("LHR", "Europe/London"),
];

/// Label printed in front of the reference time
pub const REFERENCE_LABEL: &str = "TPE";

/// Zone every local time is also shown in
pub const REFERENCE_ZONE: Tz = chrono_tz::Asia::Taipei;

const SEARCH_WINDOW_MINUTES: i64 = 1440;
const SEARCH_STEP_MINUTES: usize = 60;

/// Look up the zone name for a location code
pub fn zone_name_for(code: &str) -> Option<&'static str> {
    LOCATION_ZONES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, zone)| *zone)
}

/// Resolve a location code, or a raw IANA zone name, to a zone
pub fn resolve_zone(code: &str) -> Result<Tz, ConversionError> {
    zone_name_for(code)
        .unwrap_or(code)
        .parse::<Tz>()
        .map_err(|_| ConversionError::UnknownZone(code.to_string()))
}

/// Wall-clock time `zone` shows at the UTC instant `utc`, or `None` when that
/// falls outside chrono's calendar range.
pub fn local_in(zone: Tz, utc: NaiveDateTime) -> Option<NaiveDateTime> {
    let shift = zone.offset_from_utc_datetime(&utc).fix().local_minus_utc();
    utc.checked_add_signed(Duration::seconds(i64::from(shift)))
}

/// Find the earliest instant in the search window that `zone` renders as
/// `civil`.
///
/// Candidates that fall outside chrono's calendar range are skipped.
pub fn find_instant(civil: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>, ConversionError> {
    for offset in (-SEARCH_WINDOW_MINUTES..=SEARCH_WINDOW_MINUTES).step_by(SEARCH_STEP_MINUTES) {
        let Some(candidate) = civil.checked_add_signed(Duration::minutes(offset)) else {
            continue;
        };

        if local_in(zone, candidate) == Some(civil) {
            log::trace!("{} in {} matched at offset {} min", civil, zone.name(), offset);
            return Ok(Utc.from_utc_datetime(&candidate));
        }
    }

    Err(ConversionError::SearchExhausted {
        zone: zone.name().to_string(),
        civil: civil.format("%Y-%m-%d %H:%M").to_string(),
    })
}

/// Formats local times with the reference-zone equivalent appended
#[derive(Debug, Clone, Default)]
pub struct DualTimeFormatter {
    config: FormatterConfig,
}

impl DualTimeFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn fallback_year(&self) -> i32 {
        self.config.fallback_year
    }

    /// Reference-zone `HH:MM` for a local civil time, or the reason there
    /// isn't one
    pub fn reference_time(
        &self,
        location: &str,
        date_label: &str,
        local_time: &str,
    ) -> Result<String, ConversionError> {
        let zone = resolve_zone(location)?;
        let label: DateLabel = date_label.parse()?;
        let date = label
            .resolve(self.config.fallback_year)
            .ok_or_else(|| ConversionError::InvalidDate(date_label.to_string()))?;
        let time: ClockTime = local_time.parse()?;

        let instant = find_instant(date.and_time(time.to_naive()), zone)?;
        let reference = local_in(REFERENCE_ZONE, instant.naive_utc())
            .ok_or_else(|| ConversionError::OutOfRange(instant.to_string()))?;
        Ok(reference.format("%H:%M").to_string())
    }

    /// `"<location> <local_time> (TPE <HH:MM>)"`, or `"<location> <local_time>"`
    /// when anything about the input can't be resolved.
    pub fn format(&self, location: &str, date_label: &str, local_time: &str) -> String {
        match self.reference_time(location, date_label, local_time) {
            Ok(reference) => format!(
                "{} {} ({} {})",
                location, local_time, REFERENCE_LABEL, reference
            ),
            Err(e) => {
                log::debug!("No reference time for {} {} {}: {}", location, date_label, local_time, e);
                format!("{} {}", location, local_time)
            }
        }
    }
}

/// One-shot dual display with an explicit fallback year. Never fails.
pub fn format_dual(location: &str, date_label: &str, local_time: &str, fallback_year: i32) -> String {
    DualTimeFormatter::new(FormatterConfig::new().with_fallback_year(fallback_year))
        .format(location, date_label, local_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn civil(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    #[test]
    fn test_zone_table() {
        assert_eq!(zone_name_for("LHR"), Some("Europe/London"));
        assert_eq!(zone_name_for("lhr"), None);
        assert_eq!(zone_name_for("XXX"), None);

        // Every entry must be a zone chrono-tz knows
        for (code, _) in LOCATION_ZONES {
            assert!(resolve_zone(code).is_ok(), "{} does not resolve", code);
        }
    }

    #[test]
    fn test_raw_zone_names_accepted() {
        assert_eq!(resolve_zone("America/Denver").unwrap().name(), "America/Denver");
        assert_eq!(
            resolve_zone("XXX"),
            Err(ConversionError::UnknownZone("XXX".to_string()))
        );
    }

    #[test]
    fn test_identity_in_reference_zone() {
        assert_eq!(format_dual("TPE", "09/12 Fri", "17:45", 2025), "TPE 17:45 (TPE 17:45)");
    }

    #[test]
    fn test_same_offset_zone() {
        assert_eq!(format_dual("SIN", "09/12 Fri", "23:55", 2025), "SIN 23:55 (TPE 23:55)");
    }

    #[test]
    fn test_summer_time_zones() {
        // CEST (UTC+2) -> 05:05Z -> 13:05 Taipei
        assert_eq!(format_dual("FRA", "09/13 Sat", "07:05", 2025), "FRA 07:05 (TPE 13:05)");
        // BST (UTC+1) -> 10:25Z -> 18:25 Taipei
        assert_eq!(format_dual("LHR", "10/14 Tue", "11:25", 2025), "LHR 11:25 (TPE 18:25)");
        // WEST (UTC+1), embedded year overrides the fallback
        assert_eq!(
            format_dual("OPO", "2025/09/19 Fri", "12:45", 1990),
            "OPO 12:45 (TPE 19:45)"
        );
    }

    #[test]
    fn test_crossing_midnight() {
        // Reykjavik is UTC all year: 01:50Z -> 09:50 Taipei
        assert_eq!(format_dual("KEF", "09/26 Fri", "01:50", 2025), "KEF 01:50 (TPE 09:50)");
        // Kigali UTC+2: 22:30 local -> 20:30Z -> 04:30 next day in Taipei
        assert_eq!(format_dual("KGL", "10/10 Fri", "22:30", 2025), "KGL 22:30 (TPE 04:30)");
    }

    #[test]
    fn test_degraded_form() {
        assert_eq!(format_dual("XXX", "13/40 Abc", "99:99", 2025), "XXX 99:99");
        assert_eq!(format_dual("FRA", "sometime", "07:05", 2025), "FRA 07:05");
        assert_eq!(format_dual("FRA", "09/13", "7h05", 2025), "FRA 7h05");
        assert_eq!(format_dual("FRA", "02/30", "07:05", 2025), "FRA 07:05");
    }

    #[test]
    fn test_nonexistent_local_time_degrades() {
        // 02:30 on the spring-forward night does not exist in Berlin
        let zone = resolve_zone("FRA").unwrap();
        assert!(matches!(
            find_instant(civil(2025, 3, 30, 2, 30), zone),
            Err(ConversionError::SearchExhausted { .. })
        ));
        assert_eq!(format_dual("FRA", "03/30 Sun", "02:30", 2025), "FRA 02:30");
    }

    #[test]
    fn test_ambiguous_local_time_takes_earliest() {
        // 02:30 happens twice on the fall-back night; the CEST reading comes first
        let zone = resolve_zone("FRA").unwrap();
        let instant = find_instant(civil(2025, 10, 26, 2, 30), zone).unwrap();
        assert_eq!(instant, Utc.from_utc_datetime(&civil(2025, 10, 26, 0, 30)));
        assert_eq!(format_dual("FRA", "10/26 Sun", "02:30", 2025), "FRA 02:30 (TPE 08:30)");
    }

    #[test]
    fn test_calendar_bounds_degrade() {
        let first = NaiveDate::MIN.year();
        assert_eq!(format_dual("TPE", "01/01", "00:00", first), "TPE 00:00");
        assert_eq!(format_dual("America/Denver", "01/01", "00:00", first), "America/Denver 00:00");

        // UTC-5: the matching instant would be past the last representable day
        let last = NaiveDate::MAX.year();
        assert_eq!(format_dual("Etc/GMT+5", "12/31", "20:00", last), "Etc/GMT+5 20:00");
        // UTC+2: the instant exists but Taipei is already in the next year
        let formatter = DualTimeFormatter::new(FormatterConfig::new().with_fallback_year(last));
        assert!(matches!(
            formatter.reference_time("Etc/GMT-2", "12/31", "23:00"),
            Err(ConversionError::OutOfRange(_))
        ));
        assert_eq!(format_dual("Etc/GMT-2", "12/31", "23:00", last), "Etc/GMT-2 23:00");
    }

    #[test]
    fn test_sub_hour_offset_is_missed() {
        // Kolkata is UTC+5:30; whole-hour steps never land on the local time
        assert_eq!(format_dual("Asia/Kolkata", "09/12", "10:00", 2025), "Asia/Kolkata 10:00");
    }

    #[test]
    fn test_reference_time_reports_reason() {
        let formatter = DualTimeFormatter::default();
        assert_eq!(formatter.fallback_year(), 2025);
        assert_eq!(formatter.reference_time("CDG", "10/02 Thu", "21:30").unwrap(), "03:30");
        assert_eq!(
            formatter.reference_time("CDG", "10/02 Thu", "25:00"),
            Err(ConversionError::InvalidTime("25:00".to_string()))
        );
        assert_eq!(
            formatter.reference_time("CDG", "Thu", "21:30"),
            Err(ConversionError::InvalidDate("Thu".to_string()))
        );
    }

    #[test]
    fn test_repeatable() {
        let a = format_dual("JRO", "10/03 Fri", "14:40", 2025);
        let b = format_dual("JRO", "10/03 Fri", "14:40", 2025);
        assert_eq!(a, b);
        assert_eq!(a, "JRO 14:40 (TPE 19:40)");
    }
}
