//! Travel Itinerary CLI Application
//!
//! Terminal front end for the itinerary-core library. It adds:
//! - Page rendering (home, itinerary, packing, transport)
//! - A scrollable viewport with the day sidebar synced to the scroll position
//! - Scroll tracing to see how the highlighted day follows the viewport
//! - One-off dual local/Taipei time lookups

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use itinerary_core::{DualTimeFormatter, FormatterConfig, Itinerary, TrackerConfig};
use std::collections::HashSet;
use std::path::PathBuf;

mod config;
mod events;
mod layout;
mod pages;
mod state;

use config::AppConfig;
use events::ViewEvent;
use pages::Page;
use state::ViewState;

/// Travel Itinerary - Browse the trip plan in your terminal
#[derive(Parser, Debug)]
#[command(name = "itinerary-cli")]
#[command(about = "Browse a travel itinerary with dual local/Taipei times", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (itinerary.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Itinerary dataset (JSON) to use instead of the bundled one
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trip overview
    Home,

    /// Day-by-day plan with the sidebar synced to the scroll position
    Itinerary {
        /// Row offset to scroll to
        #[arg(long, default_value_t = 0)]
        scroll: usize,

        /// Jump so this day id is at the top (overrides --scroll)
        #[arg(long, value_name = "ID")]
        day: Option<String>,

        /// Visible rows
        #[arg(long, value_name = "ROWS")]
        height: Option<usize>,

        /// Edge rows that don't count as visible
        #[arg(long, value_name = "ROWS")]
        padding: Option<f64>,

        /// Print the whole page instead of one viewport
        #[arg(long)]
        full: bool,
    },

    /// Scroll through the itinerary and print every highlight change
    Trace {
        /// Rows per scroll step
        #[arg(long, value_name = "ROWS")]
        step: Option<usize>,

        #[arg(long, value_name = "ROWS")]
        height: Option<usize>,
    },

    /// Packing checklist
    Packing {
        /// Show this item as checked (can be repeated)
        #[arg(long = "check", value_name = "ID")]
        checked: Vec<String>,
    },

    /// Flights and ground transport
    Transport {
        /// Year for dates written without one
        #[arg(long)]
        year: Option<i32>,
    },

    /// Show a local time together with Taipei time
    Tz {
        /// Location code (TPE, FRA, ...) or IANA zone name
        code: String,
        /// Date label such as "09/12 Fri" or "2025/09/19"
        date: String,
        /// Local time as HH:MM
        time: String,
        /// Year for dates written without one
        #[arg(long)]
        year: Option<i32>,
    },

    /// List known location codes
    Zones,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Itinerary CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using itinerary-core v{}", itinerary_core::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    match &args.command {
        Command::Tz { code, date, time, year } => {
            let formatter = formatter(&config, *year);
            println!("{}", formatter.format(code, date, time));
            if let Err(e) = formatter.reference_time(code, date, time) {
                log::warn!("Shown without Taipei time: {}", e);
            }
            return Ok(());
        }
        Command::Zones => {
            for (code, zone) in itinerary_core::LOCATION_ZONES {
                println!("{}  {}", code, zone);
            }
            return Ok(());
        }
        _ => {}
    }

    let itinerary = load_itinerary(&args, &config)?;

    match args.command {
        Command::Home => print_page(&itinerary, &config, Page::Home, HashSet::new(), None),
        Command::Packing { checked } => {
            for id in &checked {
                if !itinerary.packing.iter().any(|item| &item.id == id) {
                    log::warn!("Unknown packing item: {}", id);
                }
            }
            print_page(&itinerary, &config, Page::Packing, checked.into_iter().collect(), None)
        }
        Command::Transport { year } => {
            print_page(&itinerary, &config, Page::Transport, HashSet::new(), year)
        }
        Command::Itinerary {
            scroll,
            day,
            height,
            padding,
            full,
        } => itinerary_mode(&itinerary, &config, scroll, day, height, padding, full),
        Command::Trace { step, height } => trace_mode(&itinerary, &config, step, height),
        Command::Tz { .. } | Command::Zones => Ok(()),
    }
}

fn formatter(config: &AppConfig, year: Option<i32>) -> DualTimeFormatter {
    let year = year.unwrap_or(config.display.fallback_year);
    DualTimeFormatter::new(FormatterConfig::new().with_fallback_year(year))
}

fn load_itinerary(args: &Args, config: &AppConfig) -> Result<Itinerary> {
    match args.data.as_ref().or(config.data.path.as_ref()) {
        Some(path) => Itinerary::load(path)
            .with_context(|| format!("Failed to load itinerary dataset: {:?}", path)),
        None => {
            log::debug!("Using bundled itinerary dataset");
            Itinerary::bundled().context("Bundled itinerary dataset is invalid")
        }
    }
}

/// Print a page in full, no viewport
fn print_page(
    itinerary: &Itinerary,
    config: &AppConfig,
    page: Page,
    checked: HashSet<String>,
    year: Option<i32>,
) -> Result<()> {
    let mut view = ViewState::new(
        itinerary,
        formatter(config, year),
        TrackerConfig::new().with_visibility_padding(config.viewport.padding),
        config.viewport.height,
    )
    .with_checked(checked);
    view.dispatch(ViewEvent::PageChanged(page));

    for line in view.full_screen() {
        println!("{}", line);
    }
    Ok(())
}

/// Itinerary page through a viewport, sidebar highlight from the tracker
fn itinerary_mode(
    itinerary: &Itinerary,
    config: &AppConfig,
    scroll: usize,
    day: Option<String>,
    height: Option<usize>,
    padding: Option<f64>,
    full: bool,
) -> Result<()> {
    let height = height.unwrap_or(config.viewport.height);
    let padding = padding.unwrap_or(config.viewport.padding);

    let mut view = ViewState::new(
        itinerary,
        formatter(config, None),
        TrackerConfig::new().with_visibility_padding(padding),
        config.viewport.height,
    );
    view.dispatch(ViewEvent::PageChanged(Page::Itinerary));
    if height != config.viewport.height {
        view.dispatch(ViewEvent::Resized(height));
    }

    match &day {
        Some(id) => {
            itinerary.day(id)?;
            view.jump_to(id);
        }
        None => {
            view.dispatch(ViewEvent::Scrolled(scroll));
        }
    }

    if full {
        for line in view.full_screen() {
            println!("{}", line);
        }
        return Ok(());
    }

    for line in view.screen() {
        println!("{}", line);
    }

    println!("\n───────────────────────────────────────────────");
    println!(
        "rows {}-{} of {}  ·  active: {} ({})",
        view.scroll() + 1,
        view.scroll().saturating_add(height).min(view.layout().len()),
        view.layout().len(),
        view.active_label().unwrap_or("-"),
        view.active_day().unwrap_or("-")
    );
    Ok(())
}

/// Scroll from top to bottom and report each highlight change
fn trace_mode(
    itinerary: &Itinerary,
    config: &AppConfig,
    step: Option<usize>,
    height: Option<usize>,
) -> Result<()> {
    let height = height.unwrap_or(config.viewport.height);
    let step = step.unwrap_or(config.viewport.scroll_step);

    let mut view = ViewState::new(
        itinerary,
        formatter(config, None),
        TrackerConfig::new().with_visibility_padding(config.viewport.padding),
        height,
    );

    println!("═══════════════════════════════════════════════");
    println!("  Scroll trace  (height {}, step {})", height, step);
    println!("═══════════════════════════════════════════════\n");

    println!("row {:>4}  initial   {}", 0, view.active_label().unwrap_or("-"));
    if let Some(change) = view.dispatch(ViewEvent::PageChanged(Page::Itinerary)) {
        log::debug!("Forced evaluation moved highlight from {:?}", change.previous);
        println!("row {:>4}  mount   → {}", 0, label_for(itinerary, &change.current));
    }

    let mut changes = 0;
    for event in events::scroll_sweep(view.layout().max_scroll(height), step) {
        if let Some(change) = view.dispatch(event) {
            changes += 1;
            println!("row {:>4}  scroll  → {}", view.scroll(), label_for(itinerary, &change.current));
        }
    }

    println!("\n{} highlight changes over {} rows", changes, view.layout().len());
    Ok(())
}

fn label_for<'a>(itinerary: &'a Itinerary, id: &'a str) -> &'a str {
    itinerary.day(id).map(|d| d.label.as_str()).unwrap_or(id)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
