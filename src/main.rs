use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use agriflow::api::{Advisor, GeminiAdvisor, render_advice};
use agriflow::config::FileConfig;
use agriflow::domain::{Catalog, Coordinate, parse_boundary};
use agriflow::state::{FarmEvent, FarmState, FarmSummary};
use agriflow::units::format_liters;

/// Measure a farm field and estimate its daily irrigation water
///
/// Examples:
///   # Trace a field point by point
///   agriflow -p 13.7367,100.5231 -p 13.7369,100.5262 -p 13.7341,100.5270 -p 13.7335,100.5228
///
///   # Read the boundary from a file, sugarcane on sandy soil
///   agriflow --boundary field.txt --crop sugarcane --soil sand
///
///   # Let the model guess the soil, then ask for irrigation advice
///   agriflow --boundary field.txt --estimate-soil --advice
///
///   # Show the crop and soil tables
///   agriflow --list
#[derive(Parser, Debug)]
#[command(name = "agriflow")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches agriflow.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Boundary point as LAT,LNG (repeat in tracing order)
    #[arg(short = 'p', long = "point", allow_hyphen_values = true)]
    points: Vec<Coordinate>,

    /// File with one LAT,LNG per line; its points come before any --point
    #[arg(short = 'b', long)]
    boundary: Option<PathBuf>,

    /// Crop id (see --list)
    #[arg(short = 'c', long)]
    crop: Option<String>,

    /// Soil id (see --list)
    #[arg(short = 's', long)]
    soil: Option<String>,

    /// Ask the model which soil is most likely at the first boundary point
    #[arg(long)]
    estimate_soil: bool,

    /// Ask the model for irrigation advice for this field
    #[arg(long)]
    advice: bool,

    /// Print the crop and soil tables and exit
    #[arg(long)]
    list: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = match args.config {
        Some(ref config_path) => FileConfig::from_path(config_path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    let verbose = args.verbose || file_config.verbose;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .init();

    let catalog = file_config.catalog()?;

    if args.list {
        print_catalog(&catalog);
        return Ok(());
    }

    let mut points = Vec::new();
    if let Some(path) = args.boundary.as_ref().or(file_config.boundary.as_ref()) {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read boundary file: {}", path.display()))?;
        let parsed = parse_boundary(&text)
            .with_context(|| format!("Invalid boundary file: {}", path.display()))?;
        log::debug!("Read {} points from {}", parsed.len(), path.display());
        points.extend(parsed);
    }
    points.extend(args.points.iter().copied());

    let mut state = FarmState::with_defaults(&catalog);
    if let Some(crop) = args.crop.clone().or_else(|| file_config.crop.clone()) {
        state = state.apply(FarmEvent::CropSelected(crop), &catalog);
    }
    if let Some(soil) = args.soil.clone().or_else(|| file_config.soil.clone()) {
        state = state.apply(FarmEvent::SoilSelected(soil), &catalog);
    }
    for point in points {
        state = state.apply(FarmEvent::PointAdded(point), &catalog);
    }

    let advisor = if args.estimate_soil || args.advice {
        make_advisor(&file_config)?
    } else {
        None
    };

    if args.estimate_soil {
        state = estimate_soil(state, advisor.as_ref(), &catalog);
    }

    println!("agriflow - Field Water Planner");
    println!("==============================");
    println!();
    print_summary(&state.summary(&catalog));

    if args.advice {
        println!();
        print_advice(&state, advisor.as_ref(), &catalog);
    }

    Ok(())
}

/// Advisor from config, or `None` when no API key is available
fn make_advisor(file_config: &FileConfig) -> Result<Option<GeminiAdvisor>> {
    let advisor_config = file_config.advisor.clone().unwrap_or_default();

    let Some(api_key) = advisor_config.api_key() else {
        log::warn!(
            "{} is not set; the advisory service is unavailable",
            advisor_config.api_key_env
        );
        return Ok(None);
    };

    Ok(Some(GeminiAdvisor::new(&advisor_config, api_key)?))
}

fn estimate_soil(
    state: FarmState,
    advisor: Option<&GeminiAdvisor>,
    catalog: &Catalog,
) -> FarmState {
    let Some(probe) = state.soil_probe() else {
        println!("Add at least one boundary point before estimating soil.");
        return state;
    };

    let estimate = advisor.and_then(|advisor| {
        let spinner = create_spinner("Estimating soil type...");
        let start = Instant::now();
        let estimate = advisor.estimate_soil(probe, catalog.soils());
        spinner.finish_with_message(format!(
            "Soil estimation finished [{:.1}s]",
            start.elapsed().as_secs_f32()
        ));
        estimate
    });

    match estimate {
        Some(estimate) => {
            println!("AI soil estimate: {} ({})", estimate.soil_id, estimate.reason);
            state.apply(FarmEvent::SoilEstimated(estimate), catalog)
        }
        None => {
            println!("No soil estimate available; keeping {}", state.selected_soil());
            state
        }
    }
}

fn print_advice(state: &FarmState, advisor: Option<&GeminiAdvisor>, catalog: &Catalog) {
    let Some(request) = state.advice_request(catalog) else {
        println!("Trace a boundary with at least 3 points to get advice.");
        return;
    };

    let advice = advisor.and_then(|advisor| {
        let spinner = create_spinner("Requesting irrigation advice...");
        let start = Instant::now();
        let advice = advisor.advise(&request);
        spinner.finish_with_message(format!(
            "Advice request finished [{:.1}s]",
            start.elapsed().as_secs_f32()
        ));
        advice
    });

    println!("AI Agricultural Insight");
    println!("-----------------------");
    println!("{}", render_advice(advice.as_ref()));
}

fn print_summary(summary: &FarmSummary) {
    println!("Boundary points: {}", summary.point_count);
    println!(
        "Area:            {} ({:.0} m², {} rai)",
        summary.thai_area, summary.area_sqm, summary.area_rai
    );
    println!(
        "Crop:            {}",
        summary.crop_name.as_deref().unwrap_or("(unknown)")
    );
    println!(
        "Soil:            {}",
        summary.soil_name.as_deref().unwrap_or("(unknown)")
    );
    if let Some(ref description) = summary.soil_description {
        println!("                 {}", description);
    }
    println!(
        "Daily water:     {} L",
        format_liters(summary.daily_water_liters)
    );
    if summary.crop_name.is_none() || summary.soil_name.is_none() {
        println!("                 (selection incomplete)");
    }
}

fn print_catalog(catalog: &Catalog) {
    println!("Crops (water need per m² per day, growth period):");
    for crop in catalog.crops() {
        println!(
            "  {:<12} {:<20} {:>5.1} L  {:>4} days",
            crop.id, crop.name, crop.water_needs_per_day, crop.growth_period
        );
    }
    println!();
    println!("Soils (retention factor):");
    for soil in catalog.soils() {
        println!(
            "  {:<12} {:<20} x{:.2}  {}",
            soil.id, soil.name, soil.retention_factor, soil.description
        );
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
