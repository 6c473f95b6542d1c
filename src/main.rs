// src/main.rs

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ellingham::config::{Config, ExportFormat};
use ellingham::error::{Result, ScreeningError};
use ellingham::io::{self, tc_export, tc_table, BuiltinTable, EnergyUnit};
use ellingham::model::TabulatedCurve;
use ellingham::physics::{ExchangeReaction, TemperatureRange};
use ellingham::rendering;
use ellingham::state::AppState;
use ellingham::utils::{logger, report};

#[cfg(feature = "gui")]
mod ui;

#[derive(Parser, Debug)]
#[command(name = "ellingham")]
#[command(about = "Ellingham-diagram screening of ceramics for copper affinity in steel melts")]
#[command(version)]
struct Args {
    /// Settings file (defaults to the per-user config location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pre-computed ΔG table (CSV); the built-in literature oxides otherwise
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Energy unit of the values in --data
    #[arg(long, global = true, value_enum)]
    unit: Option<EnergyUnit>,

    /// Built-in literature table used when no --data is given
    #[arg(long, global = true, value_enum)]
    table: Option<BuiltinTable>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank species by ΔG° per mol oxidant, most stable first
    Rank {
        /// Temperature in K
        #[arg(short, long)]
        temperature: Option<f64>,
        /// Species to include (default: configured selection)
        #[arg(short, long, num_args = 1..)]
        species: Vec<String>,
    },
    /// Tabulate ΔG° over a temperature grid, or write it as CSV
    Sweep {
        #[arg(long)]
        start: Option<f64>,
        #[arg(long)]
        stop: Option<f64>,
        #[arg(long)]
        step: Option<f64>,
        #[arg(short, long, num_args = 1..)]
        species: Vec<String>,
        /// Write the interchange CSV here instead of printing
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Which oxides the reference metal can reduce
    Reduce {
        #[arg(short, long)]
        temperature: Option<f64>,
        #[arg(short, long, default_value = "Cu2O")]
        reference: String,
    },
    /// 2Cu + FeS → Cu₂S + Fe
    Exchange {
        #[arg(short, long)]
        temperature: Option<f64>,
    },
    /// Export the diagram (SVG, PNG, or PDF with the gui feature)
    Plot {
        /// Output file; format follows the extension
        out: PathBuf,
        #[arg(short, long)]
        temperature: Option<f64>,
        #[arg(short, long, num_args = 1..)]
        species: Vec<String>,
    },
    /// Convert raw Thermo-Calc console exports into one interchange CSV.
    /// Rows are the exported temperatures; a species without a value at a
    /// temperature gets an empty cell.
    ProcessExport {
        /// Tab-separated exports named like "cu2o_dGf_1273-1873K.txt"
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Mol O₂ per formula unit for species not in the library, NAME=FACTOR
        #[arg(short, long = "factor", value_parser = parse_factor)]
        factors: Vec<(String, f64)>,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Interactive window with a temperature slider
    #[cfg(feature = "gui")]
    Gui,
}

fn parse_factor(s: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=FACTOR, got '{}'", s))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("bad factor '{}'", value))?;
    Ok((name.trim().to_string(), value))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    if let Err(e) = logger::init(level) {
        eprintln!("Logger already set: {}", e);
    }

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Config::load_from(p),
        None => {
            let (cfg, msg) = Config::load();
            log::debug!("{}", msg);
            Ok(cfg)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(unit) = args.unit {
        config.energy_unit = unit;
    }
    if let Some(table) = args.table {
        config.builtin_table = table;
    }
    let data_file = args.data.or_else(|| config.data_file.clone());

    // Raw export processing does not need a dataset
    if let Some(Command::ProcessExport { files, factors, out }) = &args.command {
        process_exports(files, factors, out)?;
        return Ok(ExitCode::SUCCESS);
    }

    let dataset = io::load_dataset(data_file.as_deref(), config.energy_unit, config.builtin_table)?;
    log::debug!("Dataset: {} ({} curves)", dataset.source, dataset.len());
    let mut state = AppState::new(config, dataset);
    // The configured selection names oxides; the sulfide table shows all its lines
    if state.selection.is_empty() && data_file.is_none() {
        state.select_all();
    }

    match args.command {
        Some(Command::Rank { temperature, species }) => {
            prepare(&mut state, temperature, &species)?;
            print!("{}", state.ranking_report());
        }
        Some(Command::Sweep { start, stop, step, species, out }) => {
            prepare(&mut state, None, &species)?;
            let grid = &state.config.sweep;
            let range = TemperatureRange::new(
                start.unwrap_or(grid.start_k),
                stop.unwrap_or(grid.stop_k),
                step.unwrap_or(grid.step_k),
            )?;
            let curves = state.selected_curves();
            match out {
                Some(path) => tc_table::save(&path, &curves, &range)?,
                None => print!("{}", report::sweep_table(&curves, &range)),
            }
        }
        Some(Command::Reduce { temperature, reference }) => {
            prepare(&mut state, temperature, &[])?;
            print!(
                "{}",
                report::reduction_summary(state.dataset.curves(), &reference, state.temperature_k)?
            );
        }
        Some(Command::Exchange { temperature }) => {
            prepare(&mut state, temperature, &[])?;
            let reaction = ExchangeReaction::copper_sulfide_from_iron_sulfide()?;
            print!("{}", report::exchange_summary(&reaction, state.temperature_k));
        }
        Some(Command::Plot { out, temperature, species }) => {
            prepare(&mut state, temperature, &species)?;
            let format = ExportFormat::from_path(&out).unwrap_or(state.config.default_export_format);
            let plot = state.plot_data()?;
            rendering::export(&plot, &out, format, &state.config.style)?;
        }
        Some(Command::ProcessExport { .. }) => {}
        #[cfg(feature = "gui")]
        Some(Command::Gui) | None => return Ok(ui::run(state)),
        #[cfg(not(feature = "gui"))]
        None => {
            prepare(&mut state, None, &[])?;
            print!("{}", state.ranking_report());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Applies CLI overrides to the state; unknown species names are an error.
fn prepare(state: &mut AppState, temperature: Option<f64>, species: &[String]) -> Result<()> {
    let t = temperature.unwrap_or(state.temperature_k);
    state.set_temperature(t);

    if !species.is_empty() {
        for name in species {
            state.dataset.require(name)?;
        }
        let names: Vec<String> = state.dataset.names().iter().map(|s| s.to_string()).collect();
        for name in names {
            let on = species.contains(&name);
            state.set_selected(&name, on);
        }
    }
    Ok(())
}

fn process_exports(files: &[PathBuf], factors: &[(String, f64)], out: &Path) -> Result<()> {
    let mut curves: Vec<TabulatedCurve> = Vec::new();

    for path in files {
        let raw_name = tc_export::species_from_filename(path);
        let explicit = factors
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(&raw_name))
            .map(|(_, f)| *f);

        let (name, factor) = match (tc_export::lookup_oxide(&raw_name), explicit) {
            (Some((name, _)), Some(f)) => (name, f),
            (Some(known), None) => known,
            (None, Some(f)) => (raw_name.clone(), f),
            (None, None) => {
                return Err(ScreeningError::domain(
                    raw_name,
                    "unknown species; pass --factor NAME=FACTOR",
                ))
            }
        };
        if curves.iter().any(|c| c.name() == name) {
            return Err(ScreeningError::domain(name, "given by more than one export"));
        }

        let curve = tc_export::parse(path, &name, factor)?;
        log::info!("{}: {} points from {}", name, curve.points().len(), path.display());
        curves.push(curve);
    }

    tc_table::save_tabulated(out, &curves)
}
