use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use sld_app::{
    AppError, AppResult, LoadRequest, Session, compile_topology, list_stations, load_scenarios,
    load_topology, save_switch_states, save_topology, summarize,
};
use sld_sim::EnergizationReport;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(name = "sld-cli")]
#[command(about = "Single-line diagram energization tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, validate and build a topology
    Validate {
        /// Path to the topology file (JSON or YAML)
        topology: PathBuf,
    },
    /// List stations in a topology
    Stations {
        /// Path to the topology file (JSON or YAML)
        topology: PathBuf,
    },
    /// Propagate energization and print the result
    Simulate {
        /// Path to the topology file (JSON or YAML)
        topology: PathBuf,
        /// Persisted switch-state document to seed from
        #[arg(long)]
        states: Option<PathBuf>,
        /// Scenario library
        #[arg(long)]
        scenarios: Option<PathBuf>,
        /// Scenario to apply (requires --scenarios)
        #[arg(long, requires = "scenarios")]
        scenario: Option<String>,
        /// Switch to toggle after the scenario; repeatable, applied in order
        #[arg(long = "toggle", value_name = "SWITCH")]
        toggles: Vec<String>,
        /// Print the output map as JSON
        #[arg(long)]
        json: bool,
        /// Write the final switch states to this file
        #[arg(long)]
        save_states: Option<PathBuf>,
    },
    /// Rewrite a topology in canonical form (format by output extension)
    Convert {
        /// Topology to read (JSON or YAML, map or array form)
        input: PathBuf,
        /// Destination file
        output: PathBuf,
    },
    /// List scenarios in a scenario library
    Scenarios {
        /// Path to the scenario file (JSON or YAML)
        scenarios: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { topology } => cmd_validate(&topology),
        Commands::Stations { topology } => cmd_stations(&topology),
        Commands::Simulate {
            topology,
            states,
            scenarios,
            scenario,
            toggles,
            json,
            save_states,
        } => cmd_simulate(
            LoadRequest {
                topology,
                switch_states: states,
                scenarios,
            },
            scenario.as_deref(),
            &toggles,
            json,
            save_states.as_deref(),
        ),
        Commands::Convert { input, output } => cmd_convert(&input, &output),
        Commands::Scenarios { scenarios } => cmd_scenarios(&scenarios),
    }
}

fn cmd_validate(path: &Path) -> AppResult<()> {
    println!("Validating topology: {}", path.display());
    let topology = load_topology(path)?;
    let network = compile_topology(&topology)?;

    let graph = &network.graph;
    let anomalies: Vec<_> = network.anomalies().collect();
    println!(
        "✓ Topology is valid: {} nodes, {} switches, {} feeds",
        graph.nodes().count(),
        graph.switches().count(),
        network.feeds.len()
    );
    if !anomalies.is_empty() {
        println!("{} diagnostics:", anomalies.len());
        for diag in anomalies {
            println!("  {}", diag);
        }
    }
    Ok(())
}

fn cmd_stations(path: &Path) -> AppResult<()> {
    let topology = load_topology(path)?;
    let stations = list_stations(&topology);

    if stations.is_empty() {
        println!("No stations found in topology");
    } else {
        println!("Stations in topology:");
        for station in stations {
            println!(
                "  {} ({} nodes, {} switches)",
                station.name, station.node_count, station.switch_count
            );
        }
    }
    Ok(())
}

fn cmd_simulate(
    request: LoadRequest,
    scenario: Option<&str>,
    toggles: &[String],
    json: bool,
    save_states: Option<&Path>,
) -> AppResult<()> {
    let mut session = Session::new();
    session.load(&request)?;

    if let Some(id) = scenario {
        if !session.apply_scenario(id) {
            return Err(AppError::InvalidInput(format!("unknown scenario '{id}'")));
        }
    }

    for switch in toggles {
        let sim = session.simulation_mut()?;
        let Some(before) = sim.switch_state(switch) else {
            return Err(AppError::InvalidInput(format!("unknown switch '{switch}'")));
        };
        if !sim.toggle(switch) {
            eprintln!("switch {switch} is {before}; not toggled");
        }
    }

    let sim = session.simulation()?;
    let report = sim.report();
    if json {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &report).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        print_report(&report)?;
        let summary = summarize(sim.energization());
        println!(
            "{} segments: {} energized, {} unenergized, {} open",
            summary.segments, summary.energized, summary.unenergized, summary.open
        );
        for (phase, count) in &summary.by_phase {
            println!("  phase {}: {} energized", phase, count);
        }
    }

    if let Some(path) = save_states {
        save_switch_states(path, &sim.switch_states_snapshot())?;
        eprintln!("Switch states written to {}", path.display());
    }
    Ok(())
}

fn print_report(report: &EnergizationReport) -> io::Result<()> {
    let width = report.iter().map(|(id, _)| id.len()).max().unwrap_or(0).max(7);
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{:<width$}  {:<11}  {:<6}  {:<6}  group",
        "segment", "state", "phase", "side"
    )?;
    for (id, entry) in report.iter() {
        writeln!(
            out,
            "{:<width$}  {:<11}  {:<6}  {:<6}  {}",
            id,
            entry.state.as_str(),
            entry.phase.as_deref().unwrap_or("-"),
            entry.side.as_deref().unwrap_or("-"),
            entry.group
        )?;
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> AppResult<()> {
    let topology = load_topology(input)?;
    save_topology(output, &topology)?;
    println!("✓ Topology written to {}", output.display());
    Ok(())
}

fn cmd_scenarios(path: &Path) -> AppResult<()> {
    let library = load_scenarios(path)?;

    if library.scenarios.is_empty() {
        println!("No scenarios found");
    } else {
        println!("Scenarios:");
        for (id, scenario) in &library.scenarios {
            println!("  {} ({} switches)", id, scenario.len());
        }
    }
    Ok(())
}
