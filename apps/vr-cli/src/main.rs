use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use vr_app::{
    AppResult, RunOverrides, RunProgressEvent, RunRequest, RunStage, RunSummary, query,
    run_service, scenario_service,
};
use vr_project::Scenario;

#[derive(Parser)]
#[command(name = "vr-cli")]
#[command(about = "Voltage regulator CLI - hybrid three-mode regulator simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and parameters
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Print a scenario with the default parameters as YAML
    Defaults {
        /// Include the reference noise, sinusoid and pulse disturbances
        #[arg(long)]
        reference: bool,
    },
    /// Run a simulation and print a summary
    Run {
        /// Path to the scenario file (defaults when omitted)
        scenario_path: Option<PathBuf>,
        /// Time step in seconds
        #[arg(long)]
        dt: Option<f64>,
        /// End time in seconds
        #[arg(long)]
        t_end: Option<f64>,
        /// Seed for every noise disturbance
        #[arg(long)]
        seed: Option<u64>,
        /// Export the trajectory (.csv or .jsonl)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show a summary of an exported run
    Show {
        /// Path to a .jsonl or .csv run file
        run_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Defaults { reference } => cmd_defaults(reference),
        Commands::Run {
            scenario_path,
            dt,
            t_end,
            seed,
            output,
        } => cmd_run(
            scenario_path.as_deref(),
            RunOverrides {
                dt_s: dt,
                t_end_s: t_end,
                seed,
            },
            output.as_deref(),
        ),
        Commands::Show { run_path } => cmd_show(&run_path),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = scenario_service::load_scenario(scenario_path)?;
    scenario_service::validate_scenario(&scenario)?;

    let summary = scenario_service::summarize_scenario(&scenario);
    println!("✓ Scenario is valid");
    println!("  Name: {}", summary.name);
    println!("  Band: [{}, {}] V", summary.band.0, summary.band.1);
    println!(
        "  Grid: dt = {} s, t_end = {} s ({} steps)",
        summary.dt_s, summary.t_end_s, summary.steps
    );
    if summary.disturbance_kinds.is_empty() {
        println!("  Disturbances: none");
    } else {
        println!("  Disturbances: {}", summary.disturbance_kinds.join(", "));
        if !summary.seeded {
            println!("  Note: unseeded noise, runs are not reproducible");
        }
    }
    Ok(())
}

fn cmd_defaults(reference: bool) -> AppResult<()> {
    let scenario = if reference {
        vr_project::reference_scenario()
    } else {
        vr_project::default_scenario()
    };
    print!("{}", scenario_service::scenario_yaml(&scenario)?);
    Ok(())
}

fn cmd_run(
    scenario_path: Option<&Path>,
    overrides: RunOverrides,
    output: Option<&Path>,
) -> AppResult<()> {
    let scenario = match scenario_path {
        Some(path) => scenario_service::load_scenario(path)?,
        None => vr_project::default_scenario(),
    };
    tracing::debug!(?overrides, "run overrides");

    println!("Running scenario: {}", scenario.name);
    print_overrides(&scenario, &overrides);

    let request = RunRequest {
        scenario: &scenario,
        overrides,
    };

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let response = run_service::run_scenario_with_progress(
        &request,
        Some(&mut |event| {
            let fraction = event
                .sim
                .as_ref()
                .map(|p| p.fraction_complete)
                .unwrap_or(-1.0);
            let emit_now = (fraction >= 0.0 && (fraction - last_fraction).abs() >= 0.005)
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                if fraction >= 0.0 {
                    last_fraction = fraction;
                }
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    println!("✓ Simulation completed: {} steps", response.manifest.steps);
    print_timing_summary(&response.timing);

    let summary = query::get_run_summary(&response.records())?;
    let params = &response.manifest.parameters;
    print_run_summary(&summary, Some((params.v_min, params.v_max)));

    if let Some(path) = output {
        run_service::export_run(&response, path)?;
        println!("\nExported trajectory to {}", path.display());
    }

    Ok(())
}

fn print_overrides(scenario: &Scenario, overrides: &RunOverrides) {
    let reg = &scenario.regulator;
    let dt = overrides.dt_s.unwrap_or(reg.dt);
    let t_end = overrides.t_end_s.unwrap_or(reg.t_end);
    println!("  dt = {:.3} s, t_end = {:.3} s", dt, t_end);
    if let Some(seed) = overrides.seed {
        println!("  noise seed = {}", seed);
    }
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (event.stage, &event.sim) {
        (RunStage::Simulating, Some(p)) => {
            let width = 28usize;
            let filled = ((p.fraction_complete * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  t={:.3}/{:.3}s  V={:.3}  mode={}  elapsed={:.1}s",
                bar,
                p.fraction_complete * 100.0,
                p.t,
                p.t_end,
                p.voltage,
                p.mode,
                event.elapsed_wall_s
            );
            let _ = io::stdout().flush();
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
            let _ = io::stdout().flush();
        }
    }
}

fn print_timing_summary(timing: &vr_app::RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let compile_pct = 100.0 * timing.compile_time_s / total;
    let simulate_pct = 100.0 * timing.simulate_time_s / total;

    println!("\nTiming summary:");
    println!(
        "  Compile:  {:.3}s ({:.1}%)",
        timing.compile_time_s, compile_pct
    );
    println!(
        "  Simulate: {:.3}s ({:.1}%)",
        timing.simulate_time_s, simulate_pct
    );
    println!("  Total:    {:.3}s", timing.total_time_s);
}

fn band_label(band: Option<(f64, f64)>) -> String {
    match band {
        Some((v_min, v_max)) => format!("band {} - {} V", v_min, v_max),
        None => "band unknown".to_string(),
    }
}

/// `band` is `None` for a run file without a manifest.
fn print_run_summary(summary: &RunSummary, band: Option<(f64, f64)>) {
    println!("\nRun Summary:");
    println!("  Time points: {}", summary.record_count);
    println!(
        "  Time range: {:.3} - {:.3} s",
        summary.time_range.0, summary.time_range.1
    );
    println!(
        "  Voltage range: {:.3} - {:.3} V ({})",
        summary.voltage_range.0,
        summary.voltage_range.1,
        band_label(band)
    );
    println!(
        "  Final: {:.3} V, {}",
        summary.final_voltage, summary.final_mode
    );
    println!(
        "  Steps: Normal {}, Overvoltage {}, Undervoltage {} ({:.1}% in Normal)",
        summary.mode_counts.normal,
        summary.mode_counts.overvoltage,
        summary.mode_counts.undervoltage,
        100.0 * summary.in_band_fraction()
    );
    println!(
        "  Excursions: {} ({} mode transitions)",
        summary.excursions, summary.transitions
    );
}

fn cmd_show(run_path: &Path) -> AppResult<()> {
    println!("Loading run: {}", run_path.display());

    let (manifest, records) = run_service::load_run(run_path)?;
    let summary = query::get_run_summary(&records)?;

    match manifest {
        Some(m) => {
            println!("  Scenario: {}", m.scenario_name);
            if !m.disturbances.is_empty() {
                println!("  Disturbances: {}", m.disturbances.join(", "));
            }
            if let Some(seed) = m.seed {
                println!("  Noise seed: {}", seed);
            }
            print_run_summary(&summary, Some((m.parameters.v_min, m.parameters.v_max)));
        }
        None => {
            println!("  No manifest found, regulator parameters unknown");
            print_run_summary(&summary, None);
        }
    }

    if let Some(first) = query::mode_transitions(&records).first() {
        println!(
            "  First transition: {} -> {} at t = {:.3} s",
            first.from, first.to, first.time_s
        );
    }

    Ok(())
}
