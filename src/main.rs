//! APEX 3.0 - CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use apex_harness::{
    aggregate::{RunOutcome, TrialRunner},
    cli::{Args, Commands, Config, Verbosity},
    doctor::Doctor,
    report::{generate_submission, save_json},
    telemetry::{TelemetryCollector, TelemetryDisplay},
};

const RULE: &str = "============================================================";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.validate().map_err(anyhow::Error::msg)?;

    let config = Config::load(args.config.as_deref())?;

    let verbosity = if args.quiet || args.verbose > 0 {
        args.verbosity()
    } else {
        Verbosity::from_label(&config.telemetry.default_verbosity).unwrap_or(Verbosity::Normal)
    };

    if !config.telemetry.color_output {
        colored::control::set_override(false);
    }

    match &args.command {
        Some(Commands::Validate { output }) => {
            let path = output.clone().unwrap_or_else(|| config.validation_output());
            run_validate(&config, &path, verbosity).await?;
        }
        Some(Commands::Submit { results, out_dir }) => {
            let results = results.clone().unwrap_or_else(|| config.validation_output());
            let out_dir = out_dir.clone().unwrap_or_else(|| config.submit_dir());
            run_submit(&results, &out_dir, verbosity).await?;
        }
        Some(Commands::Doctor) => {
            run_doctor(&config);
        }
        Some(Commands::Config) => {
            show_config(&args, &config)?;
        }
        None => {
            run_trials(&args, &config, verbosity).await?;
        }
    }

    Ok(())
}

async fn run_trials(args: &Args, config: &Config, verbosity: Verbosity) -> Result<()> {
    let trial_config = config.trial_config(args.test_mode, args.cycles)?;
    let test_mode = trial_config.test_mode;
    let cycles = trial_config.cycle_count;

    let kind = args.simulator.unwrap_or(config.run.simulator);
    let simulator = config.simulator(kind);

    let telemetry = TelemetryCollector::new();
    let mut runner = TrialRunner::new(&*simulator, trial_config)
        .with_telemetry(telemetry.clone())
        .verbose(verbosity.show_events());

    let outcome = match &args.seeds {
        Some(seeds) => {
            if verbosity.show_progress() {
                println!("\n{}", RULE);
                println!(
                    "APEX 3.0 Multi-Seed Validation - {}",
                    test_mode.as_str().to_uppercase()
                );
                println!("Seeds: {:?}", seeds);
                println!("Simulator: {}  Cycles: {}", kind.as_str(), cycles);
                println!("{}", RULE);
            }

            if verbosity.show_progress() && config.telemetry.show_progress_bars {
                let pb = ProgressBar::new(seeds.len() as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("Seeds [{bar:40.cyan/blue}] {pos}/{len} | ETA: {eta}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=>-"),
                );
                runner = runner.with_progress(pb);
            }

            runner.run_batch(seeds)?
        }
        None => {
            let seed = args.seed.unwrap_or(config.run.default_seed);
            if verbosity.show_progress() {
                println!(
                    "\nRunning single seed test: seed={}, mode={}, cycles={}, simulator={}\n",
                    seed,
                    test_mode,
                    cycles,
                    kind.as_str()
                );
            }
            runner.run_single(seed)?
        }
    };

    print_outcome(&outcome, verbosity);

    if verbosity.show_events() {
        TelemetryDisplay::new(telemetry, verbosity).display_summary();
    }

    if let Some(path) = &args.output {
        save_json(path, &outcome).await?;
        if verbosity.show_progress() {
            println!("{} Results saved to: {}", "✓".green(), path.display());
        }
    }

    Ok(())
}

fn print_outcome(outcome: &RunOutcome, verbosity: Verbosity) {
    if !verbosity.show_progress() {
        return;
    }

    if verbosity.show_results() {
        for result in outcome.results() {
            println!(
                "  seed {:>8}: growth {:>9.2}%  final {:.4}  status {:?}",
                result.seed,
                result.performance.growth_percent,
                result.performance.final_state,
                result.performance.status
            );
        }
    }

    match outcome {
        RunOutcome::Single(result) => {
            println!("{}", "=== RESULTS ===".bold());
            println!("Final State: {:.4}", result.performance.final_state);
            println!("Growth: {:.2}%", result.performance.growth_percent);
            println!("Status: {:?}", result.performance.status);
        }
        RunOutcome::Batch(report) => {
            let summary = &report.summary;
            println!("\n{}", RULE);
            println!("SUMMARY - {}", summary.test_mode.as_str().to_uppercase());
            println!("{}", RULE);
            println!("Mean Growth:  {:.2}%", summary.mean);
            println!("Std Dev:      {:.2}%", summary.std_dev);
            println!("Min Growth:   {:.2}%", summary.min);
            println!("Max Growth:   {:.2}%", summary.max);
            println!("{}\n", RULE);
        }
    }
}

async fn run_validate(
    config: &Config,
    path: &std::path::Path,
    verbosity: Verbosity,
) -> Result<()> {
    let show = verbosity.show_progress();
    if show {
        println!("{}", RULE);
        println!("APEX 3.0 Phase 1 - Validation Runner");
        println!("{}\n", RULE);
        println!("Running validation suite...");
    }

    let report = config.run_suite()?;

    if show {
        println!("{} Validation complete\n", "✓".green());
        println!("Results:");
        println!("  Input: {:?}", report.input);
        println!(
            "  Alpha: {}  Iterations: {}",
            config.engine.alpha, config.engine.iterations
        );
        println!("  Checksum: {:.6}", report.checksum);
        if !report.matches_reference() {
            println!("  {}", "Checksum differs from reference!".red());
        }
        println!();
    }

    save_json(path, &report).await?;

    if show {
        println!("{} Results saved to: {}\n", "✓".green(), path.display());
        println!("Next step: apex submit");
        println!("{}", RULE);
    }

    Ok(())
}

async fn run_submit(
    results: &std::path::Path,
    out_dir: &std::path::Path,
    verbosity: Verbosity,
) -> Result<()> {
    let files = generate_submission(results, out_dir).await?;

    if verbosity.show_progress() {
        println!("{}", RULE);
        println!("APEX 3.0 - Generating Submission Files");
        println!("{}\n", RULE);
        println!("{} Generated 3 files in {}:", "✓".green(), out_dir.display());
        for (i, path) in files.all().iter().enumerate() {
            println!("  {}. {}", i + 1, path.display());
        }
        println!("{}", RULE);
    }

    Ok(())
}

fn run_doctor(config: &Config) {
    let doctor = Doctor::new(config.results_dir());
    let checks = doctor.run_diagnostics();
    Doctor::display_results(&checks);

    if Doctor::overall_status(&checks) {
        println!("{} You may proceed with validation", "✓".green());
    } else {
        println!("{} Preflight failed; results would not be reproducible", "✗".red());
        std::process::exit(1);
    }
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => match Config::default_path() {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "built-in defaults".to_string(),
        },
    };

    println!("{} {}\n", "Configuration from".bold(), source);
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
