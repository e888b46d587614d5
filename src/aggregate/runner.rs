//! Sequential trial execution and batch aggregation

use indicatif::ProgressBar;
use std::time::Instant;

use crate::aggregate::stats::describe;
use crate::aggregate::types::{BatchReport, RunOutcome, SummaryStatistics};
use crate::errors::{HarnessError, Result, TrialStage};
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use crate::trial::{Seed, Simulator, TrialConfig, TrialResult};

/// Runs trials against one simulator and configuration.
///
/// Seeds are executed strictly in input order, one attempt each. The first
/// failure aborts the batch.
pub struct TrialRunner<'a, S: Simulator + ?Sized> {
    simulator: &'a S,
    config: TrialConfig,
    telemetry: Option<TelemetryCollector>,
    progress: Option<ProgressBar>,
    verbose: bool,
}

impl<'a, S: Simulator + ?Sized> TrialRunner<'a, S> {
    /// Create a runner without telemetry or progress output
    pub fn new(simulator: &'a S, config: TrialConfig) -> Self {
        Self {
            simulator,
            config,
            telemetry: None,
            progress: None,
            verbose: false,
        }
    }

    /// Record trial events into the given collector
    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Advance the given progress bar once per completed trial
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Print per-trial lines to stderr
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Configuration every trial receives
    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    fn record(&self, event: TelemetryEvent) {
        if let Some(telemetry) = &self.telemetry {
            telemetry.record(event);
        }
    }

    fn fail(&self, seed: Seed, stage: TrialStage, source: HarnessError) -> HarnessError {
        if self.verbose {
            eprintln!("[TRIAL] seed={} failed during {}: {}", seed, stage, source);
        }
        self.record(TelemetryEvent::TrialFailed {
            seed,
            stage,
            message: source.to_string(),
            timestamp: Instant::now(),
        });
        if let Some(pb) = &self.progress {
            pb.abandon();
        }
        HarnessError::TrialExecution {
            seed,
            stage,
            source: Box::new(source),
        }
    }

    /// Run a single trial; simulator errors come back tagged with the seed
    pub fn run_trial(&self, seed: Seed) -> Result<TrialResult> {
        self.config.validate()?;

        if self.verbose {
            eprintln!(
                "[TRIAL] seed={} simulator={} mode={} cycles={}",
                seed,
                self.simulator.name(),
                self.config.test_mode,
                self.config.cycle_count
            );
        }
        self.record(TelemetryEvent::TrialStarted {
            seed,
            timestamp: Instant::now(),
        });

        let started = Instant::now();
        let result = self
            .simulator
            .run(seed, &self.config)
            .map_err(|e| self.fail(seed, TrialStage::Simulation, e))?;

        self.record(TelemetryEvent::TrialCompleted {
            seed,
            growth_percent: result.growth_percent(),
            duration_ms: started.elapsed().as_millis() as u64,
            timestamp: Instant::now(),
        });

        Ok(result)
    }

    fn extract_metric(&self, result: &TrialResult) -> Result<f64> {
        let growth = result.growth_percent();
        if growth.is_finite() {
            Ok(growth)
        } else {
            Err(self.fail(
                result.seed,
                TrialStage::MetricExtraction,
                HarnessError::invalid_input(format!("growth_percent is not finite: {}", growth)),
            ))
        }
    }

    /// Run every seed in order and summarize the growth metric
    pub fn aggregate(&self, seeds: &[Seed]) -> Result<BatchReport> {
        if seeds.is_empty() {
            return Err(HarnessError::invalid_input("seed list must not be empty"));
        }
        self.config.validate()?;

        let mut individual_results = Vec::with_capacity(seeds.len());
        let mut growth_values = Vec::with_capacity(seeds.len());

        for &seed in seeds {
            let result = self.run_trial(seed)?;
            growth_values.push(self.extract_metric(&result)?);
            individual_results.push(result);

            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        let stats = describe(&growth_values)?;
        let summary = SummaryStatistics::from_descriptive(self.config.test_mode, seeds.to_vec(), stats);

        self.record(TelemetryEvent::BatchSummarized {
            num_seeds: summary.num_seeds,
            mean_growth: summary.mean,
            timestamp: Instant::now(),
        });
        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        Ok(BatchReport {
            summary,
            individual_results,
        })
    }

    /// Single-seed invocation: a bare trial result, no summary
    pub fn run_single(&self, seed: Seed) -> Result<RunOutcome> {
        self.run_trial(seed).map(RunOutcome::Single)
    }

    /// Multi-seed invocation: summary plus individual results
    pub fn run_batch(&self, seeds: &[Seed]) -> Result<RunOutcome> {
        self.aggregate(seeds).map(RunOutcome::Batch)
    }
}

/// Run one trial for `seed`
pub fn run_trial<S: Simulator + ?Sized>(
    seed: Seed,
    simulator: &S,
    config: &TrialConfig,
) -> Result<TrialResult> {
    TrialRunner::new(simulator, *config).run_trial(seed)
}

/// Run one trial per seed and summarize the growth metric
pub fn aggregate<S: Simulator + ?Sized>(
    seeds: &[Seed],
    simulator: &S,
    config: &TrialConfig,
) -> Result<BatchReport> {
    TrialRunner::new(simulator, *config).aggregate(seeds)
}
