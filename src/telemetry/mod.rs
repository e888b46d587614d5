//! Telemetry for harness runs
//!
//! Collects trial lifecycle events and counters, and prints a run summary.

use colored::Colorize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::errors::TrialStage;
use crate::trial::Seed;

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    TrialStarted {
        seed: Seed,
        timestamp: Instant,
    },
    TrialCompleted {
        seed: Seed,
        growth_percent: f64,
        duration_ms: u64,
        timestamp: Instant,
    },
    TrialFailed {
        seed: Seed,
        stage: TrialStage,
        message: String,
        timestamp: Instant,
    },
    BatchSummarized {
        num_seeds: usize,
        mean_growth: f64,
        timestamp: Instant,
    },
}

/// Telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub trials_started: usize,
    pub trials_completed: usize,
    pub trials_failed: usize,
    pub batches_summarized: usize,
    pub total_trial_ms: u64,
}

/// Telemetry collector
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

// A poisoned lock only means another recorder panicked; the data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = lock(&self.stats);
            match &event {
                TelemetryEvent::TrialStarted { .. } => {
                    stats.trials_started += 1;
                }
                TelemetryEvent::TrialCompleted { duration_ms, .. } => {
                    stats.trials_completed += 1;
                    stats.total_trial_ms += duration_ms;
                }
                TelemetryEvent::TrialFailed { .. } => {
                    stats.trials_failed += 1;
                }
                TelemetryEvent::BatchSummarized { .. } => {
                    stats.batches_summarized += 1;
                }
            }
        }

        lock(&self.events).push(event);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        lock(&self.stats).clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        lock(&self.events).len()
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        let events = lock(&self.events);
        let start = events.len().saturating_sub(n);
        events[start..].to_vec()
    }

    /// Seeds whose trial failed, in the order they failed
    pub fn failed_seeds(&self) -> Vec<Seed> {
        lock(&self.events)
            .iter()
            .filter_map(|e| match e {
                TelemetryEvent::TrialFailed { seed, .. } => Some(*seed),
                _ => None,
            })
            .collect()
    }

    /// Mean wall-clock time per completed trial
    pub fn average_trial_ms(&self) -> f64 {
        let stats = lock(&self.stats);
        if stats.trials_completed == 0 {
            0.0
        } else {
            stats.total_trial_ms as f64 / stats.trials_completed as f64
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple telemetry display
pub struct TelemetryDisplay {
    collector: TelemetryCollector,
    verbosity: crate::cli::Verbosity,
}

impl TelemetryDisplay {
    /// Create a new display
    pub fn new(collector: TelemetryCollector, verbosity: crate::cli::Verbosity) -> Self {
        Self {
            collector,
            verbosity,
        }
    }

    /// Display summary statistics
    pub fn display_summary(&self) {
        if !self.verbosity.show_progress() {
            return;
        }

        let stats = self.collector.get_stats();
        let elapsed = self.collector.elapsed();

        println!("\n{}", "Run Telemetry".bold());
        println!("─────────────────────────────────────");
        println!("Duration:          {:?}", elapsed);
        println!("Trials started:    {}", stats.trials_started);
        println!("Trials completed:  {}", stats.trials_completed);
        if stats.trials_failed > 0 {
            println!(
                "Trials failed:     {}",
                stats.trials_failed.to_string().red()
            );
        }
        println!("Avg trial time:    {:.1} ms", self.collector.average_trial_ms());
        println!();
    }

    /// Check if should show detailed output
    pub fn should_show_details(&self) -> bool {
        self.verbosity.show_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_creation() {
        let collector = TelemetryCollector::new();
        assert_eq!(collector.event_count(), 0);
        assert_eq!(collector.get_stats().trials_started, 0);
    }

    #[test]
    fn test_record_trial_lifecycle() {
        let collector = TelemetryCollector::new();
        collector.record(TelemetryEvent::TrialStarted {
            seed: 42,
            timestamp: Instant::now(),
        });
        collector.record(TelemetryEvent::TrialCompleted {
            seed: 42,
            growth_percent: 12.0,
            duration_ms: 8,
            timestamp: Instant::now(),
        });

        let stats = collector.get_stats();
        assert_eq!(stats.trials_started, 1);
        assert_eq!(stats.trials_completed, 1);
        assert_eq!(collector.event_count(), 2);
        assert_eq!(collector.average_trial_ms(), 8.0);
    }

    #[test]
    fn test_failed_seeds() {
        let collector = TelemetryCollector::new();
        collector.record(TelemetryEvent::TrialFailed {
            seed: -3,
            stage: TrialStage::Simulation,
            message: "boom".to_string(),
            timestamp: Instant::now(),
        });
        assert_eq!(collector.failed_seeds(), vec![-3]);
        assert_eq!(collector.get_stats().trials_failed, 1);
    }

    #[test]
    fn test_recent_events() {
        let collector = TelemetryCollector::new();
        for seed in 0..10 {
            collector.record(TelemetryEvent::TrialStarted {
                seed,
                timestamp: Instant::now(),
            });
        }
        let recent = collector.recent_events(3);
        assert_eq!(recent.len(), 3);
        assert!(matches!(recent[0], TelemetryEvent::TrialStarted { seed: 7, .. }));
    }

    #[test]
    fn test_clone_shares_state() {
        let collector = TelemetryCollector::new();
        let other = collector.clone();
        other.record(TelemetryEvent::BatchSummarized {
            num_seeds: 3,
            mean_growth: 1.0,
            timestamp: Instant::now(),
        });
        assert_eq!(collector.get_stats().batches_summarized, 1);
    }
}
