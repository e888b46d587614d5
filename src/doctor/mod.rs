//! Doctor command for preflight checks
//!
//! Confirms the machine can produce reproducible validation results before
//! any seeds are run.

use colored::Colorize;
use std::path::{Path, PathBuf};
use sysinfo::System;

use crate::suite::{run_validation_suite, REFERENCE_CHECKSUM};

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    results_dir: PathBuf,
}

impl Doctor {
    /// Create a new doctor instance
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// Run all health checks
    pub fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_platform(),
            self.check_determinism(),
            self.check_results_dir(),
            self.check_memory(),
        ]
    }

    /// Check 1: Platform identification
    fn check_platform(&self) -> HealthCheck {
        match System::name() {
            Some(_) => HealthCheck::new("Platform", HealthStatus::Pass),
            None => HealthCheck::new(
                "Platform",
                HealthStatus::Warn("Could not identify operating system".to_string()),
            ),
        }
    }

    /// Check 2: Reference suite reproduces bit-for-bit
    fn check_determinism(&self) -> HealthCheck {
        let (first, second) = match (run_validation_suite(), run_validation_suite()) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => {
                return HealthCheck::new(
                    "Determinism",
                    HealthStatus::Fail(format!("Reference suite failed: {}", e)),
                );
            }
        };

        if first.checksum.to_bits() != second.checksum.to_bits() {
            HealthCheck::new(
                "Determinism",
                HealthStatus::Fail("Repeated runs produced different checksums".to_string()),
            )
        } else if !first.matches_reference() {
            HealthCheck::new(
                "Determinism",
                HealthStatus::Fail(format!(
                    "Checksum {:.12} differs from reference {:.1}",
                    first.checksum, REFERENCE_CHECKSUM
                )),
            )
        } else {
            HealthCheck::new("Determinism", HealthStatus::Pass)
        }
    }

    /// Check 3: Results directory is writable
    fn check_results_dir(&self) -> HealthCheck {
        if let Err(e) = std::fs::create_dir_all(&self.results_dir) {
            return HealthCheck::new(
                "Results Dir",
                HealthStatus::Fail(format!("Cannot create {}: {}", self.results_dir.display(), e)),
            );
        }

        let probe = self.results_dir.join(".apex_write_test");
        match std::fs::write(&probe, "test") {
            Ok(_) => {
                let _ = std::fs::remove_file(&probe);
                HealthCheck::new("Results Dir", HealthStatus::Pass)
            }
            Err(_) => HealthCheck::new(
                "Results Dir",
                HealthStatus::Fail("No write permission in results directory".to_string()),
            ),
        }
    }

    /// Check 4: Memory availability
    fn check_memory(&self) -> HealthCheck {
        let mut sys = System::new();
        sys.refresh_memory();

        let available_mb = sys.available_memory() / (1024 * 1024);

        if available_mb < 64 {
            HealthCheck::new(
                "Memory",
                HealthStatus::Warn(format!("Low memory ({} MB available)", available_mb)),
            )
        } else {
            HealthCheck::new("Memory", HealthStatus::Pass)
        }
    }

    /// Results directory under test
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "APEX Preflight Diagnostics".bold());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in checks {
            let message = match &check.status {
                HealthStatus::Pass => "PASS".green().to_string(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow().to_string(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red().to_string(),
            };

            println!("{:<20} {}", check.name, message);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
