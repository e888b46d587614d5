//! Submission package: results, verification hash and system info

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use sysinfo::System;
use tokio::fs;
use uuid::Uuid;

use crate::errors::{HarnessError, Result};
use crate::report::persistence::{load_json, save_json};

/// Machine the validation ran on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorSystem {
    pub os: String,
    pub os_version: Option<String>,
    pub arch: String,
    pub harness_version: String,
}

impl ValidatorSystem {
    /// Describe the current machine
    pub fn detect() -> Self {
        Self {
            os: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            os_version: System::os_version(),
            arch: std::env::consts::ARCH.to_string(),
            harness_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Contents of `submission.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPackage {
    pub submission_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub validator_system: ValidatorSystem,
    pub validation_results: Value,
    pub checksum_verification: Option<f64>,
}

impl SubmissionPackage {
    /// Wrap loaded results for submission
    pub fn new(validation_results: Value) -> Self {
        let checksum_verification = validation_results.get("checksum").and_then(Value::as_f64);

        Self {
            submission_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            validator_system: ValidatorSystem::detect(),
            validation_results,
            checksum_verification,
        }
    }

    /// Text written to `system_info.txt`
    pub fn system_info_text(&self) -> String {
        let sys = &self.validator_system;
        format!(
            "OS: {} {}\nArch: {}\nHarness: {}\nTimestamp: {}\n",
            sys.os,
            sys.os_version.as_deref().unwrap_or("unknown"),
            sys.arch,
            sys.harness_version,
            self.timestamp.to_rfc3339()
        )
    }
}

/// Paths of the three generated files
#[derive(Debug, Clone)]
pub struct SubmissionFiles {
    pub submission: PathBuf,
    pub verification_hash: PathBuf,
    pub system_info: PathBuf,
}

impl SubmissionFiles {
    /// All paths in generation order
    pub fn all(&self) -> [&Path; 3] {
        [&self.submission, &self.verification_hash, &self.system_info]
    }
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, sorted(v))).collect();
            let mut out = Map::new();
            for (k, v) in ordered {
                out.insert(k.clone(), v);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// SHA-256 (hex) of the key-sorted compact JSON encoding of `results`
pub fn verification_hash(results: &Value) -> Result<String> {
    let canonical = serde_json::to_string(&sorted(results))?;
    let digest = Sha256::digest(canonical.as_bytes());
    Ok(hex::encode(digest))
}

/// Build the submission package from a saved results file
pub async fn generate_submission(results_file: &Path, submit_dir: &Path) -> Result<SubmissionFiles> {
    if fs::metadata(results_file).await.is_err() {
        return Err(HarnessError::ConfigError(format!(
            "No validation results found at {}; run `apex validate` first",
            results_file.display()
        )));
    }

    let results: Value = load_json(results_file).await?;
    let hash = verification_hash(&results)?;
    let package = SubmissionPackage::new(results);

    fs::create_dir_all(submit_dir).await?;

    let files = SubmissionFiles {
        submission: submit_dir.join("submission.json"),
        verification_hash: submit_dir.join("verification_hash.txt"),
        system_info: submit_dir.join("system_info.txt"),
    };

    save_json(&files.submission, &package).await?;
    fs::write(
        &files.verification_hash,
        format!("APEX 3.0 Validation Hash\nSHA-256: {}\n", hash),
    )
    .await?;
    fs::write(&files.system_info, package.system_info_text()).await?;

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::run_validation_suite;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_hash_ignores_key_order() {
        let a = json!({"b": 1, "a": {"y": 2.5, "x": [1, 2]}});
        let b = json!({"a": {"x": [1, 2], "y": 2.5}, "b": 1});
        assert_eq!(verification_hash(&a).unwrap(), verification_hash(&b).unwrap());
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = verification_hash(&json!({"checksum": 15.0})).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_changes_with_content() {
        let a = verification_hash(&json!({"checksum": 15.0})).unwrap();
        let b = verification_hash(&json!({"checksum": 15.1})).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_package_extracts_checksum() {
        let package = SubmissionPackage::new(json!({"checksum": 15.0}));
        assert_eq!(package.checksum_verification, Some(15.0));

        let package = SubmissionPackage::new(json!({"summary": {}}));
        assert_eq!(package.checksum_verification, None);
    }

    #[test]
    fn test_missing_results_file() {
        let temp = TempDir::new().unwrap();
        let result = tokio_test::block_on(generate_submission(
            &temp.path().join("missing.json"),
            &temp.path().join("submit"),
        ));
        assert!(matches!(result, Err(HarnessError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_generate_submission_files() {
        let temp = TempDir::new().unwrap();
        let results_file = temp.path().join("results").join("validation_output.json");
        let submit_dir = temp.path().join("submit_results");

        let report = run_validation_suite().unwrap();
        save_json(&results_file, &report).await.unwrap();

        let files = generate_submission(&results_file, &submit_dir).await.unwrap();
        for path in files.all() {
            assert!(path.exists(), "{} missing", path.display());
        }

        let package: SubmissionPackage = load_json(&files.submission).await.unwrap();
        let checksum = package.checksum_verification.unwrap();
        assert!((checksum - report.checksum).abs() < 1e-12);

        let saved: Value = load_json(&results_file).await.unwrap();
        let expected = verification_hash(&saved).unwrap();
        let hash_text = std::fs::read_to_string(&files.verification_hash).unwrap();
        assert!(hash_text.contains(&expected));
    }
}
