//! Result persistence and submission packaging
//!
//! The core hands plain structured data to this layer, which serializes it
//! unmodified.

pub mod persistence;
pub mod submission;

pub use persistence::{load_json, save_json};
pub use submission::{
    generate_submission, verification_hash, SubmissionFiles, SubmissionPackage, ValidatorSystem,
};
