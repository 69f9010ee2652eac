//! Background job tracking for long-running analyses.

pub mod jobs;

pub use jobs::{JobRecord, JobStatus, JobStore};
