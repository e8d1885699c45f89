// Gist: quality metrics for machine-generated summaries
//
// This is the library root. Each module corresponds to a major subsystem
// of the evaluation pipeline.

pub mod config;
pub mod corpus;
pub mod embed;
pub mod judge;
pub mod metrics;
pub mod output;
pub mod text;
