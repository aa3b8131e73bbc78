//! fossa-pr-report: post FOSSA license scan results as PR comments
//!
//! Reads the scan results JSON a CI job produced, classifies the outcome,
//! renders a Markdown report, and creates or updates a single summary
//! comment on the pull request.

pub mod cli;
pub mod config;
pub mod domain;
pub mod publish;
pub mod render;
pub mod scan;
pub mod workflow;
