//! Plan the shell commands of a GATK germline variant discovery pipeline
//!
//! Each pipeline stage has a builder in [`gatk`] that turns a validated [`config::Config`] and
//! stage inputs into a [`command::Plan`]. Plans are never executed here: they are printed, or
//! rendered into a job script, for an external runner.

pub mod command;
pub mod config;
pub mod error;
pub mod format;
pub mod gatk;
pub mod interval;
pub mod script;

pub use command::{GatkTool, Plan, Step};
pub use error::PlanError;
pub use interval::Interval;
