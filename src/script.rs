//! Render a plan into a bash job script

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use log::info;
use serde::Serialize;
use thiserror::Error;
use tinytemplate::TinyTemplate;

use crate::command::Plan;

/// included job script template
static JOB: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/job.sh"));

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Can't render job script: {0}")]
    Template(#[from] tinytemplate::error::Error),
    #[error("Can't write job script to {path}: {source}")]
    Write { path: String, source: io::Error },
}

/// A rendered job script
///
/// Each step of the plan is written on its own line under `set -euo pipefail`, which gives the same
/// run-next-only-on-success behaviour as joining the steps with `&&`.
pub struct JobScript {
    pub content: String,
}

/// Rendering context for the job script
#[derive(Serialize)]
struct ScriptContext<'a> {
    name: &'a str,
    stage: &'a str,
    time_now: String,
    steps: Vec<String>,
}

impl JobScript {
    /// Render `plan` under a job `name` for pipeline `stage`
    pub fn render(plan: &Plan, name: &str, stage: &str) -> Result<JobScript, ScriptError> {
        let mut tt = TinyTemplate::new();
        // commands carry quotes and ampersands that must reach the shell untouched
        tt.set_default_formatter(&tinytemplate::format_unescaped);
        tt.add_template("job", JOB)?;

        let context = ScriptContext {
            name,
            stage,
            time_now: Utc::now().to_rfc3339(),
            steps: plan.lines(),
        };

        Ok(JobScript { content: tt.render("job", &context)? })
    }

    /// Write the script to disk, replacing any existing file
    pub fn write(&self, out_path: &Path) -> Result<(), ScriptError> {
        info!("Writing job script to {}", out_path.display());
        let to_err = |source: io::Error| ScriptError::Write { path: out_path.display().to_string(), source };
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(out_path)
            .map_err(to_err)?;
        file.write_all(self.content.as_bytes()).map_err(to_err)?;
        Ok(())
    }
}
