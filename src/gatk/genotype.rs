//! Joint genotyping of a cohort
//!
//! No single GATK tool scales from one sample to thousands, so the combination step depends on how
//! many gVCFs are supplied:
//!
//! | gVCFs | combination                       | genotyped source      | cleanup            |
//! | ----- | --------------------------------- | --------------------- | ------------------ |
//! | 1     | none                              | the input gVCF        | none               |
//! | 2     | `CombineGVCFs` into `<prefix>.g.vcf` | the merged gVCF    | merged gVCF, index |
//! | > 2   | `GenomicsDBImport` into `<prefix>.gvcfs_db` | `gendb://` workspace | workspace |
//!
//! `<prefix>` is the output path without its `.vcf.gz` suffix.

use std::fmt;

use log::{info, warn};

use crate::command::{GatkCommand, GatkTool, Plan, Remove};
use crate::config::Config;
use crate::error::{PlanError, Result};
use crate::gatk::{describe, index_sidecar, output_prefix};
use crate::interval::Interval;

/// How sample gVCFs are brought together before genotyping
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Combine {
    /// A single gVCF is genotyped as is
    Direct { gvcf: String },
    /// Two gVCFs are merged with CombineGVCFs
    Merge { merged: String },
    /// Many gVCFs are imported into a GenomicsDB workspace
    Workspace { workspace: String },
}

impl Combine {
    /// Pick the strategy for `input_sample_gvcfs` with paths derived from `output_vcf_fname`
    pub fn choose(input_sample_gvcfs: &[String], output_vcf_fname: &str) -> Result<Combine> {
        let prefix = output_prefix(output_vcf_fname);
        let combine = match input_sample_gvcfs {
            [] => return Err(PlanError::EmptyCohort),
            [gvcf] => Combine::Direct { gvcf: gvcf.clone() },
            [_, _] => Combine::Merge { merged: format!("{}.g.vcf", prefix) },
            _ => Combine::Workspace { workspace: format!("{}.gvcfs_db", prefix) },
        };

        // the combination step writes these and the cleanup deletes them
        for path in combine.intermediates() {
            if input_sample_gvcfs.contains(&path) {
                return Err(PlanError::IntermediateCollision { path });
            }
        }
        Ok(combine)
    }

    /// The `-V` value for GenotypeGVCFs
    pub fn source(&self) -> String {
        match self {
            Combine::Direct { gvcf } => gvcf.clone(),
            Combine::Merge { merged } => merged.clone(),
            Combine::Workspace { workspace } => format!("gendb://{}", workspace),
        }
    }

    /// Intermediates to delete once genotyping succeeded
    ///
    /// Empty for a single gVCF: the only file involved is the caller's input.
    pub fn intermediates(&self) -> Vec<String> {
        match self {
            Combine::Direct { .. } => Vec::new(),
            Combine::Merge { merged } => vec![merged.clone(), index_sidecar(merged)],
            Combine::Workspace { workspace } => vec![workspace.clone()],
        }
    }
}

impl fmt::Display for Combine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Combine::Direct { .. } => write!(f, "direct"),
            Combine::Merge { .. } => write!(f, "CombineGVCFs"),
            Combine::Workspace { .. } => write!(f, "GenomicsDBImport"),
        }
    }
}

/// Combine sample gVCFs (when there is more than one) and joint genotype them
///
/// The interval, if any, restricts the combination step; GenotypeGVCFs inherits the region from
/// its input.
pub fn genotypegvcfs(
    config: &Config,
    input_sample_gvcfs: &[String],
    output_vcf_fname: &str,
    interval: &Interval,
) -> Result<Plan> {
    let combine = Combine::choose(input_sample_gvcfs, output_vcf_fname)?;
    info!(
        "Planning joint genotyping of {} gVCFs over {} using {}",
        input_sample_gvcfs.len(),
        describe(interval),
        combine
    );

    let gatk = &config.gatk;
    let java_options = &gatk.genotype_java_options;
    let reference = &config.resources.reference;
    let mut plan = Plan::new();

    match &combine {
        Combine::Direct { .. } => {}
        Combine::Merge { merged } => {
            let cmd = GatkCommand::new(&gatk.gatk, java_options, GatkTool::CombineGvcfs)
                .arg("-R", reference)
                .args("-V", input_sample_gvcfs)
                .arg("-O", merged)
                .arg_opt("-L", interval.token());
            plan.push(cmd);
        }
        Combine::Workspace { workspace } => {
            // GenomicsDBImport refuses to write into an existing workspace
            warn!("Any existing workspace at {} will be removed before import", workspace);
            plan.push(Remove::recursive(vec![workspace.clone()]));
            let cmd = GatkCommand::new(&gatk.gatk, java_options, GatkTool::GenomicsDbImport)
                .raw(&gatk.genomicsdb_import_options)
                .arg("-R", reference)
                .args("-V", input_sample_gvcfs)
                .arg("--genomicsdb-workspace-path", workspace)
                .arg_opt("-L", interval.token());
            plan.push(cmd);
        }
    }

    plan.push(
        GatkCommand::new(&gatk.gatk, java_options, GatkTool::GenotypeGvcfs)
            .arg("-R", reference)
            .arg("-V", combine.source())
            .arg("-O", output_vcf_fname),
    );

    let intermediates = combine.intermediates();
    if !intermediates.is_empty() {
        plan.push(Remove::recursive(intermediates));
    }

    Ok(plan)
}
