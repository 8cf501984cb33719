//! Build GATK command plans for each stage of germline variant discovery
//!
//! Every builder is a pure function of the configuration and its arguments. Intermediate file
//! names are derived from the requested output path only, so callers that use distinct output
//! paths never share intermediates.

/// Duplicate marking
pub mod markdup;

/// Base quality score recalibration
pub mod bqsr;

/// Per-sample calling in GVCF mode
pub mod haplotype;

/// Combine sample gVCFs and genotype the cohort
pub mod genotype;

/// Variant quality score recalibration, SNPs then indels
pub mod vqsr;

use crate::interval::Interval;

pub use bqsr::baserecalibrator;
pub use genotype::{genotypegvcfs, Combine};
pub use haplotype::haplotypecaller_gvcf;
pub use markdup::markduplicates;
pub use vqsr::{variantrecalibrator, VqsrPaths};

/// Output path without a trailing `.gz` and then `.vcf`
///
/// Only suffixes are removed, so directories named like `calls.vcf/` are left alone.
pub(crate) fn output_prefix(output: &str) -> &str {
    let output = output.strip_suffix(".gz").unwrap_or(output);
    output.strip_suffix(".vcf").unwrap_or(output)
}

/// Interval as written in log messages
pub(crate) fn describe(interval: &Interval) -> String {
    interval.token().unwrap_or_else(|| "the whole genome".to_string())
}

/// Index written next to a (b)gzipped or plain VCF
pub(crate) fn index_sidecar(path: &str) -> String {
    if path.ends_with(".gz") {
        format!("{}.tbi", path)
    } else {
        format!("{}.idx", path)
    }
}
