use log::info;

use crate::command::{GatkCommand, GatkTool, Plan, Remove};
use crate::config::Config;
use crate::error::{PlanError, Result};
use crate::gatk::output_prefix;

/// Truth sensitivity used when applying both the SNP and the indel model
pub const TRUTH_SENSITIVITY_FILTER_LEVEL: &str = "99.0";

/// A VariantRecalibrator resource with its prior and classification
///
/// These tuples are part of the GATK best-practice contract and must not drift.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingResource<'a> {
    pub name: &'a str,
    pub known: bool,
    pub training: bool,
    pub truth: bool,
    pub prior: f64,
    pub path: &'a str,
}

impl TrainingResource<'_> {
    pub fn flag(&self) -> String {
        format!(
            "--resource:{},known={},training={},truth={},prior={:.1}",
            self.name, self.known, self.training, self.truth, self.prior
        )
    }
}

/// File names shared by the SNP and indel passes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VqsrPaths {
    pub snp_tranches: String,
    pub snp_recal: String,
    /// Output of the SNP pass, input of the indel pass, deleted at the end
    pub snp_filtered: String,
    pub indel_tranches: String,
    pub indel_recal: String,
}

impl VqsrPaths {
    pub fn new(output_vcf_fname: &str) -> VqsrPaths {
        let prefix = output_prefix(output_vcf_fname);
        VqsrPaths {
            snp_tranches: format!("{}.SNPs.tranches", prefix),
            snp_recal: format!("{}.SNPs.recal", prefix),
            snp_filtered: format!("{}.SNPs.vcf.gz", prefix),
            indel_tranches: format!("{}.INDELs.tranches", prefix),
            indel_recal: format!("{}.INDELs.recal", prefix),
        }
    }

    /// Every file written under the shared prefix
    pub fn all(&self) -> [&str; 5] {
        [&self.snp_tranches, &self.snp_recal, &self.snp_filtered, &self.indel_tranches, &self.indel_recal]
    }
}

/// Recalibrate variant quality scores, SNPs first and then indels
///
/// The indel model is trained and applied on the SNP-filtered intermediate, which is removed once
/// the final output is written. `vqsr_options` are appended to both training commands.
///
/// The input may not share a name with the output or any derived file, since it would be
/// overwritten (and for the SNP-filtered intermediate, deleted).
pub fn variantrecalibrator(config: &Config, input_vcf: &str, output_vcf_fname: &str) -> Result<Plan> {
    info!("Planning VQSR for {} into {}", input_vcf, output_vcf_fname);
    let paths = VqsrPaths::new(output_vcf_fname);
    if input_vcf == output_vcf_fname || paths.all().contains(&input_vcf) {
        return Err(PlanError::IntermediateCollision { path: input_vcf.to_string() });
    }

    let gatk = &config.gatk;
    let java_options = &gatk.vqsr_java_options;
    let reference = &config.resources.reference;
    let bundle = &gatk.bundle;

    let snp_resources = [
        resource("hapmap", [false, true, true], 15.0, &bundle.hapmap),
        resource("omni", [false, true, false], 12.0, &bundle.omni),
        resource("1000G", [false, true, false], 10.0, &bundle.thousand_genomes),
        resource("dbsnp", [true, false, false], 2.0, &bundle.dbsnp),
    ];
    let indel_resource = resource("mills", [true, true, true], 12.0, &bundle.mills);

    let mut snp_vqsr = GatkCommand::new(&gatk.gatk, java_options, GatkTool::VariantRecalibrator)
        .arg("-R", reference)
        .arg("-V", input_vcf);
    for snp_resource in &snp_resources {
        snp_vqsr = snp_vqsr.arg(&snp_resource.flag(), snp_resource.path);
    }
    let snp_vqsr = snp_vqsr
        .raw(&gatk.vqsr_options)
        .arg("-mode", "SNP")
        .arg("--tranches-file", &paths.snp_tranches)
        .arg("-O", &paths.snp_recal);

    let apply_snp_vqsr = GatkCommand::new(&gatk.gatk, java_options, GatkTool::ApplyVqsr)
        .arg("-R", reference)
        .arg("-V", input_vcf)
        .arg("--tranches-file", &paths.snp_tranches)
        .arg("--recal-file", &paths.snp_recal)
        .arg("--truth-sensitivity-filter-level", TRUTH_SENSITIVITY_FILTER_LEVEL)
        .arg("-mode", "SNP")
        .arg("-O", &paths.snp_filtered);

    let indel_vqsr = GatkCommand::new(&gatk.gatk, java_options, GatkTool::VariantRecalibrator)
        .arg("-R", reference)
        .arg("-V", &paths.snp_filtered)
        .arg(&indel_resource.flag(), indel_resource.path)
        .raw(&gatk.vqsr_options)
        .arg("--tranches-file", &paths.indel_tranches)
        .arg("-mode", "INDEL")
        .arg("-O", &paths.indel_recal);

    let apply_indel_vqsr = GatkCommand::new(&gatk.gatk, java_options, GatkTool::ApplyVqsr)
        .arg("-R", reference)
        .arg("-V", &paths.snp_filtered)
        .arg("--truth-sensitivity-filter-level", TRUTH_SENSITIVITY_FILTER_LEVEL)
        .arg("--tranches-file", &paths.indel_tranches)
        .arg("--recal-file", &paths.indel_recal)
        .arg("-mode", "INDEL")
        .arg("-O", output_vcf_fname);

    Ok(Plan::new()
        .then(snp_vqsr)
        .then(apply_snp_vqsr)
        .then(indel_vqsr)
        .then(apply_indel_vqsr)
        .then(Remove::files(vec![paths.snp_filtered])))
}

/// `[known, training, truth]` flags with a prior
fn resource<'a>(name: &'a str, [known, training, truth]: [bool; 3], prior: f64, path: &'a str) -> TrainingResource<'a> {
    TrainingResource { name, known, training, truth, prior, path }
}
