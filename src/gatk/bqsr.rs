use log::info;

use crate::command::{GatkCommand, GatkTool, Plan};
use crate::config::Config;

/// Recalibrate base qualities: build a recalibration table, then apply it
///
/// The table written by `BaseRecalibrator` is the exact file read by `ApplyBQSR`. Known sites are
/// the known indels, the Mills gold standard indels, and dbSNP, in that order.
pub fn baserecalibrator(config: &Config, input_bam: &str, output_bqsr_bam: &str, out_bqsr_recal_table: &str) -> Plan {
    info!("Planning BQSR for {} with table {}", input_bam, out_bqsr_recal_table);
    let gatk = &config.gatk;
    let java_options = &gatk.bqsr_java_options;
    let reference = &config.resources.reference;
    let bundle = &gatk.bundle;

    let recal_data = GatkCommand::new(&gatk.gatk, java_options, GatkTool::BaseRecalibrator)
        .arg("-R", reference)
        .args("--known-sites", [&bundle.known_indels, &bundle.mills, &bundle.dbsnp])
        .arg("-I", input_bam)
        .arg("-O", out_bqsr_recal_table);

    let apply_bqsr = GatkCommand::new(&gatk.gatk, java_options, GatkTool::ApplyBqsr)
        .arg("-R", reference)
        .arg("--bqsr-recal-file", out_bqsr_recal_table)
        .arg("-I", input_bam)
        .arg("-O", output_bqsr_bam);

    Plan::new().then(recal_data).then(apply_bqsr)
}
