use log::info;

use crate::command::{GatkCommand, GatkTool, Plan};
use crate::config::Config;
use crate::gatk::describe;
use crate::interval::Interval;

/// Call one sample in reference-confidence (GVCF) mode
pub fn haplotypecaller_gvcf(config: &Config, input_bam: &str, output_gvcf_fname: &str, interval: &Interval) -> Plan {
    info!("Planning HaplotypeCaller for {} over {}", input_bam, describe(interval));
    let gatk = &config.gatk;
    let cmd = GatkCommand::new(&gatk.gatk, &gatk.hc_gvcf_java_options, GatkTool::HaplotypeCaller)
        .arg("-R", &config.resources.reference)
        .arg("--emit-ref-confidence", "GVCF")
        .arg("-I", input_bam)
        .arg("-O", output_gvcf_fname)
        .arg_opt("-L", interval.token());

    Plan::new().then(cmd)
}
