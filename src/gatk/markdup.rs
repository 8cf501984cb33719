use log::info;

use crate::command::{GatkCommand, GatkTool, Plan};
use crate::config::Config;

/// Mark duplicate reads in an alignment
///
/// `MarkDuplicates -I <input> -M <metrics> -O <output>`. Engine options come from
/// `markdup_java_options`.
pub fn markduplicates(config: &Config, input_bam: &str, output_markdup_bam: &str, out_metrics_fname: &str) -> Plan {
    info!("Planning MarkDuplicates for {}", input_bam);
    let gatk = &config.gatk;
    let cmd = GatkCommand::new(&gatk.gatk, &gatk.markdup_java_options, GatkTool::MarkDuplicates)
        .arg("-I", input_bam)
        .arg("-M", out_metrics_fname)
        .arg("-O", output_markdup_bam);

    Plan::new().then(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::tests::minimal_config;

    #[test]
    fn test_markduplicates_without_options() {
        let config = minimal_config();
        let plan = markduplicates(&config, "s1.bam", "s1.markdup.bam", "s1.metrics.txt");
        assert_eq!(plan.len(), 1);
        assert_eq!(
            plan.to_string(),
            "time gatk MarkDuplicates -I s1.bam -M s1.metrics.txt -O s1.markdup.bam"
        );
        assert!(!plan.to_string().contains("--java-options"));
    }

    #[test]
    fn test_markduplicates_injects_java_options() {
        let mut config = minimal_config();
        config.gatk.markdup_java_options = vec!["-Xmx8G".to_string(), "-XX:+UseSerialGC".to_string()];
        let plan = markduplicates(&config, "s1.bam", "s1.markdup.bam", "s1.metrics.txt");
        assert_eq!(
            plan.to_string(),
            "time gatk --java-options \"-Xmx8G -XX:+UseSerialGC\" MarkDuplicates \
             -I s1.bam -M s1.metrics.txt -O s1.markdup.bam"
        );
    }
}
