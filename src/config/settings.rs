use serde::{Deserialize, Serialize};

/// Complete pipeline configuration
///
/// Only the GATK section and the reference are read by the planner. Every `*_options` list is
/// optional and defaults to empty, so a stage without extra options renders no option block.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub gatk: Gatk,
    pub resources: Resources,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Gatk {
    /// Path to the gatk wrapper script
    pub gatk: String,
    #[serde(default)]
    pub markdup_java_options: Vec<String>,
    #[serde(default)]
    pub bqsr_java_options: Vec<String>,
    #[serde(default)]
    pub hc_gvcf_java_options: Vec<String>,
    #[serde(default)]
    pub genotype_java_options: Vec<String>,
    /// Tool options for GenomicsDBImport, not JVM options
    #[serde(default, rename = "genomicsDBImport_options")]
    pub genomicsdb_import_options: Vec<String>,
    #[serde(default)]
    pub vqsr_java_options: Vec<String>,
    /// Appended to every VariantRecalibrator command
    #[serde(default)]
    pub vqsr_options: Vec<String>,
    pub bundle: Bundle,
}

/// Known-variant resource bundle
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Bundle {
    pub hapmap: String,
    pub omni: String,
    #[serde(rename = "1000G")]
    pub thousand_genomes: String,
    /// Mills and 1000G gold standard indels
    pub mills: String,
    #[serde(rename = "1000G_known_indel")]
    pub known_indels: String,
    pub dbsnp: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Resources {
    /// Reference FASTA
    pub reference: String,
}
