use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use vcplan::command::Plan;
use vcplan::config::{load_config, Config};
use vcplan::format::OutputFormat;
use vcplan::gatk;
use vcplan::interval::Interval;
use vcplan::script::JobScript;

/// Print the GATK commands for one stage of a germline variant calling pipeline
#[derive(Parser, Debug)]
#[command(name = "vcplan", version)]
struct Args {
    /// Path to the JSON pipeline configuration
    #[arg(short, long)]
    config: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Line)]
    format: OutputFormat,

    /// Job name written into rendered scripts, defaults to the stage name
    #[arg(long)]
    name: Option<String>,

    /// Write the plan to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    #[command(subcommand)]
    stage: Stage,
}

#[derive(Subcommand, Debug)]
enum Stage {
    /// Mark duplicate reads
    Markdup {
        #[arg(short = 'I', long)]
        input: String,
        #[arg(short = 'O', long)]
        output: String,
        #[arg(short = 'M', long)]
        metrics: String,
    },
    /// Recalibrate base quality scores
    Bqsr {
        #[arg(short = 'I', long)]
        input: String,
        #[arg(short = 'O', long)]
        output: String,
        #[arg(long)]
        recal_table: String,
    },
    /// Call one sample in GVCF mode
    HaplotypeCaller {
        #[arg(short = 'I', long)]
        input: String,
        #[arg(short = 'O', long)]
        output: String,
        /// Region as `contig`, `contig start` or `contig start end`
        #[arg(short = 'L', long, num_args = 1..)]
        interval: Vec<String>,
    },
    /// Combine sample gVCFs and joint genotype them
    Genotype {
        #[arg(short = 'V', long = "gvcf", required = true)]
        gvcfs: Vec<String>,
        #[arg(short = 'O', long)]
        output: String,
        /// Region as `contig`, `contig start` or `contig start end`
        #[arg(short = 'L', long, num_args = 1..)]
        interval: Vec<String>,
    },
    /// Recalibrate variant quality scores
    Vqsr {
        #[arg(short = 'I', long)]
        input: String,
        #[arg(short = 'O', long)]
        output: String,
    },
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::Markdup { .. } => "markdup",
            Stage::Bqsr { .. } => "bqsr",
            Stage::HaplotypeCaller { .. } => "haplotype-caller",
            Stage::Genotype { .. } => "genotype",
            Stage::Vqsr { .. } => "vqsr",
        }
    }

    fn plan(&self, config: &Config) -> Result<Plan> {
        let plan = match self {
            Stage::Markdup { input, output, metrics } => gatk::markduplicates(config, input, output, metrics),
            Stage::Bqsr { input, output, recal_table } => gatk::baserecalibrator(config, input, output, recal_table),
            Stage::HaplotypeCaller { input, output, interval } => {
                let interval = Interval::from_parts(interval)?;
                gatk::haplotypecaller_gvcf(config, input, output, &interval)
            }
            Stage::Genotype { gvcfs, output, interval } => {
                let interval = Interval::from_parts(interval)?;
                gatk::genotypegvcfs(config, gvcfs, output, &interval)?
            }
            Stage::Vqsr { input, output } => gatk::variantrecalibrator(config, input, output)?,
        };
        Ok(plan)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let stage = args.stage.name();
    info!("terve! planning stage {}", stage);

    let config = load_config(&args.config)
        .with_context(|| format!("Loading configuration {}", args.config.display()))?;
    let plan = args.stage.plan(&config).with_context(|| format!("Planning stage {}", stage))?;
    info!("Planned {} steps", plan.len());

    let content = match args.format {
        OutputFormat::Line => format!("{}\n", plan),
        OutputFormat::Steps => plan.lines().iter().map(|line| format!("{}\n", line)).collect(),
        OutputFormat::Script => {
            let name = args.name.as_deref().unwrap_or(stage);
            let script = JobScript::render(&plan, name, stage)?;
            if let Some(path) = &args.save {
                script.write(path)?;
                return Ok(());
            }
            script.content
        }
    };

    match &args.save {
        Some(path) => {
            info!("Writing {} plan to {}", args.format, path.display());
            fs::write(path, content).with_context(|| format!("Writing plan to {}", path.display()))?;
        }
        None => print!("{}", content),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_is_separate_from_stage_output() {
        let args = Args::try_parse_from([
            "vcplan", "--config", "cfg.json", "--format", "script", "--save", "job.sh",
            "genotype", "-V", "a.g.vcf.gz", "-V", "b.g.vcf.gz", "--output", "cohort.vcf.gz", "-L", "chr1", "100", "200",
        ])
        .unwrap();
        assert_eq!(args.save, Some(PathBuf::from("job.sh")));
        assert_eq!(args.format, OutputFormat::Script);
        match args.stage {
            Stage::Genotype { gvcfs, output, interval } => {
                assert_eq!(gvcfs, vec!["a.g.vcf.gz", "b.g.vcf.gz"]);
                assert_eq!(output, "cohort.vcf.gz");
                assert_eq!(interval, vec!["chr1", "100", "200"]);
            }
            other => panic!("expected genotype, got {:?}", other),
        }
    }

    #[test]
    fn test_save_defaults_to_stdout() {
        let args = Args::try_parse_from(["vcplan", "-c", "cfg.json", "vqsr", "-I", "in.vcf.gz", "-O", "out.vcf.gz"]).unwrap();
        assert_eq!(args.save, None);
        assert_eq!(args.format, OutputFormat::Line);
        assert_eq!(args.stage.name(), "vqsr");
    }
}
